// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene graph data model.
//!
//! A *node* is an entry in the display tree. Each node has:
//!
//! - An identity ([`NodeId`]), a generational handle that becomes stale when
//!   the node is destroyed.
//! - A [`NodeKind`]. Containers and movies own a display list: the ordered
//!   sequence of their immediate children. Sequence order is paint order.
//! - Non-owning links: `parent`, `next` (the following sibling), and `stage`
//!   (the active render root, if any). The owning direction is always
//!   parent → children sequence.
//! - A position and, for leaves, content bounds; containers compute their
//!   bounds from their children (see [`Scene::get_computed`]).
//!
//! # Invariants
//!
//! The display list operations keep the tree well formed:
//!
//! - A node sits in at most one display list at a time. Adding a node that
//!   already has a parent moves it.
//! - No node is its own ancestor. Adding an ancestor of the owner (or the
//!   owner itself) is ignored.
//! - `next` of each child points at the following child; the last child has
//!   no `next`. [`Scene::siblings_from`] walks those links.
//! - A node has a stage if and only if it was activated directly or is
//!   reachable from such a node. Display list operations run the
//!   [lifecycle hooks](Scene::activate) to keep this true.

mod ancestors;
mod changes;
mod computed;
mod display_list;
mod id;
mod lifecycle;
mod store;
mod traverse;

pub use ancestors::Ancestors;
pub use changes::SceneChanges;
pub use computed::{Computed, ComputedBox, ComputedKey, Edge, UnknownComputedKey};
pub use display_list::DisplayList;
pub use id::{INVALID, NodeId, NodeKind};
pub use store::Scene;
pub use traverse::Siblings;
