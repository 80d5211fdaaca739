// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene graph with ordered display lists and stage lifecycle.
//!
//! `tableau_core` maintains the parent/child structure of a 2D animation
//! scene. It is `no_std` compatible (with `alloc`) and stores nodes in
//! struct-of-arrays slots addressed by generational handles.
//!
//! # Architecture
//!
//! ```text
//!   Scene::add_child / remove_child / clear
//!       │
//!       ▼
//!   DisplayList (ordered children, sibling links)
//!       │
//!       ▼
//!   activate(stage) / deactivate() ──► MovieRegistry (per stage)
//!       │
//!       ▼
//!   Scene::collect_changes() ──► SceneChanges
//! ```
//!
//! **[`scene`]**: Node storage, display lists, lifecycle propagation and
//! bounding-box aggregation. Every well-formedness rule (exclusive
//! parentage, acyclicity, sibling links) is maintained by the display list
//! operations; invalid-but-recoverable requests are silent no-ops.
//!
//! **[`stage`]**: Stage handles and the per-stage movie registry.
//!
//! **[`dirty`]**: Dirty channels via `understory_dirty`. `mark_update`
//! dirties whole subtrees; structural changes dirty the owning node.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! scene instrumentation, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod dirty;
pub mod scene;
pub mod stage;
pub mod trace;
