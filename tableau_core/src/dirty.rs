// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The scene uses multi-channel dirty tracking (via [`understory_dirty`]).
//! Each channel represents an independent category of change:
//!
//! - [`UPDATE`] is marked by [`Scene::mark_update`](crate::scene::Scene::mark_update)
//!   on every node of the subtree, and by property setters on the node
//!   itself. Propagation is explicit (the display list is walked), so no
//!   dependency edges are registered.
//!
//! - [`STRUCTURE`] is marked on the owner of a display list whenever its
//!   children change (insert, remove, clear).
//!
//! Both channels are drained by
//! [`Scene::collect_changes`](crate::scene::Scene::collect_changes).

use understory_dirty::Channel;

/// The node needs to be redrawn or re-evaluated.
pub const UPDATE: Channel = Channel::new(0);

/// The node's display list changed.
pub const STRUCTURE: Channel = Channel::new(1);
