// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change collection.
//!
//! Mutations accumulate in dirty channels and lifecycle lists until
//! [`Scene::collect_changes`] drains them into a [`SceneChanges`]:
//!
//! 1. **UPDATE**: nodes marked by [`mark_update`](Scene::mark_update) or a
//!    property setter.
//! 2. **STRUCTURE**: owners whose display list changed.
//! 3. Lifecycle: nodes that gained or lost a stage, in the order the hooks
//!    ran.
//!
//! Like other raw-index data in this crate, the lists hold slot indices
//! (`u32`) rather than [`NodeId`](super::NodeId) handles.

use alloc::vec::Vec;

use super::store::Scene;
use crate::dirty;

/// The set of changes drained by a single [`Scene::collect_changes`] call.
#[derive(Clone, Debug, Default)]
pub struct SceneChanges {
    /// Nodes marked for update.
    pub updated: Vec<u32>,
    /// Nodes whose display list changed.
    pub restructured: Vec<u32>,
    /// Nodes that gained a stage (or switched stages).
    pub activated: Vec<u32>,
    /// Nodes that lost their stage.
    pub deactivated: Vec<u32>,
    /// Whether any display list changed.
    pub topology_changed: bool,
}

impl SceneChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.updated.clear();
        self.restructured.clear();
        self.activated.clear();
        self.deactivated.clear();
        self.topology_changed = false;
    }

    /// Returns whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty()
            && self.restructured.is_empty()
            && self.activated.is_empty()
            && self.deactivated.is_empty()
            && !self.topology_changed
    }
}

impl Scene {
    /// Drains all pending changes.
    pub fn collect_changes(&mut self) -> SceneChanges {
        let mut changes = SceneChanges::default();
        self.collect_changes_into(&mut changes);
        changes
    }

    /// Like [`collect_changes`](Self::collect_changes), but reuses a
    /// caller-provided buffer.
    pub fn collect_changes_into(&mut self, changes: &mut SceneChanges) {
        changes.clear();

        changes
            .updated
            .extend(self.dirty.drain(dirty::UPDATE).deterministic().run());
        changes
            .restructured
            .extend(self.dirty.drain(dirty::STRUCTURE).deterministic().run());

        core::mem::swap(&mut self.pending_activated, &mut changes.activated);
        core::mem::swap(&mut self.pending_deactivated, &mut changes.deactivated);
        changes.topology_changed = core::mem::take(&mut self.topology_changed);
    }
}
