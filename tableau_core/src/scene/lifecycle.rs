// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Activation and deactivation of subtrees.
//!
//! Activation records a stage on a node and then on every descendant, in
//! parent-before-children, sibling order. Deactivation clears it the same
//! way. Display list operations call these hooks on every node they attach
//! or detach, so a node has a stage exactly when it hangs below an activated
//! root.
//!
//! [`NodeKind::Movie`] nodes additionally keep themselves in their stage's
//! [`MovieRegistry`]: a movie registers when it gains a stage and
//! deregisters when it loses one, before the walk continues into its
//! children. Each movie handles only itself; nested movies register through
//! their own step of the walk.

use alloc::vec;

use super::id::{INVALID, NodeId, NodeKind};
use super::store::Scene;
use crate::stage::{MovieRegistry, StageId};
use crate::trace::{LifecycleEvent, RegistryEvent};

impl Scene {
    /// Creates a new stage with an empty movie registry.
    pub fn create_stage(&mut self) -> StageId {
        let idx = u32::try_from(self.stages.len()).unwrap_or(INVALID);
        assert!(idx != INVALID, "too many stages");
        self.stages.push(MovieRegistry::new());
        StageId(idx)
    }

    /// Returns the movie registry of `stage`.
    ///
    /// # Panics
    ///
    /// Panics if the stage was not created by this scene.
    #[must_use]
    pub fn movies(&self, stage: StageId) -> &MovieRegistry {
        self.validate_stage(stage);
        &self.stages[stage.0 as usize]
    }

    /// Activates `id` and its subtree with `stage`.
    ///
    /// Passing `None` propagates the absence of a stage, which leaves the
    /// subtree inactive. Activating an already active node with the same
    /// stage changes nothing.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the stage is unknown.
    pub fn activate(&mut self, id: NodeId, stage: Option<StageId>) {
        self.validate(id);
        if let Some(stage) = stage {
            self.validate_stage(stage);
        }
        self.activate_from(id.idx, stage.map_or(INVALID, |s| s.0));
    }

    /// Deactivates `id` and its subtree.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn deactivate(&mut self, id: NodeId) {
        self.validate(id);
        self.deactivate_from(id.idx);
    }

    pub(crate) fn activate_from(&mut self, idx: u32, stage: u32) {
        self.propagate_stage(idx, stage);
    }

    pub(crate) fn deactivate_from(&mut self, idx: u32) {
        self.propagate_stage(idx, INVALID);
    }

    /// Applies `stage` to `idx` and then to its descendants, pre-order.
    fn propagate_stage(&mut self, idx: u32, stage: u32) {
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            self.set_stage(current, stage);
            if let Some(list) = &self.display_list[current as usize] {
                stack.extend(list.children.iter().rev());
            }
        }
    }

    /// The per-node hook: records the stage and maintains the movie registry.
    fn set_stage(&mut self, idx: u32, new: u32) {
        let old = self.stage[idx as usize];
        if old == new {
            return;
        }
        let node = self.handle(idx);
        let is_movie = self.kind[idx as usize] == NodeKind::Movie;

        if is_movie && old != INVALID && self.stages[old as usize].remove(node) {
            self.tracer().movie_unregistered(&RegistryEvent {
                node,
                stage: StageId(old),
            });
        }

        self.stage[idx as usize] = new;

        if new == INVALID {
            self.pending_deactivated.push(idx);
            self.tracer()
                .deactivate(&LifecycleEvent { node, stage: None });
            return;
        }

        self.pending_activated.push(idx);
        self.tracer().activate(&LifecycleEvent {
            node,
            stage: Some(StageId(new)),
        });
        if is_movie && self.stages[new as usize].add(node) {
            self.tracer().movie_registered(&RegistryEvent {
                node,
                stage: StageId(new),
            });
        }
    }

    fn validate_stage(&self, stage: StageId) {
        assert!(
            (stage.0 as usize) < self.stages.len(),
            "unknown StageId: {stage:?}"
        );
    }
}
