// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Walking up the parent chain.

use alloc::vec::Vec;

use super::id::{INVALID, NodeId};
use super::store::Scene;

/// An iterator over the ancestors of a node, nearest first.
///
/// Created by [`Scene::ancestors`].
#[derive(Debug)]
pub struct Ancestors<'a> {
    scene: &'a Scene,
    current: u32,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.scene.parent[idx as usize];
        Some(self.scene.handle(idx))
    }
}

impl Scene {
    /// Returns an iterator over the ancestors of `id`, from its parent up to
    /// the root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        self.validate(id);
        Ancestors {
            scene: self,
            current: self.parent[id.idx as usize],
        }
    }

    /// Returns the ancestors of `id` as an ordered chain, parent first.
    #[must_use]
    pub fn ancestor_chain(&self, id: NodeId) -> Vec<NodeId> {
        self.ancestors(id).collect()
    }

    /// Returns whether `candidate` is `idx` itself or one of its ancestors.
    pub(crate) fn is_self_or_ancestor(&self, candidate: u32, idx: u32) -> bool {
        let mut current = idx;
        while current != INVALID {
            if current == candidate {
                return true;
            }
            current = self.parent[current as usize];
        }
        false
    }
}
