// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sibling-link traversal.

use super::id::{INVALID, NodeId};
use super::store::Scene;

/// An iterator that follows `next` links from a starting node.
///
/// Created by [`Scene::siblings_from`] and [`Scene::sibling_chain`].
#[derive(Debug)]
pub struct Siblings<'a> {
    scene: &'a Scene,
    current: u32,
}

impl<'a> Siblings<'a> {
    pub(crate) fn new(scene: &'a Scene, first: u32) -> Self {
        Self {
            scene,
            current: first,
        }
    }
}

impl Iterator for Siblings<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.scene.next_sibling[idx as usize];
        Some(self.scene.handle(idx))
    }
}

impl Scene {
    /// Returns an iterator starting at `id` and following `next` links to the
    /// last sibling.
    #[must_use]
    pub fn siblings_from(&self, id: NodeId) -> Siblings<'_> {
        self.validate(id);
        Siblings::new(self, id.idx)
    }

    /// Returns an iterator over the children of `parent` obtained by
    /// following `next` links from the first child.
    ///
    /// Yields the same nodes, in the same order, as [`children`](Self::children).
    #[must_use]
    pub fn sibling_chain(&self, parent: NodeId) -> Siblings<'_> {
        self.validate(parent);
        let first = self.display_list[parent.idx as usize]
            .as_ref()
            .and_then(|list| list.children.first().copied())
            .unwrap_or(INVALID);
        Siblings::new(self, first)
    }
}
