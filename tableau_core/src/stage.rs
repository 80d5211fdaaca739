// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stages and the stage-wide movie registry.
//!
//! A *stage* is the root render context. Nodes are inert until they are
//! activated with a stage, either directly or by being added below a node
//! that already has one. Each stage keeps a [`MovieRegistry`] listing the
//! movie nodes that are currently active on it.

use alloc::vec::Vec;
use core::fmt;

use crate::scene::NodeId;

/// An opaque handle to a stage created by
/// [`Scene::create_stage`](crate::scene::Scene::create_stage).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StageId(pub(crate) u32);

impl StageId {
    /// Returns the raw stage index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StageId({})", self.0)
    }
}

/// Ordered, duplicate-free set of active movie nodes on one stage.
///
/// Entries keep registration order.
#[derive(Clone, Debug, Default)]
pub struct MovieRegistry {
    movies: Vec<NodeId>,
}

impl MovieRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `node`. Returns `false` if it was already registered.
    pub fn add(&mut self, node: NodeId) -> bool {
        if self.movies.contains(&node) {
            return false;
        }
        self.movies.push(node);
        true
    }

    /// Deregisters `node`. Returns `false` if it was not registered.
    pub fn remove(&mut self, node: NodeId) -> bool {
        match self.movies.iter().position(|&m| m == node) {
            Some(pos) => {
                self.movies.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Returns whether `node` is registered.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.movies.contains(&node)
    }

    /// Returns the registered movies in registration order.
    #[must_use]
    pub fn as_slice(&self) -> &[NodeId] {
        &self.movies
    }

    /// Returns the number of registered movies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Returns whether no movie is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
