// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node identity and kind.

use core::fmt;

/// Sentinel value indicating "no node" or "no stage" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to a node in a [`Scene`](super::Scene).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a node is destroyed and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    /// Slot index into the scene's arrays.
    pub(crate) idx: u32,
    /// Generation counter; must match the scene's generation for this slot.
    pub(crate) generation: u32,
}

impl NodeId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}@gen{})", self.idx, self.generation)
    }
}

/// What a node can hold and how its lifecycle hooks behave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A renderable without children (a shape, bitmap, text run).
    #[default]
    Leaf,
    /// A grouping node that owns a display list.
    Container,
    /// A top-level animated container. Besides owning a display list, it
    /// keeps itself in its stage's movie registry while active.
    Movie,
}

impl NodeKind {
    /// Returns whether nodes of this kind own a display list.
    #[inline]
    #[must_use]
    pub const fn has_display_list(self) -> bool {
        matches!(self, Self::Container | Self::Movie)
    }

    /// Returns a short lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Leaf => "leaf",
            Self::Container => "container",
            Self::Movie => "movie",
        }
    }
}
