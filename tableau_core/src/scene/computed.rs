// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounding-box aggregation over display lists.
//!
//! A leaf reports its own content bounds. A container reports the extent of
//! its children: each child's computed box, offset by the child's position,
//! folded with `min` for the top and left edges and `max` for the right and
//! bottom edges. The first child seeds the fold, so a container whose
//! children all lie right of the origin has a positive left edge. A
//! container without children has an all-zero box.

use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Rect};

use super::id::NodeId;
use super::store::Scene;

/// One edge of a bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Smallest y.
    Top,
    /// Largest x.
    Right,
    /// Largest y.
    Bottom,
    /// Smallest x.
    Left,
}

impl Edge {
    /// The coordinate of `position` along this edge's axis.
    fn offset(self, position: Point) -> f64 {
        match self {
            Self::Top | Self::Bottom => position.y,
            Self::Left | Self::Right => position.x,
        }
    }

    fn of(self, b: &ComputedBox) -> f64 {
        match self {
            Self::Top => b.top,
            Self::Right => b.right,
            Self::Bottom => b.bottom,
            Self::Left => b.left,
        }
    }

    fn fold(self, acc: f64, value: f64) -> f64 {
        match self {
            Self::Top | Self::Left => acc.min(value),
            Self::Right | Self::Bottom => acc.max(value),
        }
    }
}

/// A computed bounding box.
///
/// `width` and `height` are always `right - left` and `bottom - top`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ComputedBox {
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Left edge.
    pub left: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl ComputedBox {
    /// The all-zero box.
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a box from its four edges.
    #[must_use]
    pub fn from_edges(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Returns the box as a [`Rect`].
    #[must_use]
    pub fn to_rect(self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom)
    }

    fn translated(self, by: Point) -> Self {
        Self::from_edges(
            self.top + by.y,
            self.right + by.x,
            self.bottom + by.y,
            self.left + by.x,
        )
    }
}

impl From<Rect> for ComputedBox {
    fn from(rect: Rect) -> Self {
        Self::from_edges(rect.y0, rect.x1, rect.y1, rect.x0)
    }
}

/// What [`Scene::get_computed`] should report.
///
/// Unrecognized names report the whole box: use
/// `name.parse().unwrap_or_default()` for that behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ComputedKey {
    /// The top edge.
    Top,
    /// The right edge.
    Right,
    /// The bottom edge.
    Bottom,
    /// The left edge.
    Left,
    /// The width of the box.
    Width,
    /// The height of the box.
    Height,
    /// The whole box.
    #[default]
    Size,
}

impl ComputedKey {
    /// Returns the edge this key names, if it names one.
    #[must_use]
    pub const fn edge(self) -> Option<Edge> {
        match self {
            Self::Top => Some(Edge::Top),
            Self::Right => Some(Edge::Right),
            Self::Bottom => Some(Edge::Bottom),
            Self::Left => Some(Edge::Left),
            Self::Width | Self::Height | Self::Size => None,
        }
    }
}

/// Error returned when parsing an unrecognized [`ComputedKey`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnknownComputedKey;

impl fmt::Display for UnknownComputedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown computed key")
    }
}

impl core::error::Error for UnknownComputedKey {}

impl FromStr for ComputedKey {
    type Err = UnknownComputedKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "right" => Ok(Self::Right),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "width" => Ok(Self::Width),
            "height" => Ok(Self::Height),
            "size" => Ok(Self::Size),
            _ => Err(UnknownComputedKey),
        }
    }
}

/// The result of [`Scene::get_computed`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Computed {
    /// A single measurement.
    Value(f64),
    /// A whole box, for [`ComputedKey::Size`].
    Box(ComputedBox),
}

impl Computed {
    /// Returns the single measurement, if this is one.
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Box(_) => None,
        }
    }

    /// Returns the box, if this is one.
    #[must_use]
    pub fn as_box(self) -> Option<ComputedBox> {
        match self {
            Self::Box(b) => Some(b),
            Self::Value(_) => None,
        }
    }
}

impl Scene {
    /// Reports a bounding measurement of `id`.
    ///
    /// Edge keys fold only along their own axis; the other keys fold the
    /// whole box and report the requested part of it.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn get_computed(&self, id: NodeId, key: ComputedKey) -> Computed {
        if let Some(edge) = key.edge() {
            return Computed::Value(self.computed_edge(id, edge));
        }
        let size = self.computed_size(id);
        match key {
            ComputedKey::Width => Computed::Value(size.width),
            ComputedKey::Height => Computed::Value(size.height),
            _ => Computed::Box(size),
        }
    }

    /// Returns one edge of the computed bounds of `id`.
    #[must_use]
    pub fn computed_edge(&self, id: NodeId, edge: Edge) -> f64 {
        self.validate(id);
        self.edge_at(id.idx, edge)
    }

    /// Returns the computed bounds of `id`.
    #[must_use]
    pub fn computed_size(&self, id: NodeId) -> ComputedBox {
        self.validate(id);
        self.box_at(id.idx)
    }

    fn edge_at(&self, idx: u32, edge: Edge) -> f64 {
        let Some(list) = &self.display_list[idx as usize] else {
            return edge.of(&ComputedBox::from(self.content_bounds[idx as usize]));
        };
        let mut acc = 0.0;
        for (i, &child) in list.children.iter().enumerate() {
            let value = edge.offset(self.position[child as usize]) + self.edge_at(child, edge);
            acc = if i == 0 { value } else { edge.fold(acc, value) };
        }
        acc
    }

    fn box_at(&self, idx: u32) -> ComputedBox {
        let Some(list) = &self.display_list[idx as usize] else {
            return ComputedBox::from(self.content_bounds[idx as usize]);
        };
        let mut children = list
            .children
            .iter()
            .map(|&child| self.box_at(child).translated(self.position[child as usize]));
        let Some(first) = children.next() else {
            return ComputedBox::ZERO;
        };
        let (top, right, bottom, left) =
            children.fold((first.top, first.right, first.bottom, first.left), |acc, b| {
                (
                    Edge::Top.fold(acc.0, b.top),
                    Edge::Right.fold(acc.1, b.right),
                    Edge::Bottom.fold(acc.2, b.bottom),
                    Edge::Left.fold(acc.3, b.left),
                )
            });
        ComputedBox::from_edges(top, right, bottom, left)
    }
}
