// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Node handles are stored as `(index, generation)` pairs and stages as their
//! index, so a recording stays readable after the scene that produced it is
//! gone.

use tableau_core::scene::NodeId;
use tableau_core::stage::StageId;
use tableau_core::trace::{
    AttachEvent, DetachEvent, LifecycleEvent, MarkUpdateEvent, RegistryEvent, RejectEvent,
    RejectReason, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_ATTACH: u8 = 1;
const TAG_DETACH: u8 = 2;
const TAG_ACTIVATE: u8 = 3;
const TAG_DEACTIVATE: u8 = 4;
const TAG_MOVIE_REGISTERED: u8 = 5;
const TAG_MOVIE_UNREGISTERED: u8 = 6;
const TAG_MARK_UPDATE: u8 = 7;
const TAG_REJECTED: u8 = 8;

const NO_STAGE: u32 = u32::MAX;

const REASON_CYCLE: u8 = 0;
const REASON_EMPTY: u8 = 1;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_node(&mut self, id: NodeId) {
        self.write_u32(id.index());
        self.write_u32(id.generation());
    }

    fn write_stage(&mut self, stage: Option<StageId>) {
        self.write_u32(stage.map_or(NO_STAGE, StageId::index));
    }
}

impl TraceSink for RecorderSink {
    fn on_attach(&mut self, e: &AttachEvent) {
        self.write_u8(TAG_ATTACH);
        self.write_node(e.node);
        self.write_node(e.parent);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "display lists never approach u32::MAX entries"
        )]
        self.write_u32(e.index as u32);
    }

    fn on_detach(&mut self, e: &DetachEvent) {
        self.write_u8(TAG_DETACH);
        self.write_node(e.node);
        self.write_node(e.parent);
    }

    fn on_activate(&mut self, e: &LifecycleEvent) {
        self.write_u8(TAG_ACTIVATE);
        self.write_node(e.node);
        self.write_stage(e.stage);
    }

    fn on_deactivate(&mut self, e: &LifecycleEvent) {
        self.write_u8(TAG_DEACTIVATE);
        self.write_node(e.node);
    }

    fn on_movie_registered(&mut self, e: &RegistryEvent) {
        self.write_u8(TAG_MOVIE_REGISTERED);
        self.write_node(e.node);
        self.write_u32(e.stage.index());
    }

    fn on_movie_unregistered(&mut self, e: &RegistryEvent) {
        self.write_u8(TAG_MOVIE_UNREGISTERED);
        self.write_node(e.node);
        self.write_u32(e.stage.index());
    }

    fn on_mark_update(&mut self, e: &MarkUpdateEvent) {
        self.write_u8(TAG_MARK_UPDATE);
        self.write_node(e.node);
    }

    fn on_rejected(&mut self, e: &RejectEvent) {
        self.write_u8(TAG_REJECTED);
        self.write_node(e.owner);
        self.write_u8(match e.reason {
            RejectReason::Cycle => REASON_CYCLE,
            RejectReason::Empty => REASON_EMPTY,
        });
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// A node handle as it appeared in a recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecordedNode {
    /// Slot index.
    pub index: u32,
    /// Generation of the slot when the event was recorded.
    pub generation: u32,
}

impl From<NodeId> for RecordedNode {
    fn from(id: NodeId) -> Self {
        Self {
            index: id.index(),
            generation: id.generation(),
        }
    }
}

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A node entered a display list.
    Attach {
        /// The inserted node.
        node: RecordedNode,
        /// The list owner.
        parent: RecordedNode,
        /// Position after insertion.
        index: u32,
    },
    /// A node left a display list.
    Detach {
        /// The removed node.
        node: RecordedNode,
        /// The list owner.
        parent: RecordedNode,
    },
    /// A node's activation hook ran.
    Activate {
        /// The activated node.
        node: RecordedNode,
        /// Stage index, if any.
        stage: Option<u32>,
    },
    /// A node's deactivation hook ran.
    Deactivate {
        /// The deactivated node.
        node: RecordedNode,
    },
    /// A movie joined a stage registry.
    MovieRegistered {
        /// The movie node.
        node: RecordedNode,
        /// Stage index.
        stage: u32,
    },
    /// A movie left a stage registry.
    MovieUnregistered {
        /// The movie node.
        node: RecordedNode,
        /// Stage index.
        stage: u32,
    },
    /// A node was marked for update.
    MarkUpdate {
        /// The marked node.
        node: RecordedNode,
    },
    /// An add request was ignored.
    Rejected {
        /// The list owner.
        owner: RecordedNode,
        /// Why.
        reason: RejectReason,
    },
}

/// Decodes a binary recording into an iterator of events.
///
/// Iteration stops at the first truncated record or unknown tag.
#[must_use]
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter { data: bytes, pos: 0 }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn read_u8(&mut self) -> Option<u8> {
        let v = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        let bytes = self.data.get(self.pos..self.pos + 4)?;
        self.pos += 4;
        Some(u32::from_le_bytes(bytes.try_into().ok()?))
    }

    fn read_node(&mut self) -> Option<RecordedNode> {
        let index = self.read_u32()?;
        let generation = self.read_u32()?;
        Some(RecordedNode { index, generation })
    }

    fn read_stage(&mut self) -> Option<Option<u32>> {
        let v = self.read_u32()?;
        Some((v != NO_STAGE).then_some(v))
    }

    fn read_reason(&mut self) -> Option<RejectReason> {
        match self.read_u8()? {
            REASON_CYCLE => Some(RejectReason::Cycle),
            REASON_EMPTY => Some(RejectReason::Empty),
            _ => None,
        }
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<RecordedEvent> {
        let tag = self.read_u8()?;
        match tag {
            TAG_ATTACH => Some(RecordedEvent::Attach {
                node: self.read_node()?,
                parent: self.read_node()?,
                index: self.read_u32()?,
            }),
            TAG_DETACH => Some(RecordedEvent::Detach {
                node: self.read_node()?,
                parent: self.read_node()?,
            }),
            TAG_ACTIVATE => Some(RecordedEvent::Activate {
                node: self.read_node()?,
                stage: self.read_stage()?,
            }),
            TAG_DEACTIVATE => Some(RecordedEvent::Deactivate {
                node: self.read_node()?,
            }),
            TAG_MOVIE_REGISTERED => Some(RecordedEvent::MovieRegistered {
                node: self.read_node()?,
                stage: self.read_u32()?,
            }),
            TAG_MOVIE_UNREGISTERED => Some(RecordedEvent::MovieUnregistered {
                node: self.read_node()?,
                stage: self.read_u32()?,
            }),
            TAG_MARK_UPDATE => Some(RecordedEvent::MarkUpdate {
                node: self.read_node()?,
            }),
            TAG_REJECTED => Some(RecordedEvent::Rejected {
                owner: self.read_node()?,
                reason: self.read_reason()?,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use tableau_core::scene::{NodeKind, Scene};

    use super::*;

    fn recorded(scene: &mut Scene) -> Rc<RefCell<RecorderSink>> {
        let rec = Rc::new(RefCell::new(RecorderSink::new()));
        scene.set_trace_sink(Box::new(Rc::clone(&rec)));
        rec
    }

    fn events(rec: &Rc<RefCell<RecorderSink>>) -> Vec<RecordedEvent> {
        decode(rec.borrow().as_bytes()).collect()
    }

    #[test]
    fn attach_then_activate() {
        let mut scene = Scene::new();
        let stage = scene.create_stage();
        let root = scene.create_node(NodeKind::Container);
        let leaf = scene.create_node(NodeKind::Leaf);
        scene.activate(root, Some(stage));

        let rec = recorded(&mut scene);
        scene.add_child(root, leaf);

        assert_eq!(
            events(&rec),
            vec![
                RecordedEvent::Attach {
                    node: leaf.into(),
                    parent: root.into(),
                    index: 0,
                },
                RecordedEvent::Activate {
                    node: leaf.into(),
                    stage: Some(stage.index()),
                },
            ]
        );
    }

    #[test]
    fn movie_registers_before_children_activate() {
        let mut scene = Scene::new();
        let stage = scene.create_stage();
        let movie = scene.create_node(NodeKind::Movie);
        let leaf = scene.create_node(NodeKind::Leaf);
        scene.add_child(movie, leaf);

        let rec = recorded(&mut scene);
        scene.activate(movie, Some(stage));

        assert_eq!(
            events(&rec),
            vec![
                RecordedEvent::Activate {
                    node: movie.into(),
                    stage: Some(stage.index()),
                },
                RecordedEvent::MovieRegistered {
                    node: movie.into(),
                    stage: stage.index(),
                },
                RecordedEvent::Activate {
                    node: leaf.into(),
                    stage: Some(stage.index()),
                },
            ]
        );
    }

    #[test]
    fn removal_unregisters_and_deactivates() {
        let mut scene = Scene::new();
        let stage = scene.create_stage();
        let root = scene.create_node(NodeKind::Container);
        let movie = scene.create_node(NodeKind::Movie);
        scene.add_child(root, movie);
        scene.activate(root, Some(stage));

        let rec = recorded(&mut scene);
        assert!(scene.take_child(root, movie));

        let ev = events(&rec);
        assert_eq!(
            ev.first(),
            Some(&RecordedEvent::MovieUnregistered {
                node: movie.into(),
                stage: stage.index(),
            })
        );
        assert!(ev.contains(&RecordedEvent::Deactivate { node: movie.into() }));
        assert_eq!(
            ev.last(),
            Some(&RecordedEvent::Detach {
                node: movie.into(),
                parent: root.into(),
            })
        );
        assert!(scene.movies(stage).is_empty());
    }

    #[test]
    fn cycle_is_recorded_as_rejection() {
        let mut scene = Scene::new();
        let root = scene.create_node(NodeKind::Container);
        let child = scene.create_node(NodeKind::Container);
        scene.add_child(root, child);

        let rec = recorded(&mut scene);
        scene.add_child(child, root);

        assert_eq!(
            events(&rec),
            vec![RecordedEvent::Rejected {
                owner: child.into(),
                reason: RejectReason::Cycle,
            }]
        );
        assert_eq!(scene.parent(root), None);
    }

    #[test]
    fn decode_stops_on_unknown_tag() {
        let mut rec = RecorderSink::new();
        rec.on_mark_update(&MarkUpdateEvent {
            node: Scene::new().create_node(NodeKind::Leaf),
        });
        let mut bytes = rec.into_bytes();
        bytes.push(0xFF);
        bytes.extend_from_slice(&[0; 8]);

        let ev: Vec<_> = decode(&bytes).collect();
        assert_eq!(ev.len(), 1);
        assert!(matches!(ev[0], RecordedEvent::MarkUpdate { .. }));
    }

    #[test]
    fn decode_stops_on_truncated_record() {
        let mut rec = RecorderSink::new();
        let mut scene = Scene::new();
        let node = scene.create_node(NodeKind::Leaf);
        rec.on_deactivate(&LifecycleEvent { node, stage: None });
        let bytes = rec.into_bytes();
        assert_eq!(decode(&bytes[..bytes.len() - 1]).count(), 0);
    }
}
