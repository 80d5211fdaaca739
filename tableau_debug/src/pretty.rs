// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use tableau_core::scene::NodeId;
use tableau_core::stage::StageId;
use tableau_core::trace::{
    AttachEvent, DetachEvent, LifecycleEvent, MarkUpdateEvent, RegistryEvent, RejectEvent,
    RejectReason, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

struct Node(NodeId);

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.0.index(), self.0.generation())
    }
}

fn stage_label(stage: Option<StageId>) -> String {
    stage.map_or_else(|| "none".to_owned(), |s| s.index().to_string())
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_attach(&mut self, e: &AttachEvent) {
        let _ = writeln!(
            self.writer,
            "[attach] node={} parent={} index={}",
            Node(e.node),
            Node(e.parent),
            e.index,
        );
    }

    fn on_detach(&mut self, e: &DetachEvent) {
        let _ = writeln!(
            self.writer,
            "[detach] node={} parent={}",
            Node(e.node),
            Node(e.parent),
        );
    }

    fn on_activate(&mut self, e: &LifecycleEvent) {
        let _ = writeln!(
            self.writer,
            "[activate] node={} stage={}",
            Node(e.node),
            stage_label(e.stage),
        );
    }

    fn on_deactivate(&mut self, e: &LifecycleEvent) {
        let _ = writeln!(self.writer, "[deactivate] node={}", Node(e.node));
    }

    fn on_movie_registered(&mut self, e: &RegistryEvent) {
        let _ = writeln!(
            self.writer,
            "[movie:register] node={} stage={}",
            Node(e.node),
            e.stage.index(),
        );
    }

    fn on_movie_unregistered(&mut self, e: &RegistryEvent) {
        let _ = writeln!(
            self.writer,
            "[movie:unregister] node={} stage={}",
            Node(e.node),
            e.stage.index(),
        );
    }

    fn on_mark_update(&mut self, e: &MarkUpdateEvent) {
        let _ = writeln!(self.writer, "[update] node={}", Node(e.node));
    }

    fn on_rejected(&mut self, e: &RejectEvent) {
        let reason = match e.reason {
            RejectReason::Cycle => "cycle",
            RejectReason::Empty => "empty",
        };
        let _ = writeln!(
            self.writer,
            "[reject] owner={} reason={reason}",
            Node(e.owner),
        );
    }
}
