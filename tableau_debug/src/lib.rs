// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON snapshots for tableau diagnostics.
//!
//! This crate provides [`TraceSink`](tableau_core::trace::TraceSink)
//! implementations and inspection helpers for development:
//!
//! - [`pretty::PrettyPrintSink`] writes human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`] records compact binary events with
//!   [`recorder::decode`] for playback.
//! - [`snapshot`] exports a scene subtree as JSON.

pub mod pretty;
pub mod recorder;
pub mod snapshot;
