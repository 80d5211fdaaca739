// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for scene mutations.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! scene calls as display lists change and lifecycle hooks run. All method
//! bodies default to no-ops, so implementing only the events you care about
//! is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! Install a sink with [`Scene::set_trace_sink`](crate::scene::Scene::set_trace_sink).
//! Events are delivered synchronously in the order the scene performs the
//! corresponding steps.

use alloc::rc::Rc;
use core::cell::RefCell;

use crate::scene::NodeId;
use crate::stage::StageId;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Why a display list request was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// A node in the request is the owner itself or one of its ancestors.
    Cycle,
    /// The request carried no nodes.
    Empty,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a node is spliced into a display list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttachEvent {
    /// The inserted node.
    pub node: NodeId,
    /// Owner of the display list.
    pub parent: NodeId,
    /// Position of the node in the children sequence after insertion.
    pub index: usize,
}

/// Emitted when a node leaves a display list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetachEvent {
    /// The removed node.
    pub node: NodeId,
    /// Owner of the display list it left.
    pub parent: NodeId,
}

/// Emitted when a node's own activation or deactivation hook runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifecycleEvent {
    /// The node whose hook ran.
    pub node: NodeId,
    /// The stage after the hook (always `None` for deactivation).
    pub stage: Option<StageId>,
}

/// Emitted when a movie node enters or leaves a stage's movie registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegistryEvent {
    /// The movie node.
    pub node: NodeId,
    /// The stage whose registry changed.
    pub stage: StageId,
}

/// Emitted when a node's own mark-update step runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkUpdateEvent {
    /// The marked node.
    pub node: NodeId,
}

/// Emitted when an add request is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RejectEvent {
    /// Owner of the display list the request targeted.
    pub owner: NodeId,
    /// Why it was ignored.
    pub reason: RejectReason,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the scene.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a node is inserted into a display list.
    fn on_attach(&mut self, e: &AttachEvent) {
        _ = e;
    }

    /// Called after a node is removed from a display list.
    fn on_detach(&mut self, e: &DetachEvent) {
        _ = e;
    }

    /// Called when a node's activation hook runs.
    fn on_activate(&mut self, e: &LifecycleEvent) {
        _ = e;
    }

    /// Called when a node's deactivation hook runs.
    fn on_deactivate(&mut self, e: &LifecycleEvent) {
        _ = e;
    }

    /// Called when a movie is added to a stage's registry.
    fn on_movie_registered(&mut self, e: &RegistryEvent) {
        _ = e;
    }

    /// Called when a movie is removed from a stage's registry.
    fn on_movie_unregistered(&mut self, e: &RegistryEvent) {
        _ = e;
    }

    /// Called when a node is marked for update.
    fn on_mark_update(&mut self, e: &MarkUpdateEvent) {
        _ = e;
    }

    /// Called when an add request is ignored.
    fn on_rejected(&mut self, e: &RejectEvent) {
        _ = e;
    }
}

/// Shares one sink between the scene and the code that reads it back.
impl<T: TraceSink + ?Sized> TraceSink for Rc<RefCell<T>> {
    fn on_attach(&mut self, e: &AttachEvent) {
        self.borrow_mut().on_attach(e);
    }

    fn on_detach(&mut self, e: &DetachEvent) {
        self.borrow_mut().on_detach(e);
    }

    fn on_activate(&mut self, e: &LifecycleEvent) {
        self.borrow_mut().on_activate(e);
    }

    fn on_deactivate(&mut self, e: &LifecycleEvent) {
        self.borrow_mut().on_deactivate(e);
    }

    fn on_movie_registered(&mut self, e: &RegistryEvent) {
        self.borrow_mut().on_movie_registered(e);
    }

    fn on_movie_unregistered(&mut self, e: &RegistryEvent) {
        self.borrow_mut().on_movie_unregistered(e);
    }

    fn on_mark_update(&mut self, e: &MarkUpdateEvent) {
        self.borrow_mut().on_mark_update(e);
    }

    fn on_rejected(&mut self, e: &RejectEvent) {
        self.borrow_mut().on_rejected(e);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

/// Generates a `Tracer` method that forwards one event to the sink.
macro_rules! forward {
    ($(#[$doc:meta])* $name:ident, $event:ty, $hook:ident) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, e: &$event) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$hook(e);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = e;
            }
        }
    };
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    forward!(
        /// Emits an [`AttachEvent`].
        attach, AttachEvent, on_attach
    );
    forward!(
        /// Emits a [`DetachEvent`].
        detach, DetachEvent, on_detach
    );
    forward!(
        /// Emits an activation [`LifecycleEvent`].
        activate, LifecycleEvent, on_activate
    );
    forward!(
        /// Emits a deactivation [`LifecycleEvent`].
        deactivate, LifecycleEvent, on_deactivate
    );
    forward!(
        /// Emits a registration [`RegistryEvent`].
        movie_registered, RegistryEvent, on_movie_registered
    );
    forward!(
        /// Emits a deregistration [`RegistryEvent`].
        movie_unregistered, RegistryEvent, on_movie_unregistered
    );
    forward!(
        /// Emits a [`MarkUpdateEvent`].
        mark_update, MarkUpdateEvent, on_mark_update
    );
    forward!(
        /// Emits a [`RejectEvent`].
        rejected, RejectEvent, on_rejected
    );
}
