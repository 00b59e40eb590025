//! Runtime listener hooks.
//!
//! Listeners let the host learn about registry changes (refresh interaction
//! UI) and involuntary cancellations (reconcile externally tracked sequence
//! state).  They are not part of execution semantics: events produced by a
//! trigger or a resolution are returned to the caller directly.

use bhv_core::NodeId;

use crate::event::BehaviorRuntimeEvent;

/// Callbacks invoked by [`BehaviorRuntime`][crate::BehaviorRuntime] at
/// registry and cancellation boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait RuntimeListener {
    /// A node's registry entry was registered, rebuilt, or removed.
    fn on_registry_changed(&mut self, _node: &NodeId) {}

    /// A running sequence was finalized by a registry edit rather than by its
    /// own host-driven resolution.  `event` is the completion event the
    /// caller of the registry operation never sees.
    fn on_sequence_cancelled(&mut self, _event: &BehaviorRuntimeEvent) {}
}

/// A [`RuntimeListener`] that does nothing.
pub struct NoopListener;

impl RuntimeListener for NoopListener {}
