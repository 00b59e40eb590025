//! `bhv-engine` — the behavior registry and sequence executor.
//!
//! # Execution model
//!
//! ```text
//! host ──trigger_action(node, action)──▶ BehaviorRuntime
//!   ① registry resolves the matching sequence group
//!   ② steps are cloned into a fresh SequenceExecution (status: Running)
//!   ③ the executor advances:
//!        inline step      → emit event, cursor += 1, keep looping
//!        suspending step  → mint token, status = Waiting, emit event, return
//!        inert step       → cursor += 1, no event
//!        cursor == len    → finalize(Success), return
//! host ──resolve_event(token, resolution)──▶
//!        Continue → cursor += 1, status = Running, advance again
//!        Abort    → finalize(Aborted)
//!        Fail     → finalize(Failure)
//! ```
//!
//! Scheduling is single-threaded, cooperative, and non-preemptive: a
//! "suspension" is the call stack returning to the host, and resumption is a
//! later independent call.  Hosts embedding the runtime in a multi-threaded
//! environment must serialize all calls through one thread or queue.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`event`]     | `BehaviorRuntimeEvent`, `EventKind`, `EventResolution`  |
//! | [`registry`]  | `SequenceGroup`, `RegistryEntry<H>`, grouping           |
//! | [`execution`] | `SequenceExecution`, `ExecutionStatus`, `PendingWait`   |
//! | [`listener`]  | `RuntimeListener` trait, `NoopListener`                 |
//! | [`runtime`]   | `BehaviorRuntime<H>` — every inbound operation          |

pub mod event;
pub mod execution;
pub mod listener;
pub mod registry;
pub mod runtime;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use event::{BehaviorRuntimeEvent, CompletionStatus, EventKind, EventResolution};
pub use execution::{ExecutionStatus, SequenceExecution};
pub use listener::{NoopListener, RuntimeListener};
pub use registry::{RegistryEntry, SequenceGroup};
pub use runtime::{BehaviorRuntime, TriggerOptions};
