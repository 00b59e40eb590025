//! `bhv-core` — foundational types for the `bhv` scene behavior runtime.
//!
//! This crate is a dependency of every other `bhv-*` crate.  It intentionally
//! has no `bhv-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`keys`]   | `NodeId`, `SequenceId`, `BehaviorId`, `SuspendToken`,      |
//! |            | `ExecutionId`, `ListenerId`                                |
//! | [`action`] | `TriggerAction` enum                                       |
//! | [`mint`]   | `IdMinter` (seedable generator for tokens and fresh ids)   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                               |
//! |---------|----------------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types (`bhv-script` needs it). |

pub mod action;
pub mod keys;
pub mod mint;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use action::TriggerAction;
pub use keys::{BehaviorId, ExecutionId, ListenerId, NodeId, SequenceId, SuspendToken};
pub use mint::IdMinter;
