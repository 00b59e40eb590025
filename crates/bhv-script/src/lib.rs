//! `bhv-script` — the step definition library.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`script`]    | `StepScript` sum type, `StepKind`, `StepClass`, params     |
//! | [`step`]      | `BehaviorStep`, snapshot cloning helpers                   |
//! | [`normalize`] | `sanitize_step` / `sanitize_steps` (total, never fails)    |
//! | [`raw`]       | loose serde authoring model + JSON loaders                 |
//! | [`error`]     | `ScriptError`, `ScriptResult<T>`                           |
//!
//! # Normalization contract
//!
//! Authored data is untrusted: fields may be missing, blank, negative, or the
//! wrong type.  Everything that crosses from the raw model into a typed
//! [`BehaviorStep`] passes through [`normalize::sanitize_step`], which clamps
//! values and mints replacement ids but **never fails** — a malformed step
//! degrades to documented defaults instead of poisoning the scene.
//!
//! # Snapshot cloning
//!
//! All step data is owned (`String`s, `Vec<Slide>`), so `Clone` produces an
//! allocation-fresh deep copy.  The registry and the executor clone at every
//! hand-off; an in-flight execution is therefore immune to later edits of the
//! authoring data it was started from.

pub mod error;
pub mod normalize;
pub mod raw;
pub mod script;
pub mod step;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ScriptError, ScriptResult};
pub use normalize::{sanitize_step, sanitize_steps};
pub use raw::{load_steps_json, steps_from_json, steps_from_reader, steps_from_value};
pub use script::{AlertParams, Facing, Slide, SlideLayout, StepClass, StepKind, StepScript};
pub use step::{clone_steps, BehaviorStep};
