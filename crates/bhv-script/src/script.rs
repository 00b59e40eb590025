//! The step script catalog: one sum-type variant per authored step kind.
//!
//! # Classification
//!
//! Every kind falls into one of three runtime classes:
//!
//! | Class        | Kinds                                                    |
//! |--------------|----------------------------------------------------------|
//! | `Suspending` | `delay`, `moveTo`, `showAlert`, `watch`, `lantern`, `look` |
//! | `Inline`     | `show`, `hide`                                           |
//! | `Inert`      | everything else (data model only, skipped at runtime)    |
//!
//! A suspending step yields control to the host and resumes only when the
//! host resolves its token; an inline step emits its event and advances in
//! the same call; an inert step is carried through authoring and storage but
//! has no runtime semantics yet.

use serde::{Deserialize, Serialize};

use bhv_core::{NodeId, TriggerAction};

// ── Params ────────────────────────────────────────────────────────────────────

/// Camera facing for a `moveTo` step, relative to the target node.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    #[default]
    Front,
    Back,
    Left,
    Right,
}

/// Modal dialog parameters for a `showAlert` step.
///
/// The `Default` impl carries the documented authoring defaults, and the
/// container-level `#[serde(default)]` pulls missing fields from it — an
/// authored alert with only `content` set still gets a "Confirm" button.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertParams {
    pub content:      String,
    pub show_confirm: bool,
    pub confirm_text: String,
    pub show_cancel:  bool,
    pub cancel_text:  String,
}

impl Default for AlertParams {
    fn default() -> Self {
        Self {
            content:      String::new(),
            show_confirm: true,
            confirm_text: "Confirm".to_string(),
            show_cancel:  false,
            cancel_text:  "Cancel".to_string(),
        }
    }
}

/// Layout of one `lantern` slide.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideLayout {
    #[default]
    ImageLeft,
    ImageRight,
    ImageFull,
    TextOnly,
}

/// One slide of a `lantern` (slide show) step.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Slide {
    pub id:                   String,
    pub title:                String,
    pub description:          String,
    pub description_asset_id: Option<String>,
    pub image_asset_id:       Option<String>,
    pub layout:               SlideLayout,
}

// ── StepScript ────────────────────────────────────────────────────────────────

/// The script of one behavior step — the discriminated union the executor
/// pattern-matches exhaustively, so adding a kind here forces every
/// classification site to be revisited at compile time.
#[derive(Clone, PartialEq, Debug)]
pub enum StepScript {
    // ── Suspending ────────────────────────────────────────────────────────
    /// Pause for `seconds` before the next step.  The host owns the timer.
    Delay { seconds: f64 },
    /// Move the camera to the sequence's node.
    MoveTo { speed: f64, facing: Facing, offset: f64 },
    /// Modal confirmation dialog.
    ShowAlert(AlertParams),
    /// Point the camera at `target` (the sequence's own node when `None`).
    /// `caging` locks user camera input while watching.
    Watch { target: Option<NodeId>, caging: bool },
    /// Slide show overlay.
    Lantern { slides: Vec<Slide> },
    /// Level the camera to the horizon.
    Look,

    // ── Inline ────────────────────────────────────────────────────────────
    /// Make `target` (own node when `None`) visible in the scene graph.
    Show { target: Option<NodeId> },
    /// Hide `target` (own node when `None`) in the scene graph.
    Hide { target: Option<NodeId> },

    // ── Inert (data model only) ───────────────────────────────────────────
    LoadScene { scene_id: Option<String> },
    ExitScene,
    Trigger { target: Option<NodeId>, action: TriggerAction },
    Animation { clip: String },
    ShowCockpit,
    HideCockpit,
    Drive,
    Debus,
}

impl StepScript {
    /// The kind tag of this script.
    pub fn kind(&self) -> StepKind {
        match self {
            StepScript::Delay { .. }     => StepKind::Delay,
            StepScript::MoveTo { .. }    => StepKind::MoveTo,
            StepScript::ShowAlert(_)     => StepKind::ShowAlert,
            StepScript::Watch { .. }     => StepKind::Watch,
            StepScript::Lantern { .. }   => StepKind::Lantern,
            StepScript::Look             => StepKind::Look,
            StepScript::Show { .. }      => StepKind::Show,
            StepScript::Hide { .. }      => StepKind::Hide,
            StepScript::LoadScene { .. } => StepKind::LoadScene,
            StepScript::ExitScene        => StepKind::ExitScene,
            StepScript::Trigger { .. }   => StepKind::Trigger,
            StepScript::Animation { .. } => StepKind::Animation,
            StepScript::ShowCockpit      => StepKind::ShowCockpit,
            StepScript::HideCockpit      => StepKind::HideCockpit,
            StepScript::Drive            => StepKind::Drive,
            StepScript::Debus            => StepKind::Debus,
        }
    }

    /// Shorthand for `self.kind().class()`.
    #[inline]
    pub fn class(&self) -> StepClass {
        self.kind().class()
    }
}

// ── StepKind ──────────────────────────────────────────────────────────────────

/// Runtime classification of a step kind (see module docs).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StepClass {
    Suspending,
    Inline,
    Inert,
}

/// Tag enum naming every authored step kind.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepKind {
    Delay,
    MoveTo,
    ShowAlert,
    Watch,
    Show,
    Hide,
    Lantern,
    Look,
    LoadScene,
    ExitScene,
    Trigger,
    Animation,
    ShowCockpit,
    HideCockpit,
    Drive,
    Debus,
}

impl StepKind {
    pub const ALL: [StepKind; 16] = [
        StepKind::Delay,
        StepKind::MoveTo,
        StepKind::ShowAlert,
        StepKind::Watch,
        StepKind::Show,
        StepKind::Hide,
        StepKind::Lantern,
        StepKind::Look,
        StepKind::LoadScene,
        StepKind::ExitScene,
        StepKind::Trigger,
        StepKind::Animation,
        StepKind::ShowCockpit,
        StepKind::HideCockpit,
        StepKind::Drive,
        StepKind::Debus,
    ];

    /// Parse an authored kind label (`"moveTo"`, `"showAlert"`, …).
    pub fn parse(value: &str) -> Option<Self> {
        let wanted = value.trim();
        StepKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
    }

    /// The authored camelCase label of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Delay       => "delay",
            StepKind::MoveTo      => "moveTo",
            StepKind::ShowAlert   => "showAlert",
            StepKind::Watch       => "watch",
            StepKind::Show        => "show",
            StepKind::Hide        => "hide",
            StepKind::Lantern     => "lantern",
            StepKind::Look        => "look",
            StepKind::LoadScene   => "loadScene",
            StepKind::ExitScene   => "exitScene",
            StepKind::Trigger     => "trigger",
            StepKind::Animation   => "animation",
            StepKind::ShowCockpit => "showCockpit",
            StepKind::HideCockpit => "hideCockpit",
            StepKind::Drive       => "drive",
            StepKind::Debus       => "debus",
        }
    }

    /// Runtime class of this kind.
    pub fn class(self) -> StepClass {
        match self {
            StepKind::Delay
            | StepKind::MoveTo
            | StepKind::ShowAlert
            | StepKind::Watch
            | StepKind::Lantern
            | StepKind::Look => StepClass::Suspending,

            StepKind::Show | StepKind::Hide => StepClass::Inline,

            StepKind::LoadScene
            | StepKind::ExitScene
            | StepKind::Trigger
            | StepKind::Animation
            | StepKind::ShowCockpit
            | StepKind::HideCockpit
            | StepKind::Drive
            | StepKind::Debus => StepClass::Inert,
        }
    }

    /// A fresh, fully populated default script for this kind (pure).
    pub fn default_script(self) -> StepScript {
        match self {
            StepKind::Delay     => StepScript::Delay { seconds: 0.0 },
            StepKind::MoveTo    => StepScript::MoveTo {
                speed:  1.0,
                facing: Facing::Front,
                offset: 0.0,
            },
            StepKind::ShowAlert => StepScript::ShowAlert(AlertParams::default()),
            StepKind::Watch     => StepScript::Watch { target: None, caging: false },
            StepKind::Lantern   => StepScript::Lantern { slides: Vec::new() },
            StepKind::Look      => StepScript::Look,
            StepKind::Show      => StepScript::Show { target: None },
            StepKind::Hide      => StepScript::Hide { target: None },
            StepKind::LoadScene => StepScript::LoadScene { scene_id: None },
            StepKind::ExitScene => StepScript::ExitScene,
            StepKind::Trigger   => StepScript::Trigger {
                target: None,
                action: TriggerAction::Click,
            },
            StepKind::Animation   => StepScript::Animation { clip: String::new() },
            StepKind::ShowCockpit => StepScript::ShowCockpit,
            StepKind::HideCockpit => StepScript::HideCockpit,
            StepKind::Drive       => StepScript::Drive,
            StepKind::Debus       => StepScript::Debus,
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
