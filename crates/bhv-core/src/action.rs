//! Trigger action enum shared across all behavior crates.
//!
//! The action is the event category that selects which sequence group(s) of a
//! node may run.  `Click`, `Approach`, and `Depart` allow exactly one group
//! per node; `Perform` may carry several independently triggerable groups.

/// The event category that triggers a node's behavior sequences.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TriggerAction {
    /// The node was picked/clicked by the user (default action).
    #[default]
    Click,
    /// The viewer entered the node's proximity radius.
    Approach,
    /// The viewer left the node's proximity radius.
    Depart,
    /// An explicitly named sequence was requested by the host.
    Perform,
}

impl TriggerAction {
    pub const ALL: [TriggerAction; 4] = [
        TriggerAction::Click,
        TriggerAction::Approach,
        TriggerAction::Depart,
        TriggerAction::Perform,
    ];

    /// `true` for the one action that may keep multiple sequence groups.
    #[inline]
    pub fn allows_multiple_groups(self) -> bool {
        matches!(self, TriggerAction::Perform)
    }

    /// Parse an authored action label.  Returns `None` for unknown labels so
    /// the caller can decide on a fallback.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "click"    => Some(TriggerAction::Click),
            "approach" => Some(TriggerAction::Approach),
            "depart"   => Some(TriggerAction::Depart),
            "perform"  => Some(TriggerAction::Perform),
            _ => None,
        }
    }

    /// Human-readable label, matching the authored JSON form.
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerAction::Click    => "click",
            TriggerAction::Approach => "approach",
            TriggerAction::Depart   => "depart",
            TriggerAction::Perform  => "perform",
        }
    }
}

impl std::fmt::Display for TriggerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
