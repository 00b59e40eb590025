//! Runtime events — what the executor hands back to the host.
//!
//! Events are produced by [`BehaviorRuntime::trigger_action`] and
//! [`BehaviorRuntime::resolve_event`][crate::BehaviorRuntime::resolve_event]
//! and consumed by the host's effect subsystems (camera controller, dialog
//! UI, timer, scene-graph visibility setter).  Token-carrying events demand a
//! matching `resolve_event` call before the sequence continues;
//! [`EventKind::SetVisibility`] is the one effect the host applies without
//! resolving anything.
//!
//! [`BehaviorRuntime::trigger_action`]: crate::BehaviorRuntime::trigger_action

use bhv_core::{BehaviorId, ExecutionId, NodeId, SequenceId, SuspendToken, TriggerAction};
use bhv_script::{AlertParams, Facing, Slide};

/// One runtime event, tagged with the full envelope of the execution that
/// produced it.
#[derive(Clone, PartialEq, Debug)]
pub struct BehaviorRuntimeEvent {
    /// Node whose sequence produced the event.
    pub node: NodeId,

    /// Trigger action the sequence ran under.
    pub action: TriggerAction,

    /// The live execution instance (unique per trigger).
    pub execution: ExecutionId,

    /// The authored sequence id the execution was cloned from.
    pub sequence_id: SequenceId,

    /// The step that produced the event, when one did (completion events for
    /// an exhausted sequence carry the last step's id).
    pub step_id: Option<BehaviorId>,

    pub kind: EventKind,
}

/// Event payload per step kind, plus the two terminal events.
#[derive(Clone, PartialEq, Debug)]
pub enum EventKind {
    /// Host timer: wait `seconds`, then resolve.
    Delay { seconds: f64, token: SuspendToken },

    /// Host camera controller: fly to the node, then resolve.
    MoveCamera { speed: f64, facing: Facing, offset: f64, token: SuspendToken },

    /// Host dialog UI: present the modal, resolve with the user's choice.
    ShowAlert { params: AlertParams, token: SuspendToken },

    /// Host camera controller: look at `target`, then resolve.
    WatchNode { target: NodeId, caging: bool, token: SuspendToken },

    /// Host slide UI: present the show, resolve when dismissed.
    Lantern { slides: Vec<Slide>, token: SuspendToken },

    /// Host camera controller: level to the horizon, then resolve.
    LookLevel { token: SuspendToken },

    /// Host scene graph: set `target`'s visibility.  No token — inline.
    SetVisibility { target: NodeId, visible: bool },

    /// The sequence finished (successfully or aborted).
    SequenceComplete { status: CompletionStatus, message: Option<String> },

    /// The sequence failed.
    SequenceError { message: String },
}

impl EventKind {
    /// The resumption token, for the suspending kinds.
    pub fn token(&self) -> Option<&SuspendToken> {
        match self {
            EventKind::Delay { token, .. }
            | EventKind::MoveCamera { token, .. }
            | EventKind::ShowAlert { token, .. }
            | EventKind::WatchNode { token, .. }
            | EventKind::Lantern { token, .. }
            | EventKind::LookLevel { token } => Some(token),
            EventKind::SetVisibility { .. }
            | EventKind::SequenceComplete { .. }
            | EventKind::SequenceError { .. } => None,
        }
    }

    /// `true` for the events that end a sequence.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EventKind::SequenceComplete { .. } | EventKind::SequenceError { .. }
        )
    }
}

/// Terminal outcome of a sequence execution.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CompletionStatus {
    /// Every step ran to the end of the list.
    Success,
    /// The host (or a registry rebuild) aborted a waiting step.
    Aborted,
    /// The host reported a runtime failure, or the snapshot was corrupt.
    Failure,
}

impl CompletionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CompletionStatus::Success => "success",
            CompletionStatus::Aborted => "aborted",
            CompletionStatus::Failure => "failure",
        }
    }
}

impl std::fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the host resolves an outstanding suspension.
///
/// `Abort` and `Fail` are distinct on purpose: an abort is a legitimate user
/// outcome (dialog cancelled — downstream UI stays quiet), a fail is a host
/// runtime failure (downstream UI may surface it).
#[derive(Clone, PartialEq, Debug)]
pub enum EventResolution {
    /// The effect completed; run the next step.
    Continue,
    /// Stop the sequence; user declined or the host cancelled.
    Abort { message: Option<String> },
    /// Stop the sequence; the effect could not be performed.
    Fail { message: Option<String> },
}
