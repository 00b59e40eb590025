//! `BehaviorStep` — one authored action unit.

use bhv_core::{BehaviorId, SequenceId, TriggerAction};

use crate::script::StepScript;

/// One scripted action unit: which trigger action it belongs to, which
/// sequence group it is part of, and what it does.
///
/// Steps are immutable values once registered; the registry and every live
/// execution hold their own cloned snapshot.
#[derive(Clone, PartialEq, Debug)]
pub struct BehaviorStep {
    /// Backend-assigned step id (minted when the authored id was blank).
    pub id: BehaviorId,

    /// Authoring display name; not interpreted by the runtime.
    pub name: String,

    /// Trigger action under which this step runs.
    pub action: TriggerAction,

    /// Sequence group this step belongs to under its action.
    pub sequence_id: SequenceId,

    /// What the step does.
    pub script: StepScript,
}

impl BehaviorStep {
    pub fn new(
        id:          impl Into<BehaviorId>,
        name:        impl Into<String>,
        action:      TriggerAction,
        sequence_id: impl Into<SequenceId>,
        script:      StepScript,
    ) -> Self {
        Self {
            id:          id.into(),
            name:        name.into(),
            action,
            sequence_id: sequence_id.into(),
            script,
        }
    }
}

/// Deep-copy a step list into an allocation-fresh snapshot.
///
/// All step data is owned, so `Clone` recurses through nested collections
/// (`Lantern.slides` included).  Executions created from the returned vector
/// are immune to later in-place edits of `steps`.
pub fn clone_steps(steps: &[BehaviorStep]) -> Vec<BehaviorStep> {
    steps.to_vec()
}
