//! Live sequence execution state.
//!
//! A `SequenceExecution` exists only while its sequence is `Running` or
//! `Waiting`; finalization removes it from the runtime's live map in the same
//! call, so a "done" execution is never observable.  Each execution owns a
//! private cloned snapshot of its steps — registry edits after the trigger
//! cannot reach it.

use bhv_core::{ExecutionId, NodeId, SequenceId, TriggerAction};
use bhv_script::BehaviorStep;

/// Where an execution currently is in its lifecycle.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ExecutionStatus {
    /// Being actively stepped inside a runtime call.
    Running,
    /// Exactly one suspend token is outstanding; the cursor points at the
    /// waiting step.
    Waiting,
}

/// One live run of a sequence group.
#[derive(Clone, Debug)]
pub struct SequenceExecution {
    /// Unique per trigger; tags every event this execution emits.
    pub id: ExecutionId,

    /// Node the sequence belongs to.
    pub node: NodeId,

    /// Action it was triggered under.
    pub action: TriggerAction,

    /// The authored sequence id the snapshot was cloned from.
    pub sequence_id: SequenceId,

    /// Private deep-cloned step snapshot.
    pub steps: Vec<BehaviorStep>,

    /// 0-based index of the next step to run (or, while `Waiting`, of the
    /// step whose token is outstanding).
    pub cursor: usize,

    pub status: ExecutionStatus,
}

/// Pending-token table entry: which execution a token resumes, and at which
/// recorded cursor it must still be waiting.  A resolution whose recorded
/// index no longer matches the live cursor is stale and ignored.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PendingWait {
    pub execution:  ExecutionId,
    pub step_index: usize,
}
