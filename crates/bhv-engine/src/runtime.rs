//! The `BehaviorRuntime` engine object and its state machine.
//!
//! All mutable runtime state lives here — registry entries, live executions,
//! the pending-token table, and listeners — constructed once per running
//! scene.  There is no process-global state: tests and multi-scene hosts run
//! independent runtimes side by side.
//!
//! Every operation completes fully before returning; nothing here blocks,
//! spawns, or schedules.  See the crate docs for the suspend/resume protocol.

use rustc_hash::FxHashMap;
use tracing::debug;

use bhv_core::{
    BehaviorId, ExecutionId, IdMinter, ListenerId, NodeId, SequenceId, SuspendToken, TriggerAction,
};
use bhv_script::{clone_steps, sanitize_steps, BehaviorStep, StepScript};

use crate::event::{BehaviorRuntimeEvent, CompletionStatus, EventKind, EventResolution};
use crate::execution::{ExecutionStatus, PendingWait, SequenceExecution};
use crate::listener::RuntimeListener;
use crate::registry::RegistryEntry;

/// Options for [`BehaviorRuntime::trigger_action`].
#[derive(Clone, Debug, Default)]
pub struct TriggerOptions {
    /// Run this specific group instead of the action's first group — the way
    /// hosts address one of several `perform` sequences.
    pub sequence_id: Option<SequenceId>,
}

/// The behavior sequencing engine for one scene.
///
/// Generic over `H`, the host's renderable-handle type: the runtime stores a
/// handle per registered node for the interactable index but never interprets
/// it.
pub struct BehaviorRuntime<H> {
    entries:        FxHashMap<NodeId, RegistryEntry<H>>,
    executions:     FxHashMap<ExecutionId, SequenceExecution>,
    pending:        FxHashMap<SuspendToken, PendingWait>,
    listeners:      Vec<(ListenerId, Box<dyn RuntimeListener>)>,
    minter:         IdMinter,
    next_execution: u64,
    next_listener:  u64,
}

impl<H> Default for BehaviorRuntime<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> BehaviorRuntime<H> {
    /// A runtime with an entropy-seeded token minter (production path).
    pub fn new() -> Self {
        Self::with_minter(IdMinter::from_entropy())
    }

    /// A runtime with a deterministic token minter (test path).
    pub fn with_seed(seed: u64) -> Self {
        Self::with_minter(IdMinter::with_seed(seed))
    }

    fn with_minter(minter: IdMinter) -> Self {
        Self {
            entries:        FxHashMap::default(),
            executions:     FxHashMap::default(),
            pending:        FxHashMap::default(),
            listeners:      Vec::new(),
            minter,
            next_execution: 0,
            next_listener:  0,
        }
    }

    // ── Registry operations ───────────────────────────────────────────────

    /// Register (or replace) a node's behavior definitions.
    ///
    /// Any sequence currently running for the node is aborted first —
    /// continuing to run steps from replaced definitions would be unsafe.
    /// The step list is cloned and normalized on entry; the caller's data is
    /// never retained or mutated.
    pub fn register_behaviors(
        &mut self,
        node:   NodeId,
        steps:  &[BehaviorStep],
        object: Option<H>,
    ) {
        self.cancel_sequences_for(&node);

        let mut cloned = clone_steps(steps);
        sanitize_steps(&mut cloned, &mut self.minter);

        let entry = RegistryEntry::build(node.clone(), cloned, object);
        self.entries.insert(node.clone(), entry);
        debug!(node = %node, "behavior registry entry rebuilt");
        self.notify_registry_changed(&node);
    }

    /// Replace a node's behavior definitions, keeping its object handle.
    ///
    /// An unknown node degrades to a fresh registration without a handle.
    pub fn update_behaviors(&mut self, node: NodeId, steps: &[BehaviorStep]) {
        let object = self.entries.remove(&node).and_then(|entry| entry.object);
        self.register_behaviors(node, steps, object);
    }

    /// Update only the node's renderable back-reference.  No cancellation,
    /// no registry rebuild.  Returns `false` for an unknown node.
    pub fn update_object(&mut self, node: &NodeId, object: Option<H>) -> bool {
        match self.entries.get_mut(node) {
            Some(entry) => {
                entry.object = object;
                true
            }
            None => false,
        }
    }

    /// Remove a node's definitions, aborting its running sequences.
    /// Returns `false` for an unknown node.
    pub fn unregister(&mut self, node: &NodeId) -> bool {
        self.cancel_sequences_for(node);
        if self.entries.remove(node).is_some() {
            debug!(node = %node, "behavior registry entry removed");
            self.notify_registry_changed(node);
            true
        } else {
            false
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Actions for which `node` has at least one non-empty group — the host's
    /// "is this node interactive for X?" check.
    pub fn registered_actions(&self, node: &NodeId) -> Vec<TriggerAction> {
        self.entries
            .get(node)
            .map(RegistryEntry::registered_actions)
            .unwrap_or_default()
    }

    /// The interactable index: every registered node that carries a
    /// renderable handle, for the host's pick/raycast dispatch.
    pub fn interactable_objects(&self) -> impl Iterator<Item = (&NodeId, &H)> {
        self.entries
            .values()
            .filter_map(|entry| entry.object.as_ref().map(|object| (&entry.node, object)))
    }

    pub fn has_registered_behaviors(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Number of live (running or waiting) sequence executions.
    pub fn live_sequence_count(&self) -> usize {
        self.executions.len()
    }

    /// Number of outstanding suspend tokens across all sequences.
    pub fn pending_token_count(&self) -> usize {
        self.pending.len()
    }

    // ── Listeners ─────────────────────────────────────────────────────────

    /// Register a listener; the returned id removes it again.
    pub fn add_listener(&mut self, listener: Box<dyn RuntimeListener>) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener.  Returns `false` if the id was already gone.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    // ── Execution ─────────────────────────────────────────────────────────

    /// Trigger `action` on `node`.
    ///
    /// Resolves the matching group, clones its steps into a fresh execution,
    /// and advances it as far as it will go.  The returned events end either
    /// with a token-carrying suspension or with a terminal event.  A node,
    /// action, or group with nothing to run returns an empty list — not an
    /// error.
    pub fn trigger_action(
        &mut self,
        node:    &NodeId,
        action:  TriggerAction,
        options: TriggerOptions,
    ) -> Vec<BehaviorRuntimeEvent> {
        let Some(entry) = self.entries.get(node) else {
            return Vec::new();
        };
        let Some(group) = entry.resolve_group(action, options.sequence_id.as_ref()) else {
            return Vec::new();
        };
        if group.steps.is_empty() {
            return Vec::new();
        }

        let steps = clone_steps(&group.steps);
        let sequence_id = group.sequence_id.clone();

        self.next_execution += 1;
        let id = ExecutionId(self.next_execution);
        self.executions.insert(
            id,
            SequenceExecution {
                id,
                node: node.clone(),
                action,
                sequence_id,
                steps,
                cursor: 0,
                status: ExecutionStatus::Running,
            },
        );
        debug!(execution = %id, node = %node, action = %action, "sequence started");

        let mut events = Vec::new();
        self.advance(id, &mut events);
        events
    }

    /// Resolve an outstanding suspension.
    ///
    /// Unknown, already-consumed, or index-mismatched tokens are silent
    /// no-ops — duplicate delivery from UI callbacks must not fault a
    /// sequence that has already moved on.
    pub fn resolve_event(
        &mut self,
        token:      &SuspendToken,
        resolution: EventResolution,
    ) -> Vec<BehaviorRuntimeEvent> {
        let Some(wait) = self.pending.remove(token) else {
            return Vec::new();
        };
        let Some(exec) = self.executions.get_mut(&wait.execution) else {
            return Vec::new();
        };
        if exec.status != ExecutionStatus::Waiting || exec.cursor != wait.step_index {
            return Vec::new();
        }
        let waiting_step = exec.steps.get(exec.cursor).map(|step| step.id.clone());

        let mut events = Vec::new();
        match resolution {
            EventResolution::Continue => {
                exec.status = ExecutionStatus::Running;
                exec.cursor += 1;
                self.advance(wait.execution, &mut events);
            }
            EventResolution::Abort { message } => {
                if let Some(event) = self.finalize(
                    wait.execution,
                    CompletionStatus::Aborted,
                    message,
                    waiting_step,
                ) {
                    events.push(event);
                }
            }
            EventResolution::Fail { message } => {
                if let Some(event) = self.finalize(
                    wait.execution,
                    CompletionStatus::Failure,
                    message,
                    waiting_step,
                ) {
                    events.push(event);
                }
            }
        }
        events
    }

    /// Reset all runtime state (scene reload).  Listeners are kept — host
    /// wiring outlives the scene being displayed.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.executions.clear();
        self.pending.clear();
        debug!("behavior runtime reset");
    }

    // ── State machine internals ───────────────────────────────────────────

    /// Step the execution while it stays `Running`: inline steps emit and
    /// continue, suspending steps emit a token and return, inert steps skip.
    fn advance(&mut self, id: ExecutionId, events: &mut Vec<BehaviorRuntimeEvent>) {
        loop {
            let Some(exec) = self.executions.get(&id) else {
                return;
            };
            if exec.status != ExecutionStatus::Running {
                return;
            }

            let node = exec.node.clone();
            let action = exec.action;
            let sequence_id = exec.sequence_id.clone();
            let cursor = exec.cursor;

            if cursor >= exec.steps.len() {
                let last = exec.steps.last().map(|step| step.id.clone());
                if let Some(event) =
                    self.finalize(id, CompletionStatus::Success, None, last)
                {
                    events.push(event);
                }
                return;
            }

            // The snapshot is immutable for the execution's lifetime, so a
            // hole here means corrupted state; fail the sequence rather than
            // guessing.
            let Some(step) = exec.steps.get(cursor).cloned() else {
                if let Some(event) = self.finalize(
                    id,
                    CompletionStatus::Failure,
                    Some(format!("step {cursor} missing from sequence snapshot")),
                    None,
                ) {
                    events.push(event);
                }
                return;
            };

            let envelope = |step_id: Option<BehaviorId>, kind: EventKind| BehaviorRuntimeEvent {
                node: node.clone(),
                action,
                execution: id,
                sequence_id: sequence_id.clone(),
                step_id,
                kind,
            };

            match step.script {
                // ── Inline: emit and keep going ───────────────────────────
                StepScript::Show { target } => {
                    let target = target.unwrap_or_else(|| node.clone());
                    events.push(envelope(
                        Some(step.id),
                        EventKind::SetVisibility { target, visible: true },
                    ));
                    self.bump_cursor(id);
                }
                StepScript::Hide { target } => {
                    let target = target.unwrap_or_else(|| node.clone());
                    events.push(envelope(
                        Some(step.id),
                        EventKind::SetVisibility { target, visible: false },
                    ));
                    self.bump_cursor(id);
                }

                // ── Suspending: emit one token event and yield ────────────
                StepScript::Delay { seconds } => {
                    let token = self.suspend(id, cursor);
                    events.push(envelope(Some(step.id), EventKind::Delay { seconds, token }));
                    return;
                }
                StepScript::MoveTo { speed, facing, offset } => {
                    let token = self.suspend(id, cursor);
                    events.push(envelope(
                        Some(step.id),
                        EventKind::MoveCamera { speed, facing, offset, token },
                    ));
                    return;
                }
                StepScript::ShowAlert(params) => {
                    let token = self.suspend(id, cursor);
                    events.push(envelope(
                        Some(step.id),
                        EventKind::ShowAlert { params, token },
                    ));
                    return;
                }
                StepScript::Watch { target, caging } => {
                    let token = self.suspend(id, cursor);
                    let target = target.unwrap_or_else(|| node.clone());
                    events.push(envelope(
                        Some(step.id),
                        EventKind::WatchNode { target, caging, token },
                    ));
                    return;
                }
                StepScript::Lantern { slides } => {
                    let token = self.suspend(id, cursor);
                    events.push(envelope(
                        Some(step.id),
                        EventKind::Lantern { slides, token },
                    ));
                    return;
                }
                StepScript::Look => {
                    let token = self.suspend(id, cursor);
                    events.push(envelope(Some(step.id), EventKind::LookLevel { token }));
                    return;
                }

                // ── Inert: no runtime semantics yet, skip silently ────────
                StepScript::LoadScene { .. }
                | StepScript::ExitScene
                | StepScript::Trigger { .. }
                | StepScript::Animation { .. }
                | StepScript::ShowCockpit
                | StepScript::HideCockpit
                | StepScript::Drive
                | StepScript::Debus => {
                    self.bump_cursor(id);
                }
            }
        }
    }

    /// Mint a token, record the pending wait, and park the execution.
    fn suspend(&mut self, id: ExecutionId, cursor: usize) -> SuspendToken {
        let token = self.minter.mint_token();
        self.pending
            .insert(token.clone(), PendingWait { execution: id, step_index: cursor });
        if let Some(exec) = self.executions.get_mut(&id) {
            exec.status = ExecutionStatus::Waiting;
        }
        token
    }

    fn bump_cursor(&mut self, id: ExecutionId) {
        if let Some(exec) = self.executions.get_mut(&id) {
            exec.cursor += 1;
        }
    }

    /// Terminal transition: remove the execution, sweep its tokens, and build
    /// the one completion event.
    fn finalize(
        &mut self,
        id:      ExecutionId,
        status:  CompletionStatus,
        message: Option<String>,
        step_id: Option<BehaviorId>,
    ) -> Option<BehaviorRuntimeEvent> {
        let exec = self.executions.remove(&id)?;
        // Invariant: at most one outstanding token per execution.
        self.pending.retain(|_, wait| wait.execution != id);
        debug!(execution = %id, node = %exec.node, status = %status, "sequence finalized");

        let kind = match status {
            CompletionStatus::Success | CompletionStatus::Aborted => {
                EventKind::SequenceComplete { status, message }
            }
            CompletionStatus::Failure => EventKind::SequenceError {
                message: message.unwrap_or_else(|| "sequence failed".to_string()),
            },
        };
        Some(BehaviorRuntimeEvent {
            node: exec.node,
            action: exec.action,
            execution: id,
            sequence_id: exec.sequence_id,
            step_id,
            kind,
        })
    }

    /// Abort every live sequence belonging to `node` (registry mutation or
    /// removal).  Completion events go to listeners, not to the caller of the
    /// registry operation.
    fn cancel_sequences_for(&mut self, node: &NodeId) {
        let cancelled: Vec<ExecutionId> = self
            .executions
            .values()
            .filter(|exec| exec.node == *node)
            .map(|exec| exec.id)
            .collect();

        for id in cancelled {
            let waiting_step = self
                .executions
                .get(&id)
                .and_then(|exec| exec.steps.get(exec.cursor))
                .map(|step| step.id.clone());
            if let Some(event) = self.finalize(
                id,
                CompletionStatus::Aborted,
                Some("definitions updated".to_string()),
                waiting_step,
            ) {
                self.notify_sequence_cancelled(&event);
            }
        }
    }

    fn notify_registry_changed(&mut self, node: &NodeId) {
        for (_, listener) in self.listeners.iter_mut() {
            listener.on_registry_changed(node);
        }
    }

    fn notify_sequence_cancelled(&mut self, event: &BehaviorRuntimeEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener.on_sequence_cancelled(event);
        }
    }
}
