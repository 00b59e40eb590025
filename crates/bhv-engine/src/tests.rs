//! Integration tests for bhv-engine.

use std::cell::RefCell;
use std::rc::Rc;

use bhv_core::{NodeId, SuspendToken, TriggerAction};
use bhv_script::{AlertParams, BehaviorStep, Facing, StepScript};

use crate::{
    BehaviorRuntime, BehaviorRuntimeEvent, CompletionStatus, EventKind, EventResolution,
    RuntimeListener, TriggerOptions,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn runtime() -> BehaviorRuntime<&'static str> {
    BehaviorRuntime::with_seed(42)
}

fn step(id: &str, action: TriggerAction, sequence: &str, script: StepScript) -> BehaviorStep {
    BehaviorStep::new(id, id, action, sequence, script)
}

fn show(id: &str, action: TriggerAction, sequence: &str, target: &str) -> BehaviorStep {
    step(id, action, sequence, StepScript::Show { target: Some(NodeId::new(target)) })
}

fn delay(id: &str, action: TriggerAction, sequence: &str, seconds: f64) -> BehaviorStep {
    step(id, action, sequence, StepScript::Delay { seconds })
}

/// Extract the token of the last event, which must be a suspension.
fn last_token(events: &[BehaviorRuntimeEvent]) -> SuspendToken {
    events
        .last()
        .and_then(|event| event.kind.token())
        .cloned()
        .expect("expected a suspending event")
}

#[derive(Default)]
struct Recorded {
    changed:   Vec<NodeId>,
    cancelled: Vec<BehaviorRuntimeEvent>,
}

struct RecordingListener(Rc<RefCell<Recorded>>);

impl RuntimeListener for RecordingListener {
    fn on_registry_changed(&mut self, node: &NodeId) {
        self.0.borrow_mut().changed.push(node.clone());
    }

    fn on_sequence_cancelled(&mut self, event: &BehaviorRuntimeEvent) {
        self.0.borrow_mut().cancelled.push(event.clone());
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod registry_tests {
    use super::*;

    #[test]
    fn registered_actions_report_non_empty_groups() {
        let mut rt = runtime();
        let node = NodeId::new("n1");
        rt.register_behaviors(
            node.clone(),
            &[
                delay("b1", TriggerAction::Click, "s1", 1.0),
                delay("b2", TriggerAction::Perform, "s2", 1.0),
            ],
            None,
        );
        assert_eq!(
            rt.registered_actions(&node),
            vec![TriggerAction::Click, TriggerAction::Perform]
        );
        assert_eq!(rt.registered_actions(&NodeId::new("other")), vec![]);
    }

    #[test]
    fn empty_step_list_registers_nothing_interactive() {
        let mut rt = runtime();
        let node = NodeId::new("n1");
        rt.register_behaviors(node.clone(), &[], None);
        assert!(rt.has_registered_behaviors());
        assert_eq!(rt.registered_actions(&node), vec![]);
    }

    // P5: two groups under a non-perform action collapse into one.
    #[test]
    fn non_perform_groups_collapse_into_one() {
        let mut rt = runtime();
        let node = NodeId::new("n1");
        rt.register_behaviors(
            node.clone(),
            &[
                delay("b1", TriggerAction::Click, "s1", 1.0),
                delay("b2", TriggerAction::Click, "s2", 2.0),
            ],
            None,
        );

        // One execution runs the concatenation of both authored groups.
        let events = rt.trigger_action(&node, TriggerAction::Click, TriggerOptions::default());
        let token = last_token(&events);
        assert!(matches!(events[0].kind, EventKind::Delay { seconds, .. } if seconds == 1.0));

        let events = rt.resolve_event(&token, EventResolution::Continue);
        assert!(matches!(events[0].kind, EventKind::Delay { seconds, .. } if seconds == 2.0));
        // The collapsed group carries a single sequence id for both steps.
        assert_eq!(events[0].sequence_id.as_str(), "s2");
    }

    #[test]
    fn perform_keeps_groups_separate() {
        let mut rt = runtime();
        let node = NodeId::new("n1");
        rt.register_behaviors(
            node.clone(),
            &[
                delay("b1", TriggerAction::Perform, "s1", 1.0),
                delay("b2", TriggerAction::Perform, "s2", 2.0),
            ],
            None,
        );

        let options = TriggerOptions { sequence_id: Some("s2".into()) };
        let events = rt.trigger_action(&node, TriggerAction::Perform, options);
        assert!(matches!(events[0].kind, EventKind::Delay { seconds, .. } if seconds == 2.0));
    }

    #[test]
    fn interactable_index_lists_only_nodes_with_handles() {
        let mut rt = runtime();
        rt.register_behaviors(
            NodeId::new("n1"),
            &[delay("b1", TriggerAction::Click, "s1", 1.0)],
            Some("mesh-1"),
        );
        rt.register_behaviors(
            NodeId::new("n2"),
            &[delay("b2", TriggerAction::Click, "s1", 1.0)],
            None,
        );

        let interactable: Vec<_> = rt.interactable_objects().collect();
        assert_eq!(interactable.len(), 1);
        assert_eq!(interactable[0], (&NodeId::new("n1"), &"mesh-1"));
    }

    #[test]
    fn update_object_touches_only_the_back_reference() {
        let mut rt = runtime();
        let node = NodeId::new("n1");
        rt.register_behaviors(node.clone(), &[delay("b1", TriggerAction::Click, "s1", 5.0)], None);

        // A waiting sequence must survive an object update (no cancellation).
        let events = rt.trigger_action(&node, TriggerAction::Click, TriggerOptions::default());
        let token = last_token(&events);

        assert!(rt.update_object(&node, Some("mesh-1")));
        assert_eq!(rt.live_sequence_count(), 1);

        let events = rt.resolve_event(&token, EventResolution::Continue);
        assert!(matches!(
            events[0].kind,
            EventKind::SequenceComplete { status: CompletionStatus::Success, .. }
        ));
    }

    #[test]
    fn update_object_unknown_node_is_false() {
        let mut rt = runtime();
        assert!(!rt.update_object(&NodeId::new("ghost"), Some("mesh")));
    }

    #[test]
    fn update_behaviors_keeps_the_handle() {
        let mut rt = runtime();
        let node = NodeId::new("n1");
        rt.register_behaviors(node.clone(), &[], Some("mesh-1"));
        rt.update_behaviors(node.clone(), &[delay("b1", TriggerAction::Click, "s1", 1.0)]);
        assert_eq!(rt.interactable_objects().count(), 1);
    }

    #[test]
    fn update_behaviors_unknown_node_registers_fresh() {
        let mut rt = runtime();
        let node = NodeId::new("n1");
        rt.update_behaviors(node.clone(), &[delay("b1", TriggerAction::Click, "s1", 1.0)]);
        assert_eq!(rt.registered_actions(&node), vec![TriggerAction::Click]);
        assert_eq!(rt.interactable_objects().count(), 0);
    }

    #[test]
    fn unregister_removes_the_entry() {
        let mut rt = runtime();
        let node = NodeId::new("n1");
        rt.register_behaviors(node.clone(), &[delay("b1", TriggerAction::Click, "s1", 1.0)], None);
        assert!(rt.unregister(&node));
        assert!(!rt.unregister(&node));
        assert!(!rt.has_registered_behaviors());
        assert!(rt
            .trigger_action(&node, TriggerAction::Click, TriggerOptions::default())
            .is_empty());
    }
}

// ── Triggering and inline advancement ─────────────────────────────────────────

#[cfg(test)]
mod trigger_tests {
    use super::*;

    #[test]
    fn unknown_node_is_silently_inert() {
        let mut rt = runtime();
        let events =
            rt.trigger_action(&NodeId::new("ghost"), TriggerAction::Click, TriggerOptions::default());
        assert!(events.is_empty());
    }

    #[test]
    fn action_without_behaviors_is_silently_inert() {
        let mut rt = runtime();
        let node = NodeId::new("n1");
        rt.register_behaviors(node.clone(), &[delay("b1", TriggerAction::Click, "s1", 1.0)], None);
        let events = rt.trigger_action(&node, TriggerAction::Approach, TriggerOptions::default());
        assert!(events.is_empty());
    }

    // P2: all-inline sequence runs in order and completes in one call.
    #[test]
    fn inline_sequence_runs_to_completion_in_order() {
        let mut rt = runtime();
        let node = NodeId::new("n1");
        rt.register_behaviors(
            node.clone(),
            &[
                show("a", TriggerAction::Click, "s1", "t1"),
                step("b", TriggerAction::Click, "s1", StepScript::Hide { target: Some(NodeId::new("t2")) }),
                step("c", TriggerAction::Click, "s1", StepScript::Show { target: None }),
            ],
            None,
        );

        let events = rt.trigger_action(&node, TriggerAction::Click, TriggerOptions::default());
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[0].kind,
            EventKind::SetVisibility { target: NodeId::new("t1"), visible: true }
        );
        assert_eq!(
            events[1].kind,
            EventKind::SetVisibility { target: NodeId::new("t2"), visible: false }
        );
        // No explicit target falls back to the sequence's own node.
        assert_eq!(
            events[2].kind,
            EventKind::SetVisibility { target: node.clone(), visible: true }
        );
        assert!(matches!(
            events[3].kind,
            EventKind::SequenceComplete { status: CompletionStatus::Success, .. }
        ));
        assert_eq!(rt.live_sequence_count(), 0);
        assert_eq!(rt.pending_token_count(), 0);
    }

    #[test]
    fn inert_steps_are_skipped_without_events() {
        let mut rt = runtime();
        let node = NodeId::new("n1");
        rt.register_behaviors(
            node.clone(),
            &[
                step("a", TriggerAction::Click, "s1", StepScript::LoadScene { scene_id: None }),
                step("b", TriggerAction::Click, "s1", StepScript::Drive),
                show("c", TriggerAction::Click, "s1", "t1"),
            ],
            None,
        );

        let events = rt.trigger_action(&node, TriggerAction::Click, TriggerOptions::default());
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0].kind, EventKind::SetVisibility { .. }));
        assert!(events[1].kind.is_terminal());
    }

    #[test]
    fn events_carry_the_full_envelope() {
        let mut rt = runtime();
        let node = NodeId::new("n1");
        rt.register_behaviors(node.clone(), &[delay("b1", TriggerAction::Click, "s1", 2.0)], None);

        let events = rt.trigger_action(&node, TriggerAction::Click, TriggerOptions::default());
        let event = &events[0];
        assert_eq!(event.node, node);
        assert_eq!(event.action, TriggerAction::Click);
        assert_eq!(event.sequence_id.as_str(), "s1");
        assert_eq!(event.step_id.as_ref().map(|id| id.as_str()), Some("b1"));
    }
}

// ── Suspend / resume ──────────────────────────────────────────────────────────

#[cfg(test)]
mod suspend_resume_tests {
    use super::*;

    // P3: one suspending step, one token, then success on continue.
    #[test]
    fn delay_suspends_and_resumes() {
        let mut rt = runtime();
        let node = NodeId::new("n1");
        rt.register_behaviors(node.clone(), &[delay("b1", TriggerAction::Click, "s1", 2.0)], None);

        let events = rt.trigger_action(&node, TriggerAction::Click, TriggerOptions::default());
        assert_eq!(events.len(), 1);
        let token = match &events[0].kind {
            EventKind::Delay { seconds, token } => {
                assert_eq!(*seconds, 2.0);
                token.clone()
            }
            other => panic!("unexpected event {other:?}"),
        };

        let events = rt.resolve_event(&token, EventResolution::Continue);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0].kind,
            EventKind::SequenceComplete { status: CompletionStatus::Success, message: None }
        ));
        assert_eq!(rt.live_sequence_count(), 0);
    }

    // P1: never more than one outstanding token per sequence.
    #[test]
    fn at_most_one_token_outstanding() {
        let mut rt = runtime();
        let node = NodeId::new("n1");
        rt.register_behaviors(
            node.clone(),
            &[
                delay("b1", TriggerAction::Click, "s1", 1.0),
                delay("b2", TriggerAction::Click, "s1", 2.0),
            ],
            None,
        );

        let events = rt.trigger_action(&node, TriggerAction::Click, TriggerOptions::default());
        assert_eq!(rt.pending_token_count(), 1);

        let events = rt.resolve_event(&last_token(&events), EventResolution::Continue);
        assert_eq!(rt.pending_token_count(), 1); // new suspension, old token consumed

        rt.resolve_event(&last_token(&events), EventResolution::Continue);
        assert_eq!(rt.pending_token_count(), 0);
    }

    #[test]
    fn move_camera_carries_normalized_params() {
        let mut rt = runtime();
        let node = NodeId::new("n1");
        rt.register_behaviors(
            node.clone(),
            &[step(
                "b1",
                TriggerAction::Click,
                "s1",
                StepScript::MoveTo { speed: 2.0, facing: Facing::Left, offset: 0.5 },
            )],
            None,
        );

        let events = rt.trigger_action(&node, TriggerAction::Click, TriggerOptions::default());
        match &events[0].kind {
            EventKind::MoveCamera { speed, facing, offset, .. } => {
                assert_eq!(*speed, 2.0);
                assert_eq!(*facing, Facing::Left);
                assert_eq!(*offset, 0.5);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn alert_event_carries_params_and_waits() {
        let mut rt = runtime();
        let node = NodeId::new("n1");
        let mut params = AlertParams::default();
        params.content = "Proceed?".to_string();
        rt.register_behaviors(
            node.clone(),
            &[step("b1", TriggerAction::Click, "s1", StepScript::ShowAlert(params.clone()))],
            None,
        );

        let events = rt.trigger_action(&node, TriggerAction::Click, TriggerOptions::default());
        match &events[0].kind {
            EventKind::ShowAlert { params: p, .. } => assert_eq!(*p, params),
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(rt.live_sequence_count(), 1);
    }

    // End-to-end walkthrough: watch, then delay, then an inline show.
    #[test]
    fn watch_delay_show_scenario() {
        let mut rt = runtime();
        let node = NodeId::new("n1");
        rt.register_behaviors(
            node.clone(),
            &[
                step(
                    "b1",
                    TriggerAction::Approach,
                    "s1",
                    StepScript::Watch { target: Some(NodeId::new("n2")), caging: false },
                ),
                delay("b2", TriggerAction::Approach, "s1", 1.0),
                show("b3", TriggerAction::Approach, "s1", "n3"),
            ],
            None,
        );

        let events = rt.trigger_action(&node, TriggerAction::Approach, TriggerOptions::default());
        assert_eq!(events.len(), 1);
        let t1 = match &events[0].kind {
            EventKind::WatchNode { target, token, .. } => {
                assert_eq!(*target, NodeId::new("n2"));
                token.clone()
            }
            other => panic!("unexpected event {other:?}"),
        };

        let events = rt.resolve_event(&t1, EventResolution::Continue);
        assert_eq!(events.len(), 1);
        let t2 = match &events[0].kind {
            EventKind::Delay { seconds, token } => {
                assert_eq!(*seconds, 1.0);
                token.clone()
            }
            other => panic!("unexpected event {other:?}"),
        };
        assert_ne!(t1, t2);

        // The inline step does not yield: visibility and completion arrive in
        // the same call.
        let events = rt.resolve_event(&t2, EventResolution::Continue);
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0].kind,
            EventKind::SetVisibility { target: NodeId::new("n3"), visible: true }
        );
        assert!(matches!(
            events[1].kind,
            EventKind::SequenceComplete { status: CompletionStatus::Success, .. }
        ));
    }

    #[test]
    fn two_nodes_wait_independently() {
        let mut rt = runtime();
        let n1 = NodeId::new("n1");
        let n2 = NodeId::new("n2");
        rt.register_behaviors(n1.clone(), &[delay("b1", TriggerAction::Click, "s1", 1.0)], None);
        rt.register_behaviors(n2.clone(), &[delay("b2", TriggerAction::Click, "s1", 2.0)], None);

        let t1 = last_token(&rt.trigger_action(&n1, TriggerAction::Click, TriggerOptions::default()));
        let t2 = last_token(&rt.trigger_action(&n2, TriggerAction::Click, TriggerOptions::default()));
        assert_eq!(rt.live_sequence_count(), 2);

        // Resolving out of trigger order is fine; sequences never serialize
        // against each other.
        let events = rt.resolve_event(&t2, EventResolution::Continue);
        assert_eq!(events[0].node, n2);
        let events = rt.resolve_event(&t1, EventResolution::Continue);
        assert_eq!(events[0].node, n1);
        assert_eq!(rt.live_sequence_count(), 0);
    }
}

// ── Abort / fail / protocol errors ────────────────────────────────────────────

#[cfg(test)]
mod resolution_tests {
    use super::*;

    // P4: abort finalizes with the message, and the token dies with it.
    #[test]
    fn abort_finalizes_and_is_idempotent() {
        let mut rt = runtime();
        let node = NodeId::new("n1");
        rt.register_behaviors(node.clone(), &[delay("b1", TriggerAction::Click, "s1", 2.0)], None);

        let token =
            last_token(&rt.trigger_action(&node, TriggerAction::Click, TriggerOptions::default()));
        let events = rt.resolve_event(
            &token,
            EventResolution::Abort { message: Some("cancelled".to_string()) },
        );
        assert_eq!(events.len(), 1);
        match &events[0].kind {
            EventKind::SequenceComplete { status, message } => {
                assert_eq!(*status, CompletionStatus::Aborted);
                assert_eq!(message.as_deref(), Some("cancelled"));
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(events[0].step_id.as_ref().map(|id| id.as_str()), Some("b1"));
        assert_eq!(rt.live_sequence_count(), 0);

        // Second resolve on the same token: no-op.
        assert!(rt.resolve_event(&token, EventResolution::Continue).is_empty());
    }

    #[test]
    fn fail_finalizes_with_sequence_error() {
        let mut rt = runtime();
        let node = NodeId::new("n1");
        rt.register_behaviors(node.clone(), &[delay("b1", TriggerAction::Click, "s1", 2.0)], None);

        let token =
            last_token(&rt.trigger_action(&node, TriggerAction::Click, TriggerOptions::default()));
        let events = rt.resolve_event(
            &token,
            EventResolution::Fail { message: Some("camera jammed".to_string()) },
        );
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].kind,
            EventKind::SequenceError { message: "camera jammed".to_string() }
        );
        assert_eq!(rt.live_sequence_count(), 0);
    }

    // P7: an unknown token resolves to nothing, quietly.
    #[test]
    fn unknown_token_is_a_noop() {
        let mut rt = runtime();
        let events =
            rt.resolve_event(&SuspendToken::new("nonexistent-token"), EventResolution::Continue);
        assert!(events.is_empty());
    }
}

// ── Clone isolation ───────────────────────────────────────────────────────────

#[cfg(test)]
mod isolation_tests {
    use super::*;

    // P6: mutating the caller's step list after registration changes nothing.
    #[test]
    fn caller_mutations_cannot_reach_registered_or_running_state() {
        let mut rt = runtime();
        let node = NodeId::new("n1");
        let mut authored = vec![
            delay("b1", TriggerAction::Click, "s1", 2.0),
            show("b2", TriggerAction::Click, "s1", "t1"),
        ];
        rt.register_behaviors(node.clone(), &authored, None);

        let token =
            last_token(&rt.trigger_action(&node, TriggerAction::Click, TriggerOptions::default()));

        // Rewrite the caller's copy wholesale.
        authored[1] = show("b2", TriggerAction::Click, "s1", "poisoned");
        authored.clear();

        let events = rt.resolve_event(&token, EventResolution::Continue);
        assert_eq!(
            events[0].kind,
            EventKind::SetVisibility { target: NodeId::new("t1"), visible: true }
        );
    }
}

// ── Cancellation via registry edits ───────────────────────────────────────────

#[cfg(test)]
mod cancel_tests {
    use super::*;

    #[test]
    fn reregistering_aborts_running_sequences_via_listener() {
        let mut rt = runtime();
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        rt.add_listener(Box::new(RecordingListener(recorded.clone())));

        let node = NodeId::new("n1");
        rt.register_behaviors(node.clone(), &[delay("b1", TriggerAction::Click, "s1", 9.0)], None);
        let token =
            last_token(&rt.trigger_action(&node, TriggerAction::Click, TriggerOptions::default()));

        rt.register_behaviors(node.clone(), &[delay("b2", TriggerAction::Click, "s1", 1.0)], None);

        let recorded = recorded.borrow();
        assert_eq!(recorded.cancelled.len(), 1);
        match &recorded.cancelled[0].kind {
            EventKind::SequenceComplete { status, message } => {
                assert_eq!(*status, CompletionStatus::Aborted);
                assert_eq!(message.as_deref(), Some("definitions updated"));
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(rt.live_sequence_count(), 0);
        assert_eq!(rt.pending_token_count(), 0);

        // The stale token from before the rebuild resolves to nothing.
        drop(recorded);
        assert!(rt.resolve_event(&token, EventResolution::Continue).is_empty());
    }

    #[test]
    fn unregister_aborts_running_sequences() {
        let mut rt = runtime();
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        rt.add_listener(Box::new(RecordingListener(recorded.clone())));

        let node = NodeId::new("n1");
        rt.register_behaviors(node.clone(), &[delay("b1", TriggerAction::Click, "s1", 9.0)], None);
        rt.trigger_action(&node, TriggerAction::Click, TriggerOptions::default());
        rt.unregister(&node);

        assert_eq!(recorded.borrow().cancelled.len(), 1);
        assert_eq!(rt.live_sequence_count(), 0);
    }

    #[test]
    fn other_nodes_sequences_survive_a_rebuild() {
        let mut rt = runtime();
        let n1 = NodeId::new("n1");
        let n2 = NodeId::new("n2");
        rt.register_behaviors(n1.clone(), &[delay("b1", TriggerAction::Click, "s1", 1.0)], None);
        rt.register_behaviors(n2.clone(), &[delay("b2", TriggerAction::Click, "s1", 1.0)], None);

        let t2 = last_token(&rt.trigger_action(&n2, TriggerAction::Click, TriggerOptions::default()));
        rt.register_behaviors(n1.clone(), &[], None);

        let events = rt.resolve_event(&t2, EventResolution::Continue);
        assert!(matches!(
            events[0].kind,
            EventKind::SequenceComplete { status: CompletionStatus::Success, .. }
        ));
    }
}

// ── Listeners ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod listener_tests {
    use super::*;

    #[test]
    fn registry_changes_are_notified() {
        let mut rt = runtime();
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        rt.add_listener(Box::new(RecordingListener(recorded.clone())));

        let node = NodeId::new("n1");
        rt.register_behaviors(node.clone(), &[], None);
        rt.update_behaviors(node.clone(), &[]);
        rt.unregister(&node);

        assert_eq!(recorded.borrow().changed, vec![node.clone(), node.clone(), node]);
    }

    #[test]
    fn removed_listeners_stop_receiving() {
        let mut rt = runtime();
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let id = rt.add_listener(Box::new(RecordingListener(recorded.clone())));

        assert!(rt.remove_listener(id));
        assert!(!rt.remove_listener(id));

        rt.register_behaviors(NodeId::new("n1"), &[], None);
        assert!(recorded.borrow().changed.is_empty());
    }
}

// ── Reset ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod reset_tests {
    use super::*;

    #[test]
    fn reset_clears_state_but_keeps_listeners() {
        let mut rt = runtime();
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        rt.add_listener(Box::new(RecordingListener(recorded.clone())));

        let node = NodeId::new("n1");
        rt.register_behaviors(node.clone(), &[delay("b1", TriggerAction::Click, "s1", 2.0)], None);
        let token =
            last_token(&rt.trigger_action(&node, TriggerAction::Click, TriggerOptions::default()));

        rt.reset();
        assert!(!rt.has_registered_behaviors());
        assert_eq!(rt.live_sequence_count(), 0);
        assert_eq!(rt.pending_token_count(), 0);
        assert!(rt.resolve_event(&token, EventResolution::Continue).is_empty());

        // Listener wiring survives the reload.
        recorded.borrow_mut().changed.clear();
        rt.register_behaviors(node.clone(), &[], None);
        assert_eq!(recorded.borrow().changed, vec![node]);
    }
}
