//! walkthrough — smallest example for the bhv scene behavior runtime.
//!
//! Loads an embedded two-node scene script, registers it with a runtime, and
//! plays the part of the host: every token-carrying event is "performed" by a
//! stand-in subsystem (instant timer, auto-confirming dialog, teleporting
//! camera) and resolved straight back, so the whole walkthrough runs in one
//! pass.  Swap the stand-ins for a real frame loop and UI to embed this in a
//! viewer.

use anyhow::Result;

use bhv_core::{IdMinter, NodeId, TriggerAction};
use bhv_engine::{
    BehaviorRuntime, BehaviorRuntimeEvent, EventKind, EventResolution, NoopListener,
    TriggerOptions,
};
use bhv_script::steps_from_json;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED: u64 = 42;

// ── Scene script ──────────────────────────────────────────────────────────────

// Two interactive nodes:
//   kiosk  — on approach: aim the camera at the sign, pause, reveal the sign.
//   valve  — on click: confirm with the user, fly in close, hide the cover.
// The valve's second click group collapses into the first (click is a
// single-group action), so one click runs all five of its steps in order.
const SCENE_JSON: &str = r#"[
  {
    "id": "k1", "name": "aim at sign", "action": "approach", "sequenceId": "kiosk-intro",
    "script": { "type": "watch", "params": { "targetNodeId": "sign", "caging": true } }
  },
  {
    "id": "k2", "name": "beat", "action": "approach", "sequenceId": "kiosk-intro",
    "script": { "type": "delay", "params": { "seconds": 1.5 } }
  },
  {
    "id": "k3", "name": "reveal sign", "action": "approach", "sequenceId": "kiosk-intro",
    "script": { "type": "show", "params": { "targetNodeId": "sign" } }
  },
  {
    "id": "v1", "name": "confirm", "action": "click", "sequenceId": "valve-open",
    "script": { "type": "showAlert", "params": { "content": "Open the valve?" } }
  },
  {
    "id": "v2", "name": "fly in", "action": "click", "sequenceId": "valve-open",
    "script": { "type": "moveTo", "params": { "speed": 2.0, "facing": "front", "offset": 0.3 } }
  },
  {
    "id": "v3", "name": "hide cover", "action": "click", "sequenceId": "valve-open",
    "script": { "type": "hide", "params": { "targetNodeId": "valve-cover" } }
  },
  {
    "id": "v4", "name": "level off", "action": "click", "sequenceId": "valve-detail",
    "script": { "type": "look" }
  },
  {
    "id": "v5", "name": "beat", "action": "click", "sequenceId": "valve-detail",
    "script": { "type": "delay", "params": { "seconds": 0.5 } }
  }
]"#;

// ── Stand-in host subsystems ──────────────────────────────────────────────────

/// Apply one event's effect and decide how to resolve it.  A real host would
/// hand the token to a timer, camera tween, or dialog and call back later;
/// here every effect finishes instantly.
fn perform(event: &BehaviorRuntimeEvent) -> Option<EventResolution> {
    match &event.kind {
        EventKind::Delay { seconds, .. } => {
            println!("  [timer]  waited {seconds} s");
            Some(EventResolution::Continue)
        }
        EventKind::MoveCamera { speed, facing, offset, .. } => {
            println!("  [camera] flew to {} (speed {speed}, {facing:?}, offset {offset})", event.node);
            Some(EventResolution::Continue)
        }
        EventKind::WatchNode { target, caging, .. } => {
            println!("  [camera] watching {target} (caging: {caging})");
            Some(EventResolution::Continue)
        }
        EventKind::LookLevel { .. } => {
            println!("  [camera] leveled to horizon");
            Some(EventResolution::Continue)
        }
        EventKind::ShowAlert { params, .. } => {
            println!("  [dialog] \"{}\" → {}", params.content, params.confirm_text);
            Some(EventResolution::Continue)
        }
        EventKind::Lantern { slides, .. } => {
            println!("  [slides] showed {} slide(s)", slides.len());
            Some(EventResolution::Continue)
        }
        EventKind::SetVisibility { target, visible } => {
            println!("  [scene]  {target} visible = {visible}");
            None
        }
        EventKind::SequenceComplete { status, .. } => {
            println!("  [done]   sequence {} finished: {status}", event.sequence_id);
            None
        }
        EventKind::SequenceError { message } => {
            println!("  [error]  sequence {} failed: {message}", event.sequence_id);
            None
        }
    }
}

/// Pump events until the sequence either suspends no more or terminates.
fn drive(rt: &mut BehaviorRuntime<&'static str>, mut events: Vec<BehaviorRuntimeEvent>) {
    while let Some(next) = {
        let mut resumed = None;
        for event in &events {
            if let (Some(resolution), Some(token)) = (perform(event), event.kind.token()) {
                resumed = Some(rt.resolve_event(token, resolution));
            }
        }
        resumed
    } {
        events = next;
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    println!("=== walkthrough — bhv scene behavior runtime ===");
    println!();

    // 1. Parse the authored scene script.
    let mut minter = IdMinter::with_seed(SEED);
    let steps = steps_from_json(SCENE_JSON, &mut minter)?;
    println!("Loaded {} behavior steps", steps.len());

    // 2. Register the two nodes, with handles for the interactable index.
    let mut rt: BehaviorRuntime<&'static str> = BehaviorRuntime::with_seed(SEED);
    rt.add_listener(Box::new(NoopListener));

    let kiosk = NodeId::new("kiosk");
    let valve = NodeId::new("valve");
    let kiosk_steps: Vec<_> =
        steps.iter().filter(|s| s.sequence_id.as_str() == "kiosk-intro").cloned().collect();
    let valve_steps: Vec<_> =
        steps.iter().filter(|s| s.sequence_id.as_str() != "kiosk-intro").cloned().collect();
    rt.register_behaviors(kiosk.clone(), &kiosk_steps, Some("kiosk-mesh"));
    rt.register_behaviors(valve.clone(), &valve_steps, Some("valve-mesh"));

    println!("Interactable nodes:");
    for (node, handle) in rt.interactable_objects() {
        println!("  {node} → {handle}  {:?}", rt.registered_actions(node));
    }
    println!();

    // 3. Visitor walks up to the kiosk.
    println!("-- approach {kiosk}");
    let events = rt.trigger_action(&kiosk, TriggerAction::Approach, TriggerOptions::default());
    drive(&mut rt, events);
    println!();

    // 4. Visitor clicks the valve.
    println!("-- click {valve}");
    let events = rt.trigger_action(&valve, TriggerAction::Click, TriggerOptions::default());
    drive(&mut rt, events);
    println!();

    println!(
        "live sequences: {}, pending tokens: {}",
        rt.live_sequence_count(),
        rt.pending_token_count()
    );
    Ok(())
}
