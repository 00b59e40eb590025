//! Loose authoring model and JSON loaders.
//!
//! # Authored format
//!
//! The backend delivers behavior lists as a JSON array of steps:
//!
//! ```json
//! [
//!   {
//!     "id": "b1",
//!     "name": "greet",
//!     "action": "approach",
//!     "sequenceId": "s1",
//!     "script": { "type": "showAlert", "params": { "content": "Hello" } }
//!   }
//! ]
//! ```
//!
//! Every field except `script.type` is optional; missing or type-mismatched
//! `params` fall back to the kind's defaults.  A step whose `script.type`
//! names no known kind is dropped with a `warn` — the rest of the list still
//! loads.  An unknown `action` label normalizes to `click` with a `warn`.

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use bhv_core::{BehaviorId, IdMinter, NodeId, SequenceId, TriggerAction};

use crate::error::{ScriptError, ScriptResult};
use crate::normalize::sanitize_step;
use crate::script::{AlertParams, Facing, Slide, StepKind, StepScript};
use crate::step::BehaviorStep;

// ── Raw records ───────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawBehaviorStep {
    id:          Option<String>,
    name:        Option<String>,
    action:      Option<String>,
    sequence_id: Option<String>,
    script:      Option<RawScript>,
}

#[derive(Deserialize, Default)]
struct RawScript {
    #[serde(rename = "type")]
    kind:   Option<String>,
    params: Option<Value>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawDelay {
    seconds: f64,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawMoveTo {
    speed:  f64,
    facing: Facing,
    offset: f64,
}

impl Default for RawMoveTo {
    fn default() -> Self {
        Self { speed: 1.0, facing: Facing::Front, offset: 0.0 }
    }
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawWatch {
    target_node_id: Option<String>,
    caging:         bool,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawTargeted {
    target_node_id: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawLantern {
    slides: Vec<Slide>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawLoadScene {
    scene_id: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawTrigger {
    target_node_id: Option<String>,
    action:         Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawAnimation {
    clip: String,
}

// ── Loaders ───────────────────────────────────────────────────────────────────

/// Load normalized steps from a JSON file.
pub fn load_steps_json(path: &Path, minter: &mut IdMinter) -> ScriptResult<Vec<BehaviorStep>> {
    let file = std::fs::File::open(path).map_err(ScriptError::Io)?;
    steps_from_reader(file, minter)
}

/// Like [`load_steps_json`] but accepts any `Read` source.
pub fn steps_from_reader<R: Read>(
    reader: R,
    minter: &mut IdMinter,
) -> ScriptResult<Vec<BehaviorStep>> {
    let raw: Vec<RawBehaviorStep> =
        serde_json::from_reader(reader).map_err(|e| ScriptError::Parse(e.to_string()))?;
    Ok(build_steps(raw, minter))
}

/// Parse normalized steps from a JSON string.
pub fn steps_from_json(json: &str, minter: &mut IdMinter) -> ScriptResult<Vec<BehaviorStep>> {
    let raw: Vec<RawBehaviorStep> =
        serde_json::from_str(json).map_err(|e| ScriptError::Parse(e.to_string()))?;
    Ok(build_steps(raw, minter))
}

/// Parse normalized steps from an already-decoded JSON value.
pub fn steps_from_value(value: Value, minter: &mut IdMinter) -> ScriptResult<Vec<BehaviorStep>> {
    let raw: Vec<RawBehaviorStep> =
        serde_json::from_value(value).map_err(|e| ScriptError::Parse(e.to_string()))?;
    Ok(build_steps(raw, minter))
}

fn build_steps(raw: Vec<RawBehaviorStep>, minter: &mut IdMinter) -> Vec<BehaviorStep> {
    raw.into_iter()
        .filter_map(|record| step_from_raw(record, minter))
        .collect()
}

// ── Conversion ────────────────────────────────────────────────────────────────

fn step_from_raw(raw: RawBehaviorStep, minter: &mut IdMinter) -> Option<BehaviorStep> {
    let script = raw.script.unwrap_or_default();
    let kind_label = script.kind.unwrap_or_default();
    let Some(kind) = StepKind::parse(&kind_label) else {
        warn!(kind = %kind_label, "dropping step with unknown script type");
        return None;
    };

    let action = match raw.action.as_deref() {
        None => TriggerAction::Click,
        Some(label) => TriggerAction::parse(label).unwrap_or_else(|| {
            warn!(action = label, "unknown trigger action, defaulting to click");
            TriggerAction::Click
        }),
    };

    let mut step = BehaviorStep {
        id:          BehaviorId::new(raw.id.unwrap_or_default()),
        name:        raw.name.unwrap_or_default(),
        action,
        sequence_id: SequenceId::new(raw.sequence_id.unwrap_or_default()),
        script:      script_from_params(kind, script.params),
    };
    sanitize_step(&mut step, minter);
    Some(step)
}

fn script_from_params(kind: StepKind, params: Option<Value>) -> StepScript {
    match kind {
        StepKind::Delay => {
            let p: RawDelay = parse_params(kind, params);
            StepScript::Delay { seconds: p.seconds }
        }
        StepKind::MoveTo => {
            let p: RawMoveTo = parse_params(kind, params);
            StepScript::MoveTo { speed: p.speed, facing: p.facing, offset: p.offset }
        }
        StepKind::ShowAlert => {
            let p: AlertParams = parse_params(kind, params);
            StepScript::ShowAlert(p)
        }
        StepKind::Watch => {
            let p: RawWatch = parse_params(kind, params);
            StepScript::Watch { target: p.target_node_id.map(NodeId::new), caging: p.caging }
        }
        StepKind::Lantern => {
            let p: RawLantern = parse_params(kind, params);
            StepScript::Lantern { slides: p.slides }
        }
        StepKind::Look => StepScript::Look,
        StepKind::Show => {
            let p: RawTargeted = parse_params(kind, params);
            StepScript::Show { target: p.target_node_id.map(NodeId::new) }
        }
        StepKind::Hide => {
            let p: RawTargeted = parse_params(kind, params);
            StepScript::Hide { target: p.target_node_id.map(NodeId::new) }
        }
        StepKind::LoadScene => {
            let p: RawLoadScene = parse_params(kind, params);
            StepScript::LoadScene { scene_id: p.scene_id }
        }
        StepKind::ExitScene => StepScript::ExitScene,
        StepKind::Trigger => {
            let p: RawTrigger = parse_params(kind, params);
            StepScript::Trigger {
                target: p.target_node_id.map(NodeId::new),
                action: p
                    .action
                    .as_deref()
                    .and_then(TriggerAction::parse)
                    .unwrap_or(TriggerAction::Click),
            }
        }
        StepKind::Animation => {
            let p: RawAnimation = parse_params(kind, params);
            StepScript::Animation { clip: p.clip }
        }
        StepKind::ShowCockpit => StepScript::ShowCockpit,
        StepKind::HideCockpit => StepScript::HideCockpit,
        StepKind::Drive       => StepScript::Drive,
        StepKind::Debus       => StepScript::Debus,
    }
}

/// Decode `params` into `T`, substituting `T::default()` when the payload is
/// absent or malformed (total normalization — the loader never fails on a
/// bad params bag).
fn parse_params<T: DeserializeOwned + Default>(kind: StepKind, params: Option<Value>) -> T {
    let Some(value) = params else {
        return T::default();
    };
    serde_json::from_value(value).unwrap_or_else(|e| {
        warn!(kind = %kind, error = %e, "malformed step params, using defaults");
        T::default()
    })
}
