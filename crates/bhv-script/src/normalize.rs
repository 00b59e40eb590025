//! Total step normalization.
//!
//! Every clamp here substitutes a documented default instead of reporting an
//! error — authored data cannot make the runtime fault (the backend this data
//! comes from performs no validation of its own).  The rules:
//!
//! | Field                     | Rule                                        |
//! |---------------------------|---------------------------------------------|
//! | `id`, `sequence_id`       | blank → freshly minted unique id            |
//! | `Delay.seconds`           | non-finite or negative → 0                  |
//! | `MoveTo.speed`            | non-finite or ≤ 0 → 1.0                     |
//! | `MoveTo.offset`           | non-finite or negative → 0                  |
//! | `ShowAlert.confirm_text`  | blank → `"Confirm"`                         |
//! | `ShowAlert.cancel_text`   | blank → `"Cancel"`                          |
//! | `Watch`/`Show`/`Hide` target | blank id → `None` (own-node fallback)    |

use bhv_core::{IdMinter, NodeId};

use crate::script::StepScript;
use crate::step::BehaviorStep;

/// Normalize one step in place: clamp script params and mint replacements
/// for blank ids.  Total — never fails, never drops the step.
pub fn sanitize_step(step: &mut BehaviorStep, minter: &mut IdMinter) {
    if step.id.is_blank() {
        step.id = minter.mint_behavior_id();
    }
    if step.sequence_id.is_blank() {
        step.sequence_id = minter.mint_sequence_id();
    }

    match &mut step.script {
        StepScript::Delay { seconds } => {
            if !seconds.is_finite() || *seconds < 0.0 {
                *seconds = 0.0;
            }
        }
        StepScript::MoveTo { speed, offset, .. } => {
            if !speed.is_finite() || *speed <= 0.0 {
                *speed = 1.0;
            }
            if !offset.is_finite() || *offset < 0.0 {
                *offset = 0.0;
            }
        }
        StepScript::ShowAlert(params) => {
            if params.confirm_text.trim().is_empty() {
                params.confirm_text = "Confirm".to_string();
            }
            if params.cancel_text.trim().is_empty() {
                params.cancel_text = "Cancel".to_string();
            }
        }
        StepScript::Watch { target, .. }
        | StepScript::Show { target }
        | StepScript::Hide { target }
        | StepScript::Trigger { target, .. } => {
            clear_blank_target(target);
        }
        StepScript::LoadScene { scene_id } => {
            if scene_id.as_deref().is_some_and(|id| id.trim().is_empty()) {
                *scene_id = None;
            }
        }
        StepScript::Lantern { .. }
        | StepScript::Look
        | StepScript::Animation { .. }
        | StepScript::ExitScene
        | StepScript::ShowCockpit
        | StepScript::HideCockpit
        | StepScript::Drive
        | StepScript::Debus => {}
    }
}

/// Normalize a whole step list in place.
pub fn sanitize_steps(steps: &mut [BehaviorStep], minter: &mut IdMinter) {
    for step in steps.iter_mut() {
        sanitize_step(step, minter);
    }
}

/// A blank target id means "no explicit target" — fold it into the own-node
/// fallback rather than carrying an empty key around.
fn clear_blank_target(target: &mut Option<NodeId>) {
    if target.as_ref().is_some_and(NodeId::is_blank) {
        *target = None;
    }
}
