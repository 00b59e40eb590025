//! Per-node behavior registry entries and the grouping pass.
//!
//! # Grouping
//!
//! A node's flattened step list is grouped by `(action, sequence_id)`.
//! `perform` keeps one group per distinct `sequence_id`; every other action
//! keeps exactly **one** group.  When authored data carries a second
//! `sequence_id` under a non-`perform` action, its steps are collapsed into
//! the existing group and the group's `sequence_id` is overwritten by the
//! later step's.  This mirrors the long-standing authoring-side assumption
//! (one sequence per click/approach/depart) and is logged at `warn` so bad
//! data is visible instead of silently reshaped.

use rustc_hash::FxHashMap;
use tracing::warn;

use bhv_core::{NodeId, SequenceId, TriggerAction};
use bhv_script::BehaviorStep;

/// An ordered list of steps sharing one `sequence_id` — the unit of
/// execution.
#[derive(Clone, PartialEq, Debug)]
pub struct SequenceGroup {
    pub sequence_id: SequenceId,
    pub steps:       Vec<BehaviorStep>,
}

/// The registry's record for one scene node.
///
/// `object` is the host's renderable handle, kept only for interactable-index
/// membership; the registry never interprets it.
pub struct RegistryEntry<H> {
    pub node:   NodeId,
    pub groups: FxHashMap<TriggerAction, Vec<SequenceGroup>>,
    pub object: Option<H>,
}

impl<H> RegistryEntry<H> {
    /// Build an entry from an already-normalized, already-cloned step list.
    pub fn build(node: NodeId, steps: Vec<BehaviorStep>, object: Option<H>) -> Self {
        let groups = build_groups(&node, steps);
        Self { node, groups, object }
    }

    /// Actions that have at least one non-empty group.
    ///
    /// Returned in `TriggerAction::ALL` order so callers see a stable list.
    pub fn registered_actions(&self) -> Vec<TriggerAction> {
        TriggerAction::ALL
            .into_iter()
            .filter(|action| {
                self.groups
                    .get(action)
                    .is_some_and(|groups| groups.iter().any(|g| !g.steps.is_empty()))
            })
            .collect()
    }

    /// The group a trigger for `action` would run: the `sequence_id`-specific
    /// one when requested, else the first.
    pub fn resolve_group(
        &self,
        action: TriggerAction,
        sequence_id: Option<&SequenceId>,
    ) -> Option<&SequenceGroup> {
        let groups = self.groups.get(&action)?;
        match sequence_id {
            Some(wanted) => groups.iter().find(|g| g.sequence_id == *wanted),
            None => groups.first(),
        }
    }
}

fn build_groups(
    node: &NodeId,
    steps: Vec<BehaviorStep>,
) -> FxHashMap<TriggerAction, Vec<SequenceGroup>> {
    let mut groups: FxHashMap<TriggerAction, Vec<SequenceGroup>> = FxHashMap::default();

    for step in steps {
        let action_groups = groups.entry(step.action).or_default();

        if step.action.allows_multiple_groups() {
            match action_groups
                .iter_mut()
                .find(|g| g.sequence_id == step.sequence_id)
            {
                Some(group) => group.steps.push(step),
                None => action_groups.push(SequenceGroup {
                    sequence_id: step.sequence_id.clone(),
                    steps:       vec![step],
                }),
            }
            continue;
        }

        match action_groups.first_mut() {
            None => action_groups.push(SequenceGroup {
                sequence_id: step.sequence_id.clone(),
                steps:       vec![step],
            }),
            Some(group) => {
                if group.sequence_id != step.sequence_id {
                    warn!(
                        node = %node,
                        action = %step.action,
                        kept = %step.sequence_id,
                        dropped = %group.sequence_id,
                        "collapsing extra sequence group for non-perform action"
                    );
                    group.sequence_id = step.sequence_id.clone();
                }
                group.steps.push(step);
            }
        }
    }

    // Steps are the only way groups come into being, so empty groups should
    // not occur; drop an action anyway if its groups all ended up empty.
    groups.retain(|_, action_groups| {
        action_groups.retain(|g| !g.steps.is_empty());
        !action_groups.is_empty()
    });

    groups
}
