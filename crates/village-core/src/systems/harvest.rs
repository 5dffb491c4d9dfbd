//! Harvest Completion
//!
//! World-collaborator effect applied when a gather task runs out: one
//! unit moves from the resource's live availability into the guild
//! stock. Kept out of the dispatcher so dispatch stays read-only.

use bevy_ecs::prelude::*;
use tracing::debug;

use crate::actions::ActionKind;
use crate::components::agent::{ActiveTask, AgentId, AgentRoster};
use crate::components::world::ResourceLedger;

/// Applies gather completions. Runs after `tick_down`, so a task that
/// just reached zero is credited exactly once: the selector replaces
/// it before this system sees it again.
pub fn apply_harvests(
    roster: Res<AgentRoster>,
    mut ledger: ResMut<ResourceLedger>,
    query: Query<(&AgentId, &ActiveTask)>,
) {
    for entity in roster.iter() {
        let Ok((agent_id, active)) = query.get(entity) else {
            continue;
        };
        if active.task.kind != ActionKind::Gather || active.ticks_remaining != 0 {
            continue;
        }
        let Some(key) = active.task.resource.as_ref() else {
            continue;
        };
        if let Some(record) = ledger.get_mut(key) {
            if record.available > 0 {
                record.available -= 1;
                record.stock += 1;
                debug!(agent = %agent_id.0, resource = %key, stock = record.stock, "harvest completed");
            }
        }
    }
}
