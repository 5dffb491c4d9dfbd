//! Task Selection System
//!
//! The per-agent priority chain, evaluated top to bottom when the
//! routine phase is Work and the current action has run out:
//!
//! 1. daily board check (unconditional, once per day, if capable)
//! 2. weighted draw over the guild dispatch board, filtered to the
//!    agent's allowed actions, weights proportional to issue amounts
//! 3. Wander fallback (one tick)
//!
//! The chain order is a fixed behavioral contract. Meal and Sleep
//! phases bypass selection entirely and override the current action.

use bevy_ecs::prelude::*;
use rand::Rng;
use tracing::debug;
use village_events::{RoutinePhase, SimEventKind};

use crate::actions::{ActionKind, DurationTable, Task};
use crate::components::agent::{ActiveTask, AgentId, AgentRoster, DailyFlags, Job, Position};
use crate::components::world::{Coord, ResourceLedger};
use crate::events::TickEvents;
use crate::systems::clock::SimClock;
use crate::systems::dispatch::{DispatchBoard, DispatchKind};
use crate::systems::frontier::FrontierIndex;
use crate::SimRng;

use super::weights::WeightedTable;

/// Wander is always a single tick, so empty candidate pools re-enter
/// selection on the very next work tick.
const WANDER_TICKS: u32 = 1;

/// Everything the priority chain consults besides the agent itself.
pub struct SelectionContext<'a, R: Rng> {
    pub board: &'a DispatchBoard,
    pub frontier: &'a FrontierIndex,
    pub ledger: &'a ResourceLedger,
    pub rng: &'a mut R,
    pub position: Coord,
}

impl Job {
    /// Runs the priority chain for one agent and returns the next task.
    ///
    /// Draws from the RNG stream only when the filtered pool is
    /// non-empty (one draw), plus one more for the frontier pick when
    /// the drawn action is Explore.
    pub fn select_task<R: Rng>(
        self,
        flags: &mut DailyFlags,
        ctx: &mut SelectionContext<'_, R>,
    ) -> Task {
        // Rule 1: daily board check wins unconditionally.
        if !flags.board_checked_today && self.allows(ActionKind::BoardCheck) {
            flags.board_checked_today = true;
            return Task::board_check();
        }

        // Rule 2: guild-issued candidates, amount-weighted.
        let mut pool = WeightedTable::new();
        for record in &ctx.board.records {
            let kind = match record.kind {
                DispatchKind::Explore => ActionKind::Explore,
                DispatchKind::Gather => ActionKind::Gather,
            };
            if self.allows(kind) {
                pool.push(record, record.amount);
            }
        }

        if let Some(record) = pool.sample(ctx.rng) {
            return match record.kind {
                DispatchKind::Explore => {
                    // No frontier cell means no fixed destination; the
                    // movement fallback takes over.
                    Task::explore(ctx.frontier.choose_next_frontier(ctx.rng))
                }
                DispatchKind::Gather => {
                    let site = ctx
                        .ledger
                        .get(&record.resource)
                        .and_then(|r| r.nearest_site(ctx.position));
                    Task::gather(record.resource.clone(), site)
                }
            };
        }

        // Rule 3: nothing to do.
        Task::wander()
    }
}

/// Phase gate plus selection, walked in roster order so RNG
/// consumption is identical on every run.
pub fn select_tasks(
    clock: Res<SimClock>,
    roster: Res<AgentRoster>,
    board: Res<DispatchBoard>,
    durations: Res<DurationTable>,
    mut frontier: ResMut<FrontierIndex>,
    ledger: Res<ResourceLedger>,
    mut rng: ResMut<SimRng>,
    mut events: ResMut<TickEvents>,
    mut query: Query<(&AgentId, &Job, &Position, &mut ActiveTask, &mut DailyFlags)>,
) {
    let phase = clock.phase();
    let tick = clock.tick();

    for entity in roster.iter() {
        let Ok((agent_id, job, position, mut active, mut flags)) = query.get_mut(entity) else {
            continue;
        };

        match phase {
            RoutinePhase::Meal => {
                if active.task.kind != ActionKind::Meal {
                    active.set(Task::meal(), 0);
                    events.push(tick, &agent_id.0, SimEventKind::PhaseForced { phase });
                }
            }
            RoutinePhase::Sleep => {
                if active.task.kind != ActionKind::Sleep {
                    active.set(Task::sleep(), 0);
                    events.push(tick, &agent_id.0, SimEventKind::PhaseForced { phase });
                }
            }
            RoutinePhase::Work => {
                if active.ticks_remaining > 0 {
                    continue;
                }

                let mut ctx = SelectionContext {
                    board: &board,
                    frontier: &frontier,
                    ledger: &ledger,
                    rng: &mut rng.0,
                    position: position.coord(),
                };
                let task = job.select_task(&mut flags, &mut ctx);

                // A board visit catches the agent up on everything
                // discovered since its last one.
                if task.kind == ActionKind::BoardCheck {
                    let caught_up = frontier.take_buffer(&agent_id.0);
                    debug!(
                        agent = %agent_id.0,
                        new_cells = caught_up.len(),
                        "board check syncs discoveries"
                    );
                }

                let duration = match task.kind {
                    ActionKind::Wander => WANDER_TICKS,
                    kind => durations.duration_of(kind),
                };

                debug!(
                    agent = %agent_id.0,
                    action = %task.kind,
                    duration,
                    "task selected"
                );
                events.push(
                    tick,
                    &agent_id.0,
                    SimEventKind::TaskSelected {
                        action: task.kind.to_string(),
                        resource: task.resource.as_ref().map(|k| k.0.clone()),
                        duration,
                    },
                );
                active.set(task, duration);
            }
        }
    }
}

/// Counts down every agent's current action. Runs after movement so a
/// freshly selected 60-tick task reads 59 at the end of its tick.
pub fn tick_down(roster: Res<AgentRoster>, mut query: Query<&mut ActiveTask>) {
    for entity in roster.iter() {
        if let Ok(mut active) = query.get_mut(entity) {
            active.ticks_remaining = active.ticks_remaining.saturating_sub(1);
        }
    }
}
