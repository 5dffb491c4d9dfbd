//! Shared harness for full-pipeline integration tests.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use village_core::actions::ActionKind;
use village_core::components::agent::{ActiveTask, AgentId, Position};
use village_core::config::Config;
use village_core::events::TickEvents;
use village_core::setup;
use village_core::systems::{
    apply_harvests, execute_movement, refresh_dispatch, reset_daily_flags, select_tasks,
    tick_down, DispatchBoard, SimClock,
};
use village_core::SimRng;
use village_events::SimEvent;

/// A complete simulation wired up the same way the driver binary does
/// it, with the event stream captured across ticks.
pub struct SimHarness {
    pub world: World,
    schedule: Schedule,
    pub events: Vec<SimEvent>,
}

impl SimHarness {
    pub fn new(config: &Config, seed: u64, start_tick: u64) -> Self {
        let durations = config.duration_table().unwrap();

        let mut world = World::new();
        world.insert_resource(SimRng(SmallRng::seed_from_u64(seed)));
        world.insert_resource(SimClock::starting_at(start_tick));
        world.insert_resource(durations);
        world.insert_resource(DispatchBoard::new());
        world.insert_resource(TickEvents::new());

        let map = setup::create_tile_map(config);
        let mut ledger = setup::create_resource_ledger(config);
        let frontier = setup::create_frontier_index(config, &map, &mut ledger);
        world.insert_resource(map);
        world.insert_resource(ledger);
        world.insert_resource(frontier);
        setup::spawn_agents(&mut world, config);

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                reset_daily_flags,
                refresh_dispatch,
                select_tasks,
                execute_movement,
                tick_down,
                apply_harvests,
            )
                .chain(),
        );

        Self {
            world,
            schedule,
            events: Vec::new(),
        }
    }

    pub fn step(&mut self) {
        self.world.resource_mut::<SimClock>().advance();
        self.schedule.run(&mut self.world);
        let drained = self.world.resource_mut::<TickEvents>().drain();
        self.events.extend(drained);
    }

    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    pub fn tick(&self) -> u64 {
        self.world.resource::<SimClock>().tick()
    }

    /// Current action and remaining ticks for a named agent.
    pub fn agent_task(&mut self, name: &str) -> (ActionKind, u32) {
        let mut query = self.world.query::<(&AgentId, &ActiveTask)>();
        for (agent_id, active) in query.iter(&self.world) {
            if agent_id.0 == name {
                return (active.task.kind, active.ticks_remaining);
            }
        }
        panic!("no agent named {}", name);
    }

    /// All agent positions keyed by id, in a stable order.
    pub fn positions(&mut self) -> Vec<(String, (i32, i32))> {
        let mut query = self.world.query::<(&AgentId, &Position)>();
        let mut out: Vec<(String, (i32, i32))> = query
            .iter(&self.world)
            .map(|(agent_id, position)| (agent_id.0.clone(), (position.x, position.y)))
            .collect();
        out.sort();
        out
    }
}
