//! Simulation Clock
//!
//! Wraps the tick counter, derives the routine phase and fires the
//! day-boundary hook that resets daily agent state.

use bevy_ecs::prelude::*;
use tracing::debug;
use village_events::{RoutinePhase, SimTimestamp};

use crate::components::agent::DailyFlags;

/// Global simulation clock resource. Advanced once per tick by the
/// main loop before any system runs.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SimClock {
    pub now: SimTimestamp,
}

impl SimClock {
    pub fn new() -> Self {
        Self {
            now: SimTimestamp::new(0),
        }
    }

    /// Clock pre-positioned mid-simulation, for harnesses that start a
    /// scenario at a given tick.
    pub fn starting_at(tick: u64) -> Self {
        Self {
            now: SimTimestamp::new(tick),
        }
    }

    pub fn advance(&mut self) {
        self.now.tick += 1;
    }

    pub fn tick(&self) -> u64 {
        self.now.tick
    }

    pub fn hour(&self) -> u64 {
        self.now.hour()
    }

    pub fn phase(&self) -> RoutinePhase {
        self.now.phase()
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Day-boundary lifecycle hook: clears every agent's board-check flag
/// at the hour-0 rollover.
pub fn reset_daily_flags(clock: Res<SimClock>, mut query: Query<&mut DailyFlags>) {
    if !clock.now.is_day_boundary() {
        return;
    }
    debug!(tick = clock.tick(), "day boundary, resetting board-check flags");
    for mut flags in query.iter_mut() {
        flags.board_checked_today = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    #[test]
    fn test_clock_advance_and_phase() {
        let mut clock = SimClock::starting_at(540);
        assert_eq!(clock.hour(), 9);
        assert_eq!(clock.phase(), RoutinePhase::Work);

        for _ in 0..(3 * 60) {
            clock.advance();
        }
        assert_eq!(clock.hour(), 12);
        assert_eq!(clock.phase(), RoutinePhase::Meal);
    }

    #[test]
    fn test_flags_reset_only_at_day_boundary() {
        let mut world = World::new();
        let agent = world
            .spawn(DailyFlags {
                board_checked_today: true,
            })
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(reset_daily_flags);

        world.insert_resource(SimClock::starting_at(1439));
        schedule.run(&mut world);
        assert!(world.get::<DailyFlags>(agent).unwrap().board_checked_today);

        world.insert_resource(SimClock::starting_at(1440));
        schedule.run(&mut world);
        assert!(!world.get::<DailyFlags>(agent).unwrap().board_checked_today);
    }
}
