//! Movement Adapter
//!
//! Greedy single-step routing toward a task's destination, with the
//! mandatory fallback for actions that have no fixed work tile
//! (Explore without a frontier cell, BoardCheck, Wander): one uniform
//! pick among the open adjacent tiles or staying put.
//!
//! Agents reveal their 3x3 surroundings as they move; those
//! discoveries feed the frontier index and flip resource records to
//! discovered when a site comes into view.

use bevy_ecs::prelude::*;
use rand::Rng;
use village_events::SimEventKind;

use crate::actions::ActionKind;
use crate::components::agent::{ActiveTask, AgentId, AgentRoster, Position};
use crate::components::world::{Coord, ResourceLedger, TileMap};
use crate::events::TickEvents;
use crate::systems::clock::SimClock;
use crate::systems::frontier::FrontierIndex;
use crate::SimRng;

/// One greedy step from `from` toward `to`: the first open axis step
/// that reduces Manhattan distance, x before y. `None` when already
/// there or when both reducing steps are closed (route failure).
pub fn route_step(map: &TileMap, from: Coord, to: Coord) -> Option<Coord> {
    if from == to {
        return None;
    }
    let dx = (to.0 - from.0).signum();
    let dy = (to.1 - from.1).signum();

    let mut candidates = Vec::with_capacity(2);
    if dx != 0 {
        candidates.push((from.0 + dx, from.1));
    }
    if dy != 0 {
        candidates.push((from.0, from.1 + dy));
    }
    candidates.into_iter().find(|&c| map.is_open(c))
}

/// Fallback policy: uniform pick among open neighbors plus staying
/// put. Consumes exactly one RNG value.
pub fn random_adjacent_step<R: Rng>(rng: &mut R, map: &TileMap, from: Coord) -> Coord {
    let mut candidates = map.open_neighbors(from);
    candidates.push(from);
    candidates[rng.gen_range(0..candidates.len())]
}

/// Moves every agent one step in roster order, then registers what it
/// can now see.
pub fn execute_movement(
    clock: Res<SimClock>,
    map: Res<TileMap>,
    roster: Res<AgentRoster>,
    mut rng: ResMut<SimRng>,
    mut frontier: ResMut<FrontierIndex>,
    mut ledger: ResMut<ResourceLedger>,
    mut events: ResMut<TickEvents>,
    mut query: Query<(&AgentId, &mut Position, &ActiveTask)>,
) {
    let tick = clock.tick();

    for entity in roster.iter() {
        let Ok((agent_id, mut position, active)) = query.get_mut(entity) else {
            continue;
        };

        let next = match active.task.kind {
            // Rest phases hold still.
            ActionKind::Meal | ActionKind::Sleep => None,
            _ => match active.task.destination {
                Some(dest) if position.coord() == dest => None,
                Some(dest) => match route_step(&map, position.coord(), dest) {
                    step @ Some(_) => step,
                    // Route failure is recovered locally, never an error.
                    None => Some(random_adjacent_step(&mut rng.0, &map, position.coord())),
                },
                None => Some(random_adjacent_step(&mut rng.0, &map, position.coord())),
            },
        };

        if let Some((x, y)) = next {
            position.x = x;
            position.y = y;
        }

        reveal_surroundings(
            tick,
            &agent_id.0,
            position.coord(),
            &mut frontier,
            &mut ledger,
            &mut events,
        );
    }
}

/// Marks the 3x3 area around `center` discovered.
fn reveal_surroundings(
    tick: u64,
    agent: &str,
    center: Coord,
    frontier: &mut FrontierIndex,
    ledger: &mut ResourceLedger,
    events: &mut TickEvents,
) {
    for dy in -1..=1 {
        for dx in -1..=1 {
            let cell = (center.0 + dx, center.1 + dy);
            if frontier.is_discovered(cell) {
                continue;
            }
            frontier.register_discovery(cell);
            if frontier.is_discovered(cell) {
                ledger.discover_sites_at(cell);
                events.push(
                    tick,
                    agent,
                    SimEventKind::CellDiscovered {
                        x: cell.0,
                        y: cell.1,
                    },
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::world::{ResourceKey, ResourceRecord};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_route_step_reduces_distance() {
        let map = TileMap::new(10, 10);
        let step = route_step(&map, (2, 2), (5, 2)).unwrap();
        assert_eq!(step, (3, 2));

        let step = route_step(&map, (2, 2), (2, 0)).unwrap();
        assert_eq!(step, (2, 1));
    }

    #[test]
    fn test_route_step_none_at_destination() {
        let map = TileMap::new(10, 10);
        assert_eq!(route_step(&map, (4, 4), (4, 4)), None);
    }

    #[test]
    fn test_route_step_fails_when_blocked() {
        let mut map = TileMap::new(3, 1);
        map.blocked.insert((1, 0));
        // Only possible reducing step is blocked and there is no y
        // detour on a 1-high map.
        assert_eq!(route_step(&map, (0, 0), (2, 0)), None);
    }

    #[test]
    fn test_fallback_step_stays_on_open_tiles() {
        let mut map = TileMap::new(3, 3);
        map.blocked.insert((1, 0));
        let mut rng = SmallRng::seed_from_u64(11);

        for _ in 0..100 {
            let step = random_adjacent_step(&mut rng, &map, (0, 0));
            assert!(step == (0, 0) || step == (0, 1));
        }
    }

    #[test]
    fn test_reveal_flips_resource_discovery() {
        let map = TileMap::new(8, 8);
        let mut frontier = FrontierIndex::new(&map);
        let mut ledger = ResourceLedger::new();
        let mut events = TickEvents::new();
        ledger.insert(
            ResourceKey::new("herb"),
            ResourceRecord {
                available: 3,
                sites: vec![(3, 3)],
                ..Default::default()
            },
        );

        reveal_surroundings(1, "elin", (2, 2), &mut frontier, &mut ledger, &mut events);

        assert!(frontier.is_discovered((3, 3)));
        assert!(ledger.get(&ResourceKey::new("herb")).unwrap().is_discovered);
        assert_eq!(events.len(), 9);
    }
}
