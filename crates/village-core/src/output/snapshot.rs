//! Snapshot Generation
//!
//! System for generating world snapshots at regular intervals.

use bevy_ecs::prelude::*;
use std::fs;
use std::path::Path;

use crate::components::agent::{ActiveTask, AgentId, AgentName, AgentRoster, DailyFlags, Job, Position};
use crate::components::world::ResourceLedger;
use crate::systems::clock::SimClock;
use crate::systems::frontier::FrontierIndex;

use super::schemas::*;

/// Resource to track snapshot generation
#[derive(Resource)]
pub struct SnapshotGenerator {
    next_snapshot_id: u64,
    snapshot_interval: u64,
}

impl SnapshotGenerator {
    pub fn new(snapshot_interval: u64) -> Self {
        Self {
            next_snapshot_id: 1,
            snapshot_interval,
        }
    }

    pub fn should_snapshot(&self, current_tick: u64) -> bool {
        current_tick == 0 || current_tick % self.snapshot_interval == 0
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("snap_{:06}", self.next_snapshot_id);
        self.next_snapshot_id += 1;
        id
    }

    pub fn snapshot_count(&self) -> u64 {
        self.next_snapshot_id - 1
    }
}

/// Generate a complete world snapshot
pub fn generate_snapshot(world: &mut World) -> WorldSnapshot {
    let clock = world.resource::<SimClock>();
    let tick = clock.tick();
    let clock_display = clock.now.to_string();
    let phase = format!("{:?}", clock.phase()).to_lowercase();

    let snapshot_id = {
        let mut generator = world.resource_mut::<SnapshotGenerator>();
        generator.next_id()
    };

    let mut snapshot = WorldSnapshot::new(&snapshot_id, tick, &clock_display, &phase);

    // Agents, in roster order so output diffs stay readable.
    let roster: Vec<Entity> = world.resource::<AgentRoster>().iter().collect();
    for entity in roster {
        let Some(agent_id) = world.get::<AgentId>(entity) else {
            continue;
        };
        let agent_id = agent_id.0.clone();
        let name = world
            .get::<AgentName>(entity)
            .map(|n| n.0.clone())
            .unwrap_or_else(|| agent_id.clone());
        let job = world
            .get::<Job>(entity)
            .map(|j| format!("{:?}", j).to_lowercase())
            .unwrap_or_default();
        let position = world.get::<Position>(entity).copied().unwrap_or(Position::new(0, 0));
        let (action, resource, ticks_remaining) = match world.get::<ActiveTask>(entity) {
            Some(active) => (
                active.task.kind.to_string(),
                active.task.resource.as_ref().map(|r| r.0.clone()),
                active.ticks_remaining,
            ),
            None => (String::new(), None, 0),
        };
        let board_checked_today = world
            .get::<DailyFlags>(entity)
            .map(|f| f.board_checked_today)
            .unwrap_or(false);

        snapshot.agents.push(AgentSnapshot {
            agent_id,
            name,
            job,
            x: position.x,
            y: position.y,
            action,
            resource,
            ticks_remaining,
            board_checked_today,
        });
    }

    let ledger = world.resource::<ResourceLedger>();
    for (key, record) in ledger.iter() {
        snapshot.resources.push(ResourceSnapshot {
            key: key.0.clone(),
            available: record.available,
            target_available: record.target_available,
            stock: record.stock,
            target_stock: record.target_stock,
            discovered: record.is_discovered,
        });
    }

    let frontier = world.resource::<FrontierIndex>();
    snapshot.exploration = ExplorationSnapshot {
        discovered_cells: frontier.discovered_len(),
        frontier_cells: frontier.frontier_len(),
    };

    snapshot
}

/// Write snapshot to file
pub fn write_snapshot(snapshot: &WorldSnapshot, path: impl AsRef<Path>) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write snapshot to snapshots directory
pub fn write_snapshot_to_dir(snapshot: &WorldSnapshot) -> std::io::Result<()> {
    let path = format!("output/snapshots/snap_{:06}.json", snapshot.timestamp.tick);
    write_snapshot(snapshot, path)
}

/// Write current state (overwrites each time)
pub fn write_current_state(snapshot: &WorldSnapshot) -> std::io::Result<()> {
    write_snapshot(snapshot, "output/current_state.json")
}
