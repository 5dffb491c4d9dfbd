//! Output Schemas
//!
//! Serialization structs for world snapshots and state output.

use serde::{Deserialize, Serialize};

/// Timestamp for snapshots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotTimestamp {
    pub tick: u64,
    pub clock: String,
}

/// Full agent snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub agent_id: String,
    pub name: String,
    pub job: String,
    pub x: i32,
    pub y: i32,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    pub ticks_remaining: u32,
    pub board_checked_today: bool,
}

/// Per-resource ledger snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub key: String,
    pub available: u32,
    pub target_available: u32,
    pub stock: u32,
    pub target_stock: u32,
    pub discovered: bool,
}

/// Exploration progress snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplorationSnapshot {
    pub discovered_cells: usize,
    pub frontier_cells: usize,
}

/// Complete world snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub snapshot_id: String,
    pub timestamp: SnapshotTimestamp,
    pub phase: String,
    pub agents: Vec<AgentSnapshot>,
    pub resources: Vec<ResourceSnapshot>,
    pub exploration: ExplorationSnapshot,
}

impl WorldSnapshot {
    pub fn new(snapshot_id: &str, tick: u64, clock: &str, phase: &str) -> Self {
        Self {
            snapshot_id: snapshot_id.to_string(),
            timestamp: SnapshotTimestamp {
                tick,
                clock: clock.to_string(),
            },
            phase: phase.to_string(),
            agents: Vec::new(),
            resources: Vec::new(),
            exploration: ExplorationSnapshot::default(),
        }
    }
}
