//! Agent Components
//!
//! Identity, job capability, position and the per-agent task state.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::actions::{ActionKind, Task};

/// Marker component identifying an entity as an agent
#[derive(Component, Debug, Clone, Default)]
pub struct Agent;

/// Unique identifier for an agent
#[derive(Component, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub String);

/// Human-readable name for an agent
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct AgentName(pub String);

/// An agent's job, which fixes the set of work actions it may take.
///
/// Dispatch candidates whose kind is not in the job's allowed set are
/// filtered out before the weighted draw.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Job {
    Adventurer,
    Farmer,
    Fisher,
    Blacksmith,
    Pharmacist,
    Villager,
}

impl Job {
    /// Work actions this job is capable of.
    ///
    /// Blacksmiths never visit the board; plain villagers have no work
    /// capability at all and always fall back to wandering.
    pub fn allowed_actions(self) -> &'static [ActionKind] {
        match self {
            Job::Adventurer => &[ActionKind::BoardCheck, ActionKind::Explore, ActionKind::Gather],
            Job::Farmer | Job::Fisher | Job::Pharmacist => {
                &[ActionKind::BoardCheck, ActionKind::Gather]
            }
            Job::Blacksmith => &[ActionKind::Gather],
            Job::Villager => &[],
        }
    }

    pub fn allows(self, kind: ActionKind) -> bool {
        self.allowed_actions().contains(&kind)
    }

    /// All job variants (startup validation walks these).
    pub fn all() -> &'static [Job] {
        &[
            Job::Adventurer,
            Job::Farmer,
            Job::Fisher,
            Job::Blacksmith,
            Job::Pharmacist,
            Job::Villager,
        ]
    }
}

/// An agent's tile position.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn coord(self) -> (i32, i32) {
        (self.x, self.y)
    }
}

/// The action an agent is currently engaged in and its countdown.
///
/// The selector only runs while the routine phase is Work and the
/// countdown has reached zero.
#[derive(Component, Debug, Clone, Default)]
pub struct ActiveTask {
    pub task: Task,
    pub ticks_remaining: u32,
}

impl ActiveTask {
    pub fn idle() -> Self {
        Self {
            task: Task::wander(),
            ticks_remaining: 0,
        }
    }

    pub fn set(&mut self, task: Task, duration: u32) {
        self.task = task;
        self.ticks_remaining = duration;
    }
}

/// Daily-scoped agent state, reset at every hour-0 rollover.
#[derive(Component, Debug, Clone, Default)]
pub struct DailyFlags {
    pub board_checked_today: bool,
}

/// Spawn-ordered list of agent entities.
///
/// Every per-agent system walks this roster instead of a raw query so
/// that RNG draws happen in the same order on every run.
#[derive(Resource, Debug, Default)]
pub struct AgentRoster {
    pub entities: Vec<Entity>,
}

impl AgentRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
