//! Action Types
//!
//! The closed set of things an agent can be doing, the task payloads
//! that tie an action to a resource or destination, and the static
//! duration table.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::components::world::{Coord, ResourceKey};

/// Every kind of action an agent can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Daily visit to the guild board.
    BoardCheck,
    /// Head for a frontier cell and expand the known map.
    Explore,
    /// Harvest a resource for the guild stock.
    Gather,
    /// Fallback drifting when nothing else is available.
    Wander,
    /// Forced by the routine phase gate.
    Meal,
    /// Forced by the routine phase gate.
    Sleep,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::BoardCheck => write!(f, "board_check"),
            ActionKind::Explore => write!(f, "explore"),
            ActionKind::Gather => write!(f, "gather"),
            ActionKind::Wander => write!(f, "wander"),
            ActionKind::Meal => write!(f, "meal"),
            ActionKind::Sleep => write!(f, "sleep"),
        }
    }
}

impl std::str::FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "board_check" => Ok(ActionKind::BoardCheck),
            "explore" => Ok(ActionKind::Explore),
            "gather" => Ok(ActionKind::Gather),
            "wander" => Ok(ActionKind::Wander),
            "meal" => Ok(ActionKind::Meal),
            "sleep" => Ok(ActionKind::Sleep),
            other => Err(other.to_string()),
        }
    }
}

/// A selected action together with its optional payload.
///
/// Gather is tied to the resource it harvests and the site to walk to.
/// Explore carries a frontier destination when one exists; without one
/// the movement fallback applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub kind: ActionKind,
    pub resource: Option<ResourceKey>,
    pub destination: Option<Coord>,
}

impl Task {
    pub fn board_check() -> Self {
        Self {
            kind: ActionKind::BoardCheck,
            resource: None,
            destination: None,
        }
    }

    pub fn explore(destination: Option<Coord>) -> Self {
        Self {
            kind: ActionKind::Explore,
            resource: None,
            destination,
        }
    }

    pub fn gather(resource: ResourceKey, site: Option<Coord>) -> Self {
        Self {
            kind: ActionKind::Gather,
            resource: Some(resource),
            destination: site,
        }
    }

    pub fn wander() -> Self {
        Self {
            kind: ActionKind::Wander,
            resource: None,
            destination: None,
        }
    }

    pub fn meal() -> Self {
        Self {
            kind: ActionKind::Meal,
            resource: None,
            destination: None,
        }
    }

    pub fn sleep() -> Self {
        Self {
            kind: ActionKind::Sleep,
            resource: None,
            destination: None,
        }
    }
}

impl Default for Task {
    fn default() -> Self {
        Self::wander()
    }
}

/// Static mapping from action kind to duration in ticks.
///
/// Loaded once at startup and validated there: every work kind any job
/// can reach must have an entry. After validation a missing entry is a
/// programming error, and lookups treat it as one.
#[derive(Resource, Debug, Clone)]
pub struct DurationTable {
    ticks: HashMap<ActionKind, u32>,
}

impl DurationTable {
    pub fn new(ticks: HashMap<ActionKind, u32>) -> Self {
        Self { ticks }
    }

    pub fn get(&self, kind: ActionKind) -> Option<u32> {
        self.ticks.get(&kind).copied()
    }

    /// Duration for a kind that validation has already guaranteed.
    ///
    /// Panics on a missing entry: silently inventing a duration would
    /// hide a broken startup invariant.
    pub fn duration_of(&self, kind: ActionKind) -> u32 {
        self.ticks
            .get(&kind)
            .copied()
            .expect("duration table validated at startup")
    }

    pub fn contains(&self, kind: ActionKind) -> bool {
        self.ticks.contains_key(&kind)
    }
}
