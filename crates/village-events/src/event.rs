//! Event Types
//!
//! Serializable records of what happened during a tick: task selections,
//! forced phase transitions and exploration discoveries.

use serde::{Deserialize, Serialize};

use crate::timestamp::RoutinePhase;

/// What kind of thing happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum SimEventKind {
    /// An agent's task selector picked a new work action.
    TaskSelected {
        action: String,
        resource: Option<String>,
        duration: u32,
    },
    /// The routine phase gate overrode whatever the agent was doing.
    PhaseForced { phase: RoutinePhase },
    /// An agent discovered a map cell.
    CellDiscovered { x: i32, y: i32 },
}

/// A single simulation event with its tick and acting agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimEvent {
    pub tick: u64,
    pub agent: String,
    #[serde(flatten)]
    pub kind: SimEventKind,
}

impl SimEvent {
    pub fn new(tick: u64, agent: impl Into<String>, kind: SimEventKind) -> Self {
        Self {
            tick,
            agent: agent.into(),
            kind,
        }
    }
}
