//! Simulation Timestamp Types
//!
//! Handles simulation time with both tick-based and human-readable formats.
//! One tick is one simulated minute.
//!
//! # Example
//!
//! ```
//! use village_events::{RoutinePhase, SimTimestamp};
//!
//! let ts = SimTimestamp::new(541);
//! assert_eq!(ts.hour(), 9);
//! assert_eq!(ts.phase(), RoutinePhase::Work);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of ticks (simulated minutes) per simulated hour.
pub const TICKS_PER_HOUR: u64 = 60;

/// Number of hours in a simulated day.
pub const HOURS_PER_DAY: u64 = 24;

/// Number of ticks per simulated day.
pub const TICKS_PER_DAY: u64 = TICKS_PER_HOUR * HOURS_PER_DAY;

/// The routine phase every agent follows, derived from the hour of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutinePhase {
    Meal,
    Sleep,
    Work,
}

impl RoutinePhase {
    /// Maps an hour of day to its routine phase.
    ///
    /// Meal hours are 6, 12 and 18. Sleep runs from 20:00 through 05:59.
    /// Everything else is work time.
    pub fn for_hour(hour: u64) -> Self {
        let hour = hour % HOURS_PER_DAY;
        match hour {
            6 | 12 | 18 => RoutinePhase::Meal,
            h if h >= 20 || h <= 5 => RoutinePhase::Sleep,
            _ => RoutinePhase::Work,
        }
    }
}

impl fmt::Display for RoutinePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutinePhase::Meal => write!(f, "meal"),
            RoutinePhase::Sleep => write!(f, "sleep"),
            RoutinePhase::Work => write!(f, "work"),
        }
    }
}

/// A point in simulation time, counted in ticks since simulation start.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct SimTimestamp {
    pub tick: u64,
}

impl SimTimestamp {
    pub fn new(tick: u64) -> Self {
        Self { tick }
    }

    /// Minute within the current hour.
    pub fn minute(self) -> u64 {
        self.tick % TICKS_PER_HOUR
    }

    /// Hour of the current day (0..24).
    pub fn hour(self) -> u64 {
        (self.tick / TICKS_PER_HOUR) % HOURS_PER_DAY
    }

    /// Day count since simulation start.
    pub fn day(self) -> u64 {
        self.tick / TICKS_PER_DAY
    }

    /// Routine phase at this timestamp.
    pub fn phase(self) -> RoutinePhase {
        RoutinePhase::for_hour(self.hour())
    }

    /// True exactly at the hour-0 rollover of a new day.
    ///
    /// This is the point at which daily agent state (the board-check
    /// flag) is reset.
    pub fn is_day_boundary(self) -> bool {
        self.tick > 0 && self.tick % TICKS_PER_DAY == 0
    }
}

impl fmt::Display for SimTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {} {:02}:{:02}", self.day(), self.hour(), self.minute())
    }
}
