//! Shared time and event types for the village simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for the core simulation crate.

pub mod event;
pub mod timestamp;

// Re-export timestamp types
pub use timestamp::{
    RoutinePhase, SimTimestamp, HOURS_PER_DAY, TICKS_PER_DAY, TICKS_PER_HOUR,
};

// Re-export event types
pub use event::{SimEvent, SimEventKind};
