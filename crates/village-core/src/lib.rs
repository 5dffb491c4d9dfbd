//! Village Simulation Core
//!
//! Task selection, guild resource dispatch and frontier exploration for
//! the autonomous villagers of a tick-based simulation.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod actions;
pub mod components;
pub mod config;
pub mod events;
pub mod output;
pub mod setup;
pub mod systems;

pub use components::*;

/// Seeded random number generator resource.
///
/// The single deterministic stream every random decision draws from:
/// weighted task draws, frontier picks and wander steps, consumed in
/// roster order so replays are exact.
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
