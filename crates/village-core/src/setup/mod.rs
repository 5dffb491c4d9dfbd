//! World and agent initialization from configuration.

pub mod agents;
pub mod world;

pub use agents::spawn_agents;
pub use world::{create_frontier_index, create_resource_ledger, create_tile_map};
