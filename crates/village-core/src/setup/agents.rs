//! Agent Spawning
//!
//! Spawns configured agents into the ECS world and records them in the
//! roster, in configuration order. The roster order is what makes RNG
//! consumption reproducible across runs.

use bevy_ecs::prelude::*;
use tracing::info;

use crate::components::agent::{
    ActiveTask, Agent, AgentId, AgentName, AgentRoster, DailyFlags, Position,
};
use crate::config::Config;
use crate::systems::frontier::FrontierIndex;

/// Spawns all configured agents and opens their frontier buffers.
/// Returns the number spawned.
pub fn spawn_agents(world: &mut World, config: &Config) -> usize {
    let mut roster = AgentRoster::new();

    for agent in &config.agents {
        let entity = world
            .spawn((
                Agent,
                AgentId(agent.name.clone()),
                AgentName(agent.name.clone()),
                agent.job,
                Position::new(agent.x, agent.y),
                ActiveTask::idle(),
                DailyFlags::default(),
            ))
            .id();
        roster.push(entity);

        world
            .resource_mut::<FrontierIndex>()
            .register_agent(agent.name.clone());
        info!(name = %agent.name, job = ?agent.job, "spawned agent");
    }

    let count = roster.len();
    world.insert_resource(roster);
    count
}
