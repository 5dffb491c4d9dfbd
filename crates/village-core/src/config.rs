//! Configuration System
//!
//! Loads world layout, agents, resource targets and action durations
//! from village.toml, with built-in defaults for quick runs. Duration
//! coverage is validated at startup: every action any job can reach
//! must have a nonzero entry, because a missing one would otherwise
//! default to zero and make the selector respin forever within a tick.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::actions::{ActionKind, DurationTable};
use crate::components::agent::Job;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "village.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub map: MapConfig,
    /// Action name -> duration in ticks.
    pub durations: HashMap<String, u32>,
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
    #[serde(default)]
    pub agents: Vec<AgentConfig>,
}

/// Simulation parameters
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    pub default_ticks: u64,
    pub snapshot_interval: u64,
    /// Tick the clock starts at (scenario harnesses use this to begin
    /// mid-day).
    #[serde(default)]
    pub start_tick: u64,
}

/// Tile grid layout
#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub blocked: Vec<(i32, i32)>,
    /// Pre-discovered town rectangle: [x, y, width, height].
    #[serde(default)]
    pub town: Option<(i32, i32, i32, i32)>,
}

/// One resource key with its guild targets and world sites
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceConfig {
    pub key: String,
    #[serde(default)]
    pub available: u32,
    #[serde(default)]
    pub target_available: u32,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub target_stock: u32,
    #[serde(default)]
    pub discovered: bool,
    #[serde(default)]
    pub sites: Vec<(i32, i32)>,
}

/// One agent to spawn
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    pub name: String,
    pub job: Job,
    pub x: i32,
    pub y: i32,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
            eprintln!("Warning: Could not load village.toml: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Builds the validated duration table.
    ///
    /// Every action kind reachable through some job's allowed set must
    /// be present with a nonzero duration.
    pub fn duration_table(&self) -> Result<DurationTable, ConfigError> {
        let mut ticks = HashMap::new();
        for (name, &duration) in &self.durations {
            let kind: ActionKind = name
                .parse()
                .map_err(|unknown| ConfigError::UnknownAction(unknown))?;
            if duration == 0 {
                return Err(ConfigError::ZeroDuration(kind));
            }
            ticks.insert(kind, duration);
        }

        let table = DurationTable::new(ticks);
        for job in Job::all() {
            for &kind in job.allowed_actions() {
                if !table.contains(kind) {
                    return Err(ConfigError::MissingDuration(kind));
                }
            }
        }
        Ok(table)
    }

    /// Checks agent placement against the map extents and the
    /// snapshot cadence.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.duration_table()?;
        if self.simulation.snapshot_interval == 0 {
            return Err(ConfigError::ZeroSnapshotInterval);
        }
        for agent in &self.agents {
            let inside = agent.x >= 0
                && agent.y >= 0
                && agent.x < self.map.width
                && agent.y < self.map.height;
            if !inside {
                return Err(ConfigError::AgentOutOfBounds {
                    name: agent.name.clone(),
                    x: agent.x,
                    y: agent.y,
                });
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let durations = HashMap::from([
            ("board_check".to_string(), 60),
            ("explore".to_string(), 60),
            ("gather".to_string(), 60),
        ]);

        Self {
            simulation: SimulationConfig {
                default_ticks: 2 * 1440,
                snapshot_interval: 360,
                start_tick: 0,
            },
            map: MapConfig {
                width: 24,
                height: 24,
                blocked: Vec::new(),
                town: Some((0, 0, 8, 8)),
            },
            durations,
            resources: vec![
                ResourceConfig {
                    key: "herb".to_string(),
                    available: 6,
                    target_available: 4,
                    stock: 0,
                    target_stock: 6,
                    discovered: false,
                    sites: vec![(15, 6), (16, 6)],
                },
                ResourceConfig {
                    key: "ore".to_string(),
                    available: 8,
                    target_available: 5,
                    stock: 0,
                    target_stock: 4,
                    discovered: false,
                    sites: vec![(20, 18)],
                },
                ResourceConfig {
                    key: "fish".to_string(),
                    available: 10,
                    target_available: 6,
                    stock: 2,
                    target_stock: 8,
                    discovered: true,
                    sites: vec![(4, 21)],
                },
            ],
            agents: vec![
                AgentConfig {
                    name: "elin".to_string(),
                    job: Job::Adventurer,
                    x: 3,
                    y: 3,
                },
                AgentConfig {
                    name: "leo".to_string(),
                    job: Job::Farmer,
                    x: 4,
                    y: 3,
                },
                AgentConfig {
                    name: "cyan".to_string(),
                    job: Job::Fisher,
                    x: 5,
                    y: 3,
                },
                AgentConfig {
                    name: "born".to_string(),
                    job: Job::Blacksmith,
                    x: 5,
                    y: 4,
                },
                AgentConfig {
                    name: "mara".to_string(),
                    job: Job::Pharmacist,
                    x: 4,
                    y: 4,
                },
            ],
        }
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown action name in durations table: {0}")]
    UnknownAction(String),
    #[error("no duration configured for action `{0}`")]
    MissingDuration(ActionKind),
    #[error("zero duration configured for action `{0}`")]
    ZeroDuration(ActionKind),
    #[error("snapshot interval must be at least one tick")]
    ZeroSnapshotInterval,
    #[error("agent `{name}` placed outside the map at ({x}, {y})")]
    AgentOutOfBounds { name: String, x: i32, y: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = Config::default();
        config.validate().unwrap();
        let table = config.duration_table().unwrap();
        assert_eq!(table.get(ActionKind::BoardCheck), Some(60));
    }

    #[test]
    fn test_missing_duration_is_fatal() {
        let mut config = Config::default();
        config.durations.remove("explore");
        match config.duration_table() {
            Err(ConfigError::MissingDuration(ActionKind::Explore)) => {}
            other => panic!("expected MissingDuration, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_duration_is_fatal() {
        let mut config = Config::default();
        config.durations.insert("gather".to_string(), 0);
        assert!(matches!(
            config.duration_table(),
            Err(ConfigError::ZeroDuration(ActionKind::Gather))
        ));
    }

    #[test]
    fn test_unknown_action_name_is_fatal() {
        let mut config = Config::default();
        config.durations.insert("dance".to_string(), 10);
        assert!(matches!(
            config.duration_table(),
            Err(ConfigError::UnknownAction(_))
        ));
    }

    #[test]
    fn test_zero_snapshot_interval_is_rejected() {
        let mut config = Config::default();
        config.simulation.snapshot_interval = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroSnapshotInterval)
        ));
    }

    #[test]
    fn test_out_of_bounds_agent_is_rejected() {
        let mut config = Config::default();
        config.agents.push(AgentConfig {
            name: "ghost".to_string(),
            job: Job::Villager,
            x: 99,
            y: 0,
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::AgentOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_parse_from_toml() {
        let toml_src = r#"
            [simulation]
            default_ticks = 100
            snapshot_interval = 50

            [map]
            width = 10
            height = 10

            [durations]
            board_check = 30
            explore = 45
            gather = 45

            [[resources]]
            key = "herb"
            target_available = 3
            sites = [[7, 7]]

            [[agents]]
            name = "elin"
            job = "adventurer"
            x = 1
            y = 1
        "#;
        let config: Config = toml::from_str(toml_src).unwrap();
        assert_eq!(config.simulation.default_ticks, 100);
        assert_eq!(config.resources[0].key, "herb");
        assert_eq!(config.agents[0].job, Job::Adventurer);
        config.validate().unwrap();
    }
}
