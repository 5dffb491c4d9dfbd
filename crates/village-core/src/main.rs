//! Village Simulation Driver
//!
//! Loads configuration, builds the ECS world and runs the tick loop:
//! advance the clock, run the per-tick schedule, report events and
//! write periodic snapshots.

use bevy_ecs::prelude::*;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use village_core::components::agent::AgentRoster;
use village_core::config::{Config, DEFAULT_CONFIG_PATH};
use village_core::events::TickEvents;
use village_core::output::{self, SnapshotGenerator};
use village_core::setup;
use village_core::systems::{
    apply_harvests, execute_movement, refresh_dispatch, reset_daily_flags, select_tasks,
    tick_down, DispatchBoard, SimClock,
};
use village_core::SimRng;
use village_events::SimEventKind;

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "village_sim")]
#[command(about = "A tick-based village task-selection simulation")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to simulate (overrides the configured default)
    #[arg(long)]
    ticks: Option<u64>,

    /// Configuration file path
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Interval between world snapshots (in ticks)
    #[arg(long)]
    snapshot_interval: Option<u64>,

    /// Tick the clock starts at
    #[arg(long)]
    start_tick: Option<u64>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();

    let config = if args.config.exists() {
        match Config::load(&args.config) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {}", args.config.display(), e);
                return ExitCode::FAILURE;
            }
        }
    } else if args.config.as_os_str() == DEFAULT_CONFIG_PATH {
        info!("no {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
        Config::default()
    } else {
        eprintln!("Configuration file {} does not exist", args.config.display());
        return ExitCode::FAILURE;
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }
    // Startup is the one place an incomplete duration table may fail.
    let durations = match config.duration_table() {
        Ok(durations) => durations,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let ticks = args.ticks.unwrap_or(config.simulation.default_ticks);
    let snapshot_interval = args
        .snapshot_interval
        .unwrap_or(config.simulation.snapshot_interval);
    if snapshot_interval == 0 {
        eprintln!("Invalid arguments: snapshot interval must be at least one tick");
        return ExitCode::FAILURE;
    }
    let start_tick = args.start_tick.unwrap_or(config.simulation.start_tick);

    println!("Village Simulation");
    println!("==================");
    println!("Seed: {}", args.seed);
    println!("Ticks: {} (starting at {})", ticks, start_tick);
    println!("Snapshot interval: {}", snapshot_interval);
    println!();

    fs::create_dir_all("output/snapshots").unwrap_or_else(|e| {
        eprintln!("Warning: Could not create output directories: {}", e);
    });

    // Initialize the ECS world
    let mut world = World::new();
    world.insert_resource(SimRng(SmallRng::seed_from_u64(args.seed)));
    world.insert_resource(SimClock::starting_at(start_tick));
    world.insert_resource(durations);
    world.insert_resource(DispatchBoard::new());
    world.insert_resource(TickEvents::new());
    world.insert_resource(SnapshotGenerator::new(snapshot_interval));

    println!("Creating world map...");
    let map = setup::create_tile_map(&config);
    let mut ledger = setup::create_resource_ledger(&config);
    let frontier = setup::create_frontier_index(&config, &map, &mut ledger);
    println!(
        "  {}x{} map, {} resources, {} cells pre-discovered",
        map.width,
        map.height,
        ledger.iter().count(),
        frontier.discovered_len()
    );
    world.insert_resource(map);
    world.insert_resource(ledger);
    world.insert_resource(frontier);

    println!("Spawning agents...");
    let spawned = setup::spawn_agents(&mut world, &config);
    println!("  Spawned {} agents", spawned);

    println!("Generating initial snapshot...");
    let initial_snapshot = output::generate_snapshot(&mut world);
    if let Err(e) = output::write_snapshot_to_dir(&initial_snapshot) {
        eprintln!("  Warning: Could not write initial snapshot: {}", e);
    }
    if let Err(e) = output::write_current_state(&initial_snapshot) {
        eprintln!("  Warning: Could not write current state: {}", e);
    }

    // Per-tick pipeline: flags reset, dispatch refresh, task selection,
    // movement and discovery, countdown, harvest crediting.
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            reset_daily_flags,
            refresh_dispatch,
            select_tasks,
            execute_movement,
            tick_down,
            apply_harvests,
        )
            .chain(),
    );

    println!();
    println!("Starting simulation...");
    println!();

    for _ in 0..ticks {
        world.resource_mut::<SimClock>().advance();
        schedule.run(&mut world);

        let tick = world.resource::<SimClock>().tick();
        {
            let events = world.resource::<TickEvents>();
            if !events.is_empty() && tick % 10 == 0 {
                let mut selections = 0;
                let mut discoveries = 0;
                for event in &events.events {
                    match event.kind {
                        SimEventKind::TaskSelected { .. } => selections += 1,
                        SimEventKind::CellDiscovered { .. } => discoveries += 1,
                        SimEventKind::PhaseForced { .. } => {}
                    }
                }
                let clock = world.resource::<SimClock>();
                println!(
                    "[Tick {:>5}] {} - {} events (selections: {}, discoveries: {})",
                    tick,
                    clock.now,
                    events.len(),
                    selections,
                    discoveries
                );
            }
        }
        world.resource_mut::<TickEvents>().drain();

        let should_snapshot = world
            .resource::<SnapshotGenerator>()
            .should_snapshot(tick);
        if should_snapshot {
            let snapshot = output::generate_snapshot(&mut world);
            if let Err(e) = output::write_snapshot_to_dir(&snapshot) {
                eprintln!("Warning: Could not write snapshot at tick {}: {}", tick, e);
            }
            if let Err(e) = output::write_current_state(&snapshot) {
                eprintln!("Warning: Could not write current state at tick {}: {}", tick, e);
            }
        }
    }

    let final_snapshot = output::generate_snapshot(&mut world);
    if let Err(e) = output::write_snapshot_to_dir(&final_snapshot) {
        eprintln!("Warning: Could not write final snapshot: {}", e);
    }
    if let Err(e) = output::write_current_state(&final_snapshot) {
        eprintln!("Warning: Could not write final current state: {}", e);
    }

    println!();
    let clock = world.resource::<SimClock>();
    println!(
        "Simulation complete. Ran {} ticks (ending at {}).",
        ticks, clock.now
    );
    println!(
        "{} agents, {} snapshots.",
        world.resource::<AgentRoster>().len(),
        world.resource::<SnapshotGenerator>().snapshot_count()
    );

    ExitCode::SUCCESS
}
