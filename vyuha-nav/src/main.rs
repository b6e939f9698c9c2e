//! VyuhaNav - Mission Runner for Vyuha-Map
//!
//! Runs one grid maze mission end to end: builds the simulated world
//! described by the configuration, wires a robot into it, drives to
//! the goal corner and back home, and logs the mission report.
//!
//! Usage:
//!
//! ```bash
//! vyuha-nav                 # vyuha.toml if present, else defaults
//! vyuha-nav mission.toml    # explicit configuration file
//! ```

mod config;
mod error;

use config::NavConfig;
use error::Result;

use std::path::Path;
use tracing::info;
use vyuha_map::harness::SimRobot;
use vyuha_map::MissionController;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vyuha_nav=info".parse().unwrap())
                .add_directive("vyuha_map=info".parse().unwrap()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    let config = if args.len() > 1 {
        let config_path = Path::new(&args[1]);
        info!("Loading configuration from {:?}", config_path);
        NavConfig::load(config_path)?
    } else if Path::new("vyuha.toml").exists() {
        info!("Loading configuration from vyuha.toml");
        NavConfig::load(Path::new("vyuha.toml"))?
    } else {
        info!("Using default configuration");
        NavConfig::default()
    };

    info!("VyuhaNav v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "{}x{} grid, {} interior walls",
        config.mission.rows,
        config.mission.cols,
        config.world.blocked_horizontal.len() + config.world.blocked_vertical.len()
    );

    let world = config.build_world()?;
    let robot = SimRobot::new(world);
    let mut mission = MissionController::new(config.mission, robot)?;

    let report = mission.run()?;

    info!(
        "goal captured: {}, returned home: {}",
        report.goal_captured, report.returned_home
    );
    info!(
        "{} moves, {} quarter-turns, {} sense cycles",
        report.moves, report.quarter_turns, report.sense_cycles
    );
    info!(
        "{} plans, fallback used: {}",
        report.plans, report.fallback_used
    );
    if let Some(tiles) = report.tiles_visited {
        info!("{} distinct tiles visited", tiles);
    }

    Ok(())
}
