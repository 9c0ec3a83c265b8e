//! Apiary binary.
//!
//! Runs one bee line in a simulated apiary with the starting species
//! catalog and prints a JSON summary of the run.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `apiary-config.yaml` (or the path given as
//!    the first argument)
//! 2. Initialize structured logging (tracing)
//! 3. Build the starting catalog and the breeding engine
//! 4. Build the apiary, its garden, and the starting queen
//! 5. Run the configured cycles
//! 6. Log and print the summary

mod apiary;
mod config;
mod error;
mod runner;

use std::path::{Path, PathBuf};

use apiary_bees::{ApiaristTracker, BeeHousing, BreedingEngine};
use apiary_genetics::create_starting_catalog;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::apiary::{Garden, SimulatedApiary};
use crate::config::ApiaryConfig;
use crate::error::EngineError;
use crate::runner::World;

const DEFAULT_CONFIG_PATH: &str = "apiary-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, catalog construction, or the run
/// fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration before logging so its level applies.
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let (config, found) = load_config(&config_path)?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("apiary-engine starting");
    if !found {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }
    info!(
        seed = config.simulation.seed,
        cycles = config.simulation.cycles,
        queen = config.simulation.queen_species,
        drone = config.simulation.drone_species,
        "Configuration loaded"
    );

    // 3. Build the catalog and the engine.
    let catalog = create_starting_catalog().map_err(EngineError::from)?;
    info!(
        alleles = catalog.alleles.len(),
        mutations = catalog.mutations.len(),
        listed_mutations = catalog.mutations.listed().count(),
        "Starting catalog created"
    );
    let engine = BreedingEngine::from_config(catalog.mutations.clone(), config.breeding.clone())
        .map_err(EngineError::from)?;
    info!(
        modes = ?engine.modes().names().collect::<Vec<_>>(),
        default_mode = engine.modes().default_mode(),
        "Breeding engine ready"
    );

    // 4. Build the world and the starting queen.
    let apiary = SimulatedApiary::new(&config.housing);
    let garden = Garden::planted(&config.garden, apiary.position());
    let mut world = World {
        apiary,
        garden,
        tracker: ApiaristTracker::new(),
    };
    if world.garden.is_empty() {
        warn!("Garden has no flowers, pollination will find nothing");
    }
    let queen = runner::starting_queen(&catalog.alleles, &config.simulation)?;

    // 5. Run.
    let mut rng = SmallRng::seed_from_u64(config.simulation.seed);
    let summary = runner::run(&engine, &mut world, queen, config.simulation.cycles, &mut rng)?;

    // 6. Report.
    runner::log_run_end(&summary);
    let json = serde_json::to_string_pretty(&summary).map_err(EngineError::from)?;
    println!("{json}");

    info!(
        flowers = world.garden.len(),
        crossed = world.garden.crossed(),
        "apiary-engine shutdown complete"
    );
    Ok(())
}

/// Load the configuration, falling back to defaults when the file is
/// missing. The flag reports whether the file was found.
fn load_config(path: &Path) -> Result<(ApiaryConfig, bool), EngineError> {
    if path.exists() {
        Ok((ApiaryConfig::from_file(path)?, true))
    } else {
        Ok((ApiaryConfig::default(), false))
    }
}
