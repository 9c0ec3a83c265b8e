//! The breeding run loop.
//!
//! Each cycle the apiary advances its day and weather, and a working queen
//! produces, runs her effects, fetches or deposits pollen, plants a flower,
//! and ages. A queen that dies is replaced by her princess, mated with one
//! of her own drones. The run ends after the configured cycles or when a
//! line produces no successor.

use std::collections::BTreeMap;

use apiary_bees::{ApiaristTracker, Bee, BreedingEngine, HiveEffects, Pollen};
use apiary_genetics::AlleleRegistry;
use apiary_types::AlleleUid;
use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

use crate::apiary::{EffectTally, Garden, SimulatedApiary};
use crate::config::SimulationSettings;
use crate::error::EngineError;

/// Why the run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Every configured cycle ran.
    CyclesCompleted,
    /// A dead queen left no princess or no drone.
    LineEnded,
    /// The housing names a mode the engine does not know.
    UnknownMode,
}

/// What happened during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Why the run stopped.
    pub end_reason: EndReason,
    /// Cycles simulated.
    pub cycles: u32,
    /// Cycles in which the queen could not work.
    pub blocked_cycles: u32,
    /// Items produced, by item key.
    pub products: BTreeMap<String, u64>,
    /// Queens raised after the first.
    pub generations: u32,
    /// Species of the reigning (or last) queen.
    pub final_species: String,
    /// Mutation results seen, by species uid.
    pub mutations: BTreeMap<String, u32>,
    /// Pollen loads fetched.
    pub pollen_fetched: u32,
    /// Flowers crossed.
    pub pollinations: u32,
    /// Flowers planted.
    pub flowers_planted: u32,
    /// Effect runs, by effect uid.
    pub effects: BTreeMap<String, u64>,
}

/// The host world a run operates on.
#[derive(Debug)]
pub struct World {
    /// The housing.
    pub apiary: SimulatedApiary,
    /// Flowers around the housing.
    pub garden: Garden,
    /// Research records.
    pub tracker: ApiaristTracker,
}

/// Mate a queen of `settings.queen_species` with a drone of
/// `settings.drone_species`.
///
/// # Errors
///
/// Returns [`EngineError::Genetics`] when either species has no template.
pub fn starting_queen(registry: &AlleleRegistry, settings: &SimulationSettings) -> Result<Bee, EngineError> {
    let queen = registry.template_as_genome(&AlleleUid::new(settings.queen_species.as_str()))?;
    let drone = registry.template_as_genome(&AlleleUid::new(settings.drone_species.as_str()))?;
    let mut bee = Bee::new(queen);
    bee.set_mate(drone);
    Ok(bee)
}

/// Run the apiary for `cycles` cycles.
///
/// # Errors
///
/// Returns [`EngineError::Breeding`] when offspring cannot be resolved.
#[allow(clippy::too_many_lines)]
pub fn run(
    engine: &BreedingEngine,
    world: &mut World,
    mut queen: Bee,
    cycles: u32,
    rng: &mut impl Rng,
) -> Result<RunSummary, EngineError> {
    let mut summary = RunSummary {
        end_reason: EndReason::CyclesCompleted,
        cycles: 0,
        blocked_cycles: 0,
        products: BTreeMap::new(),
        generations: 0,
        final_species: String::new(),
        mutations: BTreeMap::new(),
        pollen_fetched: 0,
        pollinations: 0,
        flowers_planted: 0,
        effects: BTreeMap::new(),
    };
    let mut effects = EffectTally::default();
    let mut effect_state = HiveEffects::default();
    let mut carried: Option<Pollen> = None;

    info!(
        species = %queen.genome().primary().uid(),
        mate = ?queen.mate().map(|m| m.primary().uid().as_str().to_owned()),
        cycles,
        flowers = world.garden.len(),
        "Run starting"
    );

    for cycle in 0..cycles {
        world.apiary.advance(cycle, rng);
        summary.cycles = summary.cycles.saturating_add(1);

        let blockers = engine.can_work(queen.genome(), &world.apiary);
        if !blockers.is_empty() {
            tracing::debug!(cycle, ?blockers, "queen idle");
            summary.blocked_cycles = summary.blocked_cycles.saturating_add(1);
            continue;
        }

        // --- Production ---
        let Some(products) = engine.produce(&mut queen, &world.apiary, rng) else {
            summary.end_reason = EndReason::UnknownMode;
            break;
        };
        for stack in products {
            let total = summary.products.entry(stack.item).or_insert(0);
            *total = total.saturating_add(u64::from(stack.count));
        }

        engine.do_effects(queen.genome(), &world.apiary, &mut effects, &mut effect_state, rng);

        // --- Pollination ---
        carried = match carried.take() {
            Some(pollen) => {
                if engine
                    .pollinate(queen.genome(), &world.apiary, &mut world.garden, &pollen, rng)?
                    .is_some()
                {
                    summary.pollinations = summary.pollinations.saturating_add(1);
                    None
                } else {
                    Some(pollen)
                }
            }
            None => {
                let fetched = engine.retrieve_pollen(queen.genome(), &world.apiary, &world.garden, rng)?;
                if fetched.is_some() {
                    summary.pollen_fetched = summary.pollen_fetched.saturating_add(1);
                }
                fetched
            }
        };
        if engine
            .plant_flower(queen.genome(), &world.apiary, &mut world.garden, rng)?
            .is_some()
        {
            summary.flowers_planted = summary.flowers_planted.saturating_add(1);
        }

        // --- Aging and succession ---
        engine.age_queen(&mut queen, &world.apiary, rng)?;
        if queen.is_alive() {
            continue;
        }

        let princess = engine.spawn_princess(&queen, &world.apiary, &mut world.tracker, rng)?;
        let drones = engine.spawn_drones(&queen, &world.apiary, &mut world.tracker, rng)?;
        for event in princess.iter().chain(&drones).flat_map(|o| &o.mutations) {
            let seen = summary.mutations.entry(event.result.as_str().to_owned()).or_insert(0);
            *seen = seen.saturating_add(1);
        }

        let (Some(princess), Some(drone)) = (princess, drones.into_iter().next()) else {
            warn!(cycle, species = %queen.genome().primary().uid(), "line ended without a successor");
            summary.end_reason = EndReason::LineEnded;
            break;
        };
        let mut successor = princess.bee;
        successor.mate_with(&drone.bee);
        summary.generations = summary.generations.saturating_add(1);
        info!(
            cycle,
            generation = successor.generation(),
            species = %successor.genome().primary().uid(),
            mate = %drone.bee.genome().primary().uid(),
            "new queen"
        );
        queen = successor;
    }

    summary.final_species = queen.genome().primary().uid().as_str().to_owned();
    summary.effects = effects.runs().clone();
    Ok(summary)
}

/// Log the end of a run.
pub fn log_run_end(summary: &RunSummary) {
    info!(
        reason = ?summary.end_reason,
        cycles = summary.cycles,
        blocked_cycles = summary.blocked_cycles,
        generations = summary.generations,
        final_species = summary.final_species,
        "Run ended"
    );

    if summary.products.is_empty() {
        warn!("Run ended with no products");
    }
    for (species, count) in &summary.mutations {
        info!(species, count, "Mutation results");
    }
}
