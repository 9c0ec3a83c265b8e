//! Integration tests for the breeding façade.
//!
//! A small in-memory housing drives [`BreedingEngine`] through whole
//! breeding cycles with the starting catalog: eligibility, production,
//! princess and drone spawning, aging, pollination, and effects.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::BTreeSet;
use std::sync::Arc;

use apiary_bees::{
    ApiaristTracker, Bee, BeeHousing, BeeModifier, BreedingConfig, BreedingEngine, BreedingError,
    ClimateView, EffectData, EffectHandler, FlowerWorld, HiveEffects, ModifierSet, ModeRules,
    Pollen, Pollinatable, TerritoryBox, WorldConditions,
};
use apiary_genetics::starting_catalog::{
    COMMON, CULTIVATED, DILIGENT, FOREST, MARSHY, MEADOWS, MODEST, NOBLE, TROPICAL, WINTRY,
};
use apiary_genetics::{Allele, Chromosome, Genome, StartingCatalog, create_starting_catalog};
use apiary_types::{AlleleUid, ChromosomeType, ErrorState, Humidity, PlayerId, Position, Temperature};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

struct TestHousing {
    temperature: Temperature,
    humidity: Humidity,
    daytime: bool,
    raining: bool,
    precipitation: bool,
    sky: bool,
    dimension_sky: bool,
    owner: Option<PlayerId>,
    mode: Option<String>,
    frames: Vec<ModifierSet>,
}

impl TestHousing {
    fn temperate() -> Self {
        Self {
            temperature: Temperature::Normal,
            humidity: Humidity::Normal,
            daytime: true,
            raining: false,
            precipitation: true,
            sky: true,
            dimension_sky: true,
            owner: None,
            mode: None,
            frames: Vec::new(),
        }
    }

    fn with_frame(mut self, frame: ModifierSet) -> Self {
        self.frames.push(frame);
        self
    }
}

impl ClimateView for TestHousing {
    fn temperature(&self) -> Temperature {
        self.temperature
    }
    fn humidity(&self) -> Humidity {
        self.humidity
    }
}

impl WorldConditions for TestHousing {
    fn is_daytime(&self) -> bool {
        self.daytime
    }
    fn is_raining(&self) -> bool {
        self.raining
    }
    fn biome_has_precipitation(&self) -> bool {
        self.precipitation
    }
    fn light_level(&self) -> u8 {
        if self.daytime { 15 } else { 4 }
    }
    fn can_see_sky(&self) -> bool {
        self.sky
    }
    fn dimension_has_sky(&self) -> bool {
        self.dimension_sky
    }
}

impl BeeHousing for TestHousing {
    fn position(&self) -> Position {
        Position::new(0, 64, 0)
    }
    fn owner(&self) -> Option<&PlayerId> {
        self.owner.as_ref()
    }
    fn modifiers(&self) -> Vec<&dyn BeeModifier> {
        self.frames.iter().map(|f| f as &dyn BeeModifier).collect()
    }
    fn beekeeping_mode(&self) -> Option<&str> {
        self.mode.as_deref()
    }
}

fn engine(catalog: &StartingCatalog) -> BreedingEngine {
    BreedingEngine::from_config(catalog.mutations.clone(), BreedingConfig::default()).unwrap()
}

fn genome(catalog: &StartingCatalog, species: &str) -> Genome {
    catalog
        .alleles
        .template_as_genome(&AlleleUid::new(species))
        .unwrap()
}

fn mated_queen(catalog: &StartingCatalog, queen: &str, drone: &str) -> Bee {
    let mut bee = Bee::new(genome(catalog, queen));
    bee.mate_with(&Bee::new(genome(catalog, drone)));
    bee
}

#[test]
fn eligibility_is_deterministic() {
    let catalog = create_starting_catalog().unwrap();
    let engine = engine(&catalog);
    let wintry = genome(&catalog, WINTRY);
    let housing = TestHousing {
        temperature: Temperature::Hot,
        raining: true,
        daytime: false,
        ..TestHousing::temperate()
    };

    let first = engine.can_work(&wintry, &housing);
    for _ in 0..10 {
        assert_eq!(engine.can_work(&wintry, &housing), first);
    }
    let expected: BTreeSet<ErrorState> = [
        ErrorState::IsRaining,
        ErrorState::NotDay,
        ErrorState::NotBright,
        ErrorState::TooHot,
    ]
    .into_iter()
    .collect();
    assert_eq!(first, expected);
}

#[test]
fn seeded_production_is_reproducible() {
    let catalog = create_starting_catalog().unwrap();
    let engine = engine(&catalog);
    let housing = TestHousing::temperate().with_frame(ModifierSet {
        production: 3.0,
        ..ModifierSet::NEUTRAL
    });

    let run = || {
        let mut queen = mated_queen(&catalog, FOREST, MEADOWS);
        let mut rng = SmallRng::seed_from_u64(2024);
        let mut manifest = Vec::new();
        for _ in 0..100 {
            manifest.extend(engine.produce(&mut queen, &housing, &mut rng).unwrap());
        }
        manifest
    };
    let first = run();
    assert!(!first.is_empty());
    assert_eq!(first, run());
}

#[test]
fn unknown_mode_yields_no_production() {
    let catalog = create_starting_catalog().unwrap();
    let engine = engine(&catalog);
    let housing = TestHousing {
        mode: Some(String::from("peaceful")),
        ..TestHousing::temperate()
    };
    let mut queen = mated_queen(&catalog, FOREST, MEADOWS);
    let mut rng = SmallRng::seed_from_u64(1);
    assert!(engine.produce(&mut queen, &housing, &mut rng).is_none());

    let mut tracker = ApiaristTracker::new();
    assert!(matches!(
        engine.spawn_princess(&queen, &housing, &mut tracker, &mut rng),
        Err(BreedingError::UnknownMode(_))
    ));
}

#[test]
fn breeding_leaves_parents_untouched() {
    let catalog = create_starting_catalog().unwrap();
    let engine = engine(&catalog);
    let housing = TestHousing::temperate().with_frame(ModifierSet {
        mutation: 5.0,
        ..ModifierSet::NEUTRAL
    });
    let queen = mated_queen(&catalog, FOREST, MEADOWS);
    let before = queen.to_record();
    let mut tracker = ApiaristTracker::new();
    let mut rng = SmallRng::seed_from_u64(99);

    for _ in 0..20 {
        engine.spawn_princess(&queen, &housing, &mut tracker, &mut rng).unwrap();
        engine.spawn_drones(&queen, &housing, &mut tracker, &mut rng).unwrap();
    }
    assert_eq!(queen.to_record(), before);
}

#[test]
fn drones_need_a_mate() {
    let catalog = create_starting_catalog().unwrap();
    let engine = engine(&catalog);
    let housing = TestHousing::temperate();
    let virgin = Bee::new(genome(&catalog, FOREST));
    let mut tracker = ApiaristTracker::new();
    let mut rng = SmallRng::seed_from_u64(3);
    assert!(engine.spawn_drones(&virgin, &housing, &mut tracker, &mut rng).unwrap().is_empty());
}

#[test]
fn mutations_are_researched_per_owner() {
    let catalog = create_starting_catalog().unwrap();
    let engine = engine(&catalog);
    let owner = PlayerId::new();
    let housing = TestHousing {
        owner: Some(owner),
        ..TestHousing::temperate().with_frame(ModifierSet {
            mutation: 100.0,
            ..ModifierSet::NEUTRAL
        })
    };
    let queen = mated_queen(&catalog, FOREST, MEADOWS);
    let mut tracker = ApiaristTracker::new();
    let mut rng = SmallRng::seed_from_u64(12);

    let princess = engine
        .spawn_princess(&queen, &housing, &mut tracker, &mut rng)
        .unwrap()
        .unwrap();
    assert_eq!(princess.bee.genome().primary().uid().as_str(), COMMON);
    assert!(!princess.mutations.is_empty());
    assert!(tracker.is_discovered(Some(&owner), &AlleleUid::new(COMMON)));
    assert!(!tracker.is_discovered(None, &AlleleUid::new(COMMON)));
}

#[test]
fn first_matching_mutation_wins() {
    let catalog = create_starting_catalog().unwrap();
    let engine = engine(&catalog);
    // Both Common x Cultivated entries succeed at this modifier; the one
    // registered first must always be taken.
    let housing = TestHousing::temperate().with_frame(ModifierSet {
        mutation: 1000.0,
        ..ModifierSet::NEUTRAL
    });
    let queen = mated_queen(&catalog, COMMON, CULTIVATED);
    let mut tracker = ApiaristTracker::new();
    let mut rng = SmallRng::seed_from_u64(21);

    for _ in 0..200 {
        let princess = engine
            .spawn_princess(&queen, &housing, &mut tracker, &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(princess.bee.genome().primary().uid().as_str(), NOBLE);
        assert!(princess.mutations.iter().all(|e| e.result.as_str() == NOBLE));
    }
    assert!(tracker.is_discovered(None, &AlleleUid::new(NOBLE)));
    assert!(!tracker.is_discovered(None, &AlleleUid::new(DILIGENT)));
}

#[test]
fn generations_advance_through_princesses() {
    let catalog = create_starting_catalog().unwrap();
    let engine = engine(&catalog);
    let housing = TestHousing::temperate();
    let mut tracker = ApiaristTracker::new();
    let mut rng = SmallRng::seed_from_u64(5);

    let mut queen = mated_queen(&catalog, FOREST, FOREST);
    for expected in 1..=5 {
        let princess = engine
            .spawn_princess(&queen, &housing, &mut tracker, &mut rng)
            .unwrap()
            .unwrap();
        let mut drones = engine
            .spawn_drones(&queen, &housing, &mut tracker, &mut rng)
            .unwrap();
        assert!(!drones.is_empty());
        queen = princess.bee;
        assert_eq!(queen.generation(), expected);
        queen.mate_with(&drones.remove(0).bee);
    }
}

#[test]
fn aging_uses_housing_and_mode_lifespan() {
    let catalog = create_starting_catalog().unwrap();
    let engine = engine(&catalog);
    let housing = TestHousing {
        mode: Some(String::from("hardcore")),
        ..TestHousing::temperate()
    };
    let mut queen = mated_queen(&catalog, FOREST, MEADOWS);
    let before = queen.health();
    let mut rng = SmallRng::seed_from_u64(6);

    // Hardcore halves lifespan: two points per step.
    assert!((engine.lifespan_modifier(&queen, &housing).unwrap() - 0.5).abs() < 1e-6);
    engine.age_queen(&mut queen, &housing, &mut rng).unwrap();
    assert_eq!(queen.health(), before - 2);
}

#[test]
fn cold_primary_warm_secondary_scenario() {
    let catalog = create_starting_catalog().unwrap();
    let engine = engine(&catalog);

    // Wintry (icy, tolerance up 1) over a warm secondary, housed cold.
    let wintry = genome(&catalog, WINTRY);
    let tropical = genome(&catalog, TROPICAL);
    let mut chromosomes = wintry.chromosomes().clone();
    chromosomes[ChromosomeType::Species.index()] =
        Some(Chromosome::new(Arc::clone(wintry.primary()), Arc::clone(tropical.primary())).unwrap());
    let mixed = Genome::new(chromosomes).unwrap();
    assert_eq!(mixed.primary().uid().as_str(), WINTRY);
    let cold = TestHousing {
        temperature: Temperature::Cold,
        ..TestHousing::temperate()
    };
    assert!(engine.can_work(&mixed, &cold).is_empty());

    let raining = TestHousing {
        raining: true,
        ..cold
    };
    let blockers: Vec<ErrorState> = engine.can_work(&mixed, &raining).into_iter().collect();
    assert_eq!(blockers, vec![ErrorState::IsRaining]);
}

struct Meadow;

impl Pollinatable for Meadow {
    fn plant_type(&self) -> &str {
        "plains"
    }
    fn pollen(&self) -> Option<Pollen> {
        Some(Pollen::new("plains", "poppy"))
    }
    fn can_mate_with(&self, pollen: &Pollen) -> bool {
        pollen.species != "poppy"
    }
}

#[derive(Default)]
struct OpenField {
    matings: usize,
    flowers: usize,
}

impl FlowerWorld for OpenField {
    fn pollinatable_at(&self, _pos: Position) -> Option<&dyn Pollinatable> {
        Some(&Meadow)
    }
    fn ersatz_pollen_at(&self, _pos: Position) -> Option<Pollen> {
        None
    }
    fn mate_at(&mut self, _owner: Option<&PlayerId>, _pos: Position, _pollen: &Pollen) -> bool {
        self.matings += 1;
        true
    }
    fn grow_flower(&mut self, _flower_type: &str, _pos: Position) -> bool {
        self.flowers += 1;
        true
    }
}

#[test]
fn outdoor_checks_follow_the_world() {
    let catalog = create_starting_catalog().unwrap();
    let engine = engine(&catalog);
    let forest = genome(&catalog, FOREST);

    let desert_storm = TestHousing {
        raining: true,
        precipitation: false,
        ..TestHousing::temperate()
    };
    assert!(engine.can_work(&forest, &desert_storm).is_empty());

    let skyless = TestHousing {
        sky: false,
        dimension_sky: false,
        ..TestHousing::temperate()
    };
    assert!(engine.can_work(&forest, &skyless).is_empty());

    let covered = TestHousing {
        sky: false,
        ..TestHousing::temperate()
    };
    let blockers: Vec<ErrorState> = engine.can_work(&forest, &covered).into_iter().collect();
    assert_eq!(blockers, vec![ErrorState::NoSky]);
}

#[test]
fn humidity_blockers_name_the_direction() {
    let catalog = create_starting_catalog().unwrap();
    let engine = engine(&catalog);
    let marshy = genome(&catalog, MARSHY);
    let modest = genome(&catalog, MODEST);
    let desert = TestHousing {
        humidity: Humidity::Arid,
        ..TestHousing::temperate()
    };
    let swamp = TestHousing {
        humidity: Humidity::Damp,
        ..TestHousing::temperate()
    };
    assert!(engine.can_work(&marshy, &desert).contains(&ErrorState::TooArid));
    assert!(engine.can_work(&modest, &swamp).contains(&ErrorState::TooHumid));
}

#[test]
fn pollination_ignores_the_beekeeping_mode() {
    let catalog = create_starting_catalog().unwrap();
    let engine = engine(&catalog);
    let forest = genome(&catalog, FOREST);

    for seed in 0..50 {
        let fetched: Vec<Option<Pollen>> = ["normal", "hardcore", "insane"]
            .into_iter()
            .map(|mode| {
                let housing = TestHousing {
                    mode: Some(mode.to_owned()),
                    ..TestHousing::temperate()
                };
                let field = OpenField::default();
                let mut rng = SmallRng::seed_from_u64(seed);
                engine.retrieve_pollen(&forest, &housing, &field, &mut rng).unwrap()
            })
            .collect();
        assert_eq!(fetched[0], fetched[1]);
        assert_eq!(fetched[0], fetched[2]);
    }
}

#[test]
fn pollination_round_trip() {
    let catalog = create_starting_catalog().unwrap();
    let engine = engine(&catalog);
    let housing = TestHousing::temperate().with_frame(ModifierSet {
        flowering: 50.0,
        ..ModifierSet::NEUTRAL
    });
    let forest = genome(&catalog, FOREST);
    let mut field = OpenField::default();
    let mut rng = SmallRng::seed_from_u64(8);

    let pollen = engine
        .retrieve_pollen(&forest, &housing, &field, &mut rng)
        .unwrap()
        .unwrap();
    assert_eq!(pollen.species, "poppy");
    // Poppies do not take their own pollen.
    assert!(engine
        .pollinate(&forest, &housing, &mut field, &pollen, &mut rng)
        .unwrap()
        .is_none());
    let foreign = Pollen::new("plains", "dandelion");
    assert!(engine
        .pollinate(&forest, &housing, &mut field, &foreign, &mut rng)
        .unwrap()
        .is_some());
    assert!(engine
        .plant_flower(&forest, &housing, &mut field, &mut rng)
        .unwrap()
        .is_some());
    assert_eq!((field.matings, field.flowers), (1, 1));
}

#[derive(Default)]
struct CountingHandler {
    runs: usize,
}

impl EffectHandler for CountingHandler {
    fn apply(
        &mut self,
        _effect: &Allele,
        _genome: &Genome,
        data: &mut EffectData,
        area: &TerritoryBox,
        _rng: &mut dyn RngCore,
    ) {
        assert!(area.contains(Position::new(0, 64, 0)));
        data.increment("ticks");
        self.runs += 1;
    }
}

#[test]
fn effects_run_over_the_housing_territory() {
    let catalog = create_starting_catalog().unwrap();
    let engine = engine(&catalog);
    let housing = TestHousing::temperate();
    let forest = genome(&catalog, FOREST);
    let mut handler = CountingHandler::default();
    let mut state = HiveEffects::default();
    let mut rng = SmallRng::seed_from_u64(8);

    // effectNone is not combinable, so only the active slot runs.
    assert_eq!(engine.do_effects(&forest, &housing, &mut handler, &mut state, &mut rng), 1);
    assert_eq!(handler.runs, 1);
    assert_eq!(state.primary.get("ticks"), 1);
}

#[test]
fn configured_mode_rules_apply() {
    let catalog = create_starting_catalog().unwrap();
    let config = BreedingConfig {
        modes: vec![ModeRules {
            production_modifier: 0.0,
            ..ModeRules::neutral("idle")
        }],
        ..BreedingConfig::default()
    };
    let engine = BreedingEngine::from_config(catalog.mutations.clone(), config).unwrap();
    let housing = TestHousing {
        mode: Some(String::from("idle")),
        ..TestHousing::temperate()
    };
    let mut queen = mated_queen(&catalog, FOREST, MEADOWS);
    let mut rng = SmallRng::seed_from_u64(8);
    for _ in 0..50 {
        assert!(engine.produce(&mut queen, &housing, &mut rng).unwrap().is_empty());
    }
}
