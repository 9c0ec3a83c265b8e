//! Inheritance and species mutation.
//!
//! Offspring are built in two passes. The mutation pre-pass runs once per
//! parent ordering: a coin flip pairs one parent's primary species with the
//! other's secondary, the matching table entries are tried in table order,
//! and the first successful roll replaces that parent's whole chromosome
//! array with the pure-bred template of the result species. The inheritance
//! pass then resolves every slot both parents carry with
//! [`Chromosome::inherit`]; slots either parent lacks stay absent.
//!
//! Parents are only read. Every offspring gets a fresh genome.

use apiary_genetics::{BeeMutation, Chromosome, Chromosomes, Genome, MutationEnvironment, MutationRegistry};
use apiary_types::{AlleleUid, MutationId, PlayerId};
use rand::Rng;

use crate::bee::Bee;
use crate::config::BreedingConfig;
use crate::error::BreedingError;
use crate::housing::BeeModifier;
use crate::mode::BeekeepingMode;
use crate::tracker::BreedingTracker;

/// Everything the resolvers read while breeding one queen.
pub struct BreedingContext<'a> {
    /// Mutation table, tried in order.
    pub mutations: &'a MutationRegistry,
    /// Active beekeeping mode.
    pub mode: &'a dyn BeekeepingMode,
    /// Combined modifiers of the housing.
    pub housing_modifier: &'a dyn BeeModifier,
    /// Climate and time of day checked by mutation restrictions.
    pub environment: MutationEnvironment,
    /// Owner whose research record is consulted and updated.
    pub owner: Option<&'a PlayerId>,
    /// Research boost settings.
    pub config: &'a BreedingConfig,
}

impl core::fmt::Debug for BreedingContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BreedingContext")
            .field("mutations", &self.mutations.len())
            .field("mode", &self.mode.name())
            .field("environment", &self.environment)
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

/// A mutation that fired while creating an offspring.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationEvent {
    /// Table id of the mutation.
    pub mutation: MutationId,
    /// Species the mutated parent turned into.
    pub result: AlleleUid,
    /// Final chance in percent the roll was made against.
    pub chance: f32,
}

/// A newborn bee and the mutations that shaped it.
#[derive(Debug, Clone, PartialEq)]
pub struct Offspring {
    /// The offspring.
    pub bee: Bee,
    /// Mutations that fired, at most one per parent.
    pub mutations: Vec<MutationEvent>,
}

// ---------------------------------------------------------------------------
// Mutation pre-pass
// ---------------------------------------------------------------------------

/// Final chance in percent for `mutation` when `genome0` breeds with
/// `genome1` through the species pair `(allele0, allele1)`.
///
/// The base chance (zero when a restriction fails) is scaled by the housing
/// and mode mutation multipliers. Researched mutations get a bonus of
/// `chance × (multiplier − 1)`, capped at the configured maximum.
pub fn mutation_chance<T>(
    ctx: &BreedingContext<'_>,
    tracker: &T,
    mutation: &BeeMutation,
    genome0: &Genome,
    genome1: &Genome,
    allele0: &AlleleUid,
    allele1: &AlleleUid,
) -> f32
where
    T: BreedingTracker + ?Sized,
{
    let base = mutation.chance(ctx.environment, allele0, allele1);
    if base <= 0.0 {
        return 0.0;
    }

    let chance = base
        * ctx.housing_modifier.mutation_modifier(genome0, genome1, 1.0)
        * ctx.mode.bee_modifier().mutation_modifier(genome0, genome1, 1.0);
    if chance <= 0.0 {
        return 0.0;
    }

    if tracker.is_researched(ctx.owner, mutation) {
        let boost = (chance * (ctx.config.research_boost_multiplier - 1.0))
            .min(ctx.config.max_research_boost_percent);
        chance + boost
    } else {
        chance
    }
}

/// Try to mutate `genome0` through its pairing with `genome1`.
///
/// Returns the template chromosomes of the first mutation whose roll
/// succeeds, after recording it with the tracker.
pub fn mutate_species<T>(
    ctx: &BreedingContext<'_>,
    tracker: &mut T,
    genome0: &Genome,
    genome1: &Genome,
    rng: &mut impl Rng,
) -> Option<(Chromosomes, MutationEvent)>
where
    T: BreedingTracker + ?Sized,
{
    let (first, second, allele0, allele1) = if rng.random_bool(0.5) {
        (genome0, genome1, genome0.primary().uid(), genome1.secondary().uid())
    } else {
        (genome1, genome0, genome1.primary().uid(), genome0.secondary().uid())
    };

    for mutation in ctx.mutations.combinations(allele0, allele1) {
        let chance = mutation_chance(ctx, tracker, mutation, first, second, allele0, allele1);
        if chance <= 0.0 {
            continue;
        }

        if chance > rng.random::<f32>() * 100.0 {
            tracker.register_mutation(ctx.owner, mutation);
            tracing::debug!(
                mutation = %mutation.id(),
                result = %mutation.result_species(),
                chance,
                "species mutation"
            );
            let event = MutationEvent {
                mutation: mutation.id().clone(),
                result: mutation.result_species().clone(),
                chance,
            };
            return Some((mutation.template().to_chromosomes(), event));
        }
    }

    None
}

// ---------------------------------------------------------------------------
// Inheritance
// ---------------------------------------------------------------------------

/// Combine two chromosome arrays slot by slot.
///
/// Slots missing from either parent stay absent in the result.
pub fn inherit_chromosomes(rng: &mut impl Rng, parent1: &Chromosomes, parent2: &Chromosomes) -> Chromosomes {
    let mut chromosomes: Chromosomes = Default::default();
    for ((slot, first), second) in chromosomes.iter_mut().zip(parent1).zip(parent2) {
        if let (Some(first), Some(second)) = (first, second) {
            *slot = Some(Chromosome::inherit(rng, first, second));
        }
    }
    chromosomes
}

/// Resolve one offspring genome of `queen` and her mate.
///
/// Returns `Ok(None)` when the queen is unmated.
///
/// # Errors
///
/// Returns [`BreedingError::Genetics`] if the resolved slots do not form a
/// valid genome.
pub fn create_offspring<T>(
    ctx: &BreedingContext<'_>,
    tracker: &mut T,
    queen: &Bee,
    rng: &mut impl Rng,
) -> Result<Option<(Genome, Vec<MutationEvent>)>, BreedingError>
where
    T: BreedingTracker + ?Sized,
{
    let Some(mate) = queen.mate() else {
        return Ok(None);
    };
    let genome = queen.genome();

    let mut events = Vec::new();
    let mutated1 = mutate_species(ctx, tracker, genome, mate, rng).map(|(chromosomes, event)| {
        events.push(event);
        chromosomes
    });
    let mutated2 = mutate_species(ctx, tracker, mate, genome, rng).map(|(chromosomes, event)| {
        events.push(event);
        chromosomes
    });

    let parent1 = mutated1.as_ref().unwrap_or(genome.chromosomes());
    let parent2 = mutated2.as_ref().unwrap_or(mate.chromosomes());

    let offspring = Genome::new(inherit_chromosomes(rng, parent1, parent2))?;
    Ok(Some((offspring, events)))
}

// ---------------------------------------------------------------------------
// Princess and drones
// ---------------------------------------------------------------------------

/// Raise the queen's successor.
///
/// Refused (`Ok(None)`) when the queen is unmated or the mode judges her
/// fatigued. The princess is one generation older than the queen and takes
/// her natural flag from the mode.
///
/// # Errors
///
/// Propagates [`create_offspring`] errors.
pub fn spawn_princess<T>(
    ctx: &BreedingContext<'_>,
    tracker: &mut T,
    queen: &Bee,
    rng: &mut impl Rng,
) -> Result<Option<Offspring>, BreedingError>
where
    T: BreedingTracker + ?Sized,
{
    if !queen.can_spawn() {
        tracing::debug!(species = %queen.genome().primary().uid(), "no princess: queen unmated");
        return Ok(None);
    }
    if ctx.mode.is_fatigued(queen, rng) {
        tracing::debug!(
            species = %queen.genome().primary().uid(),
            generation = queen.generation(),
            mode = ctx.mode.name(),
            "no princess: queen fatigued"
        );
        return Ok(None);
    }

    let Some((genome, mutations)) = create_offspring(ctx, tracker, queen, rng)? else {
        return Ok(None);
    };
    let bee = Bee::with_lineage(
        genome,
        ctx.mode.is_natural_offspring(queen),
        queen.generation().saturating_add(1),
    );
    Ok(Some(Offspring { bee, mutations }))
}

/// Release the queen's drones.
///
/// An unmated queen yields none. Otherwise the mode's final fertility, at
/// least one, decides the count, and each drone is resolved independently.
/// Drones are natural and start at generation zero.
///
/// # Errors
///
/// Propagates [`create_offspring`] errors.
pub fn spawn_drones<T>(
    ctx: &BreedingContext<'_>,
    tracker: &mut T,
    queen: &Bee,
    rng: &mut impl Rng,
) -> Result<Vec<Offspring>, BreedingError>
where
    T: BreedingTracker + ?Sized,
{
    if !queen.can_spawn() {
        tracing::debug!(species = %queen.genome().primary().uid(), "no drones: queen unmated");
        return Ok(Vec::new());
    }

    let count = ctx.mode.final_fertility(queen, rng).max(1);
    let mut drones = Vec::new();
    for _ in 0..count {
        if let Some((genome, mutations)) = create_offspring(ctx, tracker, queen, rng)? {
            drones.push(Offspring {
                bee: Bee::with_lineage(genome, true, 0),
                mutations,
            });
        }
    }
    Ok(drones)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use apiary_genetics::starting_catalog::{
        COMMON, FOREST, ICY, INDUSTRIOUS, MAJESTIC, MEADOWS, WINTRY,
    };
    use apiary_genetics::{StartingCatalog, create_starting_catalog};
    use apiary_types::{ChromosomeType, Humidity, Temperature};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::housing::ModifierSet;
    use crate::mode::{ModeRules, StandardMode};
    use crate::tracker::ApiaristTracker;

    const TEMPERATE: MutationEnvironment = MutationEnvironment {
        temperature: Temperature::Normal,
        humidity: Humidity::Normal,
        is_daytime: true,
    };

    fn genome(catalog: &StartingCatalog, species: &str) -> Genome {
        catalog
            .alleles
            .template_as_genome(&AlleleUid::new(species))
            .unwrap()
    }

    fn mated(catalog: &StartingCatalog, queen: &str, drone: &str) -> Bee {
        let mut bee = Bee::new(genome(catalog, queen));
        bee.set_mate(genome(catalog, drone));
        bee
    }

    fn context<'a>(
        catalog: &'a StartingCatalog,
        mode: &'a StandardMode,
        housing: &'a ModifierSet,
        config: &'a BreedingConfig,
    ) -> BreedingContext<'a> {
        BreedingContext {
            mutations: &catalog.mutations,
            mode,
            housing_modifier: housing,
            environment: TEMPERATE,
            owner: None,
            config,
        }
    }

    #[test]
    fn research_boost_is_capped() {
        let catalog = create_starting_catalog().unwrap();
        let mode = StandardMode::new(ModeRules::normal());
        let housing = ModifierSet::NEUTRAL;
        let config = BreedingConfig::default();
        let ctx = context(&catalog, &mode, &housing, &config);

        let forest = genome(&catalog, FOREST);
        let meadows = genome(&catalog, MEADOWS);
        let (a, b) = (AlleleUid::new(FOREST), AlleleUid::new(MEADOWS));
        let mutation = catalog.mutations.combinations(&a, &b).next().unwrap();

        let mut tracker = ApiaristTracker::new();
        let fresh = mutation_chance(&ctx, &tracker, mutation, &forest, &meadows, &a, &b);
        assert_eq!(fresh, 15.0);

        tracker.register_mutation(None, mutation);
        let researched = mutation_chance(&ctx, &tracker, mutation, &forest, &meadows, &a, &b);
        // 15 × 0.5 = 7.5, capped at 5.
        assert_eq!(researched, 20.0);
    }

    #[test]
    fn mode_and_housing_scale_the_chance() {
        let catalog = create_starting_catalog().unwrap();
        let mode = StandardMode::new(ModeRules::hardcore());
        let housing = ModifierSet {
            mutation: 2.0,
            ..ModifierSet::NEUTRAL
        };
        let config = BreedingConfig::default();
        let ctx = context(&catalog, &mode, &housing, &config);
        let forest = genome(&catalog, FOREST);
        let meadows = genome(&catalog, MEADOWS);
        let (a, b) = (AlleleUid::new(FOREST), AlleleUid::new(MEADOWS));
        let mutation = catalog.mutations.combinations(&a, &b).next().unwrap();
        let tracker = ApiaristTracker::new();
        assert_eq!(
            mutation_chance(&ctx, &tracker, mutation, &forest, &meadows, &a, &b),
            15.0
        );
    }

    #[test]
    fn restricted_mutation_is_skipped_outside_its_climate() {
        let catalog = create_starting_catalog().unwrap();
        let mode = StandardMode::new(ModeRules::normal());
        let housing = ModifierSet {
            mutation: 100.0,
            ..ModifierSet::NEUTRAL
        };
        let config = BreedingConfig::default();
        let mut ctx = context(&catalog, &mode, &housing, &config);
        let industrious = genome(&catalog, INDUSTRIOUS);
        let wintry = genome(&catalog, WINTRY);
        let mut tracker = ApiaristTracker::new();
        let mut rng = SmallRng::seed_from_u64(1);

        for _ in 0..20 {
            assert!(mutate_species(&ctx, &mut tracker, &industrious, &wintry, &mut rng).is_none());
        }

        ctx.environment.temperature = Temperature::Cold;
        let (chromosomes, event) =
            mutate_species(&ctx, &mut tracker, &industrious, &wintry, &mut rng).unwrap();
        assert_eq!(event.result.as_str(), ICY);
        let mutated = Genome::new(chromosomes).unwrap();
        assert!(mutated.is_pure_bred(ChromosomeType::Species));
        assert!(tracker.is_discovered(None, &AlleleUid::new(ICY)));
    }

    #[test]
    fn certain_mutation_replaces_both_parents() {
        let catalog = create_starting_catalog().unwrap();
        let mode = StandardMode::new(ModeRules::normal());
        let housing = ModifierSet {
            mutation: 100.0,
            ..ModifierSet::NEUTRAL
        };
        let config = BreedingConfig::default();
        let ctx = context(&catalog, &mode, &housing, &config);
        let queen = mated(&catalog, FOREST, MEADOWS);
        let mut tracker = ApiaristTracker::new();
        let mut rng = SmallRng::seed_from_u64(42);

        let (offspring, events) = create_offspring(&ctx, &mut tracker, &queen, &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(offspring.primary().uid().as_str(), COMMON);
        assert_eq!(offspring.secondary().uid().as_str(), COMMON);
        assert_eq!(tracker.mutation_count(None, &events[0].mutation), 2);
    }

    #[test]
    fn parents_are_untouched() {
        let catalog = create_starting_catalog().unwrap();
        let mode = StandardMode::new(ModeRules::normal());
        let housing = ModifierSet {
            mutation: 100.0,
            ..ModifierSet::NEUTRAL
        };
        let config = BreedingConfig::default();
        let ctx = context(&catalog, &mode, &housing, &config);
        let queen = mated(&catalog, FOREST, MEADOWS);
        let before = queen.clone();
        let mut tracker = ApiaristTracker::new();
        let mut rng = SmallRng::seed_from_u64(7);

        spawn_princess(&ctx, &mut tracker, &queen, &mut rng).unwrap();
        spawn_drones(&ctx, &mut tracker, &queen, &mut rng).unwrap();
        assert_eq!(queen, before);
    }

    #[test]
    fn slot_absent_in_one_parent_stays_absent() {
        let catalog = create_starting_catalog().unwrap();
        let mut rng = SmallRng::seed_from_u64(5);
        let forest = genome(&catalog, FOREST);
        let mut partial = genome(&catalog, MEADOWS).chromosomes().clone();
        partial[ChromosomeType::Effect.index()] = None;

        let child = inherit_chromosomes(&mut rng, forest.chromosomes(), &partial);
        assert!(child[ChromosomeType::Effect.index()].is_none());
        assert!(child[ChromosomeType::Species.index()].is_some());
        assert!(child[ChromosomeType::Speed.index()].is_some());
    }

    #[test]
    fn unmated_queen_spawns_nothing() {
        let catalog = create_starting_catalog().unwrap();
        let mode = StandardMode::new(ModeRules::normal());
        let housing = ModifierSet::NEUTRAL;
        let config = BreedingConfig::default();
        let ctx = context(&catalog, &mode, &housing, &config);
        let queen = Bee::new(genome(&catalog, FOREST));
        let mut tracker = ApiaristTracker::new();
        let mut rng = SmallRng::seed_from_u64(5);

        assert!(spawn_drones(&ctx, &mut tracker, &queen, &mut rng).unwrap().is_empty());
        assert!(spawn_princess(&ctx, &mut tracker, &queen, &mut rng).unwrap().is_none());
    }

    #[test]
    fn princess_and_drone_lineage() {
        let catalog = create_starting_catalog().unwrap();
        let mode = StandardMode::new(ModeRules::normal());
        let housing = ModifierSet {
            mutation: 0.0,
            ..ModifierSet::NEUTRAL
        };
        let config = BreedingConfig::default();
        let ctx = context(&catalog, &mode, &housing, &config);
        let mut queen = Bee::with_lineage(genome(&catalog, MAJESTIC), false, 4);
        queen.set_mate(genome(&catalog, MAJESTIC));
        let mut tracker = ApiaristTracker::new();
        let mut rng = SmallRng::seed_from_u64(5);

        let princess = spawn_princess(&ctx, &mut tracker, &queen, &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(princess.bee.generation(), 5);
        assert!(!princess.bee.is_natural());
        assert!(!princess.bee.can_spawn());
        assert!(princess.mutations.is_empty());

        // Majestic carries maximum fertility.
        let drones = spawn_drones(&ctx, &mut tracker, &queen, &mut rng).unwrap();
        assert_eq!(drones.len(), 4);
        for drone in &drones {
            assert_eq!(drone.bee.generation(), 0);
            assert!(drone.bee.is_natural());
            assert_eq!(drone.bee.genome().primary().uid().as_str(), MAJESTIC);
        }
    }

    #[test]
    fn fatigued_queen_raises_no_princess() {
        let catalog = create_starting_catalog().unwrap();
        let mode = StandardMode::new(ModeRules::hard());
        let housing = ModifierSet::NEUTRAL;
        let config = BreedingConfig::default();
        let ctx = context(&catalog, &mode, &housing, &config);
        let mut queen = Bee::with_lineage(genome(&catalog, FOREST), false, 200);
        queen.set_mate(genome(&catalog, FOREST));
        let mut tracker = ApiaristTracker::new();
        let mut rng = SmallRng::seed_from_u64(5);

        assert!(spawn_princess(&ctx, &mut tracker, &queen, &mut rng).unwrap().is_none());
        // Drones ignore fatigue.
        assert!(!spawn_drones(&ctx, &mut tracker, &queen, &mut rng).unwrap().is_empty());
    }
}
