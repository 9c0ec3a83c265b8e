//! Pollination: fetching pollen, depositing it, and planting flowers.
//!
//! All three behaviours share one gate: a percent roll against the genome's
//! flowering rate scaled by the housing flowering multiplier.
//! Past the gate each behaviour samples random positions inside the bee's
//! territory box until one succeeds or its retry budget runs out.

use apiary_genetics::Genome;
use apiary_types::{PlayerId, Position};
use rand::Rng;

use crate::config::BreedingConfig;
use crate::housing::{BeeHousing, BeeModifier, ModifierStack};

/// Genetic material carried from one plant to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pollen {
    /// Plant type the pollen came from.
    pub plant_type: String,
    /// Species key of the donor plant.
    pub species: String,
}

impl Pollen {
    /// Create pollen of a plant type and species.
    pub fn new(plant_type: impl Into<String>, species: impl Into<String>) -> Self {
        Self {
            plant_type: plant_type.into(),
            species: species.into(),
        }
    }
}

/// A plant that can give and receive pollen.
pub trait Pollinatable {
    /// Plant type, checked against the bee's flower provider.
    fn plant_type(&self) -> &str;

    /// Pollen this plant gives, if any.
    fn pollen(&self) -> Option<Pollen>;

    /// Whether the plant accepts this pollen.
    fn can_mate_with(&self, pollen: &Pollen) -> bool;
}

/// The host world around a housing, as pollination sees it.
pub trait FlowerWorld {
    /// The pollinatable plant at a position, if any.
    fn pollinatable_at(&self, pos: Position) -> Option<&dyn Pollinatable>;

    /// Pollen from a non-pollinatable block (leaves, saplings), if any.
    fn ersatz_pollen_at(&self, pos: Position) -> Option<Pollen>;

    /// Commit a mating at a position. Returns `false` if nothing there can
    /// take the pollen.
    fn mate_at(&mut self, owner: Option<&PlayerId>, pos: Position, pollen: &Pollen) -> bool;

    /// Try to grow a flower of the given type at a position.
    fn grow_flower(&mut self, flower_type: &str, pos: Position) -> bool;
}

// ---------------------------------------------------------------------------
// Territory
// ---------------------------------------------------------------------------

/// The block volume a bee works in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerritoryBox {
    /// Lowest corner.
    pub origin: Position,
    /// Extent along x, at least one.
    pub width: i32,
    /// Extent along y, at least one.
    pub height: i32,
    /// Extent along z, at least one.
    pub depth: i32,
}

impl TerritoryBox {
    /// The genome's territory scaled by the modifier and `scale`, placed
    /// around `center`: centred horizontally, reaching a quarter of its
    /// height below.
    pub fn around(center: Position, genome: &Genome, modifier: &dyn BeeModifier, scale: f32) -> Self {
        let territory = genome.territory();
        let factor = f64::from(modifier.territory_modifier(genome, 1.0)) * f64::from(scale);
        let width = scaled_extent(territory.x, factor);
        let height = scaled_extent(territory.y, factor);
        let depth = scaled_extent(territory.z, factor);
        Self {
            origin: center.offset(
                (width / 2).saturating_neg(),
                (height / 4).saturating_neg(),
                (depth / 2).saturating_neg(),
            ),
            width,
            height,
            depth,
        }
    }

    /// A uniformly random position inside the box.
    pub fn random_position(&self, rng: &mut impl Rng) -> Position {
        self.origin.offset(
            rng.random_range(0..self.width),
            rng.random_range(0..self.height),
            rng.random_range(0..self.depth),
        )
    }

    /// Whether a position lies inside the box.
    pub fn contains(&self, pos: Position) -> bool {
        let inside = |start: i32, extent: i32, v: i32| v >= start && v < start.saturating_add(extent);
        inside(self.origin.x, self.width, pos.x)
            && inside(self.origin.y, self.height, pos.y)
            && inside(self.origin.z, self.depth, pos.z)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn scaled_extent(extent: u32, factor: f64) -> i32 {
    let scaled = (f64::from(extent) * factor).min(f64::from(i32::MAX));
    // NaN casts to zero; every axis keeps at least one block.
    (scaled as i32).max(1)
}

// ---------------------------------------------------------------------------
// Chance
// ---------------------------------------------------------------------------

/// Pollination chance in percent: flowering × housing flowering multiplier,
/// rounded and clamped to `0..=100`. The beekeeping mode does not take part.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn pollination_chance(genome: &Genome, housing_modifier: &dyn BeeModifier) -> u32 {
    let raw = f64::from(genome.flowering())
        * f64::from(housing_modifier.flowering_modifier(genome, 1.0));
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u32
}

fn passes_gate(chance: u32, rng: &mut impl Rng) -> bool {
    rng.random_range(0..100) < chance
}

// ---------------------------------------------------------------------------
// Behaviours
// ---------------------------------------------------------------------------

/// Fetch pollen from the territory.
///
/// A sampled plant the flower provider rejects yields nothing for that
/// attempt; a position without a pollinatable plant is asked for ersatz
/// pollen instead.
pub fn retrieve_pollen<H, W>(
    genome: &Genome,
    housing: &H,
    config: &BreedingConfig,
    world: &W,
    rng: &mut impl Rng,
) -> Option<Pollen>
where
    H: BeeHousing + ?Sized,
    W: FlowerWorld + ?Sized,
{
    let provider = genome.flower_provider()?;
    let stack = ModifierStack::of_housing(housing);
    if !passes_gate(pollination_chance(genome, &stack), rng) {
        return None;
    }

    let area = TerritoryBox::around(housing.position(), genome, &stack, config.territory_scale);
    for _ in 0..config.retrieve_pollen_attempts {
        let pos = area.random_position(rng);
        let pollen = match world.pollinatable_at(pos) {
            Some(plant) if !provider.accepts(plant.plant_type()) => continue,
            Some(plant) => plant.pollen(),
            None => world.ersatz_pollen_at(pos),
        };
        if pollen.is_some() {
            return pollen;
        }
    }
    None
}

/// Deposit `pollen` on an accepted, compatible plant in the territory.
///
/// Returns the position of the pollinated plant.
pub fn pollinate_random<H, W>(
    genome: &Genome,
    housing: &H,
    config: &BreedingConfig,
    world: &mut W,
    pollen: &Pollen,
    rng: &mut impl Rng,
) -> Option<Position>
where
    H: BeeHousing + ?Sized,
    W: FlowerWorld + ?Sized,
{
    let provider = genome.flower_provider()?;
    let stack = ModifierStack::of_housing(housing);
    if !passes_gate(pollination_chance(genome, &stack), rng) {
        return None;
    }

    let area = TerritoryBox::around(housing.position(), genome, &stack, config.territory_scale);
    for _ in 0..config.pollinate_attempts {
        let pos = area.random_position(rng);
        let compatible = world
            .pollinatable_at(pos)
            .is_some_and(|plant| provider.accepts(plant.plant_type()) && plant.can_mate_with(pollen));
        if compatible && world.mate_at(housing.owner(), pos, pollen) {
            tracing::debug!(x = pos.x, y = pos.y, z = pos.z, species = %pollen.species, "pollinated");
            return Some(pos);
        }
    }
    None
}

/// Grow one of the flower provider's flowers in the territory.
///
/// Returns the position of the new flower.
pub fn plant_flower_random<H, W>(
    genome: &Genome,
    housing: &H,
    config: &BreedingConfig,
    world: &mut W,
    rng: &mut impl Rng,
) -> Option<Position>
where
    H: BeeHousing + ?Sized,
    W: FlowerWorld + ?Sized,
{
    let provider = genome.flower_provider()?;
    let stack = ModifierStack::of_housing(housing);
    if !passes_gate(pollination_chance(genome, &stack), rng) {
        return None;
    }

    let area = TerritoryBox::around(housing.position(), genome, &stack, config.territory_scale);
    (0..config.plant_flower_attempts)
        .map(|_| area.random_position(rng))
        .find(|pos| world.grow_flower(&provider.flower_type, *pos))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use apiary_genetics::create_starting_catalog;
    use apiary_genetics::starting_catalog::{FOREST, MAJESTIC};
    use apiary_types::{AlleleUid, Humidity, Temperature};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::housing::{ClimateView, ModifierSet, WorldConditions};

    struct Plant {
        plant_type: &'static str,
        species: &'static str,
        pollinated: bool,
    }

    impl Pollinatable for Plant {
        fn plant_type(&self) -> &str {
            self.plant_type
        }
        fn pollen(&self) -> Option<Pollen> {
            Some(Pollen::new(self.plant_type, self.species))
        }
        fn can_mate_with(&self, pollen: &Pollen) -> bool {
            !self.pollinated && pollen.species != self.species
        }
    }

    #[derive(Default)]
    struct Garden {
        plants: BTreeMap<Position, Plant>,
        flowers: BTreeMap<Position, String>,
        leaves_everywhere: bool,
    }

    impl Garden {
        fn filled(plant_type: &'static str, species: &'static str) -> Self {
            let mut garden = Self::default();
            for x in -20..20 {
                for y in -10..10 {
                    for z in -20..20 {
                        garden.plants.insert(
                            Position::new(x, y, z),
                            Plant {
                                plant_type,
                                species,
                                pollinated: false,
                            },
                        );
                    }
                }
            }
            garden
        }
    }

    impl FlowerWorld for Garden {
        fn pollinatable_at(&self, pos: Position) -> Option<&dyn Pollinatable> {
            self.plants.get(&pos).map(|p| p as &dyn Pollinatable)
        }
        fn ersatz_pollen_at(&self, _pos: Position) -> Option<Pollen> {
            self.leaves_everywhere.then(|| Pollen::new("leaves", "oak"))
        }
        fn mate_at(&mut self, _owner: Option<&PlayerId>, pos: Position, _pollen: &Pollen) -> bool {
            match self.plants.get_mut(&pos) {
                Some(plant) => {
                    plant.pollinated = true;
                    true
                }
                None => false,
            }
        }
        fn grow_flower(&mut self, flower_type: &str, pos: Position) -> bool {
            if self.flowers.contains_key(&pos) {
                return false;
            }
            self.flowers.insert(pos, flower_type.to_owned());
            true
        }
    }

    struct Hive {
        frame: ModifierSet,
    }

    impl ClimateView for Hive {
        fn temperature(&self) -> Temperature {
            Temperature::Normal
        }
        fn humidity(&self) -> Humidity {
            Humidity::Normal
        }
    }

    impl WorldConditions for Hive {
        fn is_daytime(&self) -> bool {
            true
        }
        fn is_raining(&self) -> bool {
            false
        }
        fn biome_has_precipitation(&self) -> bool {
            true
        }
        fn light_level(&self) -> u8 {
            15
        }
        fn can_see_sky(&self) -> bool {
            true
        }
        fn dimension_has_sky(&self) -> bool {
            true
        }
    }

    impl BeeHousing for Hive {
        fn position(&self) -> Position {
            Position::new(0, 0, 0)
        }
        fn owner(&self) -> Option<&PlayerId> {
            None
        }
        fn modifiers(&self) -> Vec<&dyn BeeModifier> {
            vec![&self.frame as &dyn BeeModifier]
        }
    }

    fn genome(species: &str) -> Genome {
        create_starting_catalog()
            .unwrap()
            .alleles
            .template_as_genome(&AlleleUid::new(species))
            .unwrap()
    }

    fn eager_hive() -> Hive {
        Hive {
            frame: ModifierSet {
                flowering: 100.0,
                ..ModifierSet::NEUTRAL
            },
        }
    }

    #[test]
    fn chance_rounds_and_clamps() {
        let forest = genome(FOREST);
        // floweringSlowest is 5.
        assert_eq!(pollination_chance(&forest, &ModifierSet::NEUTRAL), 5);
        let frame = ModifierSet {
            flowering: 1.5,
            ..ModifierSet::NEUTRAL
        };
        // 7.5 rounds up.
        assert_eq!(pollination_chance(&forest, &frame), 8);
        assert_eq!(pollination_chance(&forest, &eager_hive().frame), 100);
        let closed = ModifierSet {
            flowering: 0.0,
            ..ModifierSet::NEUTRAL
        };
        assert_eq!(pollination_chance(&forest, &closed), 0);
    }

    #[test]
    fn territory_box_is_scaled_and_offset() {
        let forest = genome(FOREST);
        let area = TerritoryBox::around(Position::new(100, 64, 100), &forest, &ModifierSet::NEUTRAL, 3.0);
        // territoryAverage is 9×6×9.
        assert_eq!((area.width, area.height, area.depth), (27, 18, 27));
        assert_eq!(area.origin, Position::new(87, 60, 87));

        let mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..100 {
            assert!(area.contains(area.random_position(&mut rng)));
        }

        let shrunk = ModifierSet {
            territory: 0.0,
            ..ModifierSet::NEUTRAL
        };
        let tiny = TerritoryBox::around(Position::default(), &forest, &shrunk, 3.0);
        assert_eq!((tiny.width, tiny.height, tiny.depth), (1, 1, 1));
    }

    #[test]
    fn rejected_plants_give_no_pollen() {
        let forest = genome(FOREST);
        let config = BreedingConfig::default();
        let garden = Garden::filled("cacti", "saguaro");
        let mut rng = SmallRng::seed_from_u64(9);
        assert!(retrieve_pollen(&forest, &eager_hive(), &config, &garden, &mut rng).is_none());

        let accepted = Garden::filled("plains", "poppy");
        let pollen = retrieve_pollen(&forest, &eager_hive(), &config, &accepted, &mut rng).unwrap();
        assert_eq!(pollen.species, "poppy");
    }

    #[test]
    fn ersatz_pollen_fills_empty_positions() {
        let forest = genome(FOREST);
        let config = BreedingConfig::default();
        let garden = Garden {
            leaves_everywhere: true,
            ..Garden::default()
        };
        let mut rng = SmallRng::seed_from_u64(9);
        let pollen = retrieve_pollen(&forest, &eager_hive(), &config, &garden, &mut rng).unwrap();
        assert_eq!(pollen.plant_type, "leaves");
    }

    #[test]
    fn pollinate_needs_compatible_target() {
        let forest = genome(FOREST);
        let config = BreedingConfig::default();
        let mut rng = SmallRng::seed_from_u64(4);

        let mut same = Garden::filled("plains", "poppy");
        let own = Pollen::new("plains", "poppy");
        assert!(pollinate_random(&forest, &eager_hive(), &config, &mut same, &own, &mut rng).is_none());

        let foreign = Pollen::new("plains", "dandelion");
        let pos = pollinate_random(&forest, &eager_hive(), &config, &mut same, &foreign, &mut rng).unwrap();
        assert!(same.plants.get(&pos).unwrap().pollinated);
    }

    #[test]
    fn closed_gate_plants_nothing() {
        let majestic = genome(MAJESTIC);
        let config = BreedingConfig::default();
        let hive = Hive {
            frame: ModifierSet {
                flowering: 0.0,
                ..ModifierSet::NEUTRAL
            },
        };
        let mut garden = Garden::default();
        let mut rng = SmallRng::seed_from_u64(4);
        for _ in 0..50 {
            assert!(plant_flower_random(&majestic, &hive, &config, &mut garden, &mut rng).is_none());
        }
        assert!(garden.flowers.is_empty());

        let pos = plant_flower_random(&majestic, &eager_hive(), &config, &mut garden, &mut rng).unwrap();
        assert_eq!(garden.flowers.get(&pos).unwrap(), "flowers");
    }
}
