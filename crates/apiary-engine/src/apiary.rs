//! The simulated host world: one apiary housing, the flowers around it,
//! and an effect handler that tallies what ran.
//!
//! The garden is column-based. A flower occupies an `(x, z)` column and
//! any sampled height in that column finds it.

use std::collections::BTreeMap;

use apiary_bees::{
    BeeHousing, BeeModifier, ClimateView, EffectData, EffectHandler, FlowerWorld, ModifierSet,
    Pollen, Pollinatable, TerritoryBox, WorldConditions,
};
use apiary_genetics::{Allele, Genome};
use apiary_types::{Humidity, PlayerId, Position, Temperature};
use rand::{Rng, RngCore};

use crate::config::{GardenSettings, HousingSettings};

/// Height of the apiary and of every garden flower.
pub const GROUND: i32 = 64;

const DAY_LIGHT: u8 = 15;
const NIGHT_LIGHT: u8 = 4;

// ---------------------------------------------------------------------------
// Housing
// ---------------------------------------------------------------------------

/// A single apiary with a fixed climate, one frame, and a day/night and
/// weather cycle driven by [`SimulatedApiary::advance`].
#[derive(Debug, Clone)]
pub struct SimulatedApiary {
    position: Position,
    temperature: Temperature,
    humidity: Humidity,
    owner: Option<PlayerId>,
    mode: Option<String>,
    frame: ModifierSet,
    day_length: u32,
    rain_chance: f64,
    precipitation: bool,
    sky_access: bool,
    daytime: bool,
    raining: bool,
}

impl SimulatedApiary {
    /// Build the apiary described by the housing settings.
    pub fn new(settings: &HousingSettings) -> Self {
        Self {
            position: Position::new(0, GROUND, 0),
            temperature: settings.temperature,
            humidity: settings.humidity,
            owner: settings.owned.then(PlayerId::new),
            mode: settings.mode.clone(),
            frame: ModifierSet::from(settings.frame),
            day_length: settings.day_length,
            rain_chance: settings.rain_chance,
            precipitation: settings.precipitation,
            sky_access: settings.sky_access,
            daytime: true,
            raining: false,
        }
    }

    /// Move the world to `cycle`: daylight alternates every `day_length`
    /// cycles and rain is rolled fresh each cycle.
    pub fn advance(&mut self, cycle: u32, rng: &mut impl Rng) {
        let half_days = cycle.checked_div(self.day_length).unwrap_or(0);
        self.daytime = half_days.checked_rem(2).unwrap_or(0) == 0;
        self.raining = self.precipitation && rng.random::<f64>() < self.rain_chance;
    }
}

impl ClimateView for SimulatedApiary {
    fn temperature(&self) -> Temperature {
        self.temperature
    }

    fn humidity(&self) -> Humidity {
        self.humidity
    }
}

impl WorldConditions for SimulatedApiary {
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
        if self.daytime { DAY_LIGHT } else { NIGHT_LIGHT }
    }

    fn can_see_sky(&self) -> bool {
        self.sky_access
    }

    fn dimension_has_sky(&self) -> bool {
        true
    }
}

impl BeeHousing for SimulatedApiary {
    fn position(&self) -> Position {
        self.position
    }

    fn owner(&self) -> Option<&PlayerId> {
        self.owner.as_ref()
    }

    fn modifiers(&self) -> Vec<&dyn BeeModifier> {
        vec![&self.frame as &dyn BeeModifier]
    }

    fn beekeeping_mode(&self) -> Option<&str> {
        self.mode.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Garden
// ---------------------------------------------------------------------------

/// A flower in the garden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flower {
    /// Plant type checked against flower providers.
    pub plant_type: String,
    /// Flower species.
    pub species: String,
    /// Species of the pollen this flower was crossed with, if any.
    pub crossed_with: Option<String>,
}

impl Pollinatable for Flower {
    fn plant_type(&self) -> &str {
        &self.plant_type
    }

    fn pollen(&self) -> Option<Pollen> {
        Some(Pollen::new(self.plant_type.clone(), self.species.clone()))
    }

    fn can_mate_with(&self, pollen: &Pollen) -> bool {
        self.crossed_with.is_none() && pollen.species != self.species
    }
}

/// Flowers keyed by column.
#[derive(Debug, Clone, Default)]
pub struct Garden {
    flowers: BTreeMap<(i32, i32), Flower>,
    plant_type: String,
}

impl Garden {
    /// Plant the configured species on a square grid around `center`.
    pub fn planted(settings: &GardenSettings, center: Position) -> Self {
        let mut garden = Self {
            flowers: BTreeMap::new(),
            plant_type: settings.plant_type.clone(),
        };
        let step = usize::from(settings.spacing.max(1));
        let radius = settings.radius.max(0);
        let low = radius.saturating_neg();
        let columns = (low..=radius)
            .step_by(step)
            .flat_map(|dx| (low..=radius).step_by(step).map(move |dz| (dx, dz)));
        for ((dx, dz), species) in columns.zip(settings.species.iter().cycle()) {
            let pos = center.offset(dx, 0, dz);
            garden.flowers.insert(
                (pos.x, pos.z),
                Flower {
                    plant_type: settings.plant_type.clone(),
                    species: species.clone(),
                    crossed_with: None,
                },
            );
        }
        garden
    }

    /// Number of flowers.
    pub fn len(&self) -> usize {
        self.flowers.len()
    }

    /// Whether the garden has no flowers.
    pub fn is_empty(&self) -> bool {
        self.flowers.is_empty()
    }

    /// Number of flowers crossed with foreign pollen.
    pub fn crossed(&self) -> usize {
        self.flowers.values().filter(|f| f.crossed_with.is_some()).count()
    }

    /// The flower in a position's column.
    pub fn flower_at(&self, pos: Position) -> Option<&Flower> {
        self.flowers.get(&(pos.x, pos.z))
    }
}

impl FlowerWorld for Garden {
    fn pollinatable_at(&self, pos: Position) -> Option<&dyn Pollinatable> {
        self.flower_at(pos).map(|f| f as &dyn Pollinatable)
    }

    fn ersatz_pollen_at(&self, _pos: Position) -> Option<Pollen> {
        None
    }

    fn mate_at(&mut self, owner: Option<&PlayerId>, pos: Position, pollen: &Pollen) -> bool {
        let Some(flower) = self.flowers.get_mut(&(pos.x, pos.z)) else {
            return false;
        };
        if !flower.can_mate_with(pollen) {
            return false;
        }
        tracing::trace!(
            owner = ?owner,
            flower = %flower.species,
            pollen = %pollen.species,
            "flower crossed"
        );
        flower.crossed_with = Some(pollen.species.clone());
        true
    }

    fn grow_flower(&mut self, flower_type: &str, pos: Position) -> bool {
        let column = (pos.x, pos.z);
        if self.flowers.contains_key(&column) {
            return false;
        }
        self.flowers.insert(
            column,
            Flower {
                plant_type: self.plant_type.clone(),
                species: flower_type.to_owned(),
                crossed_with: None,
            },
        );
        true
    }
}

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// Counts effect runs per effect allele.
#[derive(Debug, Clone, Default)]
pub struct EffectTally {
    runs: BTreeMap<String, u64>,
}

impl EffectTally {
    /// Runs per effect uid.
    pub const fn runs(&self) -> &BTreeMap<String, u64> {
        &self.runs
    }
}

impl EffectHandler for EffectTally {
    fn apply(
        &mut self,
        effect: &Allele,
        _genome: &Genome,
        data: &mut EffectData,
        area: &TerritoryBox,
        _rng: &mut dyn RngCore,
    ) {
        let count = self.runs.entry(effect.uid().as_str().to_owned()).or_insert(0);
        *count = count.saturating_add(1);
        let total = data.increment("runs");
        tracing::trace!(
            effect = %effect.uid(),
            total,
            width = area.width,
            height = area.height,
            depth = area.depth,
            "effect"
        );
    }
}
