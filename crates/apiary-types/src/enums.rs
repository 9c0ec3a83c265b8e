//! Enumeration types for the Apiary breeding engine.
//!
//! Climate classes are ordered from coldest to hottest and driest to
//! wettest; their ordinals drive tolerance checks. [`ChromosomeType`] fixes
//! the slot layout shared by every bee genome.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Climate
// ---------------------------------------------------------------------------

/// Temperature class of a biome, housing, or species preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Temperature {
    /// Frozen wastes.
    Icy,
    /// Taiga and mountains.
    Cold,
    /// Plains and forests.
    Normal,
    /// Jungles and savannas.
    Warm,
    /// Deserts.
    Hot,
    /// The underworld.
    Hellish,
}

impl Temperature {
    /// All temperature classes in ordinal order.
    pub const ALL: [Self; 6] = [
        Self::Icy,
        Self::Cold,
        Self::Normal,
        Self::Warm,
        Self::Hot,
        Self::Hellish,
    ];

    /// Position of this class on the cold-to-hot scale.
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Icy => 0,
            Self::Cold => 1,
            Self::Normal => 2,
            Self::Warm => 3,
            Self::Hot => 4,
            Self::Hellish => 5,
        }
    }
}

/// Humidity class of a biome, housing, or species preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Humidity {
    /// Deserts and the underworld.
    Arid,
    /// Most temperate biomes.
    Normal,
    /// Swamps and jungles.
    Damp,
}

impl Humidity {
    /// All humidity classes in ordinal order.
    pub const ALL: [Self; 3] = [Self::Arid, Self::Normal, Self::Damp];

    /// Position of this class on the dry-to-wet scale.
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Arid => 0,
            Self::Normal => 1,
            Self::Damp => 2,
        }
    }
}

/// How far a climate preference stretches around its base class.
///
/// Widths above [`Tolerance::MAX_WIDTH`] are treated as the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tolerance {
    /// Only the base class is tolerated.
    None,
    /// Tolerates classes up to `n` steps in either direction.
    Both(u8),
    /// Tolerates classes up to `n` steps above the base.
    Up(u8),
    /// Tolerates classes up to `n` steps below the base.
    Down(u8),
}

impl Tolerance {
    /// Widest tolerance step supported.
    pub const MAX_WIDTH: u8 = 5;

    /// One step in either direction.
    pub const SOME: Self = Self::Both(1);

    /// Two steps in either direction.
    pub const EXCELLENT: Self = Self::Both(2);

    /// Inclusive ordinal range tolerated around `base`.
    ///
    /// Bounds saturate at zero; the caller clamps the upper bound against
    /// its own scale.
    pub const fn bounds(self, base: u8) -> (u8, u8) {
        match self {
            Self::None => (base, base),
            Self::Both(n) => {
                let n = clamp_width(n);
                (base.saturating_sub(n), base.saturating_add(n))
            }
            Self::Up(n) => (base, base.saturating_add(clamp_width(n))),
            Self::Down(n) => (base.saturating_sub(clamp_width(n)), base),
        }
    }
}

const fn clamp_width(n: u8) -> u8 {
    if n > Tolerance::MAX_WIDTH {
        Tolerance::MAX_WIDTH
    } else {
        n
    }
}

// ---------------------------------------------------------------------------
// Chromosome slots
// ---------------------------------------------------------------------------

/// A trait category, and the fixed genome slot that holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChromosomeType {
    /// Species; decides climate preference and products.
    Species,
    /// Production speed multiplier.
    Speed,
    /// Lifespan in aging cycles.
    Lifespan,
    /// Number of drones per brood.
    Fertility,
    /// Temperature tolerance width.
    TemperatureTolerance,
    /// Lets a bee work around the clock.
    Nocturnal,
    /// Humidity tolerance width.
    HumidityTolerance,
    /// Lets a bee fly in rain.
    TolerantFlyer,
    /// Lets a bee work without sky access.
    CaveDwelling,
    /// Flowers the bee needs and pollinates.
    FlowerProvider,
    /// Pollination chance.
    Flowering,
    /// Work area dimensions.
    Territory,
    /// Area effect applied by the hive.
    Effect,
}

impl ChromosomeType {
    /// Number of slots in a genome.
    pub const COUNT: usize = 13;

    /// All slots in genome order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Species,
        Self::Speed,
        Self::Lifespan,
        Self::Fertility,
        Self::TemperatureTolerance,
        Self::Nocturnal,
        Self::HumidityTolerance,
        Self::TolerantFlyer,
        Self::CaveDwelling,
        Self::FlowerProvider,
        Self::Flowering,
        Self::Territory,
        Self::Effect,
    ];

    /// Slot index of this chromosome inside a genome.
    pub const fn index(self) -> usize {
        match self {
            Self::Species => 0,
            Self::Speed => 1,
            Self::Lifespan => 2,
            Self::Fertility => 3,
            Self::TemperatureTolerance => 4,
            Self::Nocturnal => 5,
            Self::HumidityTolerance => 6,
            Self::TolerantFlyer => 7,
            Self::CaveDwelling => 8,
            Self::FlowerProvider => 9,
            Self::Flowering => 10,
            Self::Territory => 11,
            Self::Effect => 12,
        }
    }
}

impl core::fmt::Display for ChromosomeType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Species => "species",
            Self::Speed => "speed",
            Self::Lifespan => "lifespan",
            Self::Fertility => "fertility",
            Self::TemperatureTolerance => "temperature_tolerance",
            Self::Nocturnal => "nocturnal",
            Self::HumidityTolerance => "humidity_tolerance",
            Self::TolerantFlyer => "tolerant_flyer",
            Self::CaveDwelling => "cave_dwelling",
            Self::FlowerProvider => "flower_provider",
            Self::Flowering => "flowering",
            Self::Territory => "territory",
            Self::Effect => "effect",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Blocking conditions
// ---------------------------------------------------------------------------

/// A condition that stops a queen from working in her housing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorState {
    /// It is raining and the bee cannot fly in rain.
    IsRaining,
    /// It is day and the bee only works at night.
    NotNight,
    /// It is night and the bee only works during the day.
    NotDay,
    /// The housing is too bright for a night worker.
    NotGloomy,
    /// The housing is too dark for a day worker.
    NotBright,
    /// The housing cannot see the sky.
    NoSky,
    /// The climate is colder than tolerated.
    TooCold,
    /// The climate is hotter than tolerated.
    TooHot,
    /// The climate is drier than tolerated.
    TooArid,
    /// The climate is wetter than tolerated.
    TooHumid,
}
