//! Configuration loading for the apiary binary.
//!
//! The configuration lives in `apiary-config.yaml` at the working
//! directory. Every section and field has a default, so an empty or
//! missing file runs a short Forest x Meadows line in a temperate apiary.

use std::path::Path;

use apiary_bees::{BreedingConfig, ModifierSet};
use apiary_genetics::starting_catalog::{FOREST, MEADOWS};
use apiary_types::{Humidity, Temperature};
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration, mirroring `apiary-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiaryConfig {
    /// Breeding tunables and extra beekeeping modes.
    #[serde(default)]
    pub breeding: BreedingConfig,

    /// The simulated run.
    #[serde(default)]
    pub simulation: SimulationSettings,

    /// The simulated apiary housing.
    #[serde(default)]
    pub housing: HousingSettings,

    /// Flowers around the housing.
    #[serde(default)]
    pub garden: GardenSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ApiaryConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// Parameters of the breeding run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationSettings {
    /// RNG seed; the same seed replays the same run (default: 42).
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Work cycles to simulate (default: 500).
    #[serde(default = "default_cycles")]
    pub cycles: u32,

    /// Species uid of the starting queen.
    #[serde(default = "default_queen_species")]
    pub queen_species: String,

    /// Species uid of the drone she is mated with.
    #[serde(default = "default_drone_species")]
    pub drone_species: String,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            cycles: default_cycles(),
            queen_species: default_queen_species(),
            drone_species: default_drone_species(),
        }
    }
}

/// The simulated housing and its surroundings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HousingSettings {
    /// Climate temperature (default: normal).
    #[serde(default = "default_temperature")]
    pub temperature: Temperature,

    /// Climate humidity (default: normal).
    #[serde(default = "default_humidity")]
    pub humidity: Humidity,

    /// Beekeeping mode; unset uses the breeding default.
    #[serde(default)]
    pub mode: Option<String>,

    /// Whether a player owns the housing (default: true).
    #[serde(default = "default_true")]
    pub owned: bool,

    /// Cycles per day and per night (default: 20).
    #[serde(default = "default_day_length")]
    pub day_length: u32,

    /// Chance per cycle that it rains (default: 0.1).
    #[serde(default = "default_rain_chance")]
    pub rain_chance: f64,

    /// Whether the biome has precipitation at all (default: true).
    #[serde(default = "default_true")]
    pub precipitation: bool,

    /// Whether the housing sees the sky (default: true).
    #[serde(default = "default_true")]
    pub sky_access: bool,

    /// The frame installed in the housing.
    #[serde(default)]
    pub frame: FrameSettings,
}

impl Default for HousingSettings {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            humidity: default_humidity(),
            mode: None,
            owned: true,
            day_length: default_day_length(),
            rain_chance: default_rain_chance(),
            precipitation: true,
            sky_access: true,
            frame: FrameSettings::default(),
        }
    }
}

/// Multipliers and flags of the installed frame; all neutral by default.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FrameSettings {
    /// Production speed multiplier.
    #[serde(default = "default_multiplier")]
    pub production: f32,
    /// Territory multiplier.
    #[serde(default = "default_multiplier")]
    pub territory: f32,
    /// Lifespan multiplier.
    #[serde(default = "default_multiplier")]
    pub lifespan: f32,
    /// Pollination chance multiplier.
    #[serde(default = "default_multiplier")]
    pub flowering: f32,
    /// Mutation chance multiplier.
    #[serde(default = "default_multiplier")]
    pub mutation: f32,
    /// Lets bees work in the dark.
    #[serde(default)]
    pub self_lighted: bool,
    /// Lets bees work without sky access.
    #[serde(default)]
    pub sunlight_simulated: bool,
    /// Shelters bees from rain.
    #[serde(default)]
    pub sealed: bool,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self::from(ModifierSet::NEUTRAL)
    }
}

impl From<ModifierSet> for FrameSettings {
    fn from(set: ModifierSet) -> Self {
        Self {
            production: set.production,
            territory: set.territory,
            lifespan: set.lifespan,
            flowering: set.flowering,
            mutation: set.mutation,
            self_lighted: set.self_lighted,
            sunlight_simulated: set.sunlight_simulated,
            sealed: set.sealed,
        }
    }
}

impl From<FrameSettings> for ModifierSet {
    fn from(frame: FrameSettings) -> Self {
        Self {
            production: frame.production,
            territory: frame.territory,
            lifespan: frame.lifespan,
            flowering: frame.flowering,
            mutation: frame.mutation,
            self_lighted: frame.self_lighted,
            sunlight_simulated: frame.sunlight_simulated,
            sealed: frame.sealed,
        }
    }
}

/// Flowers planted around the housing at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GardenSettings {
    /// Plant type of every garden flower (default: `plains`).
    #[serde(default = "default_plant_type")]
    pub plant_type: String,

    /// Flower species, planted in turn.
    #[serde(default = "default_flower_species")]
    pub species: Vec<String>,

    /// Half-width of the planted square in blocks (default: 6).
    #[serde(default = "default_radius")]
    pub radius: i32,

    /// Blocks between planted columns (default: 3).
    #[serde(default = "default_spacing")]
    pub spacing: u8,
}

impl Default for GardenSettings {
    fn default() -> Self {
        Self {
            plant_type: default_plant_type(),
            species: default_flower_species(),
            radius: default_radius(),
            spacing: default_spacing(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const fn default_seed() -> u64 {
    42
}

const fn default_cycles() -> u32 {
    500
}

fn default_queen_species() -> String {
    FOREST.to_owned()
}

fn default_drone_species() -> String {
    MEADOWS.to_owned()
}

const fn default_temperature() -> Temperature {
    Temperature::Normal
}

const fn default_humidity() -> Humidity {
    Humidity::Normal
}

const fn default_true() -> bool {
    true
}

const fn default_day_length() -> u32 {
    20
}

const fn default_rain_chance() -> f64 {
    0.1
}

const fn default_multiplier() -> f32 {
    1.0
}

fn default_plant_type() -> String {
    String::from("plains")
}

fn default_flower_species() -> Vec<String> {
    ["poppy", "dandelion", "tulip"]
        .into_iter()
        .map(String::from)
        .collect()
}

const fn default_radius() -> i32 {
    6
}

const fn default_spacing() -> u8 {
    3
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use apiary_bees::SecondaryChance;

    use super::*;

    #[test]
    fn parse_empty_yaml() {
        let config = ApiaryConfig::parse("").unwrap();
        assert_eq!(config, ApiaryConfig::default());
        assert_eq!(config.simulation.queen_species, FOREST);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
breeding:
  research_boost_multiplier: 2.0
  secondary_product_chance: exact
  default_mode: hard
  modes:
    - name: lush
      production_modifier: 3.0
simulation:
  seed: 7
  cycles: 50
  queen_species: apiary.speciesWintry
  drone_species: apiary.speciesIcy
housing:
  temperature: cold
  humidity: damp
  mode: lush
  owned: false
  rain_chance: 0.0
  frame:
    production: 2.0
    sealed: true
garden:
  plant_type: taiga
  species: [snowbell]
  radius: 2
logging:
  level: debug
";
        let config = ApiaryConfig::parse(yaml).unwrap();
        assert_eq!(config.breeding.research_boost_multiplier, 2.0);
        assert_eq!(config.breeding.secondary_product_chance, SecondaryChance::Exact);
        assert_eq!(config.breeding.default_mode, "hard");
        assert_eq!(config.breeding.modes.len(), 1);
        assert_eq!(config.breeding.modes[0].production_modifier, 3.0);
        assert_eq!(config.breeding.modes[0].lifespan_modifier, 1.0);
        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.simulation.cycles, 50);
        assert_eq!(config.housing.temperature, Temperature::Cold);
        assert_eq!(config.housing.humidity, Humidity::Damp);
        assert_eq!(config.housing.mode.as_deref(), Some("lush"));
        assert!(!config.housing.owned);
        assert_eq!(config.housing.day_length, 20);
        assert_eq!(config.housing.frame.production, 2.0);
        assert_eq!(config.housing.frame.mutation, 1.0);
        assert!(config.housing.frame.sealed);
        assert_eq!(config.garden.species, vec!["snowbell"]);
        assert_eq!(config.garden.spacing, 3);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn frame_round_trips_through_modifier_set() {
        let frame = FrameSettings {
            mutation: 2.5,
            sealed: true,
            ..FrameSettings::default()
        };
        let set = ModifierSet::from(frame);
        assert_eq!(set.mutation, 2.5);
        assert!(set.sealed);
        assert_eq!(FrameSettings::from(set), frame);
    }

    #[test]
    fn invalid_yaml_is_rejected() {
        let result = ApiaryConfig::parse("simulation: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }
}
