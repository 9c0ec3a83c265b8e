//! Tunables for the breeding resolvers.
//!
//! [`BreedingConfig`] mirrors the `breeding` section of
//! `apiary-config.yaml`. Every field has a default, so an empty section
//! yields the stock behaviour. Custom [`ModeRules`] entries extend or
//! replace the built-in beekeeping mode presets.

use serde::Deserialize;

use crate::error::BreedingError;
use crate::mode::ModeRules;

/// How the secondary species' product chance is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryChance {
    /// Halve the chance and round to a whole number before applying speed.
    /// Typical chances below `1.0` round to zero, so the secondary species
    /// rarely contributes.
    #[default]
    Rounded,
    /// Halve the chance and apply speed without rounding.
    Exact,
}

impl SecondaryChance {
    /// Effective per-roll threshold for a secondary product.
    pub fn threshold(self, chance: f32, speed: f32) -> f32 {
        let half = chance / 2.0;
        match self {
            Self::Rounded => half.round() * speed,
            Self::Exact => half * speed,
        }
    }
}

/// Configuration for breeding, production, and pollination.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BreedingConfig {
    /// Multiplier applied to the chance of an already researched mutation
    /// (default: 1.5).
    #[serde(default = "default_research_boost_multiplier")]
    pub research_boost_multiplier: f32,

    /// Upper bound, in percentage points, of the research boost (default: 5.0).
    #[serde(default = "default_max_research_boost_percent")]
    pub max_research_boost_percent: f32,

    /// Secondary product chance rule (default: rounded).
    #[serde(default)]
    pub secondary_product_chance: SecondaryChance,

    /// Light level above which a housing counts as bright (default: 11).
    #[serde(default = "default_light_threshold")]
    pub light_threshold: u8,

    /// Scale from genome territory to sampled block volume (default: 3.0).
    #[serde(default = "default_territory_scale")]
    pub territory_scale: f32,

    /// Positions sampled when fetching pollen (default: 20).
    #[serde(default = "default_retrieve_pollen_attempts")]
    pub retrieve_pollen_attempts: u32,

    /// Positions sampled when depositing pollen (default: 30).
    #[serde(default = "default_pollinate_attempts")]
    pub pollinate_attempts: u32,

    /// Positions sampled when planting a flower (default: 10).
    #[serde(default = "default_plant_flower_attempts")]
    pub plant_flower_attempts: u32,

    /// Mode used when a housing does not name one (default: `normal`).
    #[serde(default = "default_mode_name")]
    pub default_mode: String,

    /// Extra or overriding beekeeping modes.
    #[serde(default)]
    pub modes: Vec<ModeRules>,
}

impl Default for BreedingConfig {
    fn default() -> Self {
        Self {
            research_boost_multiplier: default_research_boost_multiplier(),
            max_research_boost_percent: default_max_research_boost_percent(),
            secondary_product_chance: SecondaryChance::default(),
            light_threshold: default_light_threshold(),
            territory_scale: default_territory_scale(),
            retrieve_pollen_attempts: default_retrieve_pollen_attempts(),
            pollinate_attempts: default_pollinate_attempts(),
            plant_flower_attempts: default_plant_flower_attempts(),
            default_mode: default_mode_name(),
            modes: Vec::new(),
        }
    }
}

impl BreedingConfig {
    /// Check value ranges the resolvers rely on.
    ///
    /// # Errors
    ///
    /// Returns [`BreedingError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), BreedingError> {
        if self.research_boost_multiplier.is_nan() || self.research_boost_multiplier < 1.0 {
            return Err(invalid(format!(
                "research_boost_multiplier must be at least 1.0, got {}",
                self.research_boost_multiplier
            )));
        }
        if self.max_research_boost_percent.is_nan() || self.max_research_boost_percent < 0.0 {
            return Err(invalid(format!(
                "max_research_boost_percent must not be negative, got {}",
                self.max_research_boost_percent
            )));
        }
        if self.territory_scale.is_nan() || self.territory_scale <= 0.0 {
            return Err(invalid(format!(
                "territory_scale must be positive, got {}",
                self.territory_scale
            )));
        }
        if self.default_mode.trim().is_empty() {
            return Err(invalid(String::from("default_mode must not be empty")));
        }
        for rules in &self.modes {
            rules.validate()?;
        }
        Ok(())
    }
}

fn invalid(reason: String) -> BreedingError {
    BreedingError::InvalidConfig { reason }
}

const fn default_research_boost_multiplier() -> f32 {
    1.5
}

const fn default_max_research_boost_percent() -> f32 {
    5.0
}

const fn default_light_threshold() -> u8 {
    11
}

const fn default_territory_scale() -> f32 {
    3.0
}

const fn default_retrieve_pollen_attempts() -> u32 {
    20
}

const fn default_pollinate_attempts() -> u32 {
    30
}

const fn default_plant_flower_attempts() -> u32 {
    10
}

fn default_mode_name() -> String {
    String::from("normal")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_behaviour() {
        let config = BreedingConfig::default();
        assert_eq!(config.research_boost_multiplier, 1.5);
        assert_eq!(config.max_research_boost_percent, 5.0);
        assert_eq!(config.light_threshold, 11);
        assert_eq!(config.retrieve_pollen_attempts, 20);
        assert_eq!(config.pollinate_attempts, 30);
        assert_eq!(config.plant_flower_attempts, 10);
        assert_eq!(config.secondary_product_chance, SecondaryChance::Rounded);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_json_uses_defaults() {
        let config: BreedingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, BreedingConfig::default());
    }

    #[test]
    fn exact_secondary_chance_parses() {
        let config: BreedingConfig =
            serde_json::from_str(r#"{"secondary_product_chance": "exact"}"#).unwrap();
        assert_eq!(config.secondary_product_chance, SecondaryChance::Exact);
    }

    #[test]
    fn rounded_secondary_chance_drops_small_values() {
        assert_eq!(SecondaryChance::Rounded.threshold(0.3, 2.0), 0.0);
        assert_eq!(SecondaryChance::Rounded.threshold(3.0, 1.0), 2.0);
        assert_eq!(SecondaryChance::Exact.threshold(0.3, 2.0), 0.3);
    }

    #[test]
    fn validate_rejects_shrinking_boost() {
        let config = BreedingConfig {
            research_boost_multiplier: 0.5,
            ..BreedingConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(BreedingError::InvalidConfig { .. })
        ));
    }
}
