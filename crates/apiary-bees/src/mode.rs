//! Beekeeping modes: difficulty presets that scale breeding and decide
//! fatigue, overwork, and brood size.
//!
//! A [`BeekeepingMode`] contributes its own [`BeeModifier`] on top of the
//! housing's, and answers the four lineage questions the resolvers ask.
//! [`StandardMode`] implements the trait from plain [`ModeRules`], which is
//! also the shape custom modes take in configuration.

use std::collections::BTreeMap;

use rand::{Rng, RngCore};
use serde::Deserialize;

use crate::bee::Bee;
use crate::config::BreedingConfig;
use crate::error::BreedingError;
use crate::housing::{BeeModifier, ModifierSet};

/// Difficulty rules consulted by the breeding resolvers.
pub trait BeekeepingMode: core::fmt::Debug {
    /// Registry name of the mode.
    fn name(&self) -> &str;

    /// Multipliers the mode applies on top of the housing's.
    fn bee_modifier(&self) -> &dyn BeeModifier;

    /// Whether the queen is too inbred to raise a princess.
    fn is_fatigued(&self, queen: &Bee, rng: &mut dyn RngCore) -> bool;

    /// Whether the housing drives the queen hard enough to lose her natural
    /// status.
    fn is_overworked(&self, queen: &Bee, housing_modifier: &dyn BeeModifier, rng: &mut dyn RngCore)
    -> bool;

    /// Whether a princess of this queen counts as natural.
    fn is_natural_offspring(&self, queen: &Bee) -> bool;

    /// Number of drones the queen leaves behind; callers raise zero to one.
    fn final_fertility(&self, queen: &Bee, rng: &mut dyn RngCore) -> u32;
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Parameters of a [`StandardMode`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModeRules {
    /// Registry name.
    pub name: String,

    /// Mutation chance multiplier (default: 1.0).
    #[serde(default = "default_multiplier")]
    pub mutation_modifier: f32,

    /// Lifespan multiplier (default: 1.0).
    #[serde(default = "default_multiplier")]
    pub lifespan_modifier: f32,

    /// Production speed multiplier (default: 1.0).
    #[serde(default = "default_multiplier")]
    pub production_modifier: f32,

    /// Whether drone counts are rolled below the genome fertility.
    #[serde(default)]
    pub reduces_fertility: bool,

    /// Whether non-natural queens eventually stop raising princesses.
    #[serde(default)]
    pub can_fatigue: bool,

    /// Generation after which fatigue can set in (default: 96).
    #[serde(default = "default_fatigue_generation")]
    pub fatigue_generation: u32,

    /// Housing production multiplier above which queens risk overwork
    /// (default: 16.0).
    #[serde(default = "default_overwork_threshold")]
    pub overwork_threshold: f32,

    /// Chance per production cycle of overwork once past the threshold
    /// (default: 0.01).
    #[serde(default = "default_overwork_chance")]
    pub overwork_chance: f32,
}

impl ModeRules {
    /// Neutral rules under the given name.
    pub fn neutral(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mutation_modifier: default_multiplier(),
            lifespan_modifier: default_multiplier(),
            production_modifier: default_multiplier(),
            reduces_fertility: false,
            can_fatigue: false,
            fatigue_generation: default_fatigue_generation(),
            overwork_threshold: default_overwork_threshold(),
            overwork_chance: default_overwork_chance(),
        }
    }

    /// Built-in `easy` preset.
    pub fn easy() -> Self {
        Self {
            mutation_modifier: 1.5,
            lifespan_modifier: 1.5,
            ..Self::neutral("easy")
        }
    }

    /// Built-in `normal` preset.
    pub fn normal() -> Self {
        Self::neutral("normal")
    }

    /// Built-in `hard` preset.
    pub fn hard() -> Self {
        Self {
            mutation_modifier: 0.9,
            lifespan_modifier: 0.9,
            production_modifier: 0.9,
            can_fatigue: true,
            ..Self::neutral("hard")
        }
    }

    /// Built-in `hardcore` preset.
    pub fn hardcore() -> Self {
        Self {
            mutation_modifier: 0.5,
            lifespan_modifier: 0.5,
            production_modifier: 0.5,
            reduces_fertility: true,
            can_fatigue: true,
            ..Self::neutral("hardcore")
        }
    }

    /// Built-in `insane` preset.
    pub fn insane() -> Self {
        Self {
            mutation_modifier: 0.1,
            lifespan_modifier: 0.3,
            production_modifier: 0.25,
            reduces_fertility: true,
            can_fatigue: true,
            fatigue_generation: 48,
            ..Self::neutral("insane")
        }
    }

    /// Every built-in preset, easiest first.
    pub fn presets() -> [Self; 5] {
        [
            Self::easy(),
            Self::normal(),
            Self::hard(),
            Self::hardcore(),
            Self::insane(),
        ]
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`BreedingError::InvalidConfig`] for an empty name, a
    /// negative multiplier, or an overwork chance outside `0..=1`.
    pub fn validate(&self) -> Result<(), BreedingError> {
        if self.name.trim().is_empty() {
            return Err(BreedingError::InvalidConfig {
                reason: String::from("mode name must not be empty"),
            });
        }
        let multipliers = [
            ("mutation_modifier", self.mutation_modifier),
            ("lifespan_modifier", self.lifespan_modifier),
            ("production_modifier", self.production_modifier),
        ];
        for (field, value) in multipliers {
            if value.is_nan() || value < 0.0 {
                return Err(BreedingError::InvalidConfig {
                    reason: format!("mode {}: {field} must not be negative, got {value}", self.name),
                });
            }
        }
        if !(0.0..=1.0).contains(&self.overwork_chance) {
            return Err(BreedingError::InvalidConfig {
                reason: format!(
                    "mode {}: overwork_chance must lie in 0..=1, got {}",
                    self.name, self.overwork_chance
                ),
            });
        }
        Ok(())
    }
}

const fn default_multiplier() -> f32 {
    1.0
}

const fn default_fatigue_generation() -> u32 {
    96
}

const fn default_overwork_threshold() -> f32 {
    16.0
}

const fn default_overwork_chance() -> f32 {
    0.01
}

// ---------------------------------------------------------------------------
// StandardMode
// ---------------------------------------------------------------------------

/// A mode driven entirely by [`ModeRules`].
#[derive(Debug, Clone, PartialEq)]
pub struct StandardMode {
    rules: ModeRules,
    modifier: ModifierSet,
}

impl StandardMode {
    /// Build a mode from its rules.
    pub fn new(rules: ModeRules) -> Self {
        let modifier = ModifierSet {
            production: rules.production_modifier,
            lifespan: rules.lifespan_modifier,
            mutation: rules.mutation_modifier,
            ..ModifierSet::NEUTRAL
        };
        Self { rules, modifier }
    }

    /// The rules this mode was built from.
    pub const fn rules(&self) -> &ModeRules {
        &self.rules
    }
}

impl BeekeepingMode for StandardMode {
    fn name(&self) -> &str {
        &self.rules.name
    }

    fn bee_modifier(&self) -> &dyn BeeModifier {
        &self.modifier
    }

    fn is_fatigued(&self, queen: &Bee, rng: &mut dyn RngCore) -> bool {
        if !self.rules.can_fatigue || queen.is_natural() {
            return false;
        }
        let limit = self
            .rules
            .fatigue_generation
            .saturating_add(rng.random_range(0..6))
            .saturating_add(rng.random_range(0..6));
        queen.generation() > limit
    }

    fn is_overworked(
        &self,
        queen: &Bee,
        housing_modifier: &dyn BeeModifier,
        rng: &mut dyn RngCore,
    ) -> bool {
        let production = housing_modifier.production_modifier(queen.genome(), 1.0);
        production > self.rules.overwork_threshold && rng.random::<f32>() < self.rules.overwork_chance
    }

    fn is_natural_offspring(&self, queen: &Bee) -> bool {
        queen.is_natural()
    }

    fn final_fertility(&self, queen: &Bee, rng: &mut dyn RngCore) -> u32 {
        let fertility = queen.genome().fertility();
        if self.rules.reduces_fertility && fertility > 0 {
            rng.random_range(0..fertility)
        } else {
            fertility
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Modes by name, plus the name used when a housing names none.
#[derive(Debug)]
pub struct ModeRegistry {
    modes: BTreeMap<String, Box<dyn BeekeepingMode>>,
    default_mode: String,
}

impl ModeRegistry {
    /// The five built-in presets with `normal` as default.
    pub fn with_presets() -> Self {
        let mut registry = Self {
            modes: BTreeMap::new(),
            default_mode: ModeRules::normal().name,
        };
        for rules in ModeRules::presets() {
            registry.register(Box::new(StandardMode::new(rules)));
        }
        registry
    }

    /// Built-in presets overlaid with the configured modes.
    ///
    /// # Errors
    ///
    /// Returns [`BreedingError::InvalidConfig`] if a configured mode fails
    /// validation and [`BreedingError::UnknownMode`] if the default mode is
    /// not registered.
    pub fn from_config(config: &BreedingConfig) -> Result<Self, BreedingError> {
        let mut registry = Self::with_presets();
        for rules in &config.modes {
            rules.validate()?;
            registry.register(Box::new(StandardMode::new(rules.clone())));
        }
        registry.set_default(&config.default_mode)?;
        Ok(registry)
    }

    /// Add a mode, replacing any mode of the same name.
    pub fn register(&mut self, mode: Box<dyn BeekeepingMode>) {
        self.modes.insert(mode.name().to_owned(), mode);
    }

    /// Change the default mode.
    ///
    /// # Errors
    ///
    /// Returns [`BreedingError::UnknownMode`] if no mode has that name.
    pub fn set_default(&mut self, name: &str) -> Result<(), BreedingError> {
        if !self.modes.contains_key(name) {
            return Err(BreedingError::UnknownMode(name.to_owned()));
        }
        name.clone_into(&mut self.default_mode);
        Ok(())
    }

    /// Name of the default mode.
    pub fn default_mode(&self) -> &str {
        &self.default_mode
    }

    /// Look up a mode by name.
    pub fn get(&self, name: &str) -> Option<&dyn BeekeepingMode> {
        self.modes.get(name).map(AsRef::as_ref)
    }

    /// The mode a housing runs under: the named one, or the default.
    ///
    /// # Errors
    ///
    /// Returns [`BreedingError::UnknownMode`] if the name is not registered.
    pub fn resolve(&self, requested: Option<&str>) -> Result<&dyn BeekeepingMode, BreedingError> {
        let name = requested.unwrap_or(&self.default_mode);
        self.get(name)
            .ok_or_else(|| BreedingError::UnknownMode(name.to_owned()))
    }

    /// Registered mode names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modes.keys().map(String::as_str)
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::with_presets()
    }
}
