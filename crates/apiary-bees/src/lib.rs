//! Bees and the breeding resolvers for the Apiary breeding engine.
//!
//! A [`Bee`] wraps an immutable genome with lineage and health state. The
//! resolvers read the host world through narrow capability traits, take
//! their RNG as an argument, and never touch global state; registries and
//! the research tracker are passed in explicitly.
//!
//! # Modules
//!
//! - [`bee`] -- The organism, aging, product listings, persistence records.
//! - [`config`] -- Breeding tunables with serde defaults.
//! - [`effects`] -- Which hive effects run, and their per-housing state.
//! - [`eligibility`] -- Blocking conditions of a genome in a housing.
//! - [`engine`] -- Façade routing housing calls through their mode.
//! - [`error`] -- Error types for malformed breeding inputs.
//! - [`housing`] -- Host capability traits and modifier stacking.
//! - [`mode`] -- Beekeeping mode trait, presets, and registry.
//! - [`pollination`] -- Pollen fetch, pollen deposit, flower planting.
//! - [`production`] -- Product rolls for one production cycle.
//! - [`reproduction`] -- Species mutation, inheritance, princess and drones.
//! - [`tracker`] -- Per-owner record of discovered mutations.

pub mod bee;
pub mod config;
pub mod effects;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod housing;
pub mod mode;
pub mod pollination;
pub mod production;
pub mod reproduction;
pub mod tracker;

// Re-export primary types at crate root.
pub use bee::{Bee, BeeRecord};
pub use config::{BreedingConfig, SecondaryChance};
pub use effects::{EffectData, EffectHandler, HiveEffects};
pub use engine::BreedingEngine;
pub use error::BreedingError;
pub use housing::{BeeHousing, BeeModifier, ClimateView, ModifierSet, ModifierStack, WorldConditions};
pub use mode::{BeekeepingMode, ModeRegistry, ModeRules, StandardMode};
pub use pollination::{FlowerWorld, Pollen, Pollinatable, TerritoryBox};
pub use reproduction::{BreedingContext, MutationEvent, Offspring};
pub use tracker::{ApiaristTracker, BreedingTracker, ResearchRecord};
