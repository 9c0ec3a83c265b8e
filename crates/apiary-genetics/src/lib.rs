//! Trait model for the Apiary breeding engine.
//!
//! Alleles are immutable trait values shared through `Arc`. A chromosome
//! pairs an active and an inactive allele of one category, and a genome is
//! the fixed array of chromosomes a bee carries. Registries are ordinary
//! values built at startup and passed to whatever needs them.
//!
//! # Modules
//!
//! - [`allele`] -- Allele values as a sum type, species traits, products.
//! - [`chromosome`] -- Active/inactive pairs, dominance, per-slot inheritance.
//! - [`climate`] -- Tolerance range checks for temperature and humidity.
//! - [`error`] -- Error types for registry and genome construction.
//! - [`genome`] -- The slot array, typed accessors, and persistence records.
//! - [`mutation`] -- Mutation entries, restrictions, and the ordered table.
//! - [`registry`] -- Allele lookup and species templates.
//! - [`starting_catalog`] -- Stock alleles, fifteen species, and their
//!   mutation tree.

pub mod allele;
pub mod chromosome;
pub mod climate;
pub mod error;
pub mod genome;
pub mod mutation;
pub mod registry;
pub mod starting_catalog;

// Re-export primary types at crate root.
pub use allele::{
    Allele, AlleleKind, AlleleValue, EffectTraits, FlowerProvider, Jubilance, ProductChance,
    SpeciesTraits, Territory,
};
pub use chromosome::Chromosome;
pub use error::GeneticsError;
pub use genome::{CHROMOSOME_COUNT, Chromosomes, Genome, GenomeRecord, SlotRecord};
pub use mutation::{
    BeeMutation, MutationBuilder, MutationEnvironment, MutationRegistry, MutationRestriction,
};
pub use registry::{AlleleRegistry, Template, TemplateBuilder};
pub use starting_catalog::{StartingCatalog, create_starting_catalog};
