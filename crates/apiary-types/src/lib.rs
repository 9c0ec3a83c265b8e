//! Shared type definitions for the Apiary breeding engine.
//!
//! This crate holds the plain data types every other crate in the workspace
//! agrees on: identifiers, climate classes, tolerance widths, chromosome
//! slots, blocking conditions, and small world-facing structs.
//!
//! # Modules
//!
//! - [`ids`] -- Identifier newtypes for players, alleles, and mutations
//! - [`enums`] -- Climate classes, tolerances, chromosome slots, error states
//! - [`structs`] -- Positions, item stacks, and biome descriptors

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{ChromosomeType, ErrorState, Humidity, Temperature, Tolerance};
pub use ids::{AlleleUid, MutationId, PlayerId};
pub use structs::{Biome, ItemStack, Position};
