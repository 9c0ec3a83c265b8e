//! Error types for the `apiary-bees` crate.
//!
//! Failed rolls, refused breeding, and blocked housings are ordinary
//! outcomes and are reported through `Option`, `bool`, or condition sets.
//! [`BreedingError`] covers malformed inputs only.

use apiary_genetics::GeneticsError;

/// Errors raised by breeding operations on malformed inputs.
#[derive(Debug, thiserror::Error)]
pub enum BreedingError {
    /// A housing or configuration names a beekeeping mode that is not
    /// registered.
    #[error("unknown beekeeping mode: {0}")]
    UnknownMode(String),

    /// The breeding configuration failed validation.
    #[error("invalid breeding configuration: {reason}")]
    InvalidConfig {
        /// Description of the rejected value.
        reason: String,
    },

    /// Genetic data could not be built or resolved.
    #[error("genetics error: {0}")]
    Genetics(#[from] GeneticsError),
}
