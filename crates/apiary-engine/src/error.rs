//! Error types for the apiary binary.

/// Top-level error for the apiary binary.
///
/// Each variant wraps a subsystem error so `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// The starting catalog or a configured species is inconsistent.
    #[error("genetics error: {0}")]
    Genetics(#[from] apiary_genetics::GeneticsError),

    /// Breeding configuration or offspring resolution failed.
    #[error("breeding error: {0}")]
    Breeding(#[from] apiary_bees::BreedingError),

    /// The run summary could not be serialized.
    #[error("summary error: {0}")]
    Summary(#[from] serde_json::Error),
}
