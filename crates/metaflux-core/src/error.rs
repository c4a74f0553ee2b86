//! Error types for metaflux

use thiserror::Error;

use crate::entity::EntityId;

/// Main error type for metaflux operations
#[derive(Debug, Error)]
pub enum MetafluxError {
    /// Error in analysis configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A regulatory level could not be translated to a flux bound.
    ///
    /// Indicates an inconsistency between the regulatory and metabolic
    /// layers (out-of-domain level, or a non-integer level for an entity
    /// without a translation). Aborts the whole run.
    #[error("Cannot translate regulatory level {level} of entity {entity} to a flux bound")]
    Translation {
        /// Entity whose level failed to translate.
        entity: EntityId,
        /// The offending level.
        level: f64,
    },

    /// The optimization binding could not be cloned for a worker.
    ///
    /// Worker isolation requires a true deep copy, so this aborts the
    /// whole analysis.
    #[error("Binding clone failed: {0}")]
    CloneFailed(String),

    /// A perturbation target is not part of the model.
    #[error("Unknown perturbation target: {0}")]
    UnknownTarget(EntityId),

    /// Error raised by the optimization binding.
    #[error("Binding error: {0}")]
    Binding(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for metaflux operations
pub type Result<T> = std::result::Result<T, MetafluxError>;
