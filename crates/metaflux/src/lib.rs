//! Metaflux - Perturbation analysis for metabolic network models
//!
//! Study a metabolic model under gene/reaction knockouts and regulatory
//! constraints: a discrete regulatory steady-state (attractor) solver,
//! and a parallel knockout / flux-variability / dead-reaction framework
//! built on a clonable optimization-binding contract.
//!
//! # Example
//!
//! ```rust
//! use metaflux::prelude::*;
//!
//! let mut model = MetabolicModel::new();
//! model.add_reaction(Reaction::new("R1", 0.0, 10.0));
//! model.set_objective("R1".into());
//! assert_eq!(model.reaction_count(), 1);
//! ```

// Core domain types
pub use metaflux_core::{
    Condition, EntityId, EntityKind, FluxConstraint, Gene, Gpr, Interaction,
    InteractionNetwork, MetabolicModel, MetafluxError, Reaction, RegulatoryState, Result,
    RuleSet,
};

// Configuration
pub use metaflux_config::{AnalysisConfig, ConfigError, DeadReactionConfig};

// Regulatory steady-state solver
pub use metaflux_regulatory::{Attractor, RegulatorySolver, MAX_ITERATIONS};

// Analysis framework
pub use metaflux_analysis::{
    classify, ConstraintHandle, DeadReactionAnalysis, DeadReactionResult,
    EssentialityReport, FluxRange, KnockoutAnalysis, KnockoutResult, ObjectiveSense,
    ProgressMeter, SolverBinding, TargetSet, TaskValue, VariabilityAnalysis,
    VariabilityResult,
};

pub mod prelude {
    //! Convenience re-exports for typical analysis code.
    pub use metaflux_analysis::{
        classify, DeadReactionAnalysis, KnockoutAnalysis, ObjectiveSense, SolverBinding,
        TargetSet, TaskValue, VariabilityAnalysis,
    };
    pub use metaflux_config::AnalysisConfig;
    pub use metaflux_core::{
        EntityId, FluxConstraint, Gene, Gpr, InteractionNetwork, MetabolicModel, Reaction,
    };
    pub use metaflux_regulatory::RegulatorySolver;
}
