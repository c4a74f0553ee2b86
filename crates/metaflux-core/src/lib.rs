//! Metaflux Core - Core types for perturbation analysis
//!
//! This crate provides the fundamental abstractions for metaflux:
//! - Entity identifiers used as keys across constraints, states, and results
//! - Read-only views of the metabolic model (reactions, genes, GPR rules)
//! - Flux constraints with lower/upper bounds
//! - The discrete regulatory interaction network

pub mod constraint;
pub mod entity;
pub mod error;
pub mod interaction;
pub mod model;


pub use constraint::FluxConstraint;
pub use entity::{EntityId, EntityKind};
pub use error::{MetafluxError, Result};
pub use interaction::{
    Condition, Interaction, InteractionNetwork, RegulatoryState, RuleSet,
};
pub use model::{Gene, Gpr, MetabolicModel, Reaction};
