//! Metaflux Analysis - Parallel perturbation analysis
//!
//! This crate provides the concurrent analysis framework:
//! - The clonable optimization-binding contract (`SolverBinding`)
//! - A pre-filled, drain-only task queue shared by the worker pool
//! - Thread-safe result sinks for knockout values and variability ranges
//! - One generic worker parameterized by a perturbation strategy
//! - Orchestrators for knockout, flux-variability, and dead-reaction
//!   analysis
//! - Essentiality classification of knockout results

pub mod binding;
pub mod classify;
pub mod orchestrator;
pub mod progress;
pub mod queue;
pub mod sink;
pub mod worker;

#[cfg(test)]
pub mod test_utils;


pub use binding::{ConstraintHandle, ObjectiveSense, SolverBinding};
pub use classify::{classify, EssentialityReport};
pub use orchestrator::{
    DeadReactionAnalysis, DeadReactionResult, KnockoutAnalysis, KnockoutResult, TargetSet,
    VariabilityAnalysis, VariabilityResult,
};
pub use progress::ProgressMeter;
pub use queue::TaskQueue;
pub use sink::{FluxRange, RangeSink, TaskValue, ValueSink};
pub use worker::Perturbation;
