//! Metaflux Regulatory - Discrete steady-state solver
//!
//! Simulates the regulatory interaction network to a fixed point or
//! cycle (an attractor) and summarizes the long-run behavior as linear
//! constraints for the optimization layer.

pub mod attractor;
pub mod solver;

#[cfg(test)]
mod solver_tests;

pub use attractor::Attractor;
pub use solver::{RegulatorySolver, MAX_ITERATIONS};
