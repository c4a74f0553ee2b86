//! Optimization-binding contract.
//!
//! The engine depends on, but never implements, the LP layer. A binding
//! is the live association between the entity/constraint model and one
//! concrete, solvable model instance. The one hard requirement is
//! isolation: `try_clone` must produce a fully independent deep copy, so
//! concurrent workers never share mutable solver state.

use metaflux_core::{EntityId, FluxConstraint, Result};

/// Opaque handle to a constraint installed on a binding.
///
/// Returned by [`SolverBinding::add_constraint`] so the orchestrator can
/// tear the constraint down again after the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintHandle(pub(crate) usize);

impl ConstraintHandle {
    /// Creates a handle from a raw index.
    pub fn new(index: usize) -> Self {
        ConstraintHandle(index)
    }

    /// The raw index of the handle.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Direction of the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    /// Maximize the objective value.
    Maximize,
    /// Minimize the objective value.
    Minimize,
}

/// One independent, clonable instance of the optimization model.
///
/// Infeasibility is signaled by a NaN-bearing result, never an error:
/// an infeasible perturbation is an expected, common outcome.
pub trait SolverBinding: Send + Sized {
    /// Produces a fully independent deep clone of all variables,
    /// constraints, and objective.
    ///
    /// # Errors
    ///
    /// A clone failure is fatal to the whole analysis; correctness
    /// requires true worker isolation.
    fn try_clone(&self) -> Result<Self>;

    /// Installs a constraint and returns its handle.
    fn add_constraint(&mut self, constraint: FluxConstraint) -> ConstraintHandle;

    /// Removes a previously installed constraint. Removing an unknown
    /// handle is a no-op.
    fn remove_constraint(&mut self, handle: ConstraintHandle);

    /// The variable bounds of an entity, if it exists in the model.
    fn bounds(&self, entity: &EntityId) -> Option<(f64, f64)>;

    /// Overwrites the variable bounds of an entity.
    fn set_bounds(&mut self, entity: &EntityId, lower: f64, upper: f64);

    /// Points the objective at an entity's value.
    fn set_objective(&mut self, entity: &EntityId);

    /// Sets the objective direction.
    fn set_objective_sense(&mut self, sense: ObjectiveSense);

    /// Solves the model and returns the objective value; NaN means
    /// infeasible.
    fn solve(&mut self) -> f64;

    /// The entity's value in the last solution; NaN if the model was
    /// infeasible or has not been solved.
    fn solved_value(&self, entity: &EntityId) -> f64;
}
