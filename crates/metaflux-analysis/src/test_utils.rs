//! Test utilities for metaflux-analysis
//!
//! Provides an analytically solvable stand-in for the LP layer plus the
//! model fixtures shared across the crate's test modules.
//!
//! The binding models steady-state pathways as independent branches:
//! every reaction inside a branch carries the same flux, so a branch's
//! feasible interval is the intersection of its reactions' effective
//! bounds. A solve picks the requested extreme for the objective's
//! branch and the lower end everywhere else, which keeps results exact
//! and deterministic without a real solver.

use std::collections::HashMap;

use metaflux_core::{
    EntityId, FluxConstraint, Gene, Gpr, MetabolicModel, MetafluxError, Reaction, Result,
};

use crate::binding::{ConstraintHandle, ObjectiveSense, SolverBinding};

/// Analytic chain/branch binding.
#[derive(Debug, Clone)]
pub struct BranchedBinding {
    branches: Vec<Vec<EntityId>>,
    bounds: HashMap<EntityId, (f64, f64)>,
    constraints: Vec<Option<FluxConstraint>>,
    objective: Option<EntityId>,
    sense: ObjectiveSense,
    solution: HashMap<EntityId, f64>,
    fail_cloning: bool,
}

impl BranchedBinding {
    /// Builds a binding from branches of (reaction id, lb, ub) triples.
    pub fn new(branches: Vec<Vec<(&str, f64, f64)>>) -> Self {
        let mut bounds = HashMap::new();
        let branches = branches
            .into_iter()
            .map(|branch| {
                branch
                    .into_iter()
                    .map(|(id, lb, ub)| {
                        let id = EntityId::from(id);
                        bounds.insert(id.clone(), (lb, ub));
                        id
                    })
                    .collect()
            })
            .collect();
        BranchedBinding {
            branches,
            bounds,
            constraints: Vec::new(),
            objective: None,
            sense: ObjectiveSense::Maximize,
            solution: HashMap::new(),
            fail_cloning: false,
        }
    }

    /// Builds a single-branch chain.
    pub fn chain(reactions: Vec<(&str, f64, f64)>) -> Self {
        Self::new(vec![reactions])
    }

    /// Makes every subsequent `try_clone` fail.
    pub fn with_failing_clone(mut self) -> Self {
        self.fail_cloning = true;
        self
    }

    /// Number of installed (not yet removed) constraints.
    pub fn active_constraints(&self) -> usize {
        self.constraints.iter().flatten().count()
    }

    fn effective_interval(&self, branch: &[EntityId]) -> (f64, f64) {
        let mut lower = f64::NEG_INFINITY;
        let mut upper = f64::INFINITY;
        for reaction in branch {
            let (mut lb, mut ub) = self.bounds[reaction];
            for constraint in self.constraints.iter().flatten() {
                if constraint.entity == *reaction {
                    lb = lb.max(constraint.lower);
                    ub = ub.min(constraint.upper);
                }
            }
            lower = lower.max(lb);
            upper = upper.min(ub);
        }
        (lower, upper)
    }
}

impl SolverBinding for BranchedBinding {
    fn try_clone(&self) -> Result<Self> {
        if self.fail_cloning {
            return Err(MetafluxError::CloneFailed(
                "test binding configured to fail cloning".to_string(),
            ));
        }
        Ok(self.clone())
    }

    fn add_constraint(&mut self, constraint: FluxConstraint) -> ConstraintHandle {
        self.constraints.push(Some(constraint));
        ConstraintHandle::new(self.constraints.len() - 1)
    }

    fn remove_constraint(&mut self, handle: ConstraintHandle) {
        if let Some(slot) = self.constraints.get_mut(handle.index()) {
            *slot = None;
        }
    }

    fn bounds(&self, entity: &EntityId) -> Option<(f64, f64)> {
        self.bounds.get(entity).copied()
    }

    fn set_bounds(&mut self, entity: &EntityId, lower: f64, upper: f64) {
        self.bounds.insert(entity.clone(), (lower, upper));
    }

    fn set_objective(&mut self, entity: &EntityId) {
        self.objective = Some(entity.clone());
    }

    fn set_objective_sense(&mut self, sense: ObjectiveSense) {
        self.sense = sense;
    }

    fn solve(&mut self) -> f64 {
        let intervals: Vec<(f64, f64)> = self
            .branches
            .iter()
            .map(|b| self.effective_interval(b))
            .collect();

        if intervals.iter().any(|(lb, ub)| lb > ub) {
            for reaction in self.bounds.keys() {
                self.solution.insert(reaction.clone(), f64::NAN);
            }
            return f64::NAN;
        }

        for (branch, (lower, upper)) in self.branches.iter().zip(&intervals) {
            let is_objective_branch = self
                .objective
                .as_ref()
                .map(|o| branch.contains(o))
                .unwrap_or(false);
            let flux = if is_objective_branch {
                match self.sense {
                    ObjectiveSense::Maximize => *upper,
                    ObjectiveSense::Minimize => *lower,
                }
            } else {
                *lower
            };
            for reaction in branch {
                self.solution.insert(reaction.clone(), flux);
            }
        }

        self.objective
            .as_ref()
            .map(|o| self.solved_value(o))
            .unwrap_or(f64::NAN)
    }

    fn solved_value(&self, entity: &EntityId) -> f64 {
        self.solution.get(entity).copied().unwrap_or(f64::NAN)
    }
}

/// Two-step pathway A→B→C with genes g1 (R1) and g1-or-g2 (R2);
/// objective = flux through R2.
pub fn chain_model() -> MetabolicModel {
    let mut model = MetabolicModel::new();
    model.add_gene(Gene::new("g1"));
    model.add_gene(Gene::new("g2"));
    model.add_reaction(Reaction::new("R1", 0.0, 10.0).with_gpr(Gpr::Gene("g1".into())));
    model.add_reaction(Reaction::new("R2", 0.0, 10.0).with_gpr(Gpr::Or(vec![
        Gpr::Gene("g1".into()),
        Gpr::Gene("g2".into()),
    ])));
    model.set_objective("R2".into());
    model
}

/// Binding matching [`chain_model`].
pub fn chain_binding() -> BranchedBinding {
    BranchedBinding::chain(vec![("R1", 0.0, 10.0), ("R2", 0.0, 10.0)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_solve_takes_tightest_bounds() {
        let mut binding = BranchedBinding::chain(vec![("R1", 0.0, 4.0), ("R2", 1.0, 10.0)]);
        binding.set_objective(&"R2".into());
        binding.set_objective_sense(ObjectiveSense::Maximize);
        assert_eq!(binding.solve(), 4.0);
        assert_eq!(binding.solved_value(&"R1".into()), 4.0);

        binding.set_objective_sense(ObjectiveSense::Minimize);
        assert_eq!(binding.solve(), 1.0);
    }

    #[test]
    fn test_disjoint_bounds_are_infeasible() {
        let mut binding = BranchedBinding::chain(vec![("R1", 2.0, 3.0), ("R2", 0.0, 1.0)]);
        binding.set_objective(&"R2".into());
        assert!(binding.solve().is_nan());
        assert!(binding.solved_value(&"R1".into()).is_nan());
    }

    #[test]
    fn test_constraints_tighten_until_removed() {
        let mut binding = BranchedBinding::chain(vec![("R1", 0.0, 10.0)]);
        binding.set_objective(&"R1".into());
        let handle = binding.add_constraint(FluxConstraint::bounded("R1".into(), 0.0, 2.0));
        assert_eq!(binding.solve(), 2.0);

        binding.remove_constraint(handle);
        assert_eq!(binding.solve(), 10.0);
        assert_eq!(binding.active_constraints(), 0);
    }

    #[test]
    fn test_clone_is_isolated() {
        let binding = BranchedBinding::chain(vec![("R1", 0.0, 10.0)]);
        let mut clone = binding.try_clone().unwrap();
        clone.set_bounds(&"R1".into(), 0.0, 0.0);
        assert_eq!(binding.bounds(&"R1".into()), Some((0.0, 10.0)));
        assert_eq!(clone.bounds(&"R1".into()), Some((0.0, 0.0)));
    }

    #[test]
    fn test_failing_clone() {
        let binding = BranchedBinding::chain(vec![("R1", 0.0, 1.0)]).with_failing_clone();
        assert!(matches!(
            binding.try_clone(),
            Err(MetafluxError::CloneFailed(_))
        ));
    }
}
