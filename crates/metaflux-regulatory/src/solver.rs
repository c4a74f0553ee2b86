//! Regulatory steady-state solver.
//!
//! Simulates the interaction network until the state history repeats,
//! then emits one flux constraint per regulated entity summarizing the
//! attractor.
//!
//! Logging levels:
//! - **DEBUG**: attractor detection with cycle position and length
//! - **WARN**: simulation hitting the iteration cap without repeating

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use metaflux_core::{
    EntityId, FluxConstraint, InteractionNetwork, MetafluxError, RegulatoryState, Result,
};
use tracing::{debug, warn};

use crate::attractor::Attractor;

/// Simulation step cap. Not user-tunable.
pub const MAX_ITERATIONS: usize = 10_000;

/// Solves the interaction network for its long-run regulatory behavior.
///
/// Externally fixed constraints (lower == upper) override the network's
/// declared initial levels and keep those entities out of the
/// simulation: they are driven from outside, not re-evaluated.
pub struct RegulatorySolver<'a> {
    network: &'a InteractionNetwork,
}

impl<'a> RegulatorySolver<'a> {
    /// Creates a solver over the given network.
    pub fn new(network: &'a InteractionNetwork) -> Self {
        RegulatorySolver { network }
    }

    /// Runs the simulation and returns the constraints summarizing the
    /// attractor, or an empty vec if the iteration cap is reached
    /// without an exact state repeat.
    ///
    /// # Errors
    ///
    /// Returns [`MetafluxError::Translation`] when a level cannot be
    /// reconciled with the metabolic layer: an external fixed value with
    /// no matching level, or an attractor level outside the entity's
    /// declared domain. Both abort the whole run.
    pub fn solve(&self, external: &[FluxConstraint]) -> Result<Vec<FluxConstraint>> {
        let mut state = RegulatoryState::from_levels(
            self.network
                .initial_levels()
                .map(|(e, l)| (e.clone(), l)),
        );

        let mut pinned = HashSet::new();
        for constraint in external.iter().filter(|c| c.is_fixed()) {
            let level = self.level_from_flux(&constraint.entity, constraint.lower)?;
            state.set_level(constraint.entity.clone(), level);
            pinned.insert(constraint.entity.clone());
        }

        let targets: Vec<EntityId> = self
            .network
            .targets()
            .filter(|t| !pinned.contains(*t))
            .cloned()
            .collect();

        let mut history: Vec<RegulatoryState> = Vec::new();
        // Hash index over recorded snapshots; equality is still checked
        // exactly, against candidates in recording order, so the first
        // repeat found is the same one a full history scan would find.
        let mut seen: HashMap<u64, Vec<usize>> = HashMap::new();

        for _ in 0..MAX_ITERATIONS {
            seen.entry(state_hash(&state))
                .or_default()
                .push(history.len());
            history.push(state.clone());

            let mut next = state.clone();
            for target in &targets {
                let rules = self
                    .network
                    .rules(target)
                    .ok_or_else(|| {
                        MetafluxError::Internal(format!("no rule set for target {target}"))
                    })?;
                for (entity, level) in &rules.firing(&state).consequences {
                    if !pinned.contains(entity) {
                        next.set_level(entity.clone(), *level);
                    }
                }
            }

            if let Some(start) = find_repeat(&history, &seen, &next) {
                let attractor = Attractor::new(history[start..].to_vec());
                debug!(
                    event = "attractor_found",
                    start,
                    length = attractor.len(),
                    steps = history.len(),
                );
                return self.emit_constraints(&attractor);
            }
            state = next;
        }

        warn!(
            event = "regulatory_cap_reached",
            max_iterations = MAX_ITERATIONS,
            "no attractor found; proceeding without regulatory constraints"
        );
        Ok(Vec::new())
    }

    /// Maps an external fixed flux value back to a discrete level.
    fn level_from_flux(&self, entity: &EntityId, value: f64) -> Result<i64> {
        if let Some(level) = self.network.level_for_fixed_flux(entity, value) {
            return Ok(level);
        }
        if value.fract() == 0.0 {
            let level = value as i64;
            if self.network.domain_admits(entity, level) {
                return Ok(level);
            }
        }
        Err(MetafluxError::Translation {
            entity: entity.clone(),
            level: value,
        })
    }

    /// One constraint per attractor entity: lb/ub are the means of the
    /// per-snapshot translated bounds.
    fn emit_constraints(&self, attractor: &Attractor) -> Result<Vec<FluxConstraint>> {
        let mut constraints = Vec::new();
        for entity in attractor.entities() {
            let levels = attractor.levels_of(&entity);
            let mut lower_sum = 0.0;
            let mut upper_sum = 0.0;
            for &level in &levels {
                if !self.network.domain_admits(&entity, level) {
                    return Err(MetafluxError::Translation {
                        entity: entity.clone(),
                        level: level as f64,
                    });
                }
                let (lb, ub) = self
                    .network
                    .translate(&entity, level)
                    .unwrap_or((level as f64, level as f64));
                lower_sum += lb;
                upper_sum += ub;
            }
            let n = levels.len() as f64;
            constraints.push(FluxConstraint::bounded(
                entity,
                lower_sum / n,
                upper_sum / n,
            ));
        }
        Ok(constraints)
    }
}

fn state_hash(state: &RegulatoryState) -> u64 {
    let mut hasher = DefaultHasher::new();
    state.hash(&mut hasher);
    hasher.finish()
}

/// Index of the earliest recorded snapshot equal to `next`, if any.
fn find_repeat(
    history: &[RegulatoryState],
    seen: &HashMap<u64, Vec<usize>>,
    next: &RegulatoryState,
) -> Option<usize> {
    seen.get(&state_hash(next))?
        .iter()
        .copied()
        .find(|&k| history[k] == *next)
}
