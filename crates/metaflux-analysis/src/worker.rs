//! Worker loop of the analysis pool.
//!
//! One generic task-queue executor runs any perturbation strategy
//! against the worker's private binding clone. A task that errors is
//! recorded under its distinguished failure marker and the worker keeps
//! draining, so a single bad task can never silently shrink the
//! processed set.

use metaflux_core::{EntityId, MetabolicModel, MetafluxError, Result};
use tracing::warn;

use crate::binding::{ObjectiveSense, SolverBinding};
use crate::progress::ProgressMeter;
use crate::queue::TaskQueue;
use crate::sink::{RangeSink, TaskValue, ValueSink};

/// Perturbation strategy executed per task.
#[derive(Debug, Clone, Copy)]
pub enum Perturbation<'a> {
    /// Fix the target's flux (or, for a gene, the flux of every reaction
    /// its GPR rule disables) to zero and re-solve the objective.
    Knockout {
        /// Model used to map gene targets onto their reactions.
        model: &'a MetabolicModel,
        /// Sink receiving the perturbed objective values.
        sink: &'a ValueSink,
    },
    /// Probe one extreme of the target's own flux.
    Probe {
        /// Which extreme to probe.
        sense: ObjectiveSense,
        /// Sink receiving the range halves.
        sink: &'a RangeSink,
    },
}

/// Drains the queue with the given strategy.
///
/// Exits when the queue is empty; the queue is fully pre-filled before
/// workers start, so there is never a producer to wait for.
pub fn run_worker<B: SolverBinding>(
    binding: &mut B,
    queue: &TaskQueue,
    strategy: &Perturbation<'_>,
    progress: Option<&ProgressMeter>,
) {
    while let Some(entity) = queue.next() {
        match strategy {
            Perturbation::Knockout { model, sink } => {
                match knockout_task(binding, model, &entity) {
                    Ok(objective) => sink.record(entity.clone(), TaskValue::Value(objective)),
                    Err(err) => {
                        warn!(event = "task_failed", entity = %entity, error = %err);
                        sink.record(entity.clone(), TaskValue::Failed(err.to_string()));
                    }
                }
            }
            Perturbation::Probe { sense, sink } => match probe_task(binding, *sense, &entity) {
                Ok(value) => match sense {
                    ObjectiveSense::Minimize => sink.record_min(entity.clone(), value),
                    ObjectiveSense::Maximize => sink.record_max(entity.clone(), value),
                },
                Err(err) => {
                    warn!(event = "task_failed", entity = %entity, error = %err);
                    sink.record_failure(entity.clone(), err.to_string());
                }
            },
        }
        if let Some(meter) = progress {
            meter.tick();
        }
    }
}

/// Zeroes the affected reactions, solves, and restores the saved bounds.
fn knockout_task<B: SolverBinding>(
    binding: &mut B,
    model: &MetabolicModel,
    entity: &EntityId,
) -> Result<f64> {
    let affected: Vec<EntityId> = if model.reaction(entity).is_some() {
        vec![entity.clone()]
    } else if model.gene(entity).is_some() {
        model.reactions_disabled_by(entity)
    } else {
        return Err(MetafluxError::UnknownTarget(entity.clone()));
    };

    // Validate and save every bound before touching any of them, so a
    // missing entity leaves the binding unchanged.
    let mut saved = Vec::with_capacity(affected.len());
    for reaction in &affected {
        let (lower, upper) = binding.bounds(reaction).ok_or_else(|| {
            MetafluxError::Binding(format!("entity {reaction} missing from binding"))
        })?;
        saved.push((reaction.clone(), lower, upper));
    }

    for (reaction, _, _) in &saved {
        binding.set_bounds(reaction, 0.0, 0.0);
    }
    let objective = binding.solve();
    for (reaction, lower, upper) in saved {
        binding.set_bounds(&reaction, lower, upper);
    }
    Ok(objective)
}

/// Re-points the objective at the probed entity and solves one extreme.
fn probe_task<B: SolverBinding>(
    binding: &mut B,
    sense: ObjectiveSense,
    entity: &EntityId,
) -> Result<f64> {
    if binding.bounds(entity).is_none() {
        return Err(MetafluxError::Binding(format!(
            "entity {entity} missing from binding"
        )));
    }
    binding.set_objective(entity);
    binding.set_objective_sense(sense);
    binding.solve();
    Ok(binding.solved_value(entity))
}
