//! Analysis orchestration.
//!
//! Every analysis follows the same protocol: resolve and validate the
//! target set, compute regulatory constraints once and install them on
//! the template binding, clone the template once per worker, spawn and
//! join exactly `parallelism` workers over pre-filled queues, then
//! remove the regulatory constraints so the template leaves the call as
//! clean as it entered.
//!
//! Logging levels:
//! - **INFO**: analysis start/end with target and worker counts
//! - **WARN**: per-task failures (emitted by the worker loop)

use std::collections::HashMap;
use std::thread;

use metaflux_config::AnalysisConfig;
use metaflux_core::{
    EntityId, FluxConstraint, InteractionNetwork, MetabolicModel, MetafluxError, Result,
};
use metaflux_regulatory::RegulatorySolver;
use tracing::info;

use crate::binding::{ConstraintHandle, ObjectiveSense, SolverBinding};
use crate::progress::ProgressMeter;
use crate::queue::TaskQueue;
use crate::sink::{FluxRange, RangeSink, TaskValue, ValueSink};
use crate::worker::{run_worker, Perturbation};

/// The set of entities to perturb.
#[derive(Debug, Clone)]
pub enum TargetSet {
    /// Every reaction of the model.
    AllReactions,
    /// Every gene of the model.
    AllGenes,
    /// An explicit list, validated before any worker is spawned.
    Explicit(Vec<EntityId>),
}

impl TargetSet {
    fn resolve(&self, model: &MetabolicModel) -> Result<Vec<EntityId>> {
        match self {
            TargetSet::AllReactions => Ok(model.reaction_ids()),
            TargetSet::AllGenes => Ok(model.gene_ids()),
            TargetSet::Explicit(ids) => {
                for id in ids {
                    if model.reaction(id).is_none() && model.gene(id).is_none() {
                        return Err(MetafluxError::UnknownTarget(id.clone()));
                    }
                }
                Ok(ids.clone())
            }
        }
    }

    fn resolve_reactions(&self, model: &MetabolicModel) -> Result<Vec<EntityId>> {
        let ids = self.resolve(model)?;
        for id in &ids {
            if model.reaction(id).is_none() {
                return Err(MetafluxError::UnknownTarget(id.clone()));
            }
        }
        Ok(ids)
    }
}

/// Result of a knockout sweep.
#[derive(Debug, Clone)]
pub struct KnockoutResult {
    /// Objective optimum of the unperturbed (but regulated) model.
    pub reference: f64,
    /// Per-target objective value after the knockout.
    pub values: HashMap<EntityId, TaskValue>,
}

/// Result of a variability sweep.
#[derive(Debug, Clone)]
pub struct VariabilityResult {
    /// Per-target (min, max) flux range.
    pub ranges: HashMap<EntityId, FluxRange>,
    /// Targets whose probe errored, with the reason.
    pub failures: HashMap<EntityId, String>,
}

/// Result of a dead-reaction sweep.
#[derive(Debug, Clone)]
pub struct DeadReactionResult {
    /// Reactions classified dead and pruned from the model, sorted.
    pub dead: Vec<EntityId>,
    /// The underlying variability ranges of every reaction.
    pub ranges: HashMap<EntityId, FluxRange>,
    /// Reactions whose probe errored, with the reason.
    pub failures: HashMap<EntityId, String>,
}

/// Computes the regulatory constraints once and installs them on the
/// template, returning the handles for teardown.
fn install_regulatory<B: SolverBinding>(
    template: &mut B,
    network: Option<&InteractionNetwork>,
    external: &[FluxConstraint],
) -> Result<Vec<ConstraintHandle>> {
    let constraints = match network {
        Some(net) => RegulatorySolver::new(net).solve(external)?,
        None => Vec::new(),
    };
    Ok(constraints
        .into_iter()
        .map(|c| template.add_constraint(c))
        .collect())
}

fn remove_constraints<B: SolverBinding>(template: &mut B, handles: Vec<ConstraintHandle>) {
    for handle in handles {
        template.remove_constraint(handle);
    }
}

/// One independent clone per worker; a failure aborts before any thread
/// starts.
fn clone_per_worker<B: SolverBinding>(template: &B, workers: usize) -> Result<Vec<B>> {
    (0..workers).map(|_| template.try_clone()).collect()
}

/// Knockout sweep: per target, fix the flux to zero and re-solve the
/// model's objective.
pub struct KnockoutAnalysis<'a> {
    model: &'a MetabolicModel,
    network: Option<&'a InteractionNetwork>,
    config: &'a AnalysisConfig,
}

impl<'a> KnockoutAnalysis<'a> {
    /// Creates a knockout analysis over the model.
    pub fn new(model: &'a MetabolicModel, config: &'a AnalysisConfig) -> Self {
        KnockoutAnalysis {
            model,
            network: None,
            config,
        }
    }

    /// Applies a regulatory network before the sweep.
    pub fn with_network(mut self, network: &'a InteractionNetwork) -> Self {
        self.network = Some(network);
        self
    }

    /// Runs the sweep on the template binding.
    ///
    /// The template outlives the call: regulatory constraints installed
    /// here are removed again after the workers are joined, and all
    /// perturbations happen on per-worker clones.
    pub fn run<B: SolverBinding>(
        &self,
        template: &mut B,
        targets: &TargetSet,
        external: &[FluxConstraint],
    ) -> Result<KnockoutResult> {
        let target_ids = targets.resolve(self.model)?;
        info!(
            event = "knockout_start",
            targets = target_ids.len(),
            workers = self.config.parallelism,
        );

        let handles = install_regulatory(template, self.network, external)?;
        let outcome = self.sweep(template, &target_ids);
        remove_constraints(template, handles);

        let result = outcome?;
        info!(event = "knockout_end", results = result.values.len());
        Ok(result)
    }

    fn sweep<B: SolverBinding>(
        &self,
        template: &mut B,
        target_ids: &[EntityId],
    ) -> Result<KnockoutResult> {
        let objective = self.model.objective().ok_or_else(|| {
            MetafluxError::Config("model declares no objective reaction".to_string())
        })?;
        template.set_objective(objective);
        template.set_objective_sense(ObjectiveSense::Maximize);
        let reference = template.solve();

        let clones = clone_per_worker(template, self.config.parallelism)?;
        let queue = TaskQueue::prefilled(target_ids.iter().cloned());
        let sink = ValueSink::new();
        let progress = self
            .config
            .verbose
            .then(|| ProgressMeter::new(target_ids.len()));

        let model = self.model;
        thread::scope(|scope| {
            for mut clone in clones {
                let queue = queue.clone();
                let sink = &sink;
                let progress = progress.as_ref();
                scope.spawn(move || {
                    let strategy = Perturbation::Knockout { model, sink };
                    run_worker(&mut clone, &queue, &strategy, progress);
                });
            }
        });

        if let Some(meter) = &progress {
            meter.finish();
        }
        Ok(KnockoutResult {
            reference,
            values: sink.into_map(),
        })
    }
}

/// Variability sweep: per target, probe the minimum and maximum flux
/// compatible with the current constraints.
pub struct VariabilityAnalysis<'a> {
    model: &'a MetabolicModel,
    network: Option<&'a InteractionNetwork>,
    config: &'a AnalysisConfig,
}

impl<'a> VariabilityAnalysis<'a> {
    /// Creates a variability analysis over the model.
    pub fn new(model: &'a MetabolicModel, config: &'a AnalysisConfig) -> Self {
        VariabilityAnalysis {
            model,
            network: None,
            config,
        }
    }

    /// Applies a regulatory network before the sweep.
    pub fn with_network(mut self, network: &'a InteractionNetwork) -> Self {
        self.network = Some(network);
        self
    }

    /// Runs the sweep on the template binding. Targets must be
    /// reactions.
    pub fn run<B: SolverBinding>(
        &self,
        template: &mut B,
        targets: &TargetSet,
        external: &[FluxConstraint],
    ) -> Result<VariabilityResult> {
        let target_ids = targets.resolve_reactions(self.model)?;
        info!(
            event = "variability_start",
            targets = target_ids.len(),
            workers = self.config.parallelism,
        );

        let handles = install_regulatory(template, self.network, external)?;
        let outcome = self.sweep(template, &target_ids);
        remove_constraints(template, handles);

        let result = outcome?;
        info!(event = "variability_end", results = result.ranges.len());
        Ok(result)
    }

    fn sweep<B: SolverBinding>(
        &self,
        template: &mut B,
        target_ids: &[EntityId],
    ) -> Result<VariabilityResult> {
        let clones = clone_per_worker(template, self.config.parallelism)?;

        // Two logically separate queues over the same entity set; either
        // half of an entity's range may come from any worker.
        let min_queue = TaskQueue::prefilled(target_ids.iter().cloned());
        let max_queue = TaskQueue::prefilled(target_ids.iter().cloned());
        let sink = RangeSink::new();
        let progress = self
            .config
            .verbose
            .then(|| ProgressMeter::new(target_ids.len() * 2));

        thread::scope(|scope| {
            for mut clone in clones {
                let min_queue = min_queue.clone();
                let max_queue = max_queue.clone();
                let sink = &sink;
                let progress = progress.as_ref();
                scope.spawn(move || {
                    let minimize = Perturbation::Probe {
                        sense: ObjectiveSense::Minimize,
                        sink,
                    };
                    run_worker(&mut clone, &min_queue, &minimize, progress);
                    let maximize = Perturbation::Probe {
                        sense: ObjectiveSense::Maximize,
                        sink,
                    };
                    run_worker(&mut clone, &max_queue, &maximize, progress);
                });
            }
        });

        if let Some(meter) = &progress {
            meter.finish();
        }
        let (ranges, failures) = sink.into_maps();
        Ok(VariabilityResult { ranges, failures })
    }
}

/// Dead-reaction sweep: variability over every reaction, then pruning.
pub struct DeadReactionAnalysis<'a> {
    network: Option<&'a InteractionNetwork>,
    config: &'a AnalysisConfig,
}

impl<'a> DeadReactionAnalysis<'a> {
    /// Creates a dead-reaction analysis.
    pub fn new(config: &'a AnalysisConfig) -> Self {
        DeadReactionAnalysis {
            network: None,
            config,
        }
    }

    /// Applies a regulatory network before the sweep.
    pub fn with_network(mut self, network: &'a InteractionNetwork) -> Self {
        self.network = Some(network);
        self
    }

    /// Runs the sweep and prunes dead reactions from the model.
    ///
    /// A reaction is dead when both variability extremes fall below the
    /// configured epsilon in magnitude. Pruning the model is the
    /// terminal side effect of this analysis only; no other analysis
    /// mutates the model.
    pub fn run<B: SolverBinding>(
        &self,
        model: &mut MetabolicModel,
        template: &mut B,
        external: &[FluxConstraint],
    ) -> Result<DeadReactionResult> {
        let mut variability = VariabilityAnalysis::new(model, self.config);
        if let Some(net) = self.network {
            variability = variability.with_network(net);
        }
        let VariabilityResult { ranges, failures } =
            variability.run(template, &TargetSet::AllReactions, external)?;

        let epsilon = self.config.dead_reactions.epsilon;
        let mut dead: Vec<EntityId> = ranges
            .iter()
            .filter(|(_, range)| range.min.abs() < epsilon && range.max.abs() < epsilon)
            .map(|(entity, _)| entity.clone())
            .collect();
        dead.sort();

        for entity in &dead {
            model.remove_reaction(entity);
        }
        info!(event = "dead_reactions_pruned", count = dead.len());

        Ok(DeadReactionResult {
            dead,
            ranges,
            failures,
        })
    }
}
