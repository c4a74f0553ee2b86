//! Thread-safe result aggregation.
//!
//! Workers normally write distinct keys, but the maps still mutate
//! structurally under insertion, so every update goes through one
//! internal lock.

use std::collections::HashMap;
use std::sync::Mutex;

use metaflux_core::EntityId;

/// Outcome of one perturbation task.
///
/// NaN inside `Value` denotes an infeasible solve, which is an expected
/// per-task outcome. `Failed` is the distinguished marker for a task
/// whose processing errored; it never aborts the batch.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskValue {
    /// Objective value of the perturbed solve (NaN = infeasible).
    Value(f64),
    /// The task errored; the reason is kept for reporting.
    Failed(String),
}

impl TaskValue {
    /// The numeric value, if the task produced one.
    pub fn value(&self) -> Option<f64> {
        match self {
            TaskValue::Value(v) => Some(*v),
            TaskValue::Failed(_) => None,
        }
    }

    /// Returns true if the task errored.
    pub fn is_failed(&self) -> bool {
        matches!(self, TaskValue::Failed(_))
    }

    /// Returns true if the solve was infeasible.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, TaskValue::Value(v) if v.is_nan())
    }
}

/// Synchronized entity → value aggregation for knockout results.
#[derive(Debug, Default)]
pub struct ValueSink {
    entries: Mutex<HashMap<EntityId, TaskValue>>,
}

impl ValueSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one entity's outcome. Written exactly once per entity
    /// under normal operation.
    pub fn record(&self, entity: EntityId, value: TaskValue) {
        let mut entries = self.entries.lock().expect("result sink lock");
        entries.insert(entity, value);
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("result sink lock").len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the sink into its map.
    pub fn into_map(self) -> HashMap<EntityId, TaskValue> {
        self.entries.into_inner().expect("result sink lock")
    }
}

/// Variability bounds of one entity. Halves start as NaN and are filled
/// independently as the min and max probes complete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluxRange {
    /// Minimum achievable value (NaN = infeasible or not yet probed).
    pub min: f64,
    /// Maximum achievable value (NaN = infeasible or not yet probed).
    pub max: f64,
}

impl Default for FluxRange {
    fn default() -> Self {
        FluxRange {
            min: f64::NAN,
            max: f64::NAN,
        }
    }
}

#[derive(Debug, Default)]
struct RangeEntries {
    ranges: HashMap<EntityId, FluxRange>,
    failures: HashMap<EntityId, String>,
}

/// Synchronized aggregation of variability bounds.
///
/// A given entity's two halves may be produced by different workers at
/// different times; they merge into one record keyed by entity identity.
#[derive(Debug, Default)]
pub struct RangeSink {
    entries: Mutex<RangeEntries>,
}

impl RangeSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the minimization half of an entity's range.
    pub fn record_min(&self, entity: EntityId, value: f64) {
        let mut entries = self.entries.lock().expect("range sink lock");
        entries.ranges.entry(entity).or_default().min = value;
    }

    /// Records the maximization half of an entity's range.
    pub fn record_max(&self, entity: EntityId, value: f64) {
        let mut entries = self.entries.lock().expect("range sink lock");
        entries.ranges.entry(entity).or_default().max = value;
    }

    /// Records a task failure; the affected half stays NaN.
    pub fn record_failure(&self, entity: EntityId, reason: String) {
        let mut entries = self.entries.lock().expect("range sink lock");
        entries.ranges.entry(entity.clone()).or_default();
        entries.failures.insert(entity, reason);
    }

    /// Consumes the sink into its (ranges, failures) maps.
    pub fn into_maps(self) -> (HashMap<EntityId, FluxRange>, HashMap<EntityId, String>) {
        let entries = self.entries.into_inner().expect("range sink lock");
        (entries.ranges, entries.failures)
    }
}
