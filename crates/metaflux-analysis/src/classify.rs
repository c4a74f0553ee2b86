//! Essentiality classification of knockout results.

use metaflux_core::EntityId;

use crate::orchestrator::KnockoutResult;
use crate::sink::TaskValue;

/// Partition of knockout targets by their effect on the objective.
///
/// Every processed entity appears in exactly one class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EssentialityReport {
    /// Knockout infeasible (NaN) or objective exactly zero.
    pub essential: Vec<EntityId>,
    /// Objective strictly below the reference optimum, beyond the
    /// rounding tolerance.
    pub optima_essential: Vec<EntityId>,
    /// Objective not measurably below the reference. Values above the
    /// reference (solver noise on a tightened model) land here too; the
    /// classes only distinguish degrees of harm.
    pub neutral: Vec<EntityId>,
    /// Tasks that errored; reported separately, never merged into the
    /// biological classes.
    pub failed: Vec<EntityId>,
}

/// Classifies a knockout result against its reference optimum.
pub fn classify(result: &KnockoutResult, tolerance: f64) -> EssentialityReport {
    let mut report = EssentialityReport::default();
    for (entity, value) in &result.values {
        match value {
            TaskValue::Failed(_) => report.failed.push(entity.clone()),
            TaskValue::Value(v) => {
                if v.is_nan() || *v == 0.0 {
                    report.essential.push(entity.clone());
                } else if *v < result.reference - tolerance {
                    report.optima_essential.push(entity.clone());
                } else {
                    report.neutral.push(entity.clone());
                }
            }
        }
    }
    report.essential.sort();
    report.optima_essential.sort();
    report.neutral.sort();
    report.failed.sort();
    report
}
