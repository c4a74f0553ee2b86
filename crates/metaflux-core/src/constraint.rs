//! Flux constraint types.
//!
//! A constraint bounds the value one entity may take in the optimization
//! model. A *fixed* constraint (lower == upper) pins the entity to a
//! single value; the regulatory layer uses fixed constraints both as
//! external overrides and as its emitted summary of long-run behavior.

use crate::entity::EntityId;

/// A linear bound on a single entity's flux.
///
/// # Example
///
/// ```
/// use metaflux_core::FluxConstraint;
///
/// let fixed = FluxConstraint::fixed("R1".into(), 0.0);
/// assert!(fixed.is_fixed());
///
/// let range = FluxConstraint::bounded("R2".into(), -10.0, 10.0);
/// assert!(!range.is_fixed());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FluxConstraint {
    /// Entity the bound applies to.
    pub entity: EntityId,
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
}

impl FluxConstraint {
    /// Creates a constraint with distinct lower and upper bounds.
    pub fn bounded(entity: EntityId, lower: f64, upper: f64) -> Self {
        FluxConstraint {
            entity,
            lower,
            upper,
        }
    }

    /// Creates a constraint pinning the entity to a single value.
    pub fn fixed(entity: EntityId, value: f64) -> Self {
        FluxConstraint {
            entity,
            lower: value,
            upper: value,
        }
    }

    /// Returns true if the bound admits exactly one value.
    pub fn is_fixed(&self) -> bool {
        self.lower == self.upper
    }

    /// The pinned value of a fixed constraint, if this is one.
    pub fn fixed_value(&self) -> Option<f64> {
        if self.is_fixed() {
            Some(self.lower)
        } else {
            None
        }
    }
}
