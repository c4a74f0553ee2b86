//! Attractor of the regulatory simulation.

use std::collections::BTreeSet;

use metaflux_core::{EntityId, RegulatoryState};

/// The eventually-repeating cycle of states the simulation settles into.
///
/// Holds the contiguous suffix of the state history that starts at the
/// first exact repeat of an earlier state. Created once per regulatory
/// solve, consumed immediately to produce constraints, then discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Attractor {
    snapshots: Vec<RegulatoryState>,
}

impl Attractor {
    /// Wraps the repeating suffix of the history.
    pub fn new(snapshots: Vec<RegulatoryState>) -> Self {
        Attractor { snapshots }
    }

    /// Cycle length in states. 1 means an immediate fixed point.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns true if the attractor holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The snapshots of the cycle, in simulation order.
    pub fn snapshots(&self) -> &[RegulatoryState] {
        &self.snapshots
    }

    /// Every entity appearing in any snapshot, in sorted id order.
    pub fn entities(&self) -> Vec<EntityId> {
        let mut set = BTreeSet::new();
        for snapshot in &self.snapshots {
            for (entity, _) in snapshot.iter() {
                set.insert(entity.clone());
            }
        }
        set.into_iter().collect()
    }

    /// The entity's level in each snapshot where it is present.
    pub fn levels_of(&self, entity: &EntityId) -> Vec<i64> {
        self.snapshots
            .iter()
            .filter_map(|s| s.level(entity))
            .collect()
    }
}
