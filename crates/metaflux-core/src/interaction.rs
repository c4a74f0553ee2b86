//! Discrete regulatory interaction network.
//!
//! Entities hold integer "levels"; rules map a condition over the current
//! state snapshot to one or more single-entity level assignments. Each
//! regulatory target owns an ordered list of conditional interactions and
//! exactly one default interaction that fires when none of the
//! conditionals match.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use crate::entity::EntityId;

/// A point-in-time snapshot of every entity's discrete level.
///
/// Two states are equal exactly when they assign the same level to the
/// same set of entities. Iteration order is sorted by entity id so
/// snapshots hash and display deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RegulatoryState {
    levels: BTreeMap<EntityId, i64>,
}

impl RegulatoryState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a state from (entity, level) pairs.
    pub fn from_levels(levels: impl IntoIterator<Item = (EntityId, i64)>) -> Self {
        RegulatoryState {
            levels: levels.into_iter().collect(),
        }
    }

    /// The level of an entity, if present in the snapshot.
    pub fn level(&self, entity: &EntityId) -> Option<i64> {
        self.levels.get(entity).copied()
    }

    /// Sets an entity's level.
    pub fn set_level(&mut self, entity: EntityId, level: i64) {
        self.levels.insert(entity, level);
    }

    /// Iterates over (entity, level) pairs in sorted id order.
    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, i64)> {
        self.levels.iter().map(|(e, l)| (e, *l))
    }

    /// Number of entities in the snapshot.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Returns true if the snapshot holds no entities.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Predicate over a state snapshot.
///
/// Comparisons against an entity absent from the snapshot are false.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Always true; the usual condition of default interactions.
    Always,
    /// Entity holds exactly this level.
    Is(EntityId, i64),
    /// Entity holds at least this level.
    AtLeast(EntityId, i64),
    /// Entity holds at most this level.
    AtMost(EntityId, i64),
    /// Negation.
    Not(Box<Condition>),
    /// All sub-conditions hold.
    All(Vec<Condition>),
    /// At least one sub-condition holds.
    Any(Vec<Condition>),
}

impl Condition {
    /// Evaluates the predicate against a snapshot.
    pub fn holds(&self, state: &RegulatoryState) -> bool {
        match self {
            Condition::Always => true,
            Condition::Is(entity, level) => state.level(entity) == Some(*level),
            Condition::AtLeast(entity, level) => {
                state.level(entity).map(|l| l >= *level).unwrap_or(false)
            }
            Condition::AtMost(entity, level) => {
                state.level(entity).map(|l| l <= *level).unwrap_or(false)
            }
            Condition::Not(inner) => !inner.holds(state),
            Condition::All(conds) => conds.iter().all(|c| c.holds(state)),
            Condition::Any(conds) => conds.iter().any(|c| c.holds(state)),
        }
    }
}

/// A regulatory rule: when the condition holds, the consequences assign
/// levels to entities in the next state.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    /// Condition evaluated against the current snapshot.
    pub condition: Condition,
    /// Level assignments applied to the next state when firing.
    pub consequences: Vec<(EntityId, i64)>,
}

impl Interaction {
    /// Creates an interaction.
    pub fn new(condition: Condition, consequences: Vec<(EntityId, i64)>) -> Self {
        Interaction {
            condition,
            consequences,
        }
    }

    /// Creates an unconditional interaction assigning one level.
    pub fn fallback(entity: EntityId, level: i64) -> Self {
        Interaction {
            condition: Condition::Always,
            consequences: vec![(entity, level)],
        }
    }
}

/// The rules owned by one regulatory target: ordered conditionals plus
/// exactly one default.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    /// Conditional interactions, evaluated in order; the first match fires.
    pub conditional: Vec<Interaction>,
    /// Fallback fired when no conditional matches.
    pub default: Interaction,
}

impl RuleSet {
    /// Creates a rule set.
    pub fn new(conditional: Vec<Interaction>, default: Interaction) -> Self {
        RuleSet {
            conditional,
            default,
        }
    }

    /// The interaction that fires against the given snapshot.
    pub fn firing(&self, state: &RegulatoryState) -> &Interaction {
        self.conditional
            .iter()
            .find(|i| i.condition.holds(state))
            .unwrap_or(&self.default)
    }
}

/// The complete discrete regulatory model: per-target rule sets, declared
/// initial levels, optional discrete domains, and the optional
/// level-to-flux-bound translation.
#[derive(Debug, Clone, Default)]
pub struct InteractionNetwork {
    rules: IndexMap<EntityId, RuleSet>,
    initial_levels: IndexMap<EntityId, i64>,
    domains: HashMap<EntityId, Vec<i64>>,
    translations: HashMap<EntityId, BTreeMap<i64, (f64, f64)>>,
}

impl InteractionNetwork {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the rule set of a regulatory target.
    pub fn add_rules(&mut self, target: EntityId, rules: RuleSet) {
        self.rules.insert(target, rules);
    }

    /// Declares an entity's initial level.
    pub fn set_initial_level(&mut self, entity: EntityId, level: i64) {
        self.initial_levels.insert(entity, level);
    }

    /// Declares the admissible levels of an entity.
    pub fn set_domain(&mut self, entity: EntityId, levels: Vec<i64>) {
        self.domains.insert(entity, levels);
    }

    /// Maps one of an entity's levels to a flux (lb, ub) pair.
    pub fn set_translation(&mut self, entity: EntityId, level: i64, bounds: (f64, f64)) {
        self.translations
            .entry(entity)
            .or_default()
            .insert(level, bounds);
    }

    /// Regulatory targets in registration order.
    pub fn targets(&self) -> impl Iterator<Item = &EntityId> {
        self.rules.keys()
    }

    /// The rule set of a target.
    pub fn rules(&self, target: &EntityId) -> Option<&RuleSet> {
        self.rules.get(target)
    }

    /// Declared initial levels in registration order.
    pub fn initial_levels(&self) -> impl Iterator<Item = (&EntityId, i64)> {
        self.initial_levels.iter().map(|(e, l)| (e, *l))
    }

    /// Whether a declared domain admits the level. Entities without a
    /// declared domain admit any level.
    pub fn domain_admits(&self, entity: &EntityId, level: i64) -> bool {
        self.domains
            .get(entity)
            .map(|d| d.contains(&level))
            .unwrap_or(true)
    }

    /// Whether the entity has any declared translation.
    pub fn has_translation(&self, entity: &EntityId) -> bool {
        self.translations.contains_key(entity)
    }

    /// Translates a level to its declared flux bounds, if any.
    pub fn translate(&self, entity: &EntityId, level: i64) -> Option<(f64, f64)> {
        self.translations
            .get(entity)
            .and_then(|t| t.get(&level))
            .copied()
    }

    /// Finds the smallest level whose translated bounds pin exactly this
    /// flux value, used to map an external fixed constraint back to a
    /// level. Levels are scanned in ascending order, so several levels
    /// sharing one fixed translation always resolve to the same choice.
    pub fn level_for_fixed_flux(&self, entity: &EntityId, value: f64) -> Option<i64> {
        self.translations.get(entity).and_then(|t| {
            t.iter()
                .find(|(_, (lb, ub))| *lb == value && *ub == value)
                .map(|(level, _)| *level)
        })
    }
}
