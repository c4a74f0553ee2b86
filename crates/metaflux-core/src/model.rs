//! Read-only views of the metabolic model.
//!
//! The engine never builds or edits the biological data model; it only
//! reads reactions, genes, and gene-protein-reaction (GPR) links, and
//! prunes reactions as the terminal side effect of dead-reaction
//! analysis. Maps are insertion-ordered so every sweep over the model
//! visits entities in a stable, reproducible order.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::entity::EntityId;

/// Gene-protein-reaction rule deciding whether a reaction stays active
/// under a set of gene knockouts.
///
/// AND nodes require every branch active; OR nodes require at least one.
#[derive(Debug, Clone, PartialEq)]
pub enum Gpr {
    /// A single gene reference.
    Gene(EntityId),
    /// All branches must be active.
    And(Vec<Gpr>),
    /// At least one branch must be active.
    Or(Vec<Gpr>),
}

impl Gpr {
    /// Evaluates the rule against a set of knocked-out genes.
    pub fn is_active(&self, knocked_out: &HashSet<EntityId>) -> bool {
        match self {
            Gpr::Gene(id) => !knocked_out.contains(id),
            Gpr::And(branches) => branches.iter().all(|b| b.is_active(knocked_out)),
            Gpr::Or(branches) => branches.iter().any(|b| b.is_active(knocked_out)),
        }
    }

    /// Collects every gene referenced by the rule.
    pub fn genes(&self) -> Vec<EntityId> {
        let mut out = Vec::new();
        self.collect_genes(&mut out);
        out
    }

    fn collect_genes(&self, out: &mut Vec<EntityId>) {
        match self {
            Gpr::Gene(id) => out.push(id.clone()),
            Gpr::And(branches) | Gpr::Or(branches) => {
                for b in branches {
                    b.collect_genes(out);
                }
            }
        }
    }
}

/// A biochemical reaction with its declared flux bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    /// Identifier of the reaction.
    pub id: EntityId,
    /// Human-readable reaction name.
    pub name: String,
    /// Lower flux bound.
    pub lower_bound: f64,
    /// Upper flux bound.
    pub upper_bound: f64,
    /// Gene-protein-reaction rule, if the reaction is gene-associated.
    pub gpr: Option<Gpr>,
}

impl Reaction {
    /// Creates a reaction without a GPR rule.
    pub fn new(id: impl Into<EntityId>, lower_bound: f64, upper_bound: f64) -> Self {
        let id = id.into();
        Reaction {
            name: id.as_str().to_string(),
            id,
            lower_bound,
            upper_bound,
            gpr: None,
        }
    }

    /// Attaches a GPR rule.
    pub fn with_gpr(mut self, gpr: Gpr) -> Self {
        self.gpr = Some(gpr);
        self
    }
}

/// A gene of the model.
#[derive(Debug, Clone, PartialEq)]
pub struct Gene {
    /// Identifier of the gene.
    pub id: EntityId,
    /// Human-readable gene name.
    pub name: String,
}

impl Gene {
    /// Creates a gene whose name defaults to its id.
    pub fn new(id: impl Into<EntityId>) -> Self {
        let id = id.into();
        Gene {
            name: id.as_str().to_string(),
            id,
        }
    }
}

/// A genome-scale metabolic model, as seen by the analysis engine.
///
/// Reactions and genes live in insertion-ordered maps keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MetabolicModel {
    reactions: IndexMap<EntityId, Reaction>,
    genes: IndexMap<EntityId, Gene>,
    objective: Option<EntityId>,
}

impl MetabolicModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a reaction to the model.
    pub fn add_reaction(&mut self, reaction: Reaction) {
        self.reactions.insert(reaction.id.clone(), reaction);
    }

    /// Adds a gene to the model.
    pub fn add_gene(&mut self, gene: Gene) {
        self.genes.insert(gene.id.clone(), gene);
    }

    /// Declares the objective reaction.
    pub fn set_objective(&mut self, reaction: EntityId) {
        self.objective = Some(reaction);
    }

    /// The objective reaction, if declared.
    pub fn objective(&self) -> Option<&EntityId> {
        self.objective.as_ref()
    }

    /// Looks up a reaction by id.
    pub fn reaction(&self, id: &EntityId) -> Option<&Reaction> {
        self.reactions.get(id)
    }

    /// Looks up a gene by id.
    pub fn gene(&self, id: &EntityId) -> Option<&Gene> {
        self.genes.get(id)
    }

    /// All reaction ids, in insertion order.
    pub fn reaction_ids(&self) -> Vec<EntityId> {
        self.reactions.keys().cloned().collect()
    }

    /// All gene ids, in insertion order.
    pub fn gene_ids(&self) -> Vec<EntityId> {
        self.genes.keys().cloned().collect()
    }

    /// Number of reactions in the model.
    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }

    /// Reactions whose GPR rule goes inactive when `gene` is knocked out.
    ///
    /// Reactions without a GPR rule are never affected.
    pub fn reactions_disabled_by(&self, gene: &EntityId) -> Vec<EntityId> {
        let knocked_out: HashSet<EntityId> = std::iter::once(gene.clone()).collect();
        self.reactions
            .values()
            .filter(|r| {
                r.gpr
                    .as_ref()
                    .map(|g| !g.is_active(&knocked_out))
                    .unwrap_or(false)
            })
            .map(|r| r.id.clone())
            .collect()
    }

    /// Removes a reaction from the model, returning it if present.
    ///
    /// Only dead-reaction pruning calls this; the rest of the engine
    /// treats the model as read-only. Uses a shift-remove so the
    /// iteration order of the surviving reactions is preserved.
    pub fn remove_reaction(&mut self, id: &EntityId) -> Option<Reaction> {
        self.reactions.shift_remove(id)
    }
}
