//! Entity identifiers.
//!
//! Every biological object handled by the engine (reaction, gene,
//! metabolite) is addressed through the same opaque identifier, so a
//! single key type works across constraints, regulatory states, and
//! result maps.

use std::fmt;
use std::sync::Arc;

/// Opaque identifier for a biological entity.
///
/// Cheap to clone and usable as a map key everywhere the engine needs
/// one.
///
/// # Example
///
/// ```
/// use metaflux_core::EntityId;
///
/// let id = EntityId::from("R_PFK");
/// assert_eq!(id.as_str(), "R_PFK");
/// assert_eq!(id.to_string(), "R_PFK");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(Arc<str>);

impl EntityId {
    /// Creates an identifier from anything string-like.
    pub fn new(id: impl AsRef<str>) -> Self {
        EntityId(Arc::from(id.as_ref()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::new(s)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        EntityId::new(s)
    }
}

/// Kind of a biological entity, for diagnostics and target resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A biochemical reaction carrying flux.
    Reaction,
    /// A gene controlling reaction availability through a GPR rule.
    Gene,
    /// A metabolite participating in reactions.
    Metabolite,
}
