//! Stable node identity

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Identity of a tree node or source file
///
/// Assigned once at construction and carried through every `with_*` copy, so
/// a rewritten node is still "the same node" to the host framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TreeId(pub Ulid);

impl TreeId {
    /// Generate a fresh id
    #[inline]
    #[must_use]
    pub fn random() -> Self {
        Self(Ulid::new())
    }
}

impl Default for TreeId {
    fn default() -> Self {
        Self::random()
    }
}

impl std::fmt::Display for TreeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
