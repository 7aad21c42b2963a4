//! Search result types.

use std::collections::BTreeSet;

use sift_core::RecordId;

use crate::spec::SearchSpec;

/// The set of record identifiers satisfying a filter, group, or search.
pub type MatchSet = BTreeSet<RecordId>;

/// Outcome of a whole search: the final match set plus the specification
/// that produced it, kept for downstream provenance.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Identifiers matching the whole specification.
    pub matches: MatchSet,
    /// The specification that was evaluated.
    pub spec: SearchSpec,
}

impl SearchOutcome {
    /// Number of matching records.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Matching identifiers as text, in set order.
    pub fn ids(&self) -> Vec<String> {
        self.matches.iter().map(|id| id.to_string()).collect()
    }
}
