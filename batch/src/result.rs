//! Batch result types.

use std::collections::BTreeMap;
use std::fmt;

use sift_core::{BatchId, RecordId};

/// Identifiers minted for one create group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreatedIds {
    /// Single record created.
    One(RecordId),
    /// Several records created under one group.
    Many(Vec<RecordId>),
}

impl CreatedIds {
    pub fn from_vec(mut ids: Vec<RecordId>) -> Self {
        if ids.len() == 1 {
            Self::One(ids.remove(0))
        } else {
            Self::Many(ids)
        }
    }

    /// All identifiers, regardless of arity.
    pub fn ids(&self) -> Vec<&RecordId> {
        match self {
            Self::One(id) => vec![id],
            Self::Many(ids) => ids.iter().collect(),
        }
    }
}

/// Non-fatal condition collected during a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchWarning {
    /// A delete target did not exist; the rest of the batch continued.
    DeleteTargetNotFound { table: String, id: RecordId },
}

impl fmt::Display for BatchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteTargetNotFound { table, id } => {
                write!(f, "delete target not found in {}: {}", table, id)
            }
        }
    }
}

/// Summary of a fully committed batch.
///
/// A failed batch never produces an outcome: every write and audit entry
/// is rolled back and the error is re-raised instead.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Identifier attached to every audit entry of this batch.
    pub batch_id: BatchId,
    /// Minted identifiers per create group key.
    pub created: BTreeMap<String, CreatedIds>,
    /// Identifiers of updated records.
    pub updated: Vec<RecordId>,
    /// Identifiers of deleted records.
    pub deleted: Vec<RecordId>,
    /// Non-fatal warnings collected while applying.
    pub warnings: Vec<BatchWarning>,
}

impl BatchOutcome {
    /// Empty outcome for a freshly opened batch.
    pub fn new(batch_id: BatchId) -> Self {
        Self {
            batch_id,
            created: BTreeMap::new(),
            updated: Vec::new(),
            deleted: Vec::new(),
            warnings: Vec::new(),
        }
    }
}
