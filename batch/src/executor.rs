//! Batch execution - coordinates one atomic batch.

use std::collections::BTreeMap;

use sift_core::{BatchId, Config, RecordId, Value};
use sift_journal::AuditLog;
use sift_schema::Catalog;
use sift_store::{Backend, Transaction};

use crate::error::BatchResult;
use crate::ops::{self, OpContext};
use crate::result::{BatchOutcome, CreatedIds};
use crate::spec::{BatchGroup, BatchSpec, FieldMap, OpKind};

/// Batch executor.
///
/// One call to `apply` is one batch: one minted batch id, one
/// transaction, and either a fully committed outcome or a fully rolled
/// back error.
pub struct BatchExecutor<'b> {
    backend: &'b dyn Backend,
    config: &'b Config,
}

impl<'b> BatchExecutor<'b> {
    /// Create a new executor.
    pub fn new(backend: &'b dyn Backend, config: &'b Config) -> Self {
        Self { backend, config }
    }

    /// Apply a whole batch atomically.
    pub fn apply(&self, spec: &BatchSpec) -> BatchResult<BatchOutcome> {
        let batch_id = BatchId::mint();
        tracing::debug!(batch = %batch_id, groups = spec.groups.len(), "batch opened");

        let txn = Transaction::begin(self.backend)?;
        let mut outcome = BatchOutcome::new(batch_id.clone());
        match self.apply_groups(spec, &batch_id, &mut outcome) {
            Ok(()) => {
                txn.commit()?;
                tracing::debug!(batch = %batch_id, "batch committed");
                Ok(outcome)
            }
            Err(err) => {
                // The guard rolls every write and audit entry back.
                drop(txn);
                tracing::warn!(batch = %batch_id, error = %err, "batch rolled back");
                Err(err)
            }
        }
    }

    fn apply_groups(
        &self,
        spec: &BatchSpec,
        batch_id: &BatchId,
        outcome: &mut BatchOutcome,
    ) -> BatchResult<()> {
        let catalog = Catalog::new(self.backend, self.config);
        let journal = AuditLog::new(self.backend, self.config);
        let ctx = OpContext {
            backend: self.backend,
            catalog: &catalog,
            journal: &journal,
            batch_id,
        };
        let identifier = self.config.identifier_column.as_str();

        for group in &spec.groups {
            match group {
                BatchGroup::Explicit {
                    name,
                    kind,
                    table,
                    records,
                } => match kind {
                    OpKind::Create => {
                        let ids = ops::execute_create(&ctx, table, records)?;
                        outcome.created.insert(name.clone(), CreatedIds::from_vec(ids));
                    }
                    OpKind::Update => {
                        let ids = ops::execute_update(&ctx, table, records)?;
                        outcome.updated.extend(ids);
                    }
                    OpKind::Delete => {
                        let ids =
                            ops::execute_delete(&ctx, table, records, &mut outcome.warnings)?;
                        outcome.deleted.extend(ids);
                    }
                },

                BatchGroup::Update { id, ops: change_ops } => {
                    // Collapse the ops into one row per target table.
                    let mut per_table: BTreeMap<&str, FieldMap> = BTreeMap::new();
                    for op in change_ops {
                        per_table
                            .entry(op.table.as_str())
                            .or_default()
                            .extend(op.fields.clone());
                    }
                    for (table, mut fields) in per_table {
                        fields.insert(
                            identifier.to_string(),
                            Value::Text(id.as_str().to_string()),
                        );
                        ops::execute_update(&ctx, table, &[fields])?;
                    }
                    outcome.updated.push(id.clone());
                }

                BatchGroup::Create { name, ops: change_ops } => {
                    // One fresh identifier spans every op in the group.
                    let id = RecordId::mint();
                    let mut per_table: BTreeMap<&str, Vec<FieldMap>> = BTreeMap::new();
                    for op in change_ops {
                        let mut fields = op.fields.clone();
                        fields.insert(
                            identifier.to_string(),
                            Value::Text(id.as_str().to_string()),
                        );
                        per_table.entry(op.table.as_str()).or_default().push(fields);
                    }
                    for (table, records) in per_table {
                        ops::execute_create(&ctx, table, &records)?;
                    }
                    outcome.created.insert(name.clone(), CreatedIds::One(id));
                }
            }
        }
        Ok(())
    }
}
