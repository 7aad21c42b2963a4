//! Transaction guard.
//!
//! One guard wraps one batch: commit consumes the guard, dropping an
//! uncommitted guard rolls the transaction back.

use crate::backend::Backend;
use crate::error::StoreResult;

/// Guard over an open backend transaction.
pub struct Transaction<'b> {
    backend: &'b dyn Backend,
    finished: bool,
}

impl<'b> Transaction<'b> {
    /// Open a transaction on the backend.
    pub fn begin(backend: &'b dyn Backend) -> StoreResult<Self> {
        backend.begin()?;
        tracing::debug!("transaction opened");
        Ok(Self {
            backend,
            finished: false,
        })
    }

    /// Commit the transaction.
    pub fn commit(mut self) -> StoreResult<()> {
        self.backend.commit()?;
        self.finished = true;
        tracing::debug!("transaction committed");
        Ok(())
    }

    /// Roll the transaction back explicitly.
    pub fn rollback(mut self) -> StoreResult<()> {
        self.backend.rollback()?;
        self.finished = true;
        tracing::debug!("transaction rolled back");
        Ok(())
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.finished {
            if let Err(err) = self.backend.rollback() {
                tracing::warn!(error = %err, "implicit rollback failed");
            } else {
                tracing::debug!("transaction rolled back on drop");
            }
        }
    }
}
