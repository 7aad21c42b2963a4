//! SIFT Batch
//!
//! Apply heterogeneous create/update/delete operations as one atomic
//! unit with per-field audit logging.
//!
//! Responsibilities:
//! - Parse and validate batch specifications from JSON input
//! - Dispatch groups to the create/update/delete primitives
//! - Keep the whole batch inside one transaction: any fatal error rolls
//!   everything back, including audit entries
//! - Collect non-fatal warnings into the outcome
//!
//! # Module Structure
//!
//! - `spec` - Typed specification and the validating parser
//! - `executor` - BatchExecutor coordinating a whole batch
//! - `ops/` - Individual operation implementations (create, update, delete)
//! - `validation` - Shared field validation helpers
//! - `result` - Outcome and warning types
//! - `error` - Error types for batch failures

mod error;
mod executor;
mod ops;
mod result;
mod spec;
mod validation;

pub use error::{BatchError, BatchResult};
pub use executor::BatchExecutor;
pub use result::{BatchOutcome, BatchWarning, CreatedIds};
pub use spec::{BatchGroup, BatchSpec, ChangeOp, FieldMap, OpKind};
