//! SIFT Schema
//!
//! Read-only schema lookup against a live backend.
//!
//! Responsibilities:
//! - Enumerate user tables (minus the audit table)
//! - Answer column and identifier-column questions per table
//! - Expand wildcard targets to identifier-carrying tables
//! - Run the strict identifier/primary-key validation pass
//!
//! The catalog holds no cache: schema may change between operations, so
//! every question goes back to the backend.

mod catalog;
mod error;

pub use catalog::Catalog;
pub use error::{SchemaError, SchemaResult};
