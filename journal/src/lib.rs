//! SIFT Journal
//!
//! Append-only field-level audit trail.
//!
//! Responsibilities:
//! - Record one entry per field touched by create/update/delete
//! - Tag every entry with the batch that produced it
//! - Read entries back for verification and tooling
//!
//! Entries are immutable once written: the journal never updates or
//! deletes them, and performs no dedup or compaction.

mod entry;
mod error;
mod journal;

pub use entry::AuditEntry;
pub use error::{JournalError, JournalResult};
pub use journal::AuditLog;
