//! SIFT Search
//!
//! Translate a declarative filter/group specification into the set of
//! matching record identifiers.
//!
//! Responsibilities:
//! - Parse and validate search specifications from JSON input
//! - Evaluate single filters against the backend (one statement per
//!   table, columns OR-ed together)
//! - Fold filters within a group and combine groups by boolean set
//!   algebra
//!
//! # Module Structure
//!
//! - `spec` - Typed specification and the validating parser
//! - `eval` - Single-filter evaluation against the backend
//! - `combine` - Pure set algebra for chains and group combinations
//! - `executor` - SearchExecutor coordinating a whole search
//! - `result` - MatchSet and the search outcome
//! - `error` - Error types for search failures

mod combine;
mod error;
mod eval;
mod executor;
mod result;
mod spec;

pub use error::{SearchError, SearchResult};
pub use executor::SearchExecutor;
pub use result::{MatchSet, SearchOutcome};
pub use spec::{ChainLogic, Filter, GroupCombination, Operator, SearchSpec, Target};
