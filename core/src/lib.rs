//! SIFT Core Types
//!
//! This crate provides the foundational types used throughout the SIFT system:
//! - Identity types (RecordId, BatchId)
//! - Value types (the Value enum covering every storable scalar)
//! - Engine configuration (Config)

mod config;
mod id;
mod value;

pub use config::*;
pub use id::*;
pub use value::*;
