//! SIFT Session
//!
//! The engine facade: one session owns a backend connection and a
//! configuration, and exposes search, batch mutation, record fetch,
//! audit read-back, and strict schema validation.
//!
//! Components are constructed per call — schema is never cached across
//! operations.

mod error;
mod session;

pub use error::{SessionError, SessionResult};
pub use session::Session;
