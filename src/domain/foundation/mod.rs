//! Foundation module - shared domain primitives.
//!
//! Identifiers, timestamps, and the error vocabulary used across the crate.

mod errors;
mod ids;
mod timestamp;

pub use errors::DomainError;
pub use ids::{SessionId, UserId};
pub use timestamp::Timestamp;
