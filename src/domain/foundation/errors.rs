//! Domain error vocabulary.

use thiserror::Error;

/// Errors raised by domain value objects and invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Session ids must be non-empty.
    #[error("session id must not be empty")]
    EmptySessionId,
}
