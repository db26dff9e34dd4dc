//! Strongly-typed identifier value objects.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::DomainError;

/// Identifier for a conversational session.
///
/// Sessions are keyed by an opaque string supplied by the front-end
/// (device id, websocket id, etc.), not minted by this service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a SessionId from a caller-supplied string.
    ///
    /// Rejects empty or whitespace-only ids.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::EmptySessionId);
        }
        Ok(Self(id))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a user, derived deterministically from what we know.
///
/// Derivation order: display name, then session id, then a timestamp-based
/// anonymous id. The same name always yields the same id so profile records
/// survive across sessions without a real auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Derives a user id from an optional display name and session id.
    pub fn derive(display_name: Option<&str>, session_id: Option<&SessionId>) -> Self {
        if let Some(name) = display_name.map(str::trim).filter(|n| !n.is_empty()) {
            let normalized = name.to_lowercase().replace(' ', "_");
            return Self(format!("user_{}", normalized));
        }
        if let Some(session) = session_id {
            return Self(format!("session_{}", session.as_str()));
        }
        Self(format!(
            "anonymous_{}",
            Utc::now().format("%Y%m%d_%H%M%S")
        ))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
