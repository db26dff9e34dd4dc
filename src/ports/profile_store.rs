//! Profile Store Port - best-effort user/session persistence.
//!
//! All operations are advisory: on any underlying failure, including "no
//! store configured", implementations return `false`/`None` instead of
//! raising. Producing a response never depends on persistence succeeding.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::companion::Turn;
use crate::domain::foundation::{SessionId, Timestamp, UserId};

/// Persisted user profile record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Display name as last provided.
    pub name: String,
    /// Age bracket tag as last provided.
    pub age_bracket: Option<String>,
    /// When we last heard from this user.
    pub last_seen: Timestamp,
    /// Free-form preference fields.
    #[serde(default)]
    pub preferences: HashMap<String, String>,
}

impl ProfileRecord {
    /// Creates a fresh record stamped now.
    pub fn new(name: impl Into<String>, age_bracket: Option<String>) -> Self {
        Self {
            name: name.into(),
            age_bracket,
            last_seen: Timestamp::now(),
            preferences: HashMap::new(),
        }
    }
}

/// Port for the external document store.
///
/// Callers must treat every operation as advisory; a `false` or `None`
/// return means "not persisted" and is never an error condition.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetches a profile, or `None` if missing or the store is unavailable.
    async fn get_profile(&self, user_id: &UserId) -> Option<ProfileRecord>;

    /// Saves a profile. Returns whether the write happened.
    async fn save_profile(&self, user_id: &UserId, record: ProfileRecord) -> bool;

    /// Mirrors a conversation turn to durable history. Returns whether the
    /// write happened.
    async fn append_history(&self, session_id: &SessionId, turn: &Turn) -> bool;

    /// Whether the store is reachable. Used to log degraded mode once at
    /// startup, not as a precondition for calls.
    fn is_connected(&self) -> bool;
}
