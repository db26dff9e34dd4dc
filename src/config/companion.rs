//! Conversation behavior configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Tunables for the response pipeline and session registry
#[derive(Debug, Clone, Deserialize)]
pub struct CompanionConfig {
    /// Maximum characters per delivered chunk
    #[serde(default = "default_chunk_limit")]
    pub chunk_limit: usize,

    /// How many recent turns the persona prompt carries
    #[serde(default = "default_max_history_turns")]
    pub max_history_turns: usize,

    /// Maximum turns retained per session before the oldest are dropped
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Seconds a session may sit idle before eviction
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

impl CompanionConfig {
    /// Idle TTL as a Duration
    pub fn session_idle_ttl(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }

    /// Validate companion configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.chunk_limit < 50 {
            return Err(ValidationError::ChunkLimitTooSmall);
        }
        if self.session_idle_secs == 0 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        Ok(())
    }
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            chunk_limit: default_chunk_limit(),
            max_history_turns: default_max_history_turns(),
            history_capacity: default_history_capacity(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

fn default_chunk_limit() -> usize {
    350
}

fn default_max_history_turns() -> usize {
    6
}

fn default_history_capacity() -> usize {
    50
}

fn default_session_idle_secs() -> u64 {
    3600
}
