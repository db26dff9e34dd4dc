//! In-memory profile store for tests and memory-only operation.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::domain::companion::Turn;
use crate::domain::foundation::{SessionId, UserId};
use crate::ports::{ProfileRecord, ProfileStore};

/// HashMap-backed store. Honors the full port contract, including the
/// ability to simulate a disconnected or slow store for degraded-mode tests.
pub struct InMemoryProfileStore {
    profiles: Mutex<HashMap<String, ProfileRecord>>,
    history: Mutex<HashMap<String, Vec<Turn>>>,
    connected: bool,
    delay: Duration,
}

impl Default for InMemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: Mutex::new(HashMap::new()),
            history: Mutex::new(HashMap::new()),
            connected: true,
            delay: Duration::ZERO,
        }
    }

    /// A store that refuses every operation, like an unreachable backend.
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            ..Self::new()
        }
    }

    /// Sets simulated latency per operation, like a remote backend.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }

    /// Turns persisted for a session, oldest first.
    pub fn session_history(&self, session_id: &SessionId) -> Vec<Turn> {
        self.history
            .lock()
            .expect("history lock poisoned")
            .get(session_id.as_str())
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_profile(&self, user_id: &UserId) -> Option<ProfileRecord> {
        self.simulate_latency().await;
        if !self.connected {
            return None;
        }
        self.profiles
            .lock()
            .expect("profiles lock poisoned")
            .get(user_id.as_str())
            .cloned()
    }

    async fn save_profile(&self, user_id: &UserId, record: ProfileRecord) -> bool {
        self.simulate_latency().await;
        if !self.connected {
            return false;
        }
        self.profiles
            .lock()
            .expect("profiles lock poisoned")
            .insert(user_id.as_str().to_string(), record);
        true
    }

    async fn append_history(&self, session_id: &SessionId, turn: &Turn) -> bool {
        self.simulate_latency().await;
        if !self.connected {
            return false;
        }
        self.history
            .lock()
            .expect("history lock poisoned")
            .entry(session_id.as_str().to_string())
            .or_default()
            .push(turn.clone());
        true
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}
