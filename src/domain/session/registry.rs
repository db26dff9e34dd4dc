//! Session registry - owns per-session state behind per-key locks.
//!
//! The registry is the only shared mutable resource in the pipeline. The map
//! itself sits behind a `std::sync::RwLock` held only long enough to clone the
//! per-session `Arc`; each session's state is guarded by its own
//! `tokio::sync::Mutex`, so operations for the same session serialize while
//! different sessions proceed concurrently.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::debug;

use super::Session;
use crate::domain::companion::{StoryKey, TurnRole};
use crate::domain::foundation::SessionId;

/// Registry of live sessions, keyed by session id.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>,
    history_capacity: usize,
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new(history_capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            history_capacity,
        }
    }

    /// Returns the session for `id`, creating it on first use.
    ///
    /// Callers lock the returned handle for the duration of any compound
    /// operation so same-session work never interleaves.
    pub fn get_or_create(&self, id: &SessionId) -> Arc<Mutex<Session>> {
        if let Some(existing) = self.sessions.read().expect("session map poisoned").get(id) {
            return Arc::clone(existing);
        }
        let mut map = self.sessions.write().expect("session map poisoned");
        Arc::clone(
            map.entry(id.clone())
                .or_insert_with(|| Arc::new(Mutex::new(Session::new(self.history_capacity)))),
        )
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().expect("session map poisoned").len()
    }

    /// Whether no sessions exist.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a turn to a session's history.
    pub async fn append_turn(&self, id: &SessionId, role: TurnRole, text: impl Into<String>) {
        let session = self.get_or_create(id);
        session.lock().await.append_turn(role, text);
    }

    /// Sets or flips voice mode for a session, returning the new value.
    pub async fn toggle_voice_mode(&self, id: &SessionId, enable: Option<bool>) -> bool {
        let session = self.get_or_create(id);
        let result = session.lock().await.toggle_voice_mode(enable);
        result
    }

    /// Starts a story for a session, replacing any in progress.
    pub async fn start_story(&self, id: &SessionId, key: StoryKey) {
        let session = self.get_or_create(id);
        session.lock().await.start_story(key);
    }

    /// Advances the session's active story.
    pub async fn advance_story(&self, id: &SessionId) -> Option<&'static str> {
        let session = self.get_or_create(id);
        let part = session.lock().await.advance_story();
        part
    }

    /// Queues response chunks for later delivery.
    pub async fn queue_chunks(&self, id: &SessionId, chunks: Vec<String>) {
        let session = self.get_or_create(id);
        session.lock().await.queue_chunks(chunks);
    }

    /// Pops the next pending chunk for a session.
    pub async fn next_chunk(&self, id: &SessionId) -> Option<String> {
        let session = self.get_or_create(id);
        let chunk = session.lock().await.next_chunk();
        chunk
    }

    /// Removes sessions idle longer than `ttl`, returning how many were dropped.
    ///
    /// Sessions whose lock is currently held are considered active and kept.
    pub fn evict_idle(&self, ttl: Duration) -> usize {
        let mut map = self.sessions.write().expect("session map poisoned");
        let before = map.len();
        map.retain(|id, session| match session.try_lock() {
            Ok(guard) => {
                let keep = guard.idle_for() < ttl;
                if !keep {
                    debug!(session_id = %id, "evicting idle session");
                }
                keep
            }
            Err(_) => true,
        });
        before - map.len()
    }
}
