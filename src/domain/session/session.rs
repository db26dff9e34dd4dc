//! Per-session conversational state.

use std::collections::VecDeque;
use std::time::Instant;

use crate::domain::companion::{StoryContext, StoryKey, Turn, TurnRole};

/// Conversational state owned by one session.
///
/// Holds the bounded turn history, transient flags (voice mode), the active
/// story cursor, and any queued response chunks awaiting delivery. Lives in
/// process memory only; access is serialized by the registry's per-session
/// lock.
#[derive(Debug)]
pub struct Session {
    turns: VecDeque<Turn>,
    history_capacity: usize,
    voice_mode: bool,
    story: Option<StoryContext>,
    pending_chunks: VecDeque<String>,
    last_active: Instant,
}

impl Session {
    /// Creates an empty session with the given history bound.
    pub fn new(history_capacity: usize) -> Self {
        Self {
            turns: VecDeque::new(),
            history_capacity,
            voice_mode: false,
            story: None,
            pending_chunks: VecDeque::new(),
            last_active: Instant::now(),
        }
    }

    /// Marks the session as recently used.
    pub fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    /// How long since this session was last used.
    pub fn idle_for(&self) -> std::time::Duration {
        self.last_active.elapsed()
    }

    /// Appends a turn, dropping the oldest once capacity is reached.
    pub fn append_turn(&mut self, role: TurnRole, text: impl Into<String>) {
        if self.turns.len() >= self.history_capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(Turn::new(role, text));
        self.touch();
    }

    /// The current history, oldest first.
    pub fn history(&self) -> Vec<Turn> {
        self.turns.iter().cloned().collect()
    }

    /// Number of recorded turns.
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// Sets voice mode explicitly, or flips it when `enable` is `None`.
    ///
    /// Returns the resulting value. Defaults to off for new sessions.
    pub fn toggle_voice_mode(&mut self, enable: Option<bool>) -> bool {
        self.voice_mode = enable.unwrap_or(!self.voice_mode);
        self.touch();
        self.voice_mode
    }

    /// Whether voice mode is currently on.
    pub fn voice_mode(&self) -> bool {
        self.voice_mode
    }

    /// Begins a story, replacing any story already in progress.
    pub fn start_story(&mut self, key: StoryKey) {
        self.story = Some(StoryContext::new(key));
        self.touch();
    }

    /// Returns the next story part, clearing the context when exhausted.
    pub fn advance_story(&mut self) -> Option<&'static str> {
        self.touch();
        let ctx = self.story.as_mut()?;
        match ctx.advance() {
            Some(part) => Some(part),
            None => {
                self.story = None;
                None
            }
        }
    }

    /// The story currently in progress, if any.
    pub fn active_story(&self) -> Option<StoryKey> {
        self.story.as_ref().map(|ctx| ctx.key)
    }

    /// Queues chunks for sequential delivery, replacing any leftovers.
    pub fn queue_chunks(&mut self, chunks: Vec<String>) {
        self.pending_chunks = chunks.into();
        self.touch();
    }

    /// Pops the next pending chunk, if any.
    pub fn next_chunk(&mut self) -> Option<String> {
        self.touch();
        self.pending_chunks.pop_front()
    }

    /// Whether chunks are waiting to be delivered.
    pub fn has_pending_chunks(&self) -> bool {
        !self.pending_chunks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_bounded() {
        let mut session = Session::new(3);
        for i in 0..5 {
            session.append_turn(TurnRole::User, format!("turn-{}", i));
        }
        let history = session.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].text, "turn-2");
        assert_eq!(history[2].text, "turn-4");
    }

    #[test]
    fn voice_mode_defaults_off_and_flips() {
        let mut session = Session::new(10);
        assert!(!session.voice_mode());
        assert!(session.toggle_voice_mode(None));
        assert!(!session.toggle_voice_mode(None));
        assert!(session.toggle_voice_mode(Some(true)));
        assert!(session.toggle_voice_mode(Some(true)));
    }

    #[test]
    fn story_advances_then_clears() {
        let mut session = Session::new(10);
        session.start_story(StoryKey::DavidGoliath);
        let parts = StoryKey::DavidGoliath.parts();

        for expected in parts {
            assert_eq!(session.advance_story(), Some(*expected));
        }
        assert_eq!(session.advance_story(), None);
        assert!(session.active_story().is_none());
    }

    #[test]
    fn new_story_replaces_old_cursor() {
        let mut session = Session::new(10);
        session.start_story(StoryKey::DavidGoliath);
        session.advance_story();
        session.start_story(StoryKey::RedSea);

        assert_eq!(session.advance_story(), Some(StoryKey::RedSea.parts()[0]));
    }

    #[test]
    fn chunks_drain_in_order() {
        let mut session = Session::new(10);
        session.queue_chunks(vec!["one".into(), "two".into()]);

        assert!(session.has_pending_chunks());
        assert_eq!(session.next_chunk().as_deref(), Some("one"));
        assert_eq!(session.next_chunk().as_deref(), Some("two"));
        assert_eq!(session.next_chunk(), None);
        assert!(!session.has_pending_chunks());
    }

    #[test]
    fn queueing_replaces_leftover_chunks() {
        let mut session = Session::new(10);
        session.queue_chunks(vec!["one".into(), "two".into()]);
        assert_eq!(session.next_chunk().as_deref(), Some("one"));

        session.queue_chunks(Vec::new());
        assert!(!session.has_pending_chunks());
        assert_eq!(session.next_chunk(), None);
    }
}
