//! Response orchestrator - the per-message pipeline.
//!
//! Every inbound message runs intercept, prompt build, generation with
//! ordered provider fallback, postprocess, persist. Interceptors answer
//! without touching a provider; provider failures degrade through the
//! priority order and bottom out in pool content, never in an error to the
//! caller. The only surfaced error is a blank message.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::adapters::ai::ProviderGateway;
use crate::config::CompanionConfig;
use crate::domain::companion::{
    chunk_text, classify_intent, AgeBracket, Intent, PersonaBuilder, StoryKey, Turn, TurnRole,
    BASE_SYSTEM_PROMPT, CRISIS_RESPONSE,
};
use crate::domain::content::{ContentKind, ContentPool};
use crate::domain::foundation::{SessionId, Timestamp, UserId};
use crate::domain::session::SessionRegistry;
use crate::ports::{CompletionRequest, MessageRole, ProfileRecord, ProfileStore};

const MAX_RESPONSE_TOKENS: u32 = 400;
const RESPONSE_TEMPERATURE: f32 = 0.8;

/// One inbound message.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// The user's message text.
    pub message: String,
    /// Display name, when the client knows it.
    pub user_name: Option<String>,
    /// Declared age bracket tag ("genz", "millennial", ...).
    pub age_bracket: Option<String>,
    /// Session this message belongs to.
    pub session_id: SessionId,
}

/// One outbound reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReply {
    /// Reply text; the first chunk when the response was split.
    pub text: String,
    /// Which path produced the text: a provider name, or "crisis",
    /// "prayer", "story", "chunks", "fallback".
    pub provider: String,
    /// Whether queued chunks remain for this session.
    pub has_more_chunks: bool,
}

/// The only error a caller can see.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GenerateError {
    /// Message was empty or whitespace.
    #[error("message must not be empty")]
    InvalidMessage,
}

/// Drives the full message pipeline over the gateway, registry and store.
pub struct ResponseOrchestrator {
    gateway: ProviderGateway,
    registry: Arc<SessionRegistry>,
    store: Arc<dyn ProfileStore>,
    pool: ContentPool,
    config: CompanionConfig,
}

impl ResponseOrchestrator {
    pub fn new(
        gateway: ProviderGateway,
        registry: Arc<SessionRegistry>,
        store: Arc<dyn ProfileStore>,
        config: CompanionConfig,
    ) -> Self {
        Self {
            gateway,
            registry,
            store,
            pool: ContentPool::new(),
            config,
        }
    }

    /// Produces a reply for one message.
    ///
    /// Holds the session lock from interception through the history append so
    /// same-session calls serialize; the best-effort store mirror runs in a
    /// detached background task after the lock is released.
    pub async fn generate(&self, request: GenerateRequest) -> Result<GenerateReply, GenerateError> {
        let message = request.message.trim().to_string();
        if message.is_empty() {
            return Err(GenerateError::InvalidMessage);
        }

        let handle = self.registry.get_or_create(&request.session_id);
        let mut session = handle.lock().await;

        let seed = derive_seed(&request.session_id, &message);
        let intent = classify_intent(&message);

        // Pending chunks outrank everything except a fresh message: a bare
        // "continue" drains the queue before any other handling.
        if intent == Some(Intent::Continue) {
            if let Some(chunk) = session.next_chunk() {
                let has_more = session.has_pending_chunks();
                session.append_turn(TurnRole::User, &message);
                session.append_turn(TurnRole::Assistant, &chunk);
                let mirror = tail_turns(&session.history(), 2);
                drop(session);
                self.spawn_mirror(&request, mirror);
                return Ok(GenerateReply {
                    text: chunk,
                    provider: "chunks".to_string(),
                    has_more_chunks: has_more,
                });
            }
        }

        let (text, provider) = match intent {
            Some(Intent::Crisis) => {
                info!(session_id = request.session_id.as_str(), "crisis interception");
                (CRISIS_RESPONSE.to_string(), "crisis".to_string())
            }
            Some(Intent::PrayerRequest) => {
                let name = request.user_name.as_deref().unwrap_or("friend");
                let prayer = self.pool.personal_prayer(name, None, seed);
                (prayer, "prayer".to_string())
            }
            Some(Intent::StoryRequest(key)) => {
                let key = key.unwrap_or_else(|| pick_story(seed));
                session.start_story(key);
                match session.advance_story() {
                    Some(part) => (
                        format!("{}\n\n{} Say \"continue\" to hear what happens next.", key.title(), part),
                        "story".to_string(),
                    ),
                    None => (story_fallback(), "story".to_string()),
                }
            }
            Some(Intent::Continue) if session.active_story().is_some() => {
                match session.advance_story() {
                    Some(part) => (part.to_string(), "story".to_string()),
                    None => (story_fallback(), "story".to_string()),
                }
            }
            _ => {
                let bracket = AgeBracket::parse(request.age_bracket.as_deref());
                let prompt = PersonaBuilder::build(
                    BASE_SYSTEM_PROMPT,
                    bracket,
                    &session.history(),
                    self.config.max_history_turns,
                );
                self.generate_with_fallback(&prompt, &message, seed).await
            }
        };

        // Postprocess: long responses go out one chunk at a time.
        let mut chunks = chunk_text(&text, self.config.chunk_limit);
        let first = if chunks.is_empty() {
            text.clone()
        } else {
            chunks.remove(0)
        };
        let has_more = !chunks.is_empty();
        if has_more {
            debug!(
                session_id = request.session_id.as_str(),
                queued = chunks.len(),
                "queued response chunks"
            );
        }
        // A fresh response supersedes any chunks still queued from the
        // previous one; an empty queue here clears leftovers.
        session.queue_chunks(chunks);

        // History records the full response, not just the first chunk.
        session.append_turn(TurnRole::User, &message);
        session.append_turn(TurnRole::Assistant, &text);
        let mirror = tail_turns(&session.history(), 2);
        drop(session);

        self.spawn_mirror(&request, mirror);

        Ok(GenerateReply {
            text: first,
            provider,
            has_more_chunks: has_more,
        })
    }

    /// Sets or flips voice mode for a session, returning the new value.
    pub async fn toggle_voice_mode(&self, session_id: &SessionId, enable: Option<bool>) -> bool {
        self.registry.toggle_voice_mode(session_id, enable).await
    }

    /// Verse of the day, shared by everyone for a given day.
    pub fn daily_verse(&self, day_seed: u64) -> String {
        let verse = self.pool.daily_verse(day_seed);
        format!("{} ({})", verse.text, verse.reference)
    }

    /// Iterates providers in priority order; the first success wins.
    ///
    /// Every provider failing is not an error: the reply degrades to pool
    /// content labelled `provider = "fallback"`.
    async fn generate_with_fallback(
        &self,
        system_prompt: &str,
        message: &str,
        seed: u64,
    ) -> (String, String) {
        let request = CompletionRequest::new()
            .with_system_prompt(system_prompt)
            .with_message(MessageRole::User, message)
            .with_max_tokens(MAX_RESPONSE_TOKENS)
            .with_temperature(RESPONSE_TEMPERATURE);

        for (name, provider) in self.gateway.providers() {
            match provider.complete(request.clone()).await {
                Ok(response) => {
                    debug!(provider = name, model = %response.model, "completion succeeded");
                    return (response.content, name.to_string());
                }
                Err(err) => {
                    warn!(provider = name, error = %err, "provider failed, trying next");
                }
            }
        }

        error!("all providers failed, serving fallback content");
        let encouragement = self.pool.lookup(None, ContentKind::Encouragement, seed);
        (
            format!(
                "I'm having a little trouble connecting right now, but hear this: {}",
                encouragement.text
            ),
            "fallback".to_string(),
        )
    }

    /// Best-effort mirror to the document store, detached from the reply.
    ///
    /// Runs as a background task so a slow or remote store never delays the
    /// caller. Failures are logged by the adapter; nothing here can fail the
    /// reply.
    fn spawn_mirror(&self, request: &GenerateRequest, turns: Vec<Turn>) {
        let store = Arc::clone(&self.store);
        let session_id = request.session_id.clone();
        let user_name = request.user_name.clone();
        let age_bracket = request.age_bracket.clone();

        tokio::spawn(async move {
            for turn in &turns {
                store.append_history(&session_id, turn).await;
            }

            if let Some(name) = user_name {
                let user_id = UserId::derive(Some(&name), Some(&session_id));
                let mut record = store
                    .get_profile(&user_id)
                    .await
                    .unwrap_or_else(|| ProfileRecord::new(name, age_bracket.clone()));
                record.last_seen = Timestamp::now();
                if age_bracket.is_some() {
                    record.age_bracket = age_bracket;
                }
                store.save_profile(&user_id, record).await;
            }
        });
    }
}

fn derive_seed(session_id: &SessionId, message: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    session_id.as_str().hash(&mut hasher);
    message.hash(&mut hasher);
    hasher.finish()
}

fn pick_story(seed: u64) -> StoryKey {
    StoryKey::ALL[(seed % StoryKey::ALL.len() as u64) as usize]
}

fn story_fallback() -> String {
    "That's the end of that story. Want to hear another one?".to_string()
}

fn tail_turns(history: &[Turn], count: usize) -> Vec<Turn> {
    history[history.len().saturating_sub(count)..].to_vec()
}
