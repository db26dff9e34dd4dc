//! Firestore adapter for the profile store port.
//!
//! Talks to the Firestore REST API. Every failure - transport, auth,
//! decode - is logged at warn level and converted into the port's
//! advisory `false`/`None` returns. Nothing in this module can fail a
//! conversation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::FirestoreConfig;
use crate::domain::companion::Turn;
use crate::domain::foundation::{SessionId, Timestamp, UserId};
use crate::ports::{ProfileRecord, ProfileStore};

const USERS_COLLECTION: &str = "users";
const SESSIONS_COLLECTION: &str = "sessions";
const HISTORY_SUBCOLLECTION: &str = "history";

/// Firestore-backed profile store.
///
/// Built disabled when configuration lacks a project id; all operations
/// then short-circuit to their advisory defaults.
pub struct FirestoreProfileStore {
    client: Client,
    base_url: String,
    access_token: Option<Secret<String>>,
    enabled: bool,
}

impl FirestoreProfileStore {
    /// Builds the store from configuration.
    pub fn from_config(config: &FirestoreConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        let project = config.project_id.clone().unwrap_or_default();
        let base_url = format!(
            "https://firestore.googleapis.com/v1/projects/{}/databases/(default)/documents",
            project
        );

        Self {
            client,
            base_url,
            access_token: config.access_token.clone().map(Secret::new),
            enabled: config.is_enabled(),
        }
    }

    /// Test constructor pointing at an arbitrary documents endpoint.
    #[cfg(test)]
    fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(5))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
            access_token: None,
            enabled: true,
        }
    }

    fn profile_url(&self, user_id: &UserId) -> String {
        format!("{}/{}/{}", self.base_url, USERS_COLLECTION, user_id.as_str())
    }

    fn history_url(&self, session_id: &SessionId) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url,
            SESSIONS_COLLECTION,
            session_id.as_str(),
            HISTORY_SUBCOLLECTION
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }
}

#[async_trait]
impl ProfileStore for FirestoreProfileStore {
    async fn get_profile(&self, user_id: &UserId) -> Option<ProfileRecord> {
        if !self.enabled {
            return None;
        }

        let response = match self.authorize(self.client.get(self.profile_url(user_id))).send().await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(user_id = user_id.as_str(), error = %err, "profile fetch failed");
                return None;
            }
        };

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return None;
        }
        if !response.status().is_success() {
            warn!(
                user_id = user_id.as_str(),
                status = %response.status(),
                "profile fetch rejected"
            );
            return None;
        }

        match response.json::<Document>().await {
            Ok(document) => match decode_profile(&document) {
                Some(record) => Some(record),
                None => {
                    warn!(user_id = user_id.as_str(), "profile document malformed");
                    None
                }
            },
            Err(err) => {
                warn!(user_id = user_id.as_str(), error = %err, "profile decode failed");
                None
            }
        }
    }

    async fn save_profile(&self, user_id: &UserId, record: ProfileRecord) -> bool {
        if !self.enabled {
            return false;
        }

        let document = encode_profile(&record);
        let result = self
            .authorize(self.client.patch(self.profile_url(user_id)))
            .json(&document)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(
                    user_id = user_id.as_str(),
                    status = %response.status(),
                    "profile save rejected"
                );
                false
            }
            Err(err) => {
                warn!(user_id = user_id.as_str(), error = %err, "profile save failed");
                false
            }
        }
    }

    async fn append_history(&self, session_id: &SessionId, turn: &Turn) -> bool {
        if !self.enabled {
            return false;
        }

        let document = encode_turn(turn);
        let result = self
            .authorize(self.client.post(self.history_url(session_id)))
            .json(&document)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(
                    session_id = session_id.as_str(),
                    status = %response.status(),
                    "history append rejected"
                );
                false
            }
            Err(err) => {
                warn!(session_id = session_id.as_str(), error = %err, "history append failed");
                false
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.enabled
    }
}

// -- Firestore wire format ---------------------------------------------------

/// Firestore REST document: every field carries an explicit type tag.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    fields: HashMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum Value {
    StringValue(String),
    TimestampValue(String),
    MapValue(MapValue),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MapValue {
    #[serde(default)]
    fields: HashMap<String, Value>,
}

impl Value {
    fn as_str(&self) -> Option<&str> {
        match self {
            Value::StringValue(s) | Value::TimestampValue(s) => Some(s),
            Value::MapValue(_) => None,
        }
    }
}

fn encode_profile(record: &ProfileRecord) -> Document {
    let mut fields = HashMap::new();
    fields.insert("name".to_string(), Value::StringValue(record.name.clone()));
    if let Some(bracket) = &record.age_bracket {
        fields.insert("age_bracket".to_string(), Value::StringValue(bracket.clone()));
    }
    fields.insert(
        "last_seen".to_string(),
        Value::TimestampValue(record.last_seen.to_rfc3339()),
    );
    if !record.preferences.is_empty() {
        let prefs = record
            .preferences
            .iter()
            .map(|(k, v)| (k.clone(), Value::StringValue(v.clone())))
            .collect();
        fields.insert(
            "preferences".to_string(),
            Value::MapValue(MapValue { fields: prefs }),
        );
    }
    Document { fields }
}

fn decode_profile(document: &Document) -> Option<ProfileRecord> {
    let name = document.fields.get("name")?.as_str()?.to_string();
    let age_bracket = document
        .fields
        .get("age_bracket")
        .and_then(Value::as_str)
        .map(str::to_string);
    let last_seen = document
        .fields
        .get("last_seen")
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| Timestamp::from_datetime(dt.with_timezone(&Utc)))
        .unwrap_or_else(Timestamp::now);
    let preferences = match document.fields.get("preferences") {
        Some(Value::MapValue(map)) => map
            .fields
            .iter()
            .filter_map(|(k, v)| Some((k.clone(), v.as_str()?.to_string())))
            .collect(),
        _ => HashMap::new(),
    };

    Some(ProfileRecord {
        name,
        age_bracket,
        last_seen,
        preferences,
    })
}

fn encode_turn(turn: &Turn) -> Document {
    let mut fields = HashMap::new();
    let role = serde_json::to_value(&turn.role)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| "user".to_string());
    fields.insert("role".to_string(), Value::StringValue(role));
    fields.insert("text".to_string(), Value::StringValue(turn.text.clone()));
    fields.insert(
        "timestamp".to_string(),
        Value::TimestampValue(turn.timestamp.to_rfc3339()),
    );
    Document { fields }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_store_reports_disconnected() {
        let store = FirestoreProfileStore::from_config(&FirestoreConfig::default());
        assert!(!store.is_connected());
    }

    #[tokio::test]
    async fn disabled_store_short_circuits() {
        let store = FirestoreProfileStore::from_config(&FirestoreConfig::default());
        let user = UserId::derive(Some("Alex"), None);
        assert!(store.get_profile(&user).await.is_none());
        assert!(!store.save_profile(&user, ProfileRecord::new("Alex", None)).await);
    }

    #[tokio::test]
    async fn unreachable_store_degrades_to_none() {
        // Nothing listens on this port; transport errors must become None/false.
        let store = FirestoreProfileStore::with_base_url("http://127.0.0.1:1/v1/docs");
        let user = UserId::derive(Some("Alex"), None);
        assert!(store.get_profile(&user).await.is_none());
        assert!(!store.save_profile(&user, ProfileRecord::new("Alex", None)).await);

        let session = SessionId::new("abc").unwrap();
        assert!(!store.append_history(&session, &Turn::user("hello")).await);
    }

    #[test]
    fn profile_round_trips_through_document_fields() {
        let mut record = ProfileRecord::new("Jordan", Some("genz".to_string()));
        record
            .preferences
            .insert("voice_mode".to_string(), "on".to_string());

        let decoded = decode_profile(&encode_profile(&record)).unwrap();
        assert_eq!(decoded.name, "Jordan");
        assert_eq!(decoded.age_bracket.as_deref(), Some("genz"));
        assert_eq!(decoded.preferences.get("voice_mode").map(String::as_str), Some("on"));
    }

    #[test]
    fn string_values_carry_the_type_tag() {
        let document = encode_profile(&ProfileRecord::new("Sam", None));
        let json = serde_json::to_value(&document).unwrap();
        assert_eq!(json["fields"]["name"]["stringValue"], "Sam");
        assert!(json["fields"]["last_seen"]["timestampValue"].is_string());
    }

    #[test]
    fn malformed_document_decodes_to_none() {
        let document = Document::default();
        assert!(decode_profile(&document).is_none());
    }

    #[test]
    fn turn_encodes_role_and_text() {
        let turn = Turn::assistant("Peace be with you");
        let json = serde_json::to_value(encode_turn(&turn)).unwrap();
        assert_eq!(json["fields"]["role"]["stringValue"], "assistant");
        assert_eq!(json["fields"]["text"]["stringValue"], "Peace be with you");
    }
}
