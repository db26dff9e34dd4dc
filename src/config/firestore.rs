//! Firestore persistence configuration
//!
//! Persistence is optional. A missing project id degrades the service to
//! memory-only operation with a logged warning; it is never a startup error.

use serde::Deserialize;
use std::time::Duration;

/// Firestore document-store configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FirestoreConfig {
    /// Google Cloud project id. Absent means persistence is disabled.
    pub project_id: Option<String>,

    /// OAuth bearer token or API key for REST access
    pub access_token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl FirestoreConfig {
    /// Whether enough configuration is present to attempt persistence.
    pub fn is_enabled(&self) -> bool {
        self.project_id.as_ref().is_some_and(|p| !p.is_empty())
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout() -> u64 {
    10
}
