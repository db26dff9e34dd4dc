//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    pub gemini_api_key: Option<String>,

    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Primary AI provider
    #[serde(default = "default_provider")]
    pub primary_provider: AiProviderKind,

    /// Gemini model identifier
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// OpenAI model identifier
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// AI provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProviderKind {
    #[default]
    Gemini,
    OpenAI,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if Gemini is configured
    pub fn has_gemini(&self) -> bool {
        self.gemini_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Providers in invocation priority order, primary first.
    ///
    /// Only configured providers appear. The order is fixed for the lifetime
    /// of the process; there is no adaptive routing.
    pub fn provider_order(&self) -> Vec<AiProviderKind> {
        let mut order = Vec::new();
        let (first, second) = match self.primary_provider {
            AiProviderKind::Gemini => (AiProviderKind::Gemini, AiProviderKind::OpenAI),
            AiProviderKind::OpenAI => (AiProviderKind::OpenAI, AiProviderKind::Gemini),
        };
        for kind in [first, second] {
            let configured = match kind {
                AiProviderKind::Gemini => self.has_gemini(),
                AiProviderKind::OpenAI => self.has_openai(),
            };
            if configured {
                order.push(kind);
            }
        }
        order
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        // At least one provider must have an API key; this is fatal at startup
        if !self.has_gemini() && !self.has_openai() {
            return Err(ValidationError::NoAiProviderConfigured);
        }

        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            openai_api_key: None,
            primary_provider: default_provider(),
            gemini_model: default_gemini_model(),
            openai_model: default_openai_model(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_provider() -> AiProviderKind {
    AiProviderKind::Gemini
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o".to_string()
}

fn default_timeout() -> u64 {
    30
}
