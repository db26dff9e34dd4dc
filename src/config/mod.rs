//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the `GABE_`
//! prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use gabe_companion::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod companion;
mod error;
mod firestore;

pub use ai::{AiConfig, AiProviderKind};
pub use companion::CompanionConfig;
pub use error::{ConfigError, ValidationError};
pub use firestore::FirestoreConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// AI provider configuration (Gemini/OpenAI)
    #[serde(default)]
    pub ai: AiConfig,

    /// Firestore persistence configuration (optional)
    #[serde(default)]
    pub firestore: FirestoreConfig,

    /// Conversation pipeline tunables
    #[serde(default)]
    pub companion: CompanionConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `GABE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `GABE__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key = ...`
    /// - `GABE__COMPANION__CHUNK_LIMIT=350` -> `companion.chunk_limit = 350`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GABE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// A missing AI provider is fatal; missing persistence is not (the
    /// service degrades to memory-only operation).
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.companion.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("GABE__AI__GEMINI_API_KEY", "test-gemini-key");
    }

    fn clear_env() {
        env::remove_var("GABE__AI__GEMINI_API_KEY");
        env::remove_var("GABE__AI__OPENAI_API_KEY");
        env::remove_var("GABE__FIRESTORE__PROJECT_ID");
        env::remove_var("GABE__COMPANION__CHUNK_LIMIT");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.ai.gemini_api_key.as_deref(), Some("test-gemini-key"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_a_provider() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_firestore_optional() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(!config.firestore.is_enabled());
        // Missing persistence never fails validation
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_chunk_limit() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("GABE__COMPANION__CHUNK_LIMIT", "200");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.companion.chunk_limit, 200);
    }
}
