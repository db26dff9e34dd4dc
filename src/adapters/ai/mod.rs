//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port for the configured providers.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google Gemini models via the generateContent API
//! - `OpenAIProvider` - OpenAI GPT models via chat completions
//! - `MockAIProvider` - configurable mock for testing
//! - `ProviderGateway` - ordered registry of configured providers

mod gateway;
mod gemini_provider;
mod mock_provider;
mod openai_provider;

pub use gateway::ProviderGateway;
pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_provider::{MockAIProvider, MockError};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
