//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - text-generation provider integrations
//! - `ProfileStore` - best-effort user/session persistence

mod ai_provider;
mod profile_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, Message, MessageRole, ProviderInfo,
};
pub use profile_store::{ProfileRecord, ProfileStore};
