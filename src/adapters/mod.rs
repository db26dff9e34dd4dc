//! Adapters - implementations of port interfaces.
//!
//! - `ai` - provider adapters (Gemini, OpenAI, mock) and the gateway
//! - `storage` - profile stores (Firestore REST, in-memory)

pub mod ai;
pub mod storage;
