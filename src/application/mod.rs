//! Application layer - use-case orchestration over ports and domain logic.

mod orchestrator;

pub use orchestrator::{GenerateError, GenerateReply, GenerateRequest, ResponseOrchestrator};
