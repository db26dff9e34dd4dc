//! GABE Companion - Conversational spiritual-companion backend.
//!
//! Routes user messages through a multi-provider AI pipeline with ordered
//! fallback, persona-shaped prompts, and session-scoped conversational state.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
