//! Session module - in-memory conversational state per session.

mod registry;
mod session;

pub use registry::SessionRegistry;
pub use session::Session;
