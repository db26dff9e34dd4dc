//! Domain layer - core conversation logic, independent of providers and storage.

pub mod companion;
pub mod content;
pub mod foundation;
pub mod progress;
pub mod session;
