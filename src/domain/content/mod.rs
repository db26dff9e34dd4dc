//! Content module - the Drop of Hope devotional pool.

mod pool;

pub use pool::{Content, ContentKind, ContentPool};
