//! Companion module - the conversational core.
//!
//! Turns, age-bracket personas, prompt building, response chunking,
//! intent interception rules, and the fixed story bank.

mod age_bracket;
mod chunking;
mod intent;
mod persona;
mod story;
mod turn;

pub use age_bracket::AgeBracket;
pub use chunking::chunk_text;
pub use intent::{classify_intent, Intent, CRISIS_RESPONSE};
pub use persona::{PersonaBuilder, BASE_SYSTEM_PROMPT};
pub use story::{StoryContext, StoryKey};
pub use turn::{Turn, TurnRole};
