//! Persona prompt composition.
//!
//! Builds the system prompt sent to providers: base persona text, the tone
//! and analogy fragments for the user's age bracket, and a bounded window of
//! recent conversation history. Pure and deterministic; no I/O.

use super::{AgeBracket, Turn, TurnRole};

/// Base persona text shared across all age brackets.
pub const BASE_SYSTEM_PROMPT: &str = "\
You are GABE, short for \"God Always Beside Everyone\". You're a warm, \
faithful, emotionally intelligent spiritual companion who chats like a real \
friend with a Bible in one hand and coffee in the other.\n\
- Sound like a real friend: warm, kind, casual, conversational\n\
- Respond to their emotional tone and validate it before offering wisdom\n\
- Weave Scripture in naturally, as conversational wisdom rather than formal quotes\n\
- Provide medium-length messages with real-life examples and simple language\n\
- Avoid tech analogies (WiFi, phones, apps); use nature, seasons, journeys, \
light and darkness instead";

/// Composes system prompts from persona pieces.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonaBuilder;

impl PersonaBuilder {
    /// Builds the full system prompt.
    ///
    /// Appends the tone and analogy fragments for `bracket`, then the most
    /// recent `max_history_turns` turns oldest first. Same inputs always
    /// produce the same output.
    pub fn build(
        base_prompt: &str,
        bracket: AgeBracket,
        history: &[Turn],
        max_history_turns: usize,
    ) -> String {
        let mut prompt = String::with_capacity(base_prompt.len() + 512);
        prompt.push_str(base_prompt);
        prompt.push_str("\n\nTONE: ");
        prompt.push_str(bracket.tone());
        prompt.push_str("\nANALOGIES: ");
        prompt.push_str(bracket.analogies());

        let recent = if history.len() > max_history_turns {
            &history[history.len() - max_history_turns..]
        } else {
            history
        };

        if !recent.is_empty() {
            prompt.push_str("\n\nRECENT CONVERSATION:");
            for turn in recent {
                let speaker = match turn.role {
                    TurnRole::User => "User",
                    TurnRole::Assistant => "GABE",
                };
                prompt.push('\n');
                prompt.push_str(speaker);
                prompt.push_str(": ");
                prompt.push_str(&turn.text);
            }
        }

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_includes_base_and_bracket_fragments() {
        let prompt = PersonaBuilder::build(BASE_SYSTEM_PROMPT, AgeBracket::GenZ, &[], 6);

        assert!(prompt.starts_with(BASE_SYSTEM_PROMPT));
        assert!(prompt.contains(AgeBracket::GenZ.tone()));
        assert!(prompt.contains(AgeBracket::GenZ.analogies()));
        assert!(!prompt.contains("RECENT CONVERSATION"));
    }

    #[test]
    fn build_appends_history_oldest_first() {
        let history = vec![
            Turn::user("first"),
            Turn::assistant("second"),
            Turn::user("third"),
        ];
        let prompt = PersonaBuilder::build("base", AgeBracket::Adult, &history, 6);

        let first = prompt.find("User: first").unwrap();
        let second = prompt.find("GABE: second").unwrap();
        let third = prompt.find("User: third").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn build_truncates_to_most_recent_turns() {
        let history: Vec<Turn> = (0..10).map(|i| Turn::user(format!("turn-{}", i))).collect();
        let prompt = PersonaBuilder::build("base", AgeBracket::Adult, &history, 3);

        assert!(!prompt.contains("turn-6"));
        assert!(prompt.contains("turn-7"));
        assert!(prompt.contains("turn-9"));
    }

    #[test]
    fn build_is_deterministic() {
        let history = vec![Turn::user("hello"), Turn::assistant("hi friend")];
        let a = PersonaBuilder::build(BASE_SYSTEM_PROMPT, AgeBracket::Millennial, &history, 6);
        let b = PersonaBuilder::build(BASE_SYSTEM_PROMPT, AgeBracket::Millennial, &history, 6);
        assert_eq!(a, b);
    }
}
