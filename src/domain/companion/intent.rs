//! Intent interception rules.
//!
//! Special-case messages short-circuit normal generation. Rules live in an
//! ordered table evaluated highest priority first, so the crisis/prayer/story
//! detection stays auditable and testable on its own. An intercepted message
//! never reaches a provider.

use super::story::StoryKey;

/// Fixed safety message returned for crisis keywords, verbatim.
pub const CRISIS_RESPONSE: &str = "You matter deeply to God and to me. \
Please reach out: 988 Suicide & Crisis Lifeline. You're precious \u{1f499}";

/// A recognized special-case intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Crisis language; respond with the fixed safety message immediately.
    Crisis,
    /// Direct prayer request; answer with a short personal prayer.
    PrayerRequest,
    /// Story request, optionally naming a specific story.
    StoryRequest(Option<StoryKey>),
    /// Continuation of a pending multi-part response or active story.
    Continue,
}

const CRISIS_KEYWORDS: &[&str] = &[
    "kill myself",
    "suicide",
    "end my life",
    "want to die",
    "hurt myself",
    "self harm",
    "no reason to live",
];

const PRAYER_TRIGGERS: &[&str] = &[
    "pray for",
    "say a prayer",
    "please pray",
    "pray that",
    "father help",
    "lord help",
    "jesus help",
    "pray with me",
    "can you pray",
];

const STORY_KEYWORDS: &[&str] = &[
    "story",
    "tell me a story",
    "bible story",
    "share a story",
    "parable",
    "tell me about",
];

const CONTINUE_KEYWORDS: &[&str] = &["continue", "go on", "next", "more", "keep going", "and then"];

/// One row of the interception table: a matcher and the intent it yields.
struct Rule {
    matches: fn(&str) -> bool,
    intent: fn(&str) -> Intent,
}

fn contains_any(message: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| message.contains(k))
}

/// Evaluated in order; the first matching rule wins.
const RULES: &[Rule] = &[
    Rule {
        matches: |m| contains_any(m, CRISIS_KEYWORDS),
        intent: |_| Intent::Crisis,
    },
    Rule {
        matches: |m| contains_any(m, PRAYER_TRIGGERS),
        intent: |_| Intent::PrayerRequest,
    },
    Rule {
        matches: |m| contains_any(m, STORY_KEYWORDS) || StoryKey::detect(m).is_some(),
        intent: |m| Intent::StoryRequest(StoryKey::detect(m)),
    },
    Rule {
        matches: |m| CONTINUE_KEYWORDS.iter().any(|k| m.trim() == *k),
        intent: |_| Intent::Continue,
    },
];

/// Classifies a message against the interception table.
///
/// Returns `None` when no rule matches and normal generation should proceed.
/// Matching is case-insensitive substring matching, mirroring how users
/// actually type.
pub fn classify_intent(message: &str) -> Option<Intent> {
    let lower = message.to_lowercase();
    RULES
        .iter()
        .find(|rule| (rule.matches)(&lower))
        .map(|rule| (rule.intent)(&lower))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crisis_outranks_everything() {
        // Mentions prayer too, but crisis must win
        assert_eq!(
            classify_intent("please pray, I want to die"),
            Some(Intent::Crisis)
        );
    }

    #[test]
    fn prayer_request_detected() {
        assert_eq!(
            classify_intent("Can you pray for my mom"),
            Some(Intent::PrayerRequest)
        );
        assert_eq!(
            classify_intent("PLEASE PRAY with me"),
            Some(Intent::PrayerRequest)
        );
    }

    #[test]
    fn story_request_with_named_story() {
        assert_eq!(
            classify_intent("tell me a story about david and goliath"),
            Some(Intent::StoryRequest(Some(StoryKey::DavidGoliath)))
        );
    }

    #[test]
    fn story_request_without_named_story() {
        assert_eq!(
            classify_intent("share a story with me"),
            Some(Intent::StoryRequest(None))
        );
    }

    #[test]
    fn prayer_outranks_story() {
        assert_eq!(
            classify_intent("pray for me and tell me a story"),
            Some(Intent::PrayerRequest)
        );
    }

    #[test]
    fn bare_continue_detected() {
        assert_eq!(classify_intent("continue"), Some(Intent::Continue));
        assert_eq!(classify_intent("  next "), Some(Intent::Continue));
    }

    #[test]
    fn continue_inside_sentence_is_not_intercepted() {
        assert!(classify_intent("I want to continue growing in faith").is_none());
    }

    #[test]
    fn ordinary_message_passes_through() {
        assert!(classify_intent("people are mean").is_none());
        assert!(classify_intent("I had a rough day at work").is_none());
    }
}
