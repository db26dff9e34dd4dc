//! Fixed bank of multi-part Bible stories and per-session continuation state.

use serde::{Deserialize, Serialize};

/// The stories the companion can tell, one narrative part at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryKey {
    DavidGoliath,
    RedSea,
    DanielLions,
    ProdigalSon,
}

impl StoryKey {
    /// All known stories, in the order used for default selection.
    pub const ALL: [StoryKey; 4] = [
        StoryKey::DavidGoliath,
        StoryKey::RedSea,
        StoryKey::DanielLions,
        StoryKey::ProdigalSon,
    ];

    /// Human-readable story title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::DavidGoliath => "David and Goliath",
            Self::RedSea => "Moses and the Red Sea",
            Self::DanielLions => "Daniel in the Lions' Den",
            Self::ProdigalSon => "The Prodigal Son",
        }
    }

    /// The ordered narrative parts for this story.
    pub fn parts(&self) -> &'static [&'static str] {
        match self {
            Self::DavidGoliath => &[
                "Let me tell you about young David facing Goliath. Everyone saw a giant - David saw an opportunity to trust God.",
                "David didn't need fancy armor. He picked up smooth stones because he knew God was with him.",
                "One stone, one shot, and the giant fell. Not because David was strong, but because God was faithful.",
                "Your giants might feel overwhelming, but God sees them differently. Would you like another story or a prayer?",
            ],
            Self::RedSea => &[
                "Picture Moses at the Red Sea - enemy behind, impossible waters ahead. Nowhere to go but through.",
                "God didn't remove the sea. He split it wide open, making a way where there was no way.",
                "The same waters that saved God's people destroyed their enemies. God turned the obstacle into victory.",
                "Sometimes God doesn't remove our challenges - He walks through them with us. Want to hear more?",
            ],
            Self::DanielLions => &[
                "Daniel kept praying even when prayer became illegal. Faithfulness mattered more than safety.",
                "They threw him into a den of hungry lions, and the king couldn't sleep that night worrying about him.",
                "At dawn Daniel was untouched. God had shut the lions' mouths while Daniel simply trusted.",
                "Sometimes God doesn't keep us out of the den - He meets us inside it. Want another story?",
            ],
            Self::ProdigalSon => &[
                "A young man demanded his inheritance early and ran off to waste every bit of it.",
                "When famine hit, he ended up feeding pigs and wishing he could eat what they ate.",
                "He rehearsed an apology and walked home, but his father saw him far off and ran to embrace him.",
                "That's how God receives anyone who turns back - arms open, no lecture first. Shall I tell another?",
            ],
        }
    }

    /// Detects an explicit story reference in a message, if any.
    pub fn detect(message: &str) -> Option<Self> {
        let lower = message.to_lowercase();
        if lower.contains("david") || lower.contains("goliath") {
            Some(Self::DavidGoliath)
        } else if lower.contains("moses") || lower.contains("red sea") {
            Some(Self::RedSea)
        } else if lower.contains("daniel") || lower.contains("lion") {
            Some(Self::DanielLions)
        } else if lower.contains("prodigal") {
            Some(Self::ProdigalSon)
        } else {
            None
        }
    }
}

/// Continuation state for a story in progress within one session.
///
/// The cursor points at the next unseen part. Requesting a different story
/// replaces the context entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryContext {
    pub key: StoryKey,
    cursor: usize,
}

impl StoryContext {
    /// Starts a story from its first part.
    pub fn new(key: StoryKey) -> Self {
        Self { key, cursor: 0 }
    }

    /// Returns the next unseen part and advances the cursor.
    ///
    /// Returns `None` once all parts have been delivered; callers should
    /// clear the context at that point.
    pub fn advance(&mut self) -> Option<&'static str> {
        let part = self.key.parts().get(self.cursor).copied();
        if part.is_some() {
            self.cursor += 1;
        }
        part
    }

    /// Whether every part has been delivered.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.key.parts().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_story_has_parts() {
        for key in StoryKey::ALL {
            assert!(!key.parts().is_empty());
            assert!(!key.title().is_empty());
        }
    }

    #[test]
    fn advance_returns_parts_in_order_then_none() {
        let mut ctx = StoryContext::new(StoryKey::DavidGoliath);
        let parts = StoryKey::DavidGoliath.parts();

        for expected in parts {
            assert_eq!(ctx.advance(), Some(*expected));
        }
        assert!(ctx.is_exhausted());
        assert_eq!(ctx.advance(), None);
    }

    #[test]
    fn detect_finds_named_stories() {
        assert_eq!(
            StoryKey::detect("tell me about David and Goliath"),
            Some(StoryKey::DavidGoliath)
        );
        assert_eq!(
            StoryKey::detect("the red sea crossing"),
            Some(StoryKey::RedSea)
        );
        assert_eq!(StoryKey::detect("how was your day"), None);
    }
}
