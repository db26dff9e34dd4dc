//! Response chunking for sequential delivery.
//!
//! Long responses are split into voice-friendly chunks: text is divided into
//! sentences on terminal punctuation, then sentences are greedily packed into
//! chunks no longer than the configured limit. A single sentence longer than
//! the limit becomes its own chunk, unsplit. Deterministic for identical input.

/// Splits `text` into delivery chunks of at most `limit` characters.
///
/// Text already within the limit comes back as a single chunk. Empty or
/// whitespace-only input yields no chunks.
pub fn chunk_text(text: &str, limit: usize) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    // Length is counted in characters, not bytes, so emoji and typographic
    // punctuation don't shrink the effective limit.
    if trimmed.chars().count() <= limit {
        return vec![trimmed.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for sentence in split_sentences(trimmed) {
        let sentence_len = sentence.chars().count();
        let candidate_len = if current.is_empty() {
            sentence_len
        } else {
            current_len + 1 + sentence_len
        };

        if candidate_len <= limit {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&sentence);
            current_len = candidate_len;
        } else {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            // An oversized sentence stays whole rather than being cut mid-thought
            current = sentence;
            current_len = sentence_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Splits text into sentences, each ending in terminal punctuation.
///
/// Runs of terminal punctuation ("?!", "...") stay attached to their
/// sentence. A trailing fragment without punctuation gets a period appended
/// so every chunk ends cleanly.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if is_terminal(c) {
            // Consume the rest of a punctuation run
            while let Some(&next) = chars.peek() {
                if is_terminal(next) {
                    current.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            let sentence = current.trim().to_string();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            current.clear();
        }
    }

    let tail = current.trim();
    if !tail.is_empty() {
        sentences.push(format!("{}.", tail));
    }

    sentences
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn short_text_is_single_chunk() {
        let text = "God is our refuge and strength, an ever-present help in trouble.";
        let chunks = chunk_text(text, 350);
        assert_eq!(chunks, vec![text.to_string()]);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunk_text("", 350).is_empty());
        assert!(chunk_text("   ", 350).is_empty());
    }

    #[test]
    fn long_text_splits_on_sentences() {
        let sentence = "This sentence is repeated to build a long response for splitting.";
        let text = vec![sentence; 16].join(" "); // ~1060 chars
        let chunks = chunk_text(&text, 350);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= 350, "chunk too long: {}", chunk.len());
            let last = chunk.chars().last().unwrap();
            assert!(is_terminal(last), "chunk missing terminal punctuation");
        }
    }

    #[test]
    fn chunks_reconstruct_original_content() {
        let sentence = "Trust in the Lord with all your heart and lean not on your own understanding.";
        let text = vec![sentence; 14].join(" "); // ~1090 chars
        let chunks = chunk_text(&text, 350);

        let rejoined = chunks.join(" ");
        let normalize = |s: &str| s.split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(normalize(&rejoined), normalize(&text));
    }

    #[test]
    fn limit_counts_characters_not_bytes() {
        let text = "Hope 💙 anchors the soul. Grace 💙 carries us through.";
        assert!(text.len() > 55, "text must exceed the limit in bytes");
        assert_eq!(text.chars().count(), 52);

        assert_eq!(chunk_text(text, 55), vec![text.to_string()]);
    }

    #[test]
    fn oversized_sentence_kept_whole() {
        let long_sentence = format!("{}.", "word ".repeat(100).trim());
        assert!(long_sentence.len() > 350);
        let chunks = chunk_text(&long_sentence, 350);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], long_sentence);
    }

    #[test]
    fn unpunctuated_tail_gains_period() {
        let text = format!("{} And then it trails off without punctuation", "First sentence ends here. ".repeat(14));
        let chunks = chunk_text(&text, 350);
        let last_chunk = chunks.last().unwrap();
        assert!(last_chunk.ends_with('.'));
    }

    #[test]
    fn punctuation_runs_stay_attached() {
        let sentences = split_sentences("Really?! Yes. Wait...");
        assert_eq!(sentences, vec!["Really?!", "Yes.", "Wait..."]);
    }

    proptest! {
        #[test]
        fn chunking_is_deterministic(text in ".{0,600}") {
            prop_assert_eq!(chunk_text(&text, 350), chunk_text(&text, 350));
        }

        #[test]
        fn chunks_never_empty(text in ".{0,600}") {
            for chunk in chunk_text(&text, 120) {
                prop_assert!(!chunk.trim().is_empty());
            }
        }
    }
}
