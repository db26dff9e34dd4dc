//! Age brackets and their persona fragments.

use serde::{Deserialize, Serialize};

/// User age segment used to shape the companion's tone.
///
/// Parsing is lenient; anything unrecognized resolves to [`AgeBracket::Adult`]
/// so persona building never fails on bad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBracket {
    GenZ,
    Millennial,
    #[default]
    Adult,
}

impl AgeBracket {
    /// Parses a caller-supplied bracket tag, falling back to `Adult`.
    pub fn parse(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_lowercase()).as_deref() {
            Some("gen_z") | Some("genz") | Some("gen-z") | Some("teen") | Some("13-17")
            | Some("18-24") => Self::GenZ,
            Some("millennial") | Some("25-34") | Some("35-44") => Self::Millennial,
            _ => Self::Adult,
        }
    }

    /// Tone fragment appended to the base persona prompt.
    pub fn tone(&self) -> &'static str {
        match self {
            Self::GenZ => {
                "Authentic, caring. Use 'no cap', 'fr fr', 'that hits different'. \
                 Like texting a spiritually-minded close friend."
            }
            Self::Millennial => {
                "Relatable, genuine. Acknowledge life's complexities while pointing \
                 to God's faithfulness. Like coffee with a wise friend."
            }
            Self::Adult => {
                "Warm, wise, deeply rooted in faith. Draw from Scripture and life's \
                 seasons. Like talking with a spiritual mentor."
            }
        }
    }

    /// Analogy vocabulary the persona should draw from.
    pub fn analogies(&self) -> &'static str {
        match self {
            Self::GenZ => {
                "Storms passing, seasons changing, rivers finding their way, seeds \
                 growing in darkness, mountains being moved"
            }
            Self::Millennial => {
                "Gardens needing patience, journeys with unexpected turns, dawn after \
                 long nights, bridges being built, wells running deep"
            }
            Self::Adult => {
                "Harvest seasons, pruning for growth, still waters, anchors holding \
                 in storms, shepherds guiding flocks"
            }
        }
    }
}
