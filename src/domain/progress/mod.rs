//! Progress module - read-only gamification summaries.
//!
//! The XP/badge counters themselves live with an external collaborator; this
//! module only derives display summaries (level, next level, percent toward
//! it) from stored counters. Nothing here mutates state.

use serde::{Deserialize, Serialize};

/// Ordered level thresholds: (label, XP required to enter the level).
pub const LEVEL_THRESHOLDS: &[(&str, u32)] = &[
    ("Seed", 0),
    ("Shepherd", 10),
    ("Disciple", 25),
    ("Warrior", 50),
    ("Servant Leader", 100),
];

/// Badge catalog: (badge id, description).
pub const BADGES: &[(&str, &str)] = &[
    ("Faith Seed", "Started your spiritual journey"),
    ("Devotion Keeper", "3-day devotion streak"),
    ("Prayer Warrior", "5 prayer challenges completed"),
    ("Verse Sage", "Mastered 10 verses"),
    ("Peacemaker", "Completed a forgiveness prayer challenge"),
];

/// Derived progress overview for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub level: String,
    pub xp: u32,
    pub next_level: Option<String>,
    pub progress_percentage: f32,
    pub badges: Vec<String>,
    pub streak_days: u32,
}

impl ProgressSummary {
    /// Derives a summary from stored counters.
    pub fn from_counters(xp: u32, badges: Vec<String>, streak_days: u32) -> Self {
        let mut current_idx = 0;
        for (idx, (_, threshold)) in LEVEL_THRESHOLDS.iter().enumerate() {
            if xp >= *threshold {
                current_idx = idx;
            }
        }

        let (level, current_threshold) = LEVEL_THRESHOLDS[current_idx];
        let (next_level, progress_percentage) = match LEVEL_THRESHOLDS.get(current_idx + 1) {
            Some((next, next_threshold)) => {
                let span = next_threshold - current_threshold;
                let gained = xp - current_threshold;
                (
                    Some(next.to_string()),
                    ((gained as f32 / span as f32) * 100.0).min(100.0),
                )
            }
            None => (None, 100.0),
        };

        Self {
            level: level.to_string(),
            xp,
            next_level,
            progress_percentage,
            badges,
            streak_days,
        }
    }
}
