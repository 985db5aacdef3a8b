// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword-based mood classification.
//!
//! Rules are checked in a fixed order and the first hit wins, so an
//! utterance mixing signals ("stressed but happy") resolves to the
//! earlier rule. Changing the order changes behavior.

use valet_core::types::Mood;

/// One ordered classification rule.
pub struct MoodRule {
    pub indicators: &'static [&'static str],
    pub mood: Mood,
}

/// Negative-mood rules, checked first to last.
pub const MOOD_RULES: &[MoodRule] = &[
    MoodRule {
        indicators: &["frustrated", "annoyed", "stuck", "damn", "argh", "ugh"],
        mood: Mood::Frustrated,
    },
    MoodRule {
        indicators: &["sad", "down", "depressed", "lonely", "tired"],
        mood: Mood::Sad,
    },
    MoodRule {
        indicators: &["stressed", "overwhelmed", "anxious", "worried", "deadline"],
        mood: Mood::Stressed,
    },
];

/// Positive indicators, checked only after every negative rule misses.
/// They map to two moods: Excited iff "excited" occurs, otherwise Happy.
const POSITIVE_INDICATORS: &[&str] = &["great", "awesome", "excited", "happy", "amazing", "love"];

/// Classifies the mood of an utterance. Case-insensitive substring match.
pub fn classify_mood(text: &str) -> Mood {
    let lower = text.to_lowercase();

    for rule in MOOD_RULES {
        if rule.indicators.iter().any(|word| lower.contains(word)) {
            return rule.mood;
        }
    }

    if POSITIVE_INDICATORS.iter().any(|word| lower.contains(word)) {
        if lower.contains("excited") {
            Mood::Excited
        } else {
            Mood::Happy
        }
    } else {
        Mood::Neutral
    }
}
