// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword-based responder selection.
//!
//! Zero-cost routing: an utterance is scanned against per-variant keyword
//! tables and every variant with a hit is selected, in the fixed order
//! logistics, affect, prioritization. No network, no latency. Utterances
//! that hit no table fall through to the coordinator's model-based
//! classification.

use valet_core::types::ResponderVariant;

/// Inbox, calendar, and scheduling vocabulary.
pub const LOGISTICS_KEYWORDS: &[&str] = &[
    "email",
    "calendar",
    "schedule",
    "meeting",
    "appointment",
    "remind",
    "inbox",
    "send",
    "draft",
    "reschedule",
];

/// Emotional-state and support vocabulary.
pub const AFFECT_KEYWORDS: &[&str] = &[
    "feel",
    "stressed",
    "frustrated",
    "sad",
    "happy",
    "excited",
    "tired",
    "overwhelmed",
    "motivation",
    "support",
    "help me cope",
];

/// Priority, focus, and planning vocabulary.
pub const PRIORITIZATION_KEYWORDS: &[&str] = &[
    "priority",
    "prioritize",
    "what should",
    "which",
    "focus",
    "important",
    "urgent",
    "deadline",
    "goal",
    "strategy",
    "plan",
];

/// Selects every responder whose keyword table matches the utterance.
/// Case-insensitive substring match; the returned order is fixed.
pub fn select_variants(input: &str) -> Vec<ResponderVariant> {
    let lower = input.to_lowercase();
    let mut selected = Vec::new();

    if LOGISTICS_KEYWORDS.iter().any(|k| lower.contains(k)) {
        selected.push(ResponderVariant::Logistics);
    }
    if AFFECT_KEYWORDS.iter().any(|k| lower.contains(k)) {
        selected.push(ResponderVariant::Affect);
    }
    if PRIORITIZATION_KEYWORDS.iter().any(|k| lower.contains(k)) {
        selected.push(ResponderVariant::Prioritization);
    }

    selected
}
