// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declarative action extraction from reply text.
//!
//! Each responder scans its generated reply for trigger phrases and
//! attaches pending [`Action`]s. One rule yields at most one action per
//! reply, regardless of how many of its keywords match.

use serde_json::{Map, Value};

use valet_core::types::{Action, ActionKind};

/// A trigger-phrase rule: any keyword hit produces one pending action
/// whose details carry `{"type": detail}`.
pub struct ActionRule {
    pub keywords: &'static [&'static str],
    pub kind: ActionKind,
    pub detail: &'static str,
}

/// Rules for the logistics responder.
pub const LOGISTICS_ACTION_RULES: &[ActionRule] = &[
    ActionRule {
        keywords: &["send email", "draft"],
        kind: ActionKind::Email,
        detail: "draft_email",
    },
    ActionRule {
        keywords: &["schedule", "calendar"],
        kind: ActionKind::Calendar,
        detail: "schedule_event",
    },
    ActionRule {
        keywords: &["remind"],
        kind: ActionKind::Reminder,
        detail: "set_reminder",
    },
];

/// Rules for the prioritization responder.
pub const PRIORITIZATION_ACTION_RULES: &[ActionRule] = &[
    ActionRule {
        keywords: &["research", "look into"],
        kind: ActionKind::Research,
        detail: "strategic_research",
    },
    ActionRule {
        keywords: &["deadline", "due"],
        kind: ActionKind::Reminder,
        detail: "deadline_warning",
    },
    ActionRule {
        keywords: &["block time", "schedule"],
        kind: ActionKind::Calendar,
        detail: "time_blocking",
    },
];

/// Applies a rule table to a reply, in table order. Case-insensitive.
pub fn extract_actions(rules: &[ActionRule], reply: &str) -> Vec<Action> {
    let lower = reply.to_lowercase();
    rules
        .iter()
        .filter(|rule| rule.keywords.iter().any(|k| lower.contains(k)))
        .map(|rule| {
            let mut details = Map::new();
            details.insert("type".to_string(), Value::String(rule.detail.to_string()));
            Action::pending(rule.kind, details)
        })
        .collect()
}
