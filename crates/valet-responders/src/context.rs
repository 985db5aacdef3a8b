// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared prompt-assembly helpers for responders.

use valet_core::types::{AgentRequest, ChatMessage, Message, Role};

/// Converts a session transcript into wire messages.
///
/// System turns are dropped: each responder supplies its own system
/// prompt, and stored transcripts only carry user/assistant turns anyway.
pub fn conversation_messages(history: &[Message]) -> Vec<ChatMessage> {
    history
        .iter()
        .filter(|m| matches!(m.role, Role::User | Role::Assistant))
        .map(|m| ChatMessage::new(m.role, m.content.clone()))
        .collect()
}

/// Summarizes who the user is right now: name, mood, time of day, and
/// their top three goals by priority.
pub fn user_context_block(request: &AgentRequest) -> String {
    let profile = &request.context.user_profile;
    let mut parts = vec![
        format!("User: {}", profile.name),
        format!("Current mood: {}", profile.mood_state.mood),
        format!("Time of day: {}", request.context.time_of_day),
    ];

    if !profile.goals.is_empty() {
        let mut goals = profile.goals.clone();
        goals.sort_by(|a, b| b.priority.cmp(&a.priority));
        let titles: Vec<&str> = goals.iter().take(3).map(|g| g.title.as_str()).collect();
        parts.push(format!("Top goals: {}", titles.join(", ")));
    }

    parts.join("\n")
}
