// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared domain fixtures for workspace tests.

use chrono::{Duration, Utc};

use valet_core::types::{
    AgentRequest, ConversationContext, Goal, GoalCategory, Modality, UserProfile,
};

/// A profile with two goals: one urgent-and-important (priority 9 with a
/// deadline tomorrow), one merely tracked (priority 5, no deadline).
pub fn sample_profile() -> UserProfile {
    let mut profile = UserProfile::default_for("test-user", "Test User", "test@example.com");
    profile.goals = vec![
        Goal {
            id: "goal-1".to_string(),
            title: "Ship the quarterly release".to_string(),
            description: "Final review and launch".to_string(),
            priority: 9,
            deadline: Some(Utc::now() + Duration::days(1)),
            progress: 0.7,
            category: GoalCategory::Career,
        },
        Goal {
            id: "goal-2".to_string(),
            title: "Exercise three times a week".to_string(),
            description: String::new(),
            priority: 5,
            deadline: None,
            progress: 0.2,
            category: GoalCategory::Health,
        },
    ];
    profile
}

/// A fresh conversation context (empty history, morning).
pub fn sample_context() -> ConversationContext {
    ConversationContext {
        session_id: "test-session".to_string(),
        history: Vec::new(),
        user_profile: sample_profile(),
        time_of_day: "morning".to_string(),
    }
}

/// A text request carrying the sample context.
pub fn sample_request(input: &str) -> AgentRequest {
    AgentRequest {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: "test-user".to_string(),
        modality: Modality::Text,
        input: input.to_string(),
        context: sample_context(),
        timestamp: Utc::now(),
    }
}
