// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Affect responder: mood detection, emotional support, and motivation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, error};

use valet_core::types::{
    Achievement, Action, ActionKind, AgentRequest, AgentResponse, AgentTag, ChatMessage,
    Goal, Mood, ResponderVariant, Role,
};
use valet_core::ValetError;
use valet_llm::FallbackClient;
use valet_memory::MemoryRetriever;

use crate::context::conversation_messages;
use crate::mood::classify_mood;
use crate::Responder;

const SYSTEM_PROMPT: &str = "\
You are the emotional-support component of Valet, a personal assistant.

Your responsibilities:
- Detect and respond to emotional states (frustration, sadness, stress, excitement)
- Provide motivation and encouragement when needed
- Reference past achievements to boost confidence
- Suggest self-care and work-life balance
- Celebrate wins and progress

Communication style:
- Empathetic yet practical
- Supportive like a trusted friend
- Never patronizing; treat the user as capable and intelligent

You are not a therapist, but a supportive friend who knows the user well.";

const FALLBACK_REPLY: &str = "I'm here for you. How can I support you right now?";

/// Handles emotional and motivational requests.
pub struct AffectResponder {
    client: Arc<FallbackClient>,
    retriever: Arc<MemoryRetriever>,
}

impl AffectResponder {
    pub fn new(client: Arc<FallbackClient>, retriever: Arc<MemoryRetriever>) -> Self {
        Self { client, retriever }
    }

    async fn run(&self, request: &AgentRequest) -> Result<AgentResponse, ValetError> {
        let detected_mood = classify_mood(&request.input);
        debug!(mood = %detected_mood, "classified utterance mood");

        let memory_context = self
            .retriever
            .context_for(&request.user_id, &request.input)
            .await;

        let profile = &request.context.user_profile;
        let achievements = format_achievements(&profile.achievements);
        let goals = format_goals(&profile.goals);

        let mut messages = conversation_messages(&request.context.history);
        messages.push(ChatMessage::new(
            Role::User,
            format!(
                "Current emotional state: {}\nDetected mood in message: {}\n\n\
                 Recent achievements:\n{achievements}\n\n\
                 Current goals:\n{goals}\n\n\
                 {memory_context}\n\n\
                 User message: {}\n\n\
                 Provide an empathetic, supportive response, motivation or \
                 encouragement if needed, practical suggestions for well-being, \
                 and references to past successes if relevant.",
                profile.mood_state.mood, detected_mood, request.input
            ),
        ));

        let reply = self
            .client
            .complete(&messages, Some(SYSTEM_PROMPT), 2000, 0.8)
            .await?;
        let actions = suggest_actions(detected_mood, &reply);

        Ok(AgentResponse {
            id: uuid::Uuid::new_v4().to_string(),
            tag: AgentTag::Affect,
            content: reply,
            actions,
            should_vocalize: true,
            confidence: 0.85,
            reasoning: Some(format!("Emotional analysis: detected {detected_mood}")),
        })
    }
}

#[async_trait]
impl Responder for AffectResponder {
    fn variant(&self) -> ResponderVariant {
        ResponderVariant::Affect
    }

    async fn process(&self, request: &AgentRequest) -> AgentResponse {
        match self.run(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "affect responder failed");
                AgentResponse {
                    id: uuid::Uuid::new_v4().to_string(),
                    tag: AgentTag::Affect,
                    content: FALLBACK_REPLY.to_string(),
                    actions: Vec::new(),
                    should_vocalize: true,
                    confidence: 0.5,
                    reasoning: None,
                }
            }
        }
    }
}

/// Suggests follow-up actions from the detected mood and the reply text.
///
/// Contact suggestions are gated on a negative mood AND the reply itself
/// raising the idea ("reach out" / "connect"); self-care reminders fire on
/// the reply alone.
fn suggest_actions(mood: Mood, reply: &str) -> Vec<Action> {
    let lower = reply.to_lowercase();
    let mut actions = Vec::new();

    if matches!(mood, Mood::Stressed | Mood::Sad | Mood::Frustrated)
        && (lower.contains("reach out") || lower.contains("connect"))
    {
        let mut details = Map::new();
        details.insert("type".to_string(), Value::String("suggest_contact".into()));
        details.insert(
            "reason".to_string(),
            Value::String("emotional_support".into()),
        );
        actions.push(Action::pending(ActionKind::Contact, details));
    }

    if lower.contains("break") || lower.contains("rest") {
        let mut details = Map::new();
        details.insert(
            "type".to_string(),
            Value::String("self_care_reminder".into()),
        );
        details.insert("activity".to_string(), Value::String("take a break".into()));
        actions.push(Action::pending(ActionKind::Reminder, details));
    }

    actions
}

fn format_achievements(achievements: &[Achievement]) -> String {
    if achievements.is_empty() {
        return "Building your achievement history...".to_string();
    }

    achievements
        .iter()
        .take(3)
        .map(|a| {
            format!(
                "- {} ({}): {}",
                a.title,
                a.date.format("%B %Y"),
                a.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_goals(goals: &[Goal]) -> String {
    if goals.is_empty() {
        return "Ready to set some goals...".to_string();
    }

    goals
        .iter()
        .take(3)
        .map(|g| format!("- {} ({:.0}% complete)", g.title, g.progress * 100.0))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use valet_config::MemoryConfig;
    use valet_services::InMemoryStore;
    use valet_test_utils::{sample_request, MockBackend, MockEmbedder};

    fn quiet_retriever() -> Arc<MemoryRetriever> {
        Arc::new(MemoryRetriever::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(MockEmbedder::new()),
            MemoryConfig::default(),
        ))
    }

    fn responder_with_reply(reply: &str) -> AffectResponder {
        let backend = Arc::new(MockBackend::with_responses(
            "mock",
            vec![reply.to_string()],
        ));
        AffectResponder::new(
            Arc::new(FallbackClient::new(vec![backend])),
            quiet_retriever(),
        )
    }

    #[tokio::test]
    async fn reasoning_names_the_detected_mood() {
        let responder = responder_with_reply("That sounds hard.");
        let response = responder
            .process(&sample_request("I'm so stressed about the deadline"))
            .await;

        assert_eq!(response.tag, AgentTag::Affect);
        assert_eq!(response.confidence, 0.85);
        assert_eq!(
            response.reasoning.as_deref(),
            Some("Emotional analysis: detected stressed")
        );
    }

    #[tokio::test]
    async fn stressed_plus_reach_out_suggests_contact() {
        let responder =
            responder_with_reply("You could reach out to a friend tonight.");
        let response = responder.process(&sample_request("I'm so stressed")).await;

        assert_eq!(response.actions.len(), 1);
        assert_eq!(response.actions[0].kind, ActionKind::Contact);
        assert_eq!(response.actions[0].details["reason"], "emotional_support");
    }

    #[tokio::test]
    async fn happy_mood_never_suggests_contact() {
        let responder =
            responder_with_reply("Wonderful! You should connect with your team.");
        let response = responder
            .process(&sample_request("I'm so happy about the launch"))
            .await;
        assert!(
            response.actions.is_empty(),
            "contact suggestion requires a negative mood"
        );
    }

    #[tokio::test]
    async fn break_suggestion_adds_self_care_reminder() {
        let responder = responder_with_reply("Maybe take a short break this afternoon.");
        let response = responder.process(&sample_request("I feel fine")).await;

        assert_eq!(response.actions.len(), 1);
        assert_eq!(response.actions[0].kind, ActionKind::Reminder);
        assert_eq!(response.actions[0].details["type"], "self_care_reminder");
        assert_eq!(response.actions[0].details["activity"], "take a break");
    }

    #[tokio::test]
    async fn completion_failure_degrades_to_fallback_reply() {
        let responder = AffectResponder::new(
            Arc::new(FallbackClient::new(vec![])),
            quiet_retriever(),
        );
        let response = responder.process(&sample_request("I'm sad")).await;

        assert_eq!(response.content, FALLBACK_REPLY);
        assert_eq!(response.confidence, 0.5);
        assert!(response.actions.is_empty());
    }

    #[test]
    fn empty_achievements_and_goals_have_placeholders() {
        assert_eq!(format_achievements(&[]), "Building your achievement history...");
        assert_eq!(format_goals(&[]), "Ready to set some goals...");
    }
}
