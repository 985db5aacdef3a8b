// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prioritization responder: Eisenhower-style goal triage and strategy.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::error;

use valet_core::types::{
    AgentRequest, AgentResponse, AgentTag, ChatMessage, Goal, ResponderVariant, Role,
};
use valet_core::ValetError;
use valet_llm::FallbackClient;
use valet_memory::MemoryRetriever;

use crate::actions::{extract_actions, PRIORITIZATION_ACTION_RULES};
use crate::context::conversation_messages;
use crate::Responder;

const SYSTEM_PROMPT: &str = "\
You are the strategic-prioritization component of Valet, a personal assistant.

Your responsibilities:
- Rank competing demands on the user's time and attention
- Track goals and deadlines, and flag what is slipping
- Recommend what to do next and what to defer or drop
- Think a step ahead: anticipate conflicts before they surface

Communication style:
- Analytical and decisive
- Concrete recommendations, not open-ended lists of options
- Brief justifications the user can act on immediately

Always recommend a single clear next step before anything else.";

const FALLBACK_REPLY: &str = "Let me help you think through the priorities here.";

/// Handles priority, focus, and planning requests.
pub struct PrioritizationResponder {
    client: Arc<FallbackClient>,
    retriever: Arc<MemoryRetriever>,
}

impl PrioritizationResponder {
    pub fn new(client: Arc<FallbackClient>, retriever: Arc<MemoryRetriever>) -> Self {
        Self { client, retriever }
    }

    async fn run(&self, request: &AgentRequest) -> Result<AgentResponse, ValetError> {
        let profile = &request.context.user_profile;
        let priority_breakdown = analyze_priorities(&profile.goals);

        let memory_context = self
            .retriever
            .context_for(
                &request.user_id,
                &format!("{} goals priorities", request.input),
            )
            .await;

        let mut messages = conversation_messages(&request.context.history);
        messages.push(ChatMessage::new(
            Role::User,
            format!(
                "Priority analysis of current goals:\n{priority_breakdown}\n\n\
                 {memory_context}\n\n\
                 User request: {}\n\n\
                 Recommend what to focus on, in what order, and why. Flag any \
                 deadline risks and suggest time blocks or research where useful.",
                request.input
            ),
        ));

        let reply = self
            .client
            .complete(&messages, Some(SYSTEM_PROMPT), 2000, 0.6)
            .await?;
        let actions = extract_actions(PRIORITIZATION_ACTION_RULES, &reply);

        Ok(AgentResponse {
            id: uuid::Uuid::new_v4().to_string(),
            tag: AgentTag::Prioritization,
            content: reply,
            actions,
            should_vocalize: true,
            confidence: 0.88,
            reasoning: Some("Strategic priority analysis with foresight".to_string()),
        })
    }
}

#[async_trait]
impl Responder for PrioritizationResponder {
    fn variant(&self) -> ResponderVariant {
        ResponderVariant::Prioritization
    }

    async fn process(&self, request: &AgentRequest) -> AgentResponse {
        match self.run(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "prioritization responder failed");
                AgentResponse {
                    id: uuid::Uuid::new_v4().to_string(),
                    tag: AgentTag::Prioritization,
                    content: FALLBACK_REPLY.to_string(),
                    actions: Vec::new(),
                    should_vocalize: true,
                    confidence: 0.4,
                    reasoning: None,
                }
            }
        }
    }
}

/// Buckets goals Eisenhower-style into a plain-text breakdown.
///
/// Urgent means a deadline exists; important means priority >= 7. Goals
/// are ranked by priority descending first, so the truncated buckets keep
/// the highest-priority entries. Goals that are neither urgent nor
/// important are deliberately left out of the breakdown.
pub fn analyze_priorities(goals: &[Goal]) -> String {
    if goals.is_empty() {
        return "No active goals set. Consider establishing some priorities.".to_string();
    }

    let now = Utc::now();

    // Stable sort: equal priorities keep their input order.
    let mut ranked: Vec<&Goal> = goals.iter().collect();
    ranked.sort_by(|a, b| b.priority.cmp(&a.priority));

    let urgent_important: Vec<&Goal> = ranked
        .iter()
        .filter(|g| g.deadline.is_some() && g.priority >= 7)
        .copied()
        .collect();
    let important: Vec<&Goal> = ranked
        .iter()
        .filter(|g| g.deadline.is_none() && g.priority >= 7)
        .copied()
        .collect();
    let urgent: Vec<&Goal> = ranked
        .iter()
        .filter(|g| g.deadline.is_some() && g.priority < 7)
        .copied()
        .collect();

    let mut sections = Vec::new();

    if !urgent_important.is_empty() {
        let lines: Vec<String> = urgent_important
            .iter()
            .map(|g| {
                let days = g
                    .deadline
                    .map(|d| (d - now).num_days())
                    .unwrap_or_default();
                format!("- {} (priority {}, due in {} days)", g.title, g.priority, days)
            })
            .collect();
        sections.push(format!("Urgent and important:\n{}", lines.join("\n")));
    }

    if !important.is_empty() {
        let lines: Vec<String> = important
            .iter()
            .take(3)
            .map(|g| format!("- {} (priority {})", g.title, g.priority))
            .collect();
        sections.push(format!("Important, not urgent:\n{}", lines.join("\n")));
    }

    if !urgent.is_empty() {
        let lines: Vec<String> = urgent
            .iter()
            .take(2)
            .map(|g| {
                let days = g
                    .deadline
                    .map(|d| (d - now).num_days())
                    .unwrap_or_default();
                format!("- {} (due in {} days)", g.title, days)
            })
            .collect();
        sections.push(format!("Urgent, not important:\n{}", lines.join("\n")));
    }

    if sections.is_empty() {
        return "All goals are in good shape.".to_string();
    }

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use valet_config::MemoryConfig;
    use valet_core::types::{ActionKind, GoalCategory};
    use valet_services::InMemoryStore;
    use valet_test_utils::{sample_request, MockBackend, MockEmbedder};

    fn goal(title: &str, priority: u8, deadline_days: Option<i64>) -> Goal {
        Goal {
            id: title.to_string(),
            title: title.to_string(),
            description: String::new(),
            priority,
            deadline: deadline_days.map(|d| Utc::now() + Duration::days(d)),
            progress: 0.0,
            category: GoalCategory::Career,
        }
    }

    fn quiet_retriever() -> Arc<MemoryRetriever> {
        Arc::new(MemoryRetriever::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(MockEmbedder::new()),
            MemoryConfig::default(),
        ))
    }

    fn responder_with_reply(reply: &str) -> PrioritizationResponder {
        let backend = Arc::new(MockBackend::with_responses(
            "mock",
            vec![reply.to_string()],
        ));
        PrioritizationResponder::new(
            Arc::new(FallbackClient::new(vec![backend])),
            quiet_retriever(),
        )
    }

    #[test]
    fn no_goals_prompts_for_priorities() {
        assert_eq!(
            analyze_priorities(&[]),
            "No active goals set. Consider establishing some priorities."
        );
    }

    #[test]
    fn low_priority_undated_goals_are_in_good_shape() {
        let goals = vec![goal("Read more", 3, None)];
        assert_eq!(analyze_priorities(&goals), "All goals are in good shape.");
    }

    #[test]
    fn goals_land_in_the_right_buckets() {
        let goals = vec![
            goal("Ship release", 9, Some(2)),
            goal("Learn piano", 8, None),
            goal("Renew passport", 4, Some(10)),
        ];
        let breakdown = analyze_priorities(&goals);

        let ui = breakdown.find("Urgent and important:").unwrap();
        let imp = breakdown.find("Important, not urgent:").unwrap();
        let urg = breakdown.find("Urgent, not important:").unwrap();
        assert!(ui < imp && imp < urg, "sections keep their fixed order");
        assert!(breakdown.contains("Ship release (priority 9"));
        assert!(breakdown.contains("Learn piano (priority 8)"));
        assert!(breakdown.contains("Renew passport"));
    }

    #[test]
    fn important_bucket_caps_at_three_and_urgent_at_two() {
        let goals = vec![
            goal("a", 8, None),
            goal("b", 8, None),
            goal("c", 8, None),
            goal("d", 8, None),
            goal("x", 3, Some(1)),
            goal("y", 3, Some(2)),
            goal("z", 3, Some(3)),
        ];
        let breakdown = analyze_priorities(&goals);
        assert!(!breakdown.contains("- d "));
        assert!(!breakdown.contains("- z "));
    }

    #[test]
    fn truncation_keeps_the_highest_priority_goals() {
        let goals = vec![
            goal("lowest", 7, None),
            goal("low", 8, None),
            goal("high", 9, None),
            goal("highest", 10, None),
            goal("minor errand", 2, Some(5)),
            goal("bigger errand", 5, Some(5)),
            goal("small errand", 3, Some(5)),
        ];
        let breakdown = analyze_priorities(&goals);

        assert!(breakdown.contains("- highest (priority 10)"));
        assert!(breakdown.contains("- high (priority 9)"));
        assert!(breakdown.contains("- low (priority 8)"));
        assert!(
            !breakdown.contains("- lowest "),
            "the important bucket keeps the top three by priority"
        );

        assert!(breakdown.contains("- bigger errand"));
        assert!(breakdown.contains("- small errand"));
        assert!(
            !breakdown.contains("- minor errand"),
            "the urgent bucket keeps the top two by priority"
        );
    }

    #[tokio::test]
    async fn successful_reply_carries_extracted_actions() {
        let responder = responder_with_reply(
            "Focus on the release first. Block time tomorrow, the deadline is close.",
        );
        let response = responder
            .process(&sample_request("what should I focus on?"))
            .await;

        assert_eq!(response.tag, AgentTag::Prioritization);
        assert_eq!(response.confidence, 0.88);
        assert_eq!(response.actions.len(), 2);
        assert_eq!(response.actions[0].kind, ActionKind::Reminder);
        assert_eq!(response.actions[1].kind, ActionKind::Calendar);
    }

    #[tokio::test]
    async fn completion_failure_degrades_to_fallback_reply() {
        let responder = PrioritizationResponder::new(
            Arc::new(FallbackClient::new(vec![])),
            quiet_retriever(),
        );
        let response = responder
            .process(&sample_request("what should I focus on?"))
            .await;

        assert_eq!(response.content, FALLBACK_REPLY);
        assert_eq!(response.confidence, 0.4);
    }

    #[tokio::test]
    async fn prompt_includes_priority_breakdown() {
        let backend = Arc::new(MockBackend::new("mock"));
        let responder = PrioritizationResponder::new(
            Arc::new(FallbackClient::new(vec![backend.clone()])),
            quiet_retriever(),
        );
        responder
            .process(&sample_request("what should I focus on?"))
            .await;

        let prompt = backend.last_messages().await.last().unwrap().content.clone();
        assert!(prompt.contains("Priority analysis of current goals:"));
        assert!(prompt.contains("Ship the quarterly release"));
    }
}
