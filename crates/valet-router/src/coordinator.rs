// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The coordinator: routes an utterance to responders and synthesizes
//! their answers into a single reply.
//!
//! `handle` never returns an error. Every failure path degrades to a
//! lower-confidence response so the conversation keeps moving.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use valet_core::types::{
    AgentRequest, AgentResponse, AgentTag, ChatMessage, ResponderVariant, Role,
};
use valet_llm::FallbackClient;
use valet_responders::context::conversation_messages;
use valet_responders::Responder;

use crate::selection::select_variants;

const SYSTEM_PROMPT: &str = "\
You are Valet, a personal assistant. You coordinate specialized components
for logistics, emotional support, and prioritization, and you speak to the
user in one consistent voice: warm, capable, and concise.";

const CLASSIFY_PROMPT: &str = "\
Classify the user message into one or more of these categories:
LOGISTICS (email, calendar, scheduling, tasks),
AFFECT (emotions, motivation, well-being),
PRIORITIZATION (goals, focus, planning, what to do next).
Reply with the matching category names only, comma-separated.";

const SYNTHESIS_PROMPT: &str = "\
Several specialized components have each answered the user's message.
Combine their answers into one natural, coherent reply in Valet's voice.
Do not mention the components or repeat information.";

const UNAVAILABLE_REPLY: &str =
    "I'm experiencing some technical difficulties. Give me a moment.";

/// Routes requests to responders and merges their answers.
pub struct Coordinator {
    responders: Vec<Arc<dyn Responder>>,
    client: Arc<FallbackClient>,
}

impl Coordinator {
    pub fn new(responders: Vec<Arc<dyn Responder>>, client: Arc<FallbackClient>) -> Self {
        Self { responders, client }
    }

    /// Answers a request. Never fails; the worst case is a canned
    /// low-confidence reply.
    pub async fn handle(&self, request: &AgentRequest) -> AgentResponse {
        let mut variants = select_variants(&request.input);
        if variants.is_empty() {
            variants = self.classify_with_model(&request.input).await;
        }
        info!(
            request_id = %request.id,
            variants = ?variants,
            "routing request"
        );

        let selected: Vec<Arc<dyn Responder>> = variants
            .iter()
            .filter_map(|v| self.responder_for(*v))
            .collect();

        match selected.len() {
            0 => self.direct_response(request).await,
            1 => selected[0].process(request).await,
            _ => {
                let responses = self.run_concurrently(&selected, request).await;
                if responses.is_empty() {
                    self.direct_response(request).await
                } else {
                    self.synthesize(request, responses).await
                }
            }
        }
    }

    fn responder_for(&self, variant: ResponderVariant) -> Option<Arc<dyn Responder>> {
        let found = self.responders.iter().find(|r| r.variant() == variant);
        if found.is_none() {
            warn!(variant = %variant, "no responder registered for variant");
        }
        found.cloned()
    }

    /// Falls back to the model when no keyword table matched. Any failure
    /// or unrecognized answer defaults to logistics.
    async fn classify_with_model(&self, input: &str) -> Vec<ResponderVariant> {
        let messages = vec![ChatMessage::new(Role::User, input)];
        let reply = match self
            .client
            .complete(&messages, Some(CLASSIFY_PROMPT), 100, 0.3)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "classification call failed, defaulting to logistics");
                return vec![ResponderVariant::Logistics];
            }
        };

        let lower = reply.to_lowercase();
        let mut variants = Vec::new();
        if lower.contains("logistics") {
            variants.push(ResponderVariant::Logistics);
        }
        if lower.contains("affect") {
            variants.push(ResponderVariant::Affect);
        }
        if lower.contains("prioritization") {
            variants.push(ResponderVariant::Prioritization);
        }

        if variants.is_empty() {
            debug!(reply = %reply, "unrecognized classification, defaulting to logistics");
            variants.push(ResponderVariant::Logistics);
        }
        variants
    }

    /// Runs the selected responders concurrently and collects their
    /// responses in invocation order. A panicked task is logged and
    /// dropped; the rest still count. Dropping the returned future
    /// (caller cancelled) aborts any task still in flight.
    async fn run_concurrently(
        &self,
        selected: &[Arc<dyn Responder>],
        request: &AgentRequest,
    ) -> Vec<AgentResponse> {
        let mut tasks = JoinSet::new();
        for (index, responder) in selected.iter().enumerate() {
            let responder = Arc::clone(responder);
            let request = request.clone();
            tasks.spawn(async move { (index, responder.process(&request).await) });
        }

        let mut slots: Vec<Option<AgentResponse>> = Vec::new();
        slots.resize_with(selected.len(), || None);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, response)) => slots[index] = Some(response),
                Err(e) => warn!(error = %e, "responder task failed"),
            }
        }
        slots.into_iter().flatten().collect()
    }

    /// Merges multiple responses into one coordinator reply. If the
    /// synthesis call fails, the first response wins as-is.
    async fn synthesize(
        &self,
        request: &AgentRequest,
        mut responses: Vec<AgentResponse>,
    ) -> AgentResponse {
        let blocks: Vec<String> = responses
            .iter()
            .map(|r| format!("[{}]: {}", r.tag.to_string().to_uppercase(), r.content))
            .collect();

        let messages = vec![ChatMessage::new(
            Role::User,
            format!(
                "User message: {}\n\nComponent answers:\n{}",
                request.input,
                blocks.join("\n\n")
            ),
        )];

        let actions = responses
            .iter()
            .flat_map(|r| r.actions.iter().cloned())
            .collect();

        match self
            .client
            .complete(&messages, Some(SYNTHESIS_PROMPT), 1500, 0.7)
            .await
        {
            Ok(content) => AgentResponse {
                id: uuid::Uuid::new_v4().to_string(),
                tag: AgentTag::Coordinator,
                content,
                actions,
                should_vocalize: true,
                confidence: 0.9,
                reasoning: Some("Multi-agent coordination".to_string()),
            },
            Err(e) => {
                warn!(error = %e, "synthesis failed, returning first component answer");
                responses.remove(0)
            }
        }
    }

    /// Answers directly when no responder can. Conversation history is
    /// kept so short follow-ups still make sense.
    async fn direct_response(&self, request: &AgentRequest) -> AgentResponse {
        let mut messages = conversation_messages(&request.context.history);
        messages.push(ChatMessage::new(Role::User, request.input.clone()));

        match self
            .client
            .complete(&messages, Some(SYSTEM_PROMPT), 1000, 0.7)
            .await
        {
            Ok(content) => AgentResponse {
                id: uuid::Uuid::new_v4().to_string(),
                tag: AgentTag::Coordinator,
                content,
                actions: Vec::new(),
                should_vocalize: true,
                confidence: 0.75,
                reasoning: Some("Direct response".to_string()),
            },
            Err(e) => {
                warn!(error = %e, "direct response failed");
                AgentResponse {
                    id: uuid::Uuid::new_v4().to_string(),
                    tag: AgentTag::Coordinator,
                    content: UNAVAILABLE_REPLY.to_string(),
                    actions: Vec::new(),
                    should_vocalize: true,
                    confidence: 0.3,
                    reasoning: None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Map;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use valet_core::types::{Action, ActionKind};
    use valet_test_utils::{sample_request, MockBackend};

    /// A canned responder that counts invocations.
    struct StubResponder {
        variant: ResponderVariant,
        reply: String,
        actions: Vec<Action>,
        calls: AtomicUsize,
        panic_on_call: bool,
    }

    impl StubResponder {
        fn new(variant: ResponderVariant, reply: &str) -> Arc<Self> {
            Arc::new(Self {
                variant,
                reply: reply.to_string(),
                actions: Vec::new(),
                calls: AtomicUsize::new(0),
                panic_on_call: false,
            })
        }

        fn with_action(variant: ResponderVariant, reply: &str, kind: ActionKind) -> Arc<Self> {
            Arc::new(Self {
                variant,
                reply: reply.to_string(),
                actions: vec![Action::pending(kind, Map::new())],
                calls: AtomicUsize::new(0),
                panic_on_call: false,
            })
        }

        fn panicking(variant: ResponderVariant) -> Arc<Self> {
            Arc::new(Self {
                variant,
                reply: String::new(),
                actions: Vec::new(),
                calls: AtomicUsize::new(0),
                panic_on_call: true,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Responder for StubResponder {
        fn variant(&self) -> ResponderVariant {
            self.variant
        }

        async fn process(&self, _request: &AgentRequest) -> AgentResponse {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.panic_on_call {
                panic!("stub responder panic");
            }
            AgentResponse {
                id: uuid::Uuid::new_v4().to_string(),
                tag: self.variant.into(),
                content: self.reply.clone(),
                actions: self.actions.clone(),
                should_vocalize: true,
                confidence: 0.9,
                reasoning: None,
            }
        }
    }

    /// A responder that takes a while and records whether it finished.
    struct SlowResponder {
        variant: ResponderVariant,
        finished: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Responder for SlowResponder {
        fn variant(&self) -> ResponderVariant {
            self.variant
        }

        async fn process(&self, _request: &AgentRequest) -> AgentResponse {
            tokio::time::sleep(std::time::Duration::from_millis(300)).await;
            self.finished.fetch_add(1, Ordering::SeqCst);
            AgentResponse {
                id: uuid::Uuid::new_v4().to_string(),
                tag: self.variant.into(),
                content: "slow answer".to_string(),
                actions: Vec::new(),
                should_vocalize: true,
                confidence: 0.9,
                reasoning: None,
            }
        }
    }

    fn stub_trio() -> (Arc<StubResponder>, Arc<StubResponder>, Arc<StubResponder>) {
        (
            StubResponder::new(ResponderVariant::Logistics, "logistics answer"),
            StubResponder::new(ResponderVariant::Affect, "affect answer"),
            StubResponder::new(ResponderVariant::Prioritization, "prioritization answer"),
        )
    }

    fn coordinator_with(
        responders: Vec<Arc<dyn Responder>>,
        backend: Option<Arc<MockBackend>>,
    ) -> Coordinator {
        let backends: Vec<Arc<dyn valet_core::CompletionBackend>> = match backend {
            Some(b) => vec![b],
            None => vec![],
        };
        Coordinator::new(responders, Arc::new(FallbackClient::new(backends)))
    }

    #[tokio::test]
    async fn focus_question_routes_to_prioritization_only() {
        let (log, aff, pri) = stub_trio();
        let coordinator = coordinator_with(
            vec![log.clone(), aff.clone(), pri.clone()],
            Some(Arc::new(MockBackend::new("mock"))),
        );

        let response = coordinator
            .handle(&sample_request("What should I focus on today?"))
            .await;

        assert_eq!(response.content, "prioritization answer");
        assert_eq!(response.tag, AgentTag::Prioritization);
        assert_eq!(pri.calls(), 1);
        assert_eq!(log.calls(), 0);
        assert_eq!(aff.calls(), 0);
    }

    #[tokio::test]
    async fn multi_variant_requests_are_synthesized() {
        let log = StubResponder::with_action(
            ResponderVariant::Logistics,
            "logistics answer",
            ActionKind::Calendar,
        );
        let aff = StubResponder::with_action(
            ResponderVariant::Affect,
            "affect answer",
            ActionKind::Contact,
        );
        let backend = Arc::new(MockBackend::with_responses(
            "mock",
            vec!["a combined reply".to_string()],
        ));
        let coordinator = coordinator_with(vec![log.clone(), aff.clone()], Some(backend.clone()));

        let response = coordinator
            .handle(&sample_request("I'm stressed about my calendar"))
            .await;

        assert_eq!(response.tag, AgentTag::Coordinator);
        assert_eq!(response.content, "a combined reply");
        assert_eq!(response.confidence, 0.9);
        assert_eq!(response.reasoning.as_deref(), Some("Multi-agent coordination"));
        // Actions from both responders are carried through.
        assert_eq!(response.actions.len(), 2);
        assert_eq!(response.actions[0].kind, ActionKind::Calendar);
        assert_eq!(response.actions[1].kind, ActionKind::Contact);

        let prompt = backend.last_messages().await.last().unwrap().content.clone();
        assert!(prompt.contains("[LOGISTICS]: logistics answer"));
        assert!(prompt.contains("[AFFECT]: affect answer"));
    }

    #[tokio::test]
    async fn synthesis_failure_returns_first_component_answer() {
        let (log, aff, _) = stub_trio();
        let coordinator = coordinator_with(vec![log, aff], None);

        let response = coordinator
            .handle(&sample_request("I'm stressed about my calendar"))
            .await;

        assert_eq!(response.tag, AgentTag::Logistics);
        assert_eq!(response.content, "logistics answer");
    }

    #[tokio::test]
    async fn panicked_responders_fall_back_to_direct_response() {
        let log = StubResponder::panicking(ResponderVariant::Logistics);
        let aff = StubResponder::panicking(ResponderVariant::Affect);
        let backend = Arc::new(MockBackend::with_responses(
            "mock",
            vec!["a direct reply".to_string()],
        ));
        let coordinator = coordinator_with(vec![log, aff], Some(backend));

        let response = coordinator
            .handle(&sample_request("I'm stressed about my calendar"))
            .await;

        assert_eq!(response.tag, AgentTag::Coordinator);
        assert_eq!(response.content, "a direct reply");
        assert_eq!(response.confidence, 0.75);
        assert_eq!(response.reasoning.as_deref(), Some("Direct response"));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_requests_abort_inflight_responders() {
        let finished = Arc::new(AtomicUsize::new(0));
        let log = Arc::new(SlowResponder {
            variant: ResponderVariant::Logistics,
            finished: finished.clone(),
        });
        let aff = Arc::new(SlowResponder {
            variant: ResponderVariant::Affect,
            finished: finished.clone(),
        });
        let coordinator = Arc::new(coordinator_with(
            vec![log, aff],
            Some(Arc::new(MockBackend::new("mock"))),
        ));

        let handle = tokio::spawn({
            let coordinator = Arc::clone(&coordinator);
            let request = sample_request("I'm stressed about my calendar");
            async move { coordinator.handle(&request).await }
        });

        // Let both responder tasks start, then cancel the request while
        // they are still sleeping.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        handle.abort();

        // Well past the responders' sleep; if the tasks had survived the
        // abort they would have finished by now.
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
        assert_eq!(
            finished.load(Ordering::SeqCst),
            0,
            "cancelled request left responder tasks running"
        );
    }

    #[tokio::test]
    async fn unmatched_input_is_classified_by_the_model() {
        let (log, aff, pri) = stub_trio();
        let backend = Arc::new(MockBackend::with_responses(
            "mock",
            vec!["AFFECT".to_string()],
        ));
        let coordinator =
            coordinator_with(vec![log.clone(), aff.clone(), pri.clone()], Some(backend));

        let response = coordinator.handle(&sample_request("tell me a joke")).await;

        assert_eq!(response.content, "affect answer");
        assert_eq!(aff.calls(), 1);
        assert_eq!(log.calls(), 0);
    }

    #[tokio::test]
    async fn classification_failure_defaults_to_logistics() {
        let (log, aff, pri) = stub_trio();
        let coordinator = coordinator_with(vec![log.clone(), aff, pri], None);

        let response = coordinator.handle(&sample_request("tell me a joke")).await;

        assert_eq!(response.content, "logistics answer");
        assert_eq!(log.calls(), 1);
    }

    #[tokio::test]
    async fn unrecognized_classification_defaults_to_logistics() {
        let (log, aff, pri) = stub_trio();
        let backend = Arc::new(MockBackend::with_responses(
            "mock",
            vec!["no idea".to_string()],
        ));
        let coordinator = coordinator_with(vec![log.clone(), aff, pri], Some(backend));

        let response = coordinator.handle(&sample_request("tell me a joke")).await;
        assert_eq!(response.content, "logistics answer");
    }

    #[tokio::test]
    async fn no_registered_responders_answers_directly() {
        let backend = Arc::new(MockBackend::with_responses(
            "mock",
            vec!["LOGISTICS".to_string(), "a direct reply".to_string()],
        ));
        let coordinator = coordinator_with(vec![], Some(backend));

        let response = coordinator.handle(&sample_request("tell me a joke")).await;
        assert_eq!(response.tag, AgentTag::Coordinator);
        assert_eq!(response.content, "a direct reply");
    }

    #[tokio::test]
    async fn everything_down_returns_canned_reply() {
        let coordinator = coordinator_with(vec![], None);
        let response = coordinator.handle(&sample_request("tell me a joke")).await;

        assert_eq!(response.content, UNAVAILABLE_REPLY);
        assert_eq!(response.confidence, 0.3);
    }
}
