// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the REST API.
//!
//! Handles POST /chat, GET /health, GET /profile/{user_id}, GET /.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Timelike;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use valet_core::types::{
    Action, AgentRequest, AgentTag, ConversationContext, Message, Modality, UserProfile,
};
use valet_core::{DocumentStore, VoiceSynthesizer};
use valet_services::audio_to_data_url;

use crate::server::GatewayState;

/// Request body for POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's utterance.
    pub message: String,
    /// Optional user to attribute the request to.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Optional session ID to continue an existing conversation.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Whether to synthesize the reply as audio.
    #[serde(default)]
    pub voice_enabled: bool,
}

/// Response body for POST /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// The assistant's reply text.
    pub response: String,
    /// Session ID (may be newly created).
    pub session_id: String,
    /// Which component authored the reply.
    pub agent: AgentTag,
    /// Suggested follow-up actions.
    pub actions: Vec<Action>,
    /// Base64 data URL of synthesized speech, if requested and available.
    pub audio_url: Option<String>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
}

/// Coarse clock label threaded into prompts.
pub fn time_of_day(hour: u32) -> &'static str {
    match hour {
        5..12 => "morning",
        12..17 => "afternoon",
        17..21 => "evening",
        _ => "night",
    }
}

/// POST /chat
///
/// Runs the full pipeline: load profile and session, route through the
/// coordinator, optionally synthesize audio, then persist the exchange to
/// the session transcript and semantic memory. Persistence failures are
/// logged, never surfaced; the reply always goes out.
pub async fn post_chat(
    State(state): State<GatewayState>,
    Json(body): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let user_id = body
        .user_id
        .unwrap_or_else(|| state.default_user_id.clone());
    let session_id = body
        .session_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let profile = state.store.get_profile(&user_id).await;
    let history = state.store.get_session(&session_id).await.unwrap_or_default();

    let request = AgentRequest {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user_id.clone(),
        modality: if body.voice_enabled {
            Modality::Voice
        } else {
            Modality::Text
        },
        input: body.message.clone(),
        context: ConversationContext {
            session_id: session_id.clone(),
            history: history.clone(),
            user_profile: profile,
            time_of_day: time_of_day(chrono::Local::now().hour()).to_string(),
        },
        timestamp: chrono::Utc::now(),
    };

    let response = state.coordinator.handle(&request).await;

    let audio_url = if body.voice_enabled && response.should_vocalize {
        state
            .voice
            .synthesize(&response.content)
            .await
            .map(|audio| audio_to_data_url(&audio))
    } else {
        None
    };

    let mut turns = history;
    turns.push(Message::user(&body.message));
    turns.push(Message::assistant(&response.content, response.tag));
    if let Err(e) = state.store.save_session(&session_id, &user_id, &turns).await {
        warn!(error = %e, session_id = %session_id, "failed to persist session");
    }

    let mut metadata = Map::new();
    metadata.insert("session_id".to_string(), Value::String(session_id.clone()));
    let remembered = state
        .retriever
        .add(
            &user_id,
            &format!("User: {}\nAssistant: {}", body.message, response.content),
            "conversation",
            metadata,
        )
        .await;
    if !remembered {
        debug!(session_id = %session_id, "exchange not written to semantic memory");
    }

    Json(ChatResponse {
        response: response.content,
        session_id,
        agent: response.tag,
        actions: response.actions,
        audio_url,
    })
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /
pub async fn get_root() -> Json<RootResponse> {
    Json(RootResponse {
        name: "valet".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /profile/{user_id}
///
/// Unknown users get a fresh default profile rather than a 404.
pub async fn get_profile(
    State(state): State<GatewayState>,
    Path(user_id): Path<String>,
) -> Json<UserProfile> {
    Json(state.store.get_profile(&user_id).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use valet_config::MemoryConfig;
    use valet_core::types::Role;
    use valet_memory::MemoryRetriever;
    use valet_router::Coordinator;
    use valet_services::{ElevenLabsSynthesizer, InMemoryStore};
    use valet_test_utils::{MockBackend, MockEmbedder};

    fn test_state(replies: Vec<&str>) -> GatewayState {
        let backend = Arc::new(MockBackend::with_responses(
            "mock",
            replies.into_iter().map(String::from).collect(),
        ));
        let client = Arc::new(valet_llm::FallbackClient::new(vec![backend]));
        let store = Arc::new(InMemoryStore::new());
        let retriever = Arc::new(MemoryRetriever::new(
            store.clone(),
            Arc::new(MockEmbedder::new()),
            MemoryConfig::default(),
        ));
        GatewayState {
            coordinator: Arc::new(Coordinator::new(vec![], client)),
            store,
            retriever,
            voice: Arc::new(ElevenLabsSynthesizer::new(None, "default")),
            default_user_id: "demo-user".to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    #[test]
    fn time_of_day_boundaries() {
        assert_eq!(time_of_day(5), "morning");
        assert_eq!(time_of_day(11), "morning");
        assert_eq!(time_of_day(12), "afternoon");
        assert_eq!(time_of_day(16), "afternoon");
        assert_eq!(time_of_day(17), "evening");
        assert_eq!(time_of_day(20), "evening");
        assert_eq!(time_of_day(21), "night");
        assert_eq!(time_of_day(3), "night");
    }

    #[test]
    fn chat_request_defaults() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"message": "hello"}"#).unwrap();
        assert_eq!(req.message, "hello");
        assert!(req.user_id.is_none());
        assert!(req.session_id.is_none());
        assert!(!req.voice_enabled);
    }

    #[tokio::test]
    async fn chat_persists_the_exchange() {
        // No responders registered: classify ("LOGISTICS") then answer directly.
        let state = test_state(vec!["LOGISTICS", "hello there"]);
        let body: ChatRequest = serde_json::from_str(
            r#"{"message": "tell me a joke", "session_id": "s-1"}"#,
        )
        .unwrap();

        let Json(reply) = post_chat(State(state.clone()), Json(body)).await;

        assert_eq!(reply.response, "hello there");
        assert_eq!(reply.session_id, "s-1");
        assert_eq!(reply.agent, AgentTag::Coordinator);
        assert!(reply.audio_url.is_none());

        let turns = state.store.get_session("s-1").await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].content, "tell me a joke");
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[1].content, "hello there");
    }

    #[tokio::test]
    async fn chat_generates_a_session_id_when_missing() {
        let state = test_state(vec!["LOGISTICS", "hi"]);
        let body: ChatRequest = serde_json::from_str(r#"{"message": "hey"}"#).unwrap();

        let Json(reply) = post_chat(State(state), Json(body)).await;
        assert!(!reply.session_id.is_empty());
    }

    #[tokio::test]
    async fn chat_writes_the_exchange_to_memory() {
        let state = test_state(vec!["LOGISTICS", "hello there"]);
        let body: ChatRequest =
            serde_json::from_str(r#"{"message": "remember this"}"#).unwrap();

        post_chat(State(state.clone()), Json(body)).await;

        let nodes = state
            .store
            .query_knowledge_nodes("demo-user", Some("conversation"))
            .await
            .unwrap();
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].content.contains("remember this"));
    }

    #[tokio::test]
    async fn unknown_profile_is_defaulted_not_404() {
        let state = test_state(vec![]);
        let Json(profile) =
            get_profile(State(state), Path("nobody".to_string())).await;
        assert_eq!(profile.id, "nobody");
    }
}
