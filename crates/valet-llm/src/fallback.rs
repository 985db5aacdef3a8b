// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered-fallback completion client.
//!
//! Tries each configured backend exactly once, in priority order. Any
//! failure advances to the next backend; there is no retry or backoff
//! within a backend. A caller gets either the first success or
//! [`ValetError::ProvidersExhausted`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use valet_config::ProvidersConfig;
use valet_core::types::{ChatMessage, Role};
use valet_core::{CompletionBackend, ValetError};

use crate::gemini::GeminiBackend;
use crate::openai_compat::OpenAiCompatBackend;

/// Completion client with strict linear fallback across providers.
pub struct FallbackClient {
    backends: Vec<Arc<dyn CompletionBackend>>,
}

impl FallbackClient {
    /// Creates a client over an explicit backend list (priority order).
    pub fn new(backends: Vec<Arc<dyn CompletionBackend>>) -> Self {
        Self { backends }
    }

    /// Builds the backend chain from configuration.
    ///
    /// Priority order is fixed: Euron, DeepSeek, Gemini, OpenAI. A provider
    /// joins the chain iff its API key is configured; the chain may be
    /// empty, in which case every completion fails with
    /// [`ValetError::ProvidersExhausted`].
    pub fn from_config(providers: &ProvidersConfig) -> Result<Self, ValetError> {
        let mut backends: Vec<Arc<dyn CompletionBackend>> = Vec::new();

        if let Some(key) = &providers.euron.api_key {
            backends.push(Arc::new(OpenAiCompatBackend::new(
                "euron",
                key,
                &providers.euron.base_url,
                &providers.euron.model,
            )?));
        }
        if let Some(key) = &providers.deepseek.api_key {
            backends.push(Arc::new(OpenAiCompatBackend::new(
                "deepseek",
                key,
                &providers.deepseek.base_url,
                &providers.deepseek.model,
            )?));
        }
        if let Some(key) = &providers.gemini.api_key {
            backends.push(Arc::new(GeminiBackend::new(
                key,
                &providers.gemini.base_url,
                &providers.gemini.model,
            )?));
        }
        if let Some(key) = &providers.openai.api_key {
            backends.push(Arc::new(OpenAiCompatBackend::new(
                "openai",
                key,
                &providers.openai.base_url,
                &providers.openai.model,
            )?));
        }

        info!(
            backends = ?backends.iter().map(|b| b.name()).collect::<Vec<_>>(),
            "completion fallback chain assembled"
        );
        Ok(Self { backends })
    }

    /// Names of the configured backends, in fallback order.
    pub fn backend_names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Sends a completion request through the fallback chain.
    ///
    /// `system_prompt`, when given, is prepended as a system message ahead
    /// of `messages`. Returns the first backend success.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        system_prompt: Option<&str>,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ValetError> {
        let mut full = Vec::with_capacity(messages.len() + 1);
        if let Some(prompt) = system_prompt {
            full.push(ChatMessage::new(Role::System, prompt));
        }
        full.extend_from_slice(messages);

        for backend in &self.backends {
            debug!(backend = backend.name(), "trying completion backend");
            match backend.call(&full, max_tokens, temperature).await {
                Ok(text) => {
                    info!(backend = backend.name(), "completion succeeded");
                    return Ok(text);
                }
                Err(e) => {
                    warn!(
                        backend = backend.name(),
                        error = %e,
                        "completion backend failed, advancing to next"
                    );
                }
            }
        }

        Err(ValetError::ProvidersExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valet_test_utils::MockBackend;

    fn user_message(text: &str) -> Vec<ChatMessage> {
        vec![ChatMessage::new(Role::User, text)]
    }

    #[tokio::test]
    async fn first_backend_success_stops_the_chain() {
        let first = Arc::new(MockBackend::with_responses(
            "first",
            vec!["from first".to_string()],
        ));
        let second = Arc::new(MockBackend::with_responses(
            "second",
            vec!["from second".to_string()],
        ));
        let client = FallbackClient::new(vec![first.clone(), second.clone()]);

        let reply = client
            .complete(&user_message("hi"), None, 100, 0.7)
            .await
            .unwrap();

        assert_eq!(reply, "from first");
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0, "later backends must not be contacted");
    }

    #[tokio::test]
    async fn failure_advances_in_order() {
        let first = Arc::new(MockBackend::failing("first"));
        let second = Arc::new(MockBackend::failing("second"));
        let third = Arc::new(MockBackend::with_responses(
            "third",
            vec!["recovered".to_string()],
        ));
        let client = FallbackClient::new(vec![first.clone(), second.clone(), third.clone()]);

        let reply = client
            .complete(&user_message("hi"), None, 100, 0.7)
            .await
            .unwrap();

        assert_eq!(reply, "recovered");
        assert_eq!(first.calls(), 1, "each failed backend is tried exactly once");
        assert_eq!(second.calls(), 1);
        assert_eq!(third.calls(), 1);
    }

    #[tokio::test]
    async fn all_backends_failing_exhausts_the_chain() {
        let first = Arc::new(MockBackend::failing("first"));
        let second = Arc::new(MockBackend::failing("second"));
        let client = FallbackClient::new(vec![first.clone(), second.clone()]);

        let err = client
            .complete(&user_message("hi"), None, 100, 0.7)
            .await
            .unwrap_err();

        assert!(matches!(err, ValetError::ProvidersExhausted));
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
    }

    #[tokio::test]
    async fn empty_chain_is_exhausted_immediately() {
        let client = FallbackClient::new(vec![]);
        let err = client
            .complete(&user_message("hi"), None, 100, 0.7)
            .await
            .unwrap_err();
        assert!(matches!(err, ValetError::ProvidersExhausted));
    }

    #[tokio::test]
    async fn system_prompt_is_prepended() {
        let backend = Arc::new(MockBackend::new("mock"));
        let client = FallbackClient::new(vec![backend.clone()]);

        client
            .complete(&user_message("hi"), Some("Be helpful."), 100, 0.7)
            .await
            .unwrap();

        let seen = backend.last_messages().await;
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].role, Role::System);
        assert_eq!(seen[0].content, "Be helpful.");
        assert_eq!(seen[1].role, Role::User);
    }

    #[tokio::test]
    async fn from_config_only_includes_configured_providers() {
        let mut providers = ProvidersConfig::default();
        providers.deepseek.api_key = Some("ds-key".to_string());
        providers.openai.api_key = Some("oa-key".to_string());

        let client = FallbackClient::from_config(&providers).unwrap();
        assert_eq!(client.backend_names(), vec!["deepseek", "openai"]);
    }

    #[tokio::test]
    async fn from_config_preserves_priority_order() {
        let mut providers = ProvidersConfig::default();
        providers.openai.api_key = Some("oa-key".to_string());
        providers.euron.api_key = Some("eu-key".to_string());
        providers.gemini.api_key = Some("gm-key".to_string());
        providers.deepseek.api_key = Some("ds-key".to_string());

        let client = FallbackClient::from_config(&providers).unwrap();
        assert_eq!(
            client.backend_names(),
            vec!["euron", "deepseek", "gemini", "openai"]
        );
    }
}
