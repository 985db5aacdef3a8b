// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP backend for OpenAI-compatible chat-completion APIs.
//!
//! Euron, DeepSeek, and OpenAI itself all speak the same
//! `POST {base}/chat/completions` dialect and differ only in base URL,
//! credential, and model, so one backend covers all three.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use valet_core::types::ChatMessage;
use valet_core::{CompletionBackend, ValetError};

/// Request body for `POST /chat/completions`.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

/// Response body for `POST /chat/completions`.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// A single OpenAI-compatible completion provider.
#[derive(Debug, Clone)]
pub struct OpenAiCompatBackend {
    name: String,
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OpenAiCompatBackend {
    /// Creates a backend for an OpenAI-compatible API.
    ///
    /// # Arguments
    /// * `name` - Stable provider name for logs ("euron", "deepseek", "openai")
    /// * `api_key` - Bearer credential
    /// * `base_url` - API base, e.g. `https://api.openai.com/v1`
    /// * `model` - Model identifier sent with every request
    pub fn new(
        name: impl Into<String>,
        api_key: &str,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, ValetError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                ValetError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| ValetError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            name: name.into(),
            client,
            base_url: base_url.into(),
            model: model.into(),
        })
    }
}

#[async_trait]
impl CompletionBackend for OpenAiCompatBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn call(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ValetError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens,
            temperature,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ValetError::Provider {
                message: format!("{}: HTTP request failed: {e}", self.name),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(backend = %self.name, status = %status, "completion response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ValetError::Provider {
                message: format!("{}: API returned {status}: {body}", self.name),
                source: None,
            });
        }

        let parsed: ChatCompletionResponse =
            response.json().await.map_err(|e| ValetError::Provider {
                message: format!("{}: failed to parse API response: {e}", self.name),
                source: Some(Box::new(e)),
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ValetError::Provider {
                message: format!("{}: response contained no completion text", self.name),
                source: None,
            })
    }
}
