// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion backend for deterministic testing.
//!
//! `MockBackend` implements `CompletionBackend` with pre-configured
//! responses, enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use valet_core::types::ChatMessage;
use valet_core::{CompletionBackend, ValetError};

/// A mock completion backend that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" text is returned. A failing backend
/// returns `ValetError::Provider` on every call. Calls are counted
/// either way, so tests can assert exactly which backends were tried.
pub struct MockBackend {
    name: String,
    responses: Arc<Mutex<VecDeque<String>>>,
    fail: bool,
    calls: AtomicUsize,
    last_messages: Mutex<Vec<ChatMessage>>,
}

impl MockBackend {
    /// Create a mock backend with an empty response queue.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            responses: Arc::new(Mutex::new(VecDeque::new())),
            fail: false,
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock backend pre-loaded with the given responses.
    pub fn with_responses(name: impl Into<String>, responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            ..Self::new(name)
        }
    }

    /// Create a mock backend that fails every call.
    pub fn failing(name: impl Into<String>) -> Self {
        Self {
            fail: true,
            ..Self::new(name)
        }
    }

    /// Add a response to the end of the queue.
    pub async fn add_response(&self, text: String) {
        self.responses.lock().await.push_back(text);
    }

    /// Number of times `call` was invoked, successes and failures alike.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The message list from the most recent call.
    pub async fn last_messages(&self) -> Vec<ChatMessage> {
        self.last_messages.lock().await.clone()
    }

    async fn next_response(&self) -> String {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock response".to_string())
    }
}

#[async_trait]
impl CompletionBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn call(
        &self,
        messages: &[ChatMessage],
        _max_tokens: u32,
        _temperature: f32,
    ) -> Result<String, ValetError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().await = messages.to_vec();
        if self.fail {
            return Err(ValetError::Provider {
                message: format!("{} is configured to fail", self.name),
                source: None,
            });
        }
        Ok(self.next_response().await)
    }
}
