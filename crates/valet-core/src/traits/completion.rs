// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion backend trait for chat-completion provider integrations.

use async_trait::async_trait;

use crate::error::ValetError;
use crate::types::ChatMessage;

/// A single chat-completion provider (Euron, DeepSeek, Gemini, OpenAI, ...).
///
/// Backends are interchangeable: the fallback client tries them in priority
/// order and treats any `Err` as "advance to the next backend".
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Stable name used in logs and status output.
    fn name(&self) -> &str;

    /// Sends the full message list (system turns included) and returns the
    /// assistant's reply text.
    async fn call(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ValetError>;
}
