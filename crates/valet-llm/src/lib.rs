// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resilient multi-provider completion client.
//!
//! [`FallbackClient`] fronts an ordered chain of [`CompletionBackend`]s
//! (Euron, DeepSeek, Gemini, OpenAI) and falls through the chain on any
//! failure. Individual backends never retry; recovery is the chain's job.
//!
//! [`CompletionBackend`]: valet_core::CompletionBackend

pub mod fallback;
pub mod gemini;
pub mod openai_compat;

pub use fallback::FallbackClient;
pub use gemini::GeminiBackend;
pub use openai_compat::OpenAiCompatBackend;
