// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Valet assistant backend.

use thiserror::Error;

/// The primary error type used across all Valet collaborator traits and core operations.
#[derive(Debug, Error)]
pub enum ValetError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Completion backend errors (API failure, malformed payload, auth rejection).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Every configured completion backend was tried in order and all failed.
    #[error("all completion providers exhausted")]
    ProvidersExhausted,

    /// Embedding backend errors (API failure, empty payload, missing credential).
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Document store errors (lookup failure, write failure).
    #[error("storage error: {0}")]
    Storage(String),

    /// Transport-level errors (bind failure, server shutdown).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
