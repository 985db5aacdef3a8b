// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding backend trait for semantic memory.

use async_trait::async_trait;

use crate::error::ValetError;

/// Maps text to a dense vector for similarity search.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Embeds a single text. All vectors from one backend share a dimension.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ValetError>;
}
