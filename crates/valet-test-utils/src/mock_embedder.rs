// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock embedding backend with controllable vectors.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use valet_core::{EmbeddingBackend, ValetError};

/// An embedding backend that returns fixed vectors per exact text.
///
/// Unknown texts get the configured default vector, so retrieval tests
/// can steer similarity precisely without a real embedding service.
pub struct MockEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    default_vector: Vec<f32>,
    fail: bool,
    calls: AtomicUsize,
}

impl MockEmbedder {
    /// A mock embedder whose unknown-text default is the zero vector
    /// (cosine similarity 0 against everything).
    pub fn new() -> Self {
        Self {
            vectors: HashMap::new(),
            default_vector: vec![0.0, 0.0, 0.0],
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `embed` was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// A mock embedder that fails every call.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Pin the vector returned for an exact text.
    pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.into(), vector);
        self
    }

    /// Set the vector returned for unknown texts.
    pub fn with_default_vector(mut self, vector: Vec<f32>) -> Self {
        self.default_vector = vector;
        self
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingBackend for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ValetError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ValetError::Embedding(
                "mock embedder is configured to fail".to_string(),
            ));
        }
        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.default_vector.clone()))
    }
}
