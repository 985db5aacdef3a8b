// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding backends: the OpenAI embeddings API plus a caching wrapper.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::debug;

use valet_core::{EmbeddingBackend, ValetError};

/// Response body for `POST /embeddings`.
#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Embedding backend over the OpenAI embeddings endpoint.
///
/// Constructed without a key it stays inert: every `embed` call fails and
/// retrieval degrades to empty results instead of blocking startup.
#[derive(Debug, Clone)]
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    base_url: String,
    model: String,
    configured: bool,
}

impl OpenAiEmbedder {
    /// Creates an embedder. `api_key: None` yields an inert backend.
    pub fn new(
        api_key: Option<&str>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, ValetError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            headers.insert(
                "authorization",
                HeaderValue::from_str(&format!("Bearer {key}")).map_err(|e| {
                    ValetError::Config(format!("invalid API key header value: {e}"))
                })?,
            );
        }
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ValetError::Embedding(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            configured: api_key.is_some(),
        })
    }
}

#[async_trait]
impl EmbeddingBackend for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ValetError> {
        if !self.configured {
            return Err(ValetError::Embedding(
                "embedding backend has no API key configured".to_string(),
            ));
        }

        let body = serde_json::json!({
            "model": self.model,
            "input": text,
        });

        let url = format!("{}/embeddings", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ValetError::Embedding(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        debug!(status = %status, "embedding response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ValetError::Embedding(format!(
                "API returned {status}: {body}"
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| ValetError::Embedding(format!("failed to parse API response: {e}")))?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| ValetError::Embedding("response contained no embedding".to_string()))
    }
}

/// Caching wrapper around any embedding backend.
///
/// Keys on the exact text. Insert-if-absent: a concurrent duplicate
/// computation keeps the first inserted vector.
pub struct CachedEmbedder {
    inner: Arc<dyn EmbeddingBackend>,
    cache: DashMap<String, Vec<f32>>,
}

impl CachedEmbedder {
    pub fn new(inner: Arc<dyn EmbeddingBackend>) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }

    /// Number of cached texts.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[async_trait]
impl EmbeddingBackend for CachedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ValetError> {
        if let Some(hit) = self.cache.get(text) {
            return Ok(hit.clone());
        }

        let vector = self.inner.embed(text).await?;
        // Failures are never cached; the next call retries the backend.
        let entry = self
            .cache
            .entry(text.to_string())
            .or_insert_with(|| vector);
        Ok(entry.clone())
    }
}
