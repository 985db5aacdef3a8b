// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Voice synthesis via the ElevenLabs text-to-speech API.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use tracing::{debug, warn};

use valet_core::VoiceSynthesizer;

const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io/v1";

/// [`VoiceSynthesizer`] over the ElevenLabs API.
///
/// Voice is best-effort throughout the pipeline: an unconfigured key or a
/// failed request yields `None` and the reply goes out as text only.
pub struct ElevenLabsSynthesizer {
    client: reqwest::Client,
    api_key: Option<String>,
    voice_id: String,
    base_url: String,
}

impl ElevenLabsSynthesizer {
    pub fn new(api_key: Option<String>, voice_id: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key,
            voice_id: voice_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }
}

#[async_trait]
impl VoiceSynthesizer for ElevenLabsSynthesizer {
    async fn synthesize(&self, text: &str) -> Option<Vec<u8>> {
        let Some(api_key) = &self.api_key else {
            warn!("voice synthesis requested but no API key configured");
            return None;
        };

        let body = serde_json::json!({
            "text": text,
            "model_id": "eleven_monolingual_v1",
            "voice_settings": {
                "stability": 0.5,
                "similarity_boost": 0.75,
            },
        });

        let url = format!("{}/text-to-speech/{}", self.base_url, self.voice_id);
        let response = match self
            .client
            .post(&url)
            .header("xi-api-key", api_key)
            .header("accept", "audio/mpeg")
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "voice synthesis request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "voice synthesis rejected");
            return None;
        }

        match response.bytes().await {
            Ok(bytes) => {
                debug!(bytes = bytes.len(), "voice synthesis completed");
                Some(bytes.to_vec())
            }
            Err(e) => {
                warn!(error = %e, "failed to read synthesized audio");
                None
            }
        }
    }
}

/// Encodes synthesized audio as a `data:` URL for JSON transport.
pub fn audio_to_data_url(audio: &[u8]) -> String {
    format!(
        "data:audio/mpeg;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(audio)
    )
}
