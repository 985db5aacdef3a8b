// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Valet assistant.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Valet configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ValetConfig {
    /// HTTP gateway bind settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Assistant identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Completion provider credentials and endpoints.
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Embedding backend settings.
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Semantic memory retrieval settings.
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Voice synthesis settings.
    #[serde(default)]
    pub voice: VoiceConfig,

    /// Default user identity for single-tenant deployments.
    #[serde(default)]
    pub user: DefaultUserConfig,
}

/// HTTP gateway bind configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Assistant identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the assistant.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "valet".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Completion providers, in fallback priority order.
///
/// A provider is "configured" iff its `api_key` is set; unconfigured
/// providers are skipped when the fallback chain is assembled.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    /// Primary provider (OpenAI-compatible API).
    #[serde(default)]
    pub euron: EuronConfig,

    /// First fallback (OpenAI-compatible API).
    #[serde(default)]
    pub deepseek: DeepSeekConfig,

    /// Second fallback (Google generateContent API).
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Last-resort fallback.
    #[serde(default)]
    pub openai: OpenAiConfig,
}

/// Euron provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EuronConfig {
    /// API key. `None` disables this provider.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL.
    #[serde(default = "default_euron_base_url")]
    pub base_url: String,

    /// Model identifier.
    #[serde(default = "default_euron_model")]
    pub model: String,
}

impl Default for EuronConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_euron_base_url(),
            model: default_euron_model(),
        }
    }
}

fn default_euron_base_url() -> String {
    "https://api.euron.one/api/v1/euri".to_string()
}

fn default_euron_model() -> String {
    "gpt-4.1-nano".to_string()
}

/// DeepSeek provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DeepSeekConfig {
    /// API key. `None` disables this provider.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL.
    #[serde(default = "default_deepseek_base_url")]
    pub base_url: String,

    /// Model identifier.
    #[serde(default = "default_deepseek_model")]
    pub model: String,
}

impl Default for DeepSeekConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_deepseek_base_url(),
            model: default_deepseek_model(),
        }
    }
}

fn default_deepseek_base_url() -> String {
    "https://api.deepseek.com/v1".to_string()
}

fn default_deepseek_model() -> String {
    "deepseek-chat".to_string()
}

/// Gemini provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. `None` disables this provider.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL.
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Model identifier.
    #[serde(default = "default_gemini_model")]
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
        }
    }
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

/// OpenAI provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. `None` disables this provider.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Model identifier.
    #[serde(default = "default_openai_model")]
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            model: default_openai_model(),
        }
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

/// Embedding backend configuration.
///
/// When `api_key` is unset the OpenAI provider key is reused at wiring time.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmbeddingConfig {
    /// API key override for the embeddings endpoint.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Embedding model identifier.
    #[serde(default = "default_embedding_model")]
    pub model: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            model: default_embedding_model(),
        }
    }
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

/// Semantic memory retrieval configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Character budget for assembled context blocks.
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,

    /// Number of memories returned per search.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_context_chars: default_max_context_chars(),
            top_k: default_top_k(),
        }
    }
}

fn default_max_context_chars() -> usize {
    2000
}

fn default_top_k() -> usize {
    5
}

/// Voice synthesis (ElevenLabs) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VoiceConfig {
    /// ElevenLabs API key. `None` disables voice synthesis.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Voice identifier.
    #[serde(default = "default_voice_id")]
    pub voice_id: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            voice_id: default_voice_id(),
        }
    }
}

fn default_voice_id() -> String {
    "EXAVITQu4vr4xnSDxMaL".to_string()
}

/// Default user identity used when a request carries no user ID.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultUserConfig {
    #[serde(default = "default_user_id")]
    pub id: String,

    #[serde(default = "default_user_name")]
    pub name: String,

    #[serde(default = "default_user_email")]
    pub email: String,
}

impl Default for DefaultUserConfig {
    fn default() -> Self {
        Self {
            id: default_user_id(),
            name: default_user_name(),
            email: default_user_email(),
        }
    }
}

fn default_user_id() -> String {
    "demo-user".to_string()
}

fn default_user_name() -> String {
    "Demo User".to_string()
}

fn default_user_email() -> String {
    "demo@example.com".to_string()
}
