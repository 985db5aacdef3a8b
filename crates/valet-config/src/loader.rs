// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./valet.toml` > `~/.config/valet/valet.toml` > `/etc/valet/valet.toml`
//! with environment variable overrides via `VALET_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ValetConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/valet/valet.toml` (system-wide)
/// 3. `~/.config/valet/valet.toml` (user XDG config)
/// 4. `./valet.toml` (local directory)
/// 5. `VALET_*` environment variables
pub fn load_config() -> Result<ValetConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ValetConfig::default()))
        .merge(Toml::file("/etc/valet/valet.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("valet/valet.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("valet.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from an inline TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<ValetConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ValetConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ValetConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ValetConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. `VALET_MEMORY_MAX_CONTEXT_CHARS` must
/// map to `memory.max_context_chars`, not `memory.max.context.chars`.
fn env_provider() -> Env {
    Env::prefixed("VALET_").map(|key| map_env_key(key.as_str()).into())
}

/// Maps a lowercased, prefix-stripped env var name to a dotted config path.
///
/// Example: `providers_euron_api_key` -> `providers.euron.api_key`.
fn map_env_key(key: &str) -> String {
    key.replacen("server_", "server.", 1)
        .replacen("agent_", "agent.", 1)
        .replacen("providers_euron_", "providers.euron.", 1)
        .replacen("providers_deepseek_", "providers.deepseek.", 1)
        .replacen("providers_gemini_", "providers.gemini.", 1)
        .replacen("providers_openai_", "providers.openai.", 1)
        .replacen("embedding_", "embedding.", 1)
        .replacen("memory_", "memory.", 1)
        .replacen("voice_", "voice.", 1)
        .replacen("user_", "user.", 1)
}
