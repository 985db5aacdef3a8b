// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Valet assistant.
//!
//! Layered loading via Figment: compiled defaults, XDG TOML hierarchy,
//! then `VALET_*` environment variable overrides.

pub mod loader;
pub mod model;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{
    AgentConfig, DeepSeekConfig, DefaultUserConfig, EmbeddingConfig, EuronConfig,
    GeminiConfig, MemoryConfig, OpenAiConfig, ProvidersConfig, ServerConfig, ValetConfig,
    VoiceConfig,
};
