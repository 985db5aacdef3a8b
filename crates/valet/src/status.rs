// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `valet status` command implementation.
//!
//! Connects to the health endpoint to display server state and uptime,
//! plus which completion providers the local config enables. Falls back
//! gracefully when the server is not running.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use valet_config::ValetConfig;
use valet_core::ValetError;
use valet_llm::FallbackClient;

/// Health endpoint response from the server.
#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
    uptime_secs: u64,
}

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub running: bool,
    pub status: String,
    pub uptime_secs: Option<u64>,
    pub uptime_human: Option<String>,
    pub host: String,
    pub port: u16,
    pub providers: Vec<String>,
}

/// Format seconds into a human-readable duration string.
fn format_uptime(secs: u64) -> String {
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let minutes = (secs % 3600) / 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Run the `valet status` command.
pub async fn run_status(config: &ValetConfig, json: bool) -> Result<(), ValetError> {
    let host = &config.server.host;
    let port = config.server.port;
    let url = format!("http://{host}:{port}/health");

    let providers: Vec<String> = FallbackClient::from_config(&config.providers)?
        .backend_names()
        .iter()
        .map(|n| n.to_string())
        .collect();

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(3))
        .build()
        .map_err(|e| ValetError::Internal(format!("failed to create HTTP client: {e}")))?;

    let health = match client.get(&url).send().await {
        Ok(resp) if resp.status().is_success() => {
            let health: HealthResponse = resp.json().await.map_err(|e| {
                ValetError::Internal(format!("failed to parse health response: {e}"))
            })?;
            Some(health)
        }
        _ => None,
    };

    let response = match &health {
        Some(h) => StatusResponse {
            running: true,
            status: h.status.clone(),
            uptime_secs: Some(h.uptime_secs),
            uptime_human: Some(format_uptime(h.uptime_secs)),
            host: host.clone(),
            port,
            providers,
        },
        None => StatusResponse {
            running: false,
            status: "not running".to_string(),
            uptime_secs: None,
            uptime_human: None,
            host: host.clone(),
            port,
            providers,
        },
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&response).unwrap_or_else(|_| "{}".to_string())
        );
    } else if response.running {
        println!(
            "valet is running on {host}:{port} ({}), uptime {}",
            response.status,
            response.uptime_human.as_deref().unwrap_or("unknown")
        );
        println!("providers: {}", display_providers(&response.providers));
    } else {
        println!("valet is not running on {host}:{port}");
        println!("providers: {}", display_providers(&response.providers));
    }

    Ok(())
}

fn display_providers(providers: &[String]) -> String {
    if providers.is_empty() {
        "none configured".to_string()
    } else {
        providers.join(" -> ")
    }
}
