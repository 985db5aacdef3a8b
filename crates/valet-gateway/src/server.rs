// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the API.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use valet_core::{DocumentStore, ValetError, VoiceSynthesizer};
use valet_memory::MemoryRetriever;
use valet_router::Coordinator;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Routes utterances and synthesizes replies.
    pub coordinator: Arc<Coordinator>,
    /// Profiles and session transcripts.
    pub store: Arc<dyn DocumentStore>,
    /// Semantic memory, written after every exchange.
    pub retriever: Arc<MemoryRetriever>,
    /// Speech synthesis for voice-enabled requests.
    pub voice: Arc<dyn VoiceSynthesizer>,
    /// User to attribute requests to when the body names none.
    pub default_user_id: String,
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
}

/// Server configuration (mirrors ServerConfig from valet-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Start the HTTP server.
///
/// Binds to the configured host:port and serves:
/// - GET  /
/// - GET  /health
/// - POST /chat
/// - GET  /profile/{user_id}
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), ValetError> {
    let app = Router::new()
        .route("/", get(handlers::get_root))
        .route("/health", get(handlers::get_health))
        .route("/chat", post(handlers::post_chat))
        .route("/profile/{user_id}", get(handlers::get_profile))
        .with_state(state)
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ValetError::Channel {
            message: format!("failed to bind server to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("API server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| ValetError::Channel {
            message: format!("server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_debug() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
        assert!(debug.contains("8000"));
    }
}
