// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `valet serve` command implementation.
//!
//! Wires the completion chain, semantic memory, responders, and the
//! coordinator together, seeds default knowledge, and starts the HTTP
//! server.

use std::sync::Arc;

use tracing::{info, warn};

use valet_config::ValetConfig;
use valet_core::{DocumentStore, ValetError};
use valet_gateway::{start_server, GatewayState, ServerConfig};
use valet_llm::FallbackClient;
use valet_memory::{CachedEmbedder, MemoryRetriever, OpenAiEmbedder};
use valet_responders::{
    AffectResponder, LogisticsResponder, PrioritizationResponder, Responder,
};
use valet_router::Coordinator;
use valet_services::{
    ElevenLabsSynthesizer, InMemoryStore, OfflineCalendarFeed, OfflineMailFeed,
};

/// Run the `valet serve` command.
pub async fn run_serve(config: &ValetConfig) -> Result<(), ValetError> {
    let client = Arc::new(FallbackClient::from_config(&config.providers)?);
    let backends = client.backend_names();
    if backends.is_empty() {
        warn!("no completion providers configured, replies will be canned fallbacks");
    } else {
        info!(backends = ?backends, "completion chain ready");
    }

    // The embeddings endpoint shares the OpenAI key unless overridden.
    let embedding_key = config
        .embedding
        .api_key
        .as_deref()
        .or(config.providers.openai.api_key.as_deref());
    let embedder = Arc::new(CachedEmbedder::new(Arc::new(OpenAiEmbedder::new(
        embedding_key,
        &config.embedding.base_url,
        &config.embedding.model,
    )?)));

    let store = Arc::new(InMemoryStore::with_default_identity(
        &config.user.name,
        &config.user.email,
    ));
    let retriever = Arc::new(MemoryRetriever::new(
        store.clone(),
        embedder,
        config.memory.clone(),
    ));

    let mail = Arc::new(OfflineMailFeed::demo());
    let calendar = Arc::new(OfflineCalendarFeed::demo());
    let voice = Arc::new(ElevenLabsSynthesizer::new(
        config.voice.api_key.clone(),
        &config.voice.voice_id,
    ));

    let responders: Vec<Arc<dyn Responder>> = vec![
        Arc::new(LogisticsResponder::new(client.clone(), mail, calendar)),
        Arc::new(AffectResponder::new(client.clone(), retriever.clone())),
        Arc::new(PrioritizationResponder::new(
            client.clone(),
            retriever.clone(),
        )),
    ];
    let coordinator = Arc::new(Coordinator::new(responders, client));

    let profile = store.get_profile(&config.user.id).await;
    if retriever.seed_default_knowledge(&profile).await {
        info!(user_id = %config.user.id, "seeded default knowledge");
    } else {
        warn!(user_id = %config.user.id, "some default knowledge could not be seeded");
    }

    let state = GatewayState {
        coordinator,
        store,
        retriever,
        voice,
        default_user_id: config.user.id.clone(),
        start_time: std::time::Instant::now(),
    };

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    start_server(&server_config, state).await
}
