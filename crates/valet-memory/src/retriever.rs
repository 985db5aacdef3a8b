// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic memory retriever: stores embedded facts and assembles
//! length-budgeted context blocks for responder prompts.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use valet_config::MemoryConfig;
use valet_core::types::{KnowledgeNode, SearchResult, UserProfile};
use valet_core::{DocumentStore, EmbeddingBackend};

use crate::vectors::cosine_similarity;

/// Header line prepended to every non-empty context block.
pub const CONTEXT_BANNER: &str = "Relevant context from your knowledge graph:\n";

/// Retrieval over a user's knowledge nodes.
///
/// All operations degrade instead of erroring: a failed embedding or
/// store lookup yields `false` / empty results, logged at warn level.
/// Responders treat missing context the same as empty memory.
pub struct MemoryRetriever {
    store: Arc<dyn DocumentStore>,
    embedder: Arc<dyn EmbeddingBackend>,
    config: MemoryConfig,
}

impl MemoryRetriever {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        embedder: Arc<dyn EmbeddingBackend>,
        config: MemoryConfig,
    ) -> Self {
        Self {
            store,
            embedder,
            config,
        }
    }

    /// Embeds and stores one fact. Returns whether the fact was persisted.
    ///
    /// No partial writes: if the embedding fails, nothing is stored.
    pub async fn add(
        &self,
        user_id: &str,
        content: &str,
        category: &str,
        metadata: Map<String, Value>,
    ) -> bool {
        let embedding = match self.embedder.embed(content).await {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "failed to embed memory content, dropping fact");
                return false;
            }
        };

        let node = KnowledgeNode {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            content: content.to_string(),
            embedding,
            category: category.to_string(),
            metadata,
            created_at: Utc::now(),
        };

        match self.store.save_knowledge_node(node).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to persist knowledge node");
                false
            }
        }
    }

    /// Top-k most similar memories for a query, highest similarity first.
    ///
    /// The sort is stable, so equal similarities keep store order. Empty
    /// on embedding or store failure.
    pub async fn search(
        &self,
        user_id: &str,
        query: &str,
        category: Option<&str>,
    ) -> Vec<SearchResult> {
        let query_embedding = match self.embedder.embed(query).await {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "failed to embed query, returning no memories");
                return Vec::new();
            }
        };

        let nodes = match self.store.query_knowledge_nodes(user_id, category).await {
            Ok(nodes) => nodes,
            Err(e) => {
                warn!(error = %e, "failed to load knowledge nodes");
                return Vec::new();
            }
        };

        let mut results: Vec<SearchResult> = nodes
            .into_iter()
            .map(|node| SearchResult {
                similarity: cosine_similarity(&query_embedding, &node.embedding),
                content: node.content,
                metadata: node.metadata,
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(self.config.top_k);

        debug!(
            count = results.len(),
            user_id, "semantic search completed"
        );
        results
    }

    /// Assembles a context block for a prompt, bounded by the configured
    /// character budget. See [`Self::context_for_with_budget`].
    pub async fn context_for(&self, user_id: &str, query: &str) -> String {
        self.context_for_with_budget(user_id, query, self.config.max_context_chars)
            .await
    }

    /// Assembles a context block for a prompt, bounded by an explicit
    /// character budget.
    ///
    /// Memories are taken in similarity order; each becomes a `- {content}`
    /// line. A line joins only if the running total (line plus separating
    /// newline) stays within `max_chars`, and selection stops at the first
    /// line that does not fit. Empty string when nothing fits or memory is
    /// empty; otherwise the banner plus the joined lines.
    pub async fn context_for_with_budget(
        &self,
        user_id: &str,
        query: &str,
        max_chars: usize,
    ) -> String {
        let results = self.search(user_id, query, None).await;

        let mut lines: Vec<String> = Vec::new();
        let mut total = 0usize;
        for result in &results {
            let line = format!("- {}", result.content);
            let separator = if lines.is_empty() { 0 } else { 1 };
            if total + separator + line.len() > max_chars {
                break;
            }
            total += separator + line.len();
            lines.push(line);
        }

        if lines.is_empty() {
            String::new()
        } else {
            format!("{CONTEXT_BANNER}{}", lines.join("\n"))
        }
    }

    /// Seeds a fresh user's memory with baseline facts from their profile.
    ///
    /// Returns true only if every fact was persisted.
    pub async fn seed_default_knowledge(&self, profile: &UserProfile) -> bool {
        let prefs = &profile.preferences;
        let facts: [(String, &str); 5] = [
            (
                format!(
                    "{} is the primary user of this assistant, reachable at {}",
                    profile.name, profile.email
                ),
                "profile",
            ),
            (
                format!(
                    "{}'s working hours are {} to {}",
                    profile.name, prefs.working_hours.start, prefs.working_hours.end
                ),
                "preference",
            ),
            (
                format!("{}'s timezone is {}", profile.name, prefs.timezone),
                "preference",
            ),
            (
                format!(
                    "{} prefers concise, direct answers over long explanations",
                    profile.name
                ),
                "preference",
            ),
            (
                format!(
                    "{} activates the assistant with the wake word \"{}\"",
                    profile.name, prefs.wake_word
                ),
                "preference",
            ),
        ];

        let mut all_stored = true;
        for (content, category) in &facts {
            all_stored &= self.add(&profile.id, content, category, Map::new()).await;
        }
        all_stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valet_services::InMemoryStore;
    use valet_test_utils::MockEmbedder;

    fn retriever_with(
        embedder: MockEmbedder,
        config: MemoryConfig,
    ) -> (MemoryRetriever, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let retriever = MemoryRetriever::new(store.clone(), Arc::new(embedder), config);
        (retriever, store)
    }

    #[tokio::test]
    async fn add_then_search_ranks_by_similarity() {
        let embedder = MockEmbedder::new()
            .with_vector("dogs", vec![1.0, 0.0])
            .with_vector("user has a dog", vec![0.9, 0.1])
            .with_vector("user likes tea", vec![0.0, 1.0]);
        let (retriever, _) = retriever_with(embedder, MemoryConfig::default());

        assert!(retriever.add("u1", "user has a dog", "fact", Map::new()).await);
        assert!(retriever.add("u1", "user likes tea", "fact", Map::new()).await);

        let results = retriever.search("u1", "dogs", None).await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].content, "user has a dog");
        assert!(results[0].similarity > results[1].similarity);
    }

    #[tokio::test]
    async fn search_truncates_to_top_k() {
        let mut embedder = MockEmbedder::new()
            .with_vector("query", vec![1.0, 0.0])
            .with_default_vector(vec![0.5, 0.5]);
        for i in 0..7 {
            embedder = embedder.with_vector(format!("fact {i}"), vec![0.5, 0.5]);
        }
        let (retriever, _) = retriever_with(embedder, MemoryConfig::default());

        for i in 0..7 {
            assert!(
                retriever
                    .add("u1", &format!("fact {i}"), "fact", Map::new())
                    .await
            );
        }

        let results = retriever.search("u1", "query", None).await;
        assert_eq!(results.len(), 5, "default top_k is 5");
    }

    #[tokio::test]
    async fn search_is_scoped_to_the_user() {
        let embedder = MockEmbedder::new().with_default_vector(vec![1.0, 0.0]);
        let (retriever, _) = retriever_with(embedder, MemoryConfig::default());

        assert!(retriever.add("alice", "alice fact", "fact", Map::new()).await);
        assert!(retriever.add("bob", "bob fact", "fact", Map::new()).await);

        let results = retriever.search("alice", "anything", None).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content, "alice fact");
    }

    #[tokio::test]
    async fn failed_embedding_drops_the_fact() {
        let (retriever, store) =
            retriever_with(MockEmbedder::failing(), MemoryConfig::default());

        assert!(!retriever.add("u1", "a fact", "fact", Map::new()).await);
        let nodes = store.query_knowledge_nodes("u1", None).await.unwrap();
        assert!(nodes.is_empty(), "no partial writes on embedding failure");
    }

    #[tokio::test]
    async fn failed_query_embedding_returns_no_memories() {
        let (retriever, _) =
            retriever_with(MockEmbedder::failing(), MemoryConfig::default());
        assert!(retriever.search("u1", "query", None).await.is_empty());
        assert_eq!(retriever.context_for("u1", "query").await, "");
    }

    #[tokio::test]
    async fn context_block_has_banner_and_bullets() {
        let embedder = MockEmbedder::new().with_default_vector(vec![1.0, 0.0]);
        let (retriever, _) = retriever_with(embedder, MemoryConfig::default());

        assert!(retriever.add("u1", "likes coffee", "fact", Map::new()).await);
        assert!(retriever.add("u1", "works remotely", "fact", Map::new()).await);

        let context = retriever.context_for("u1", "preferences").await;
        assert!(context.starts_with(CONTEXT_BANNER));
        assert!(context.contains("- likes coffee"));
        assert!(context.contains("- works remotely"));
    }

    #[tokio::test]
    async fn empty_memory_yields_empty_context() {
        let embedder = MockEmbedder::new().with_default_vector(vec![1.0, 0.0]);
        let (retriever, _) = retriever_with(embedder, MemoryConfig::default());
        assert_eq!(retriever.context_for("u1", "anything").await, "");
    }

    #[tokio::test]
    async fn context_never_exceeds_budget_plus_banner() {
        let config = MemoryConfig {
            max_context_chars: 40,
            top_k: 5,
        };
        let embedder = MockEmbedder::new().with_default_vector(vec![1.0, 0.0]);
        let (retriever, _) = retriever_with(embedder, config);

        for i in 0..5 {
            assert!(
                retriever
                    .add(
                        "u1",
                        &format!("a fairly long memory line number {i}"),
                        "fact",
                        Map::new(),
                    )
                    .await
            );
        }

        let context = retriever.context_for("u1", "anything").await;
        assert!(
            context.len() <= 40 + CONTEXT_BANNER.len(),
            "context length {} exceeds budget",
            context.len()
        );
        assert!(!context.is_empty(), "one line fits the 40-char budget");
    }

    #[tokio::test]
    async fn explicit_budget_overrides_the_configured_one() {
        let config = MemoryConfig {
            max_context_chars: 1000,
            top_k: 5,
        };
        let embedder = MockEmbedder::new().with_default_vector(vec![1.0, 0.0]);
        let (retriever, _) = retriever_with(embedder, config);

        assert!(retriever.add("u1", "likes coffee", "fact", Map::new()).await);

        let context = retriever
            .context_for_with_budget("u1", "anything", 5)
            .await;
        assert_eq!(context, "", "a 5-char budget fits nothing");

        let context = retriever
            .context_for_with_budget("u1", "anything", 200)
            .await;
        assert!(context.contains("- likes coffee"));
    }

    #[tokio::test]
    async fn oversized_first_memory_yields_empty_context() {
        let config = MemoryConfig {
            max_context_chars: 10,
            top_k: 5,
        };
        let embedder = MockEmbedder::new().with_default_vector(vec![1.0, 0.0]);
        let (retriever, _) = retriever_with(embedder, config);

        assert!(
            retriever
                .add("u1", "this memory is far too long for the budget", "fact", Map::new())
                .await
        );

        assert_eq!(retriever.context_for("u1", "anything").await, "");
    }

    #[tokio::test]
    async fn seed_default_knowledge_stores_profile_facts() {
        let embedder = MockEmbedder::new().with_default_vector(vec![1.0, 0.0]);
        let (retriever, store) = retriever_with(embedder, MemoryConfig::default());

        let profile =
            valet_core::types::UserProfile::default_for("u1", "Ada", "ada@example.com");
        assert!(retriever.seed_default_knowledge(&profile).await);

        let nodes = store.query_knowledge_nodes("u1", None).await.unwrap();
        assert_eq!(nodes.len(), 5);
        assert!(nodes.iter().any(|n| n.content.contains("ada@example.com")));
        assert!(nodes.iter().any(|n| n.category == "preference"));
    }

    #[tokio::test]
    async fn seed_reports_failure_when_embedder_is_down() {
        let (retriever, _) =
            retriever_with(MockEmbedder::failing(), MemoryConfig::default());
        let profile =
            valet_core::types::UserProfile::default_for("u1", "Ada", "ada@example.com");
        assert!(!retriever.seed_default_knowledge(&profile).await);
    }
}
