// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory document store.
//!
//! Profiles, session transcripts, and knowledge nodes live in DashMaps.
//! Deployments wanting durability implement [`DocumentStore`] over a real
//! database; nothing in the core is allowed to depend on persistence.

use async_trait::async_trait;
use dashmap::DashMap;

use valet_core::types::{KnowledgeNode, Message, UserProfile};
use valet_core::{DocumentStore, ValetError};

/// DashMap-backed [`DocumentStore`].
///
/// Unknown users get a default profile built from the configured identity,
/// so a cold start never blocks the pipeline.
pub struct InMemoryStore {
    profiles: DashMap<String, UserProfile>,
    sessions: DashMap<String, Vec<Message>>,
    /// Knowledge nodes per user, in insertion order.
    knowledge: DashMap<String, Vec<KnowledgeNode>>,
    default_name: String,
    default_email: String,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_default_identity("Demo User", "demo@example.com")
    }

    /// Sets the identity used for profiles of unknown users.
    pub fn with_default_identity(
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            profiles: DashMap::new(),
            sessions: DashMap::new(),
            knowledge: DashMap::new(),
            default_name: name.into(),
            default_email: email.into(),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn get_profile(&self, user_id: &str) -> UserProfile {
        self.profiles
            .get(user_id)
            .map(|p| p.clone())
            .unwrap_or_else(|| {
                UserProfile::default_for(user_id, &self.default_name, &self.default_email)
            })
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<(), ValetError> {
        self.profiles.insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    async fn get_session(&self, session_id: &str) -> Option<Vec<Message>> {
        self.sessions.get(session_id).map(|s| s.clone())
    }

    async fn save_session(
        &self,
        session_id: &str,
        _user_id: &str,
        turns: &[Message],
    ) -> Result<(), ValetError> {
        self.sessions.insert(session_id.to_string(), turns.to_vec());
        Ok(())
    }

    async fn save_knowledge_node(&self, node: KnowledgeNode) -> Result<(), ValetError> {
        self.knowledge
            .entry(node.user_id.clone())
            .or_default()
            .push(node);
        Ok(())
    }

    async fn query_knowledge_nodes(
        &self,
        user_id: &str,
        category: Option<&str>,
    ) -> Result<Vec<KnowledgeNode>, ValetError> {
        let nodes = self
            .knowledge
            .get(user_id)
            .map(|n| n.clone())
            .unwrap_or_default();
        Ok(match category {
            Some(cat) => nodes.into_iter().filter(|n| n.category == cat).collect(),
            None => nodes,
        })
    }
}
