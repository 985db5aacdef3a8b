// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document store trait for profiles, sessions, and knowledge nodes.

use async_trait::async_trait;

use crate::error::ValetError;
use crate::types::{KnowledgeNode, Message, UserProfile};

/// Persistence seam for user profiles, session transcripts, and the
/// knowledge nodes backing semantic memory.
///
/// `get_profile` never fails: an unknown user gets a default profile so
/// the rest of the pipeline can proceed.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetches a profile, falling back to a default one for unknown users.
    async fn get_profile(&self, user_id: &str) -> UserProfile;

    /// Creates or replaces a profile.
    async fn save_profile(&self, profile: &UserProfile) -> Result<(), ValetError>;

    /// Loads a session transcript, `None` if the session is unknown.
    async fn get_session(&self, session_id: &str) -> Option<Vec<Message>>;

    /// Replaces a session transcript.
    async fn save_session(
        &self,
        session_id: &str,
        user_id: &str,
        turns: &[Message],
    ) -> Result<(), ValetError>;

    /// Appends a knowledge node to the user's memory.
    async fn save_knowledge_node(&self, node: KnowledgeNode) -> Result<(), ValetError>;

    /// Returns a user's knowledge nodes in insertion order, optionally
    /// filtered by category.
    async fn query_knowledge_nodes(
        &self,
        user_id: &str,
        category: Option<&str>,
    ) -> Result<Vec<KnowledgeNode>, ValetError>;
}
