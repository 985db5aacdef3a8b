// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The three domain responders behind the coordinator: logistics (email
//! and calendar), affect (mood and motivation), and prioritization
//! (goal triage). Each one builds a domain-specific prompt, drives the
//! completion chain, and degrades to a canned reply on failure instead
//! of surfacing an error.

use async_trait::async_trait;

use valet_core::types::{AgentRequest, AgentResponse, ResponderVariant};

pub mod actions;
pub mod affect;
pub mod context;
pub mod logistics;
pub mod mood;
pub mod prioritization;

pub use affect::AffectResponder;
pub use logistics::LogisticsResponder;
pub use mood::classify_mood;
pub use prioritization::PrioritizationResponder;

/// A domain responder. `process` never fails: each implementation maps
/// internal errors to a low-confidence fallback response.
#[async_trait]
pub trait Responder: Send + Sync {
    fn variant(&self) -> ResponderVariant;

    async fn process(&self, request: &AgentRequest) -> AgentResponse;
}
