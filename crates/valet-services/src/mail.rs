// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offline mail feed backed by fixed demo summaries.
//!
//! A real mail integration implements [`MailFeed`] over its provider's
//! API; the offline feed keeps the logistics responder exercisable in
//! demos and tests. Constructed empty, it behaves like an unavailable
//! inbox.

use async_trait::async_trait;
use chrono::{Duration, Utc};

use valet_core::types::EmailSummary;
use valet_core::MailFeed;

/// A [`MailFeed`] serving a fixed list of summaries, most recent first.
pub struct OfflineMailFeed {
    items: Vec<EmailSummary>,
}

impl OfflineMailFeed {
    /// A feed with no items (unavailable inbox).
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// A feed pre-loaded with demo inbox items.
    pub fn demo() -> Self {
        let now = Utc::now();
        Self {
            items: vec![
                EmailSummary {
                    id: "demo-1".to_string(),
                    from: "team@example.com".to_string(),
                    subject: "Weekly Team Sync - Action Items".to_string(),
                    snippet: "Following up on our discussion about the deployment..."
                        .to_string(),
                    importance: 8,
                    action_required: true,
                    timestamp: now - Duration::hours(2),
                },
                EmailSummary {
                    id: "demo-2".to_string(),
                    from: "github@noreply.com".to_string(),
                    subject: "New pull request opened".to_string(),
                    snippet: "New PR opened for feature/agent-improvements...".to_string(),
                    importance: 6,
                    action_required: false,
                    timestamp: now - Duration::hours(5),
                },
                EmailSummary {
                    id: "demo-3".to_string(),
                    from: "newsletter@research.example.com".to_string(),
                    subject: "Latest Research Highlights".to_string(),
                    snippet: "Check out this week's top papers...".to_string(),
                    importance: 3,
                    action_required: false,
                    timestamp: now - Duration::hours(12),
                },
            ],
        }
    }

    /// A feed with explicit items (for tests).
    pub fn with_items(items: Vec<EmailSummary>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl MailFeed for OfflineMailFeed {
    async fn recent_emails(&self, max: usize) -> Vec<EmailSummary> {
        self.items.iter().take(max).cloned().collect()
    }
}
