// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offline calendar feed backed by fixed demo events.

use async_trait::async_trait;
use chrono::{Duration, Utc};

use valet_core::types::CalendarEvent;
use valet_core::CalendarFeed;

/// A [`CalendarFeed`] serving a fixed list of events, soonest first.
pub struct OfflineCalendarFeed {
    items: Vec<CalendarEvent>,
}

impl OfflineCalendarFeed {
    /// A feed with no events (unavailable calendar).
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// A feed pre-loaded with demo events relative to now.
    pub fn demo() -> Self {
        let now = Utc::now();
        Self {
            items: vec![
                CalendarEvent {
                    id: "demo-event-1".to_string(),
                    title: "Team Standup".to_string(),
                    start: now + Duration::hours(2),
                    end: now + Duration::hours(2) + Duration::minutes(30),
                    location: Some("Video call".to_string()),
                    attendees: vec!["team@example.com".to_string()],
                    description: Some("Daily standup".to_string()),
                },
                CalendarEvent {
                    id: "demo-event-2".to_string(),
                    title: "Project Review Session".to_string(),
                    start: now + Duration::days(1),
                    end: now + Duration::days(1) + Duration::hours(1),
                    location: Some("Conference Room A".to_string()),
                    attendees: vec!["stakeholders@example.com".to_string()],
                    description: Some("Review latest milestones".to_string()),
                },
                CalendarEvent {
                    id: "demo-event-3".to_string(),
                    title: "1:1 with Manager".to_string(),
                    start: now + Duration::days(2),
                    end: now + Duration::days(2) + Duration::minutes(30),
                    location: Some("Office".to_string()),
                    attendees: vec!["manager@example.com".to_string()],
                    description: Some("Bi-weekly sync".to_string()),
                },
            ],
        }
    }

    /// A feed with explicit events (for tests).
    pub fn with_items(items: Vec<CalendarEvent>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl CalendarFeed for OfflineCalendarFeed {
    async fn upcoming_events(&self, max: usize) -> Vec<CalendarEvent> {
        self.items.iter().take(max).cloned().collect()
    }
}
