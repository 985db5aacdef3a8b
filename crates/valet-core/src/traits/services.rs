// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ambient service traits: mail, calendar, and voice synthesis.
//!
//! These collaborators degrade rather than fail: an unavailable feed
//! yields empty lists, an unavailable synthesizer yields `None`. The
//! responders treat "no items" and "service down" identically.

use async_trait::async_trait;

use crate::types::{CalendarEvent, EmailSummary};

/// Source of condensed inbox items.
#[async_trait]
pub trait MailFeed: Send + Sync {
    /// Up to `max` recent emails, most recent first. Empty when unavailable.
    async fn recent_emails(&self, max: usize) -> Vec<EmailSummary>;
}

/// Source of upcoming calendar events.
#[async_trait]
pub trait CalendarFeed: Send + Sync {
    /// Up to `max` upcoming events, soonest first. Empty when unavailable.
    async fn upcoming_events(&self, max: usize) -> Vec<CalendarEvent>;
}

/// Text-to-speech seam.
#[async_trait]
pub trait VoiceSynthesizer: Send + Sync {
    /// Audio bytes for the given text, `None` when unconfigured or failed.
    async fn synthesize(&self, text: &str) -> Option<Vec<u8>>;
}
