// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator implementations for the Valet assistant.
//!
//! These are the concrete adapters behind the traits in `valet-core`:
//! an in-memory document store, offline mail/calendar feeds, and the
//! ElevenLabs voice synthesizer. Real provider integrations (Gmail,
//! Google Calendar, a durable database) slot in behind the same traits.

pub mod calendar;
pub mod mail;
pub mod store;
pub mod voice;

pub use calendar::OfflineCalendarFeed;
pub use mail::OfflineMailFeed;
pub use store::InMemoryStore;
pub use voice::{audio_to_data_url, ElevenLabsSynthesizer};
