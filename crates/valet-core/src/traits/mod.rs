// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! Each seam the assistant core depends on (completions, embeddings,
//! document storage, mail, calendar, voice) is a trait defined here,
//! so implementations can be swapped without touching the core.

pub mod completion;
pub mod embedding;
pub mod services;
pub mod store;

pub use completion::CompletionBackend;
pub use embedding::EmbeddingBackend;
pub use services::{CalendarFeed, MailFeed, VoiceSynthesizer};
pub use store::DocumentStore;
