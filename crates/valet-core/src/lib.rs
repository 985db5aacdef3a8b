// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Valet assistant backend.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the Valet workspace. Collaborator
//! implementations (HTTP backends, stores, feeds) live in sibling crates
//! and implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ValetError;

// Re-export all collaborator traits at crate root.
pub use traits::{
    CalendarFeed, CompletionBackend, DocumentStore, EmbeddingBackend, MailFeed,
    VoiceSynthesizer,
};
