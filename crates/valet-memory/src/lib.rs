// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic memory for the Valet assistant.
//!
//! Facts are embedded once, cached, and retrieved by cosine similarity.
//! [`MemoryRetriever`] turns the best matches into a length-budgeted
//! context block that responders splice into their prompts.

pub mod embedder;
pub mod retriever;
pub mod vectors;

pub use embedder::{CachedEmbedder, OpenAiEmbedder};
pub use retriever::{MemoryRetriever, CONTEXT_BANNER};
pub use vectors::cosine_similarity;
