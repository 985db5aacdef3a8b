// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared mocks and fixtures for Valet workspace tests.
//!
//! Deterministic stand-ins for the completion and embedding seams, plus
//! domain fixtures, so crate tests never touch the network.

pub mod fixtures;
pub mod mock_backend;
pub mod mock_embedder;

pub use fixtures::{sample_context, sample_profile, sample_request};
pub use mock_backend::MockBackend;
pub use mock_embedder::MockEmbedder;
