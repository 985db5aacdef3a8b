// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP surface for the assistant: a chat endpoint running the full
//! coordinator pipeline, plus health and profile lookups.

pub mod handlers;
pub mod server;

pub use server::{start_server, GatewayState, ServerConfig};
