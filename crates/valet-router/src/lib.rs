// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request routing: keyword selection first, model classification as a
//! fallback, then single-responder dispatch or concurrent fan-out with
//! synthesis.

pub mod coordinator;
pub mod selection;

pub use coordinator::Coordinator;
pub use selection::select_variants;
