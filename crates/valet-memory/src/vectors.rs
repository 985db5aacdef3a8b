// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure vector math for similarity search.

/// Cosine similarity between two vectors: `dot(u, v) / (‖u‖ · ‖v‖)`.
///
/// Returns 0.0 when the vectors have different dimensions or when either
/// has zero norm, so degenerate embeddings rank last instead of poisoning
/// the sort with NaN.
pub fn cosine_similarity(u: &[f32], v: &[f32]) -> f32 {
    if u.len() != v.len() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_u = 0.0f32;
    let mut norm_v = 0.0f32;
    for (a, b) in u.iter().zip(v.iter()) {
        dot += a * b;
        norm_u += a * a;
        norm_v += b * b;
    }

    if norm_u == 0.0 || norm_v == 0.0 {
        return 0.0;
    }

    dot / (norm_u.sqrt() * norm_v.sqrt())
}
