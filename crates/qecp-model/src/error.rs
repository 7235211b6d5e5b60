// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use thiserror::Error;

/// Errors produced while loading or hashing visualizer data.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The JSON document is malformed or does not match the data model
    /// (including malformed `"[t][i][j]"` peer tokens).
    #[error("invalid visualizer data: {0}")]
    Json(#[from] serde_json::Error),
    /// Canonical encoding for the content digest failed.
    #[error("canonical encoding failed: {0}")]
    Encode(String),
}
