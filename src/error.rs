//! Error types for session setup and configuration

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
    UnknownDifficulty(String),

    #[error("invalid session config: {0}")]
    InvalidConfig(String),

    #[error("occupancy mask {width}x{height} expects {expected} samples, got {actual}")]
    MaskSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("occupancy mask must have non-zero dimensions")]
    EmptyMask,

    #[error("failed to read settings from {path}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
