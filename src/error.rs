//! Error types for the verse store, shuffle deck and configuration.
//!
//! Formatting itself never fails; only the surfaces that touch files,
//! JSON or the OS random source return these.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No verses to draw from
    #[error("verse set is empty")]
    EmptyVerseSet,

    /// The OS random source could not be read
    #[error("random source failed: {0}")]
    Random(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
