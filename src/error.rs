//! Error types for ralph-hooks.

use std::path::PathBuf;

use thiserror::Error;

/// Crate error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Invalid JSON format in {file_name}")]
    InvalidJson {
        file_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Failures while reading commit history.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Repository has no commits yet")]
    NoCommits,

    #[error("Failed to run git: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Git operation failed: {0}")]
    Operation(String),
}
