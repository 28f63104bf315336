//! Error types for almanac.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in almanac operations.
#[derive(Error, Debug)]
pub enum AlmanacError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported AI provider: {0}")]
    UnsupportedProvider(String),

    #[error("AI query error: {0}")]
    Query(String),

    #[error("No events parsed for {subject} ({discarded} lines discarded)")]
    NoEventsParsed { subject: String, discarded: usize },

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("{first} and {second} would both be written to {file}")]
    FileNameCollision {
        file: String,
        first: String,
        second: String,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for almanac operations.
pub type AlmanacResult<T> = Result<T, AlmanacError>;
