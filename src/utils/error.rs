//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a recording
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("failed to open recording file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not decode the recording: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "could not decode the recording: {source}. \
         If the recording is compressed, try the decompress option"
    )]
    DecodeMaybeCompressed {
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur during the conversion pass
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(
        "no events matched the selected event type and time range. \
         Event types present in the recording: {}",
        .available.join(", ")
    )]
    NoMatchingEvents { available: Vec<String> },

    #[error("event '{event_type}' is missing required field '{field}'")]
    MissingField {
        event_type: String,
        field: &'static str,
    },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
