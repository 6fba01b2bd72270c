//! Recording loader.
//!
//! Reads a normalized event dump from disk: a stream of
//! whitespace-separated JSON objects, optionally gzip-compressed.

use crate::recording::schema::{Recording, RecordingEvent};
use crate::utils::error::ReadError;
use flate2::read::GzDecoder;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load a recording from a normalized event dump
///
/// **Public** - main entry point for recording input
///
/// # Arguments
/// * `path` - Path to the event dump
/// * `decompress` - Treat the file as gzip-compressed
///
/// # Errors
/// * `ReadError::Open` - the file cannot be opened
/// * `ReadError::Decode` - the dump cannot be decoded; when `decompress`
///   was not requested the error suggests retrying with it
pub fn load_recording(path: &Path, decompress: bool) -> Result<Recording, ReadError> {
    info!("Loading recording: {}", path.display());

    let file = File::open(path).map_err(|source| ReadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let reader: Box<dyn Read> = if decompress {
        debug!("Decompressing recording with gzip");
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let recording = read_events(BufReader::new(reader)).map_err(|source| {
        if decompress {
            ReadError::Decode { source }
        } else {
            ReadError::DecodeMaybeCompressed { source }
        }
    })?;

    info!("Loaded {} events", recording.len());

    Ok(recording)
}

/// Decode a stream of JSON event objects
///
/// **Private** - shared between plain and gzip input paths
fn read_events(reader: impl Read) -> Result<Recording, serde_json::Error> {
    let mut events: Vec<RecordingEvent> = Vec::new();
    for event in serde_json::Deserializer::from_reader(reader).into_iter::<RecordingEvent>() {
        events.push(event?);
    }
    Ok(Recording::new(events))
}
