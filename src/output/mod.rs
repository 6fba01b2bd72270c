//! Serialization of finished aggregates.
//!
//! The aggregate is written exactly once, after the whole recording has
//! been consumed. Output goes to a file when one was requested, otherwise
//! to standard output.

pub mod folded;
pub mod json;

use crate::aggregator::StackAggregate;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write an aggregate to a sink
///
/// **Public** - the only serialization entry point
pub fn write_aggregate(
    aggregate: &StackAggregate,
    writer: &mut dyn Write,
) -> Result<(), OutputError> {
    match aggregate {
        StackAggregate::Folded(table) => folded::write_folded(table, writer),
        StackAggregate::Tree(builder) => json::write_tree(builder, writer),
    }
}

/// Write an aggregate to a file, or to stdout when no path is given
///
/// **Public** - used by the convert command
pub fn write_aggregate_to(
    aggregate: &StackAggregate,
    output_path: Option<&Path>,
) -> Result<(), OutputError> {
    match output_path {
        Some(path) => {
            validate_output_path(path)?;
            info!("Writing output to: {}", path.display());
            let file = File::create(path).map_err(OutputError::WriteFailed)?;
            let mut writer = BufWriter::new(file);
            write_aggregate(aggregate, &mut writer)?;
            writer.flush().map_err(OutputError::WriteFailed)
        }
        None => {
            debug!("Writing output to stdout");
            let stdout = std::io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write_aggregate(aggregate, &mut writer)?;
            writer.flush().map_err(OutputError::WriteFailed)
        }
    }
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
