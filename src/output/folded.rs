//! Folded text output, the input format of flamegraph.pl.
//!
//! One line per aggregated stack: `frame1;frame2;...;frameN weight`.

use crate::aggregator::FoldedTable;
use crate::utils::error::OutputError;
use log::debug;
use std::io::Write;

/// Write the folded table, one entry per line in first-seen order
///
/// **Public** - serializer for the folded strategy
pub fn write_folded(table: &FoldedTable, writer: &mut dyn Write) -> Result<(), OutputError> {
    debug!("Writing {} folded stacks", table.len());

    for (key, value) in table.iter() {
        writeln!(writer, "{} {}", key, value).map_err(OutputError::WriteFailed)?;
    }

    Ok(())
}
