//! JSON call-tree output for d3-flame-graph.
//!
//! Non-live mode emits a single nested `{name, value, children?}` document.
//! Live mode emits an object mapping epoch-second bucket keys to one such
//! document each.

use crate::aggregator::CallTreeBuilder;
use crate::utils::error::OutputError;
use log::debug;
use std::io::Write;

/// Write a call tree as a compact JSON document
///
/// **Public** - serializer for the tree strategy
pub fn write_tree(builder: &CallTreeBuilder, writer: &mut dyn Write) -> Result<(), OutputError> {
    if builder.is_live() {
        debug!("Writing live call trees for {} buckets", builder.buckets().len());
        serde_json::to_writer(writer, builder.buckets())
            .map_err(OutputError::SerializationFailed)
    } else {
        debug!("Writing call tree");
        serde_json::to_writer(writer, builder.root()).map_err(OutputError::SerializationFailed)
    }
}
