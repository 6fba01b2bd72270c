//! Stack aggregation strategies.
//!
//! Two interchangeable strategies share one input contract: fold an
//! ordered frame-label sequence with its weight and start timestamp into
//! an aggregate. [`folded`] accumulates a flat table of semicolon-joined
//! stacks; [`tree`] merges stacks into a call tree, optionally split into
//! per-second buckets for live playback.

pub mod folded;
pub mod tree;

pub use folded::FoldedTable;
pub use tree::{CallTreeBuilder, StackFrame};

/// Output flavor selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Folded stacks for flamegraph.pl
    Folded,
    /// Nested JSON for d3-flame-graph
    Json,
}

/// The aggregate being built during the conversion pass
///
/// **Public** - constructed once from the configuration, mutated once per
/// qualifying event, then handed whole to the serializer.
#[derive(Debug)]
pub enum StackAggregate {
    Folded(FoldedTable),
    Tree(CallTreeBuilder),
}

impl StackAggregate {
    pub fn new(kind: OutputKind, live: bool) -> Self {
        match kind {
            OutputKind::Folded => StackAggregate::Folded(FoldedTable::new()),
            OutputKind::Json => StackAggregate::Tree(CallTreeBuilder::new(live)),
        }
    }

    /// Fold one event's normalized stack into the aggregate
    ///
    /// `frames` is leaf-first unless stack reversal was requested upstream.
    /// An empty sequence leaves the aggregate untouched.
    pub fn fold(&mut self, frames: &[String], weight: u64, start_nanos: i64) {
        match self {
            StackAggregate::Folded(table) => table.fold(frames, weight),
            StackAggregate::Tree(builder) => builder.fold(frames, start_nanos),
        }
    }
}
