//! jfr-flame
//!
//! Converts Java Flight Recorder event dumps into flame-graph-ready
//! data: the folded stack format consumed by flamegraph.pl, or the
//! nested JSON document consumed by d3-flame-graph.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install jfr-flame
//! jfr-flame --help
//! ```
//!
//! The library entry point for programmatic use is
//! [`commands::convert_recording`].

pub mod aggregator;
pub mod commands;
pub mod events;
pub mod filter;
pub mod frames;
pub mod output;
pub mod recording;
pub mod utils;
