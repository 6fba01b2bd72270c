//! Convert command implementation.
//!
//! The convert command:
//! 1. Loads the recording event dump
//! 2. Classifies and filters each event
//! 3. Normalizes stacks and folds them into the selected aggregate
//! 4. Writes the finished aggregate once, to a file or stdout

use crate::aggregator::{OutputKind, StackAggregate};
use crate::events::{EventKind, SizeUnit};
use crate::filter::TimeRange;
use crate::frames::{normalize_stack, FrameFormat};
use crate::output::write_aggregate_to;
use crate::recording::{load_recording, Recording};
use crate::utils::error::ConvertError;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::PathBuf;

/// Arguments for the convert command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Path to the recording event dump
    pub input: PathBuf,

    /// Output path; stdout when absent
    pub output: Option<PathBuf>,

    /// Treat the input as gzip-compressed
    pub decompress: bool,

    /// Event kind to build the flame graph from
    pub event_kind: EventKind,

    /// Output flavor (folded text or JSON tree)
    pub output_kind: OutputKind,

    /// Partition the JSON tree by event start second
    pub live: bool,

    /// Unit for byte-count weights
    pub size_unit: SizeUnit,

    /// Frame label formatting options
    pub frame_format: FrameFormat,

    /// Reverse stacks for bottom-up graphs
    pub reverse_stacks: bool,

    /// Window start in seconds
    pub start_timestamp: Option<i64>,

    /// Window end in seconds
    pub end_timestamp: Option<i64>,

    /// Abort on events missing an expected field instead of skipping them
    pub strict: bool,
}

/// Engine configuration, fixed for the whole conversion pass
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub event_kind: EventKind,
    pub output_kind: OutputKind,
    pub live: bool,
    pub size_unit: SizeUnit,
    pub frame_format: FrameFormat,
    pub reverse_stacks: bool,
    pub time_range: TimeRange,
    pub strict: bool,
}

impl From<&ConvertArgs> for ConvertConfig {
    fn from(args: &ConvertArgs) -> Self {
        Self {
            event_kind: args.event_kind,
            output_kind: args.output_kind,
            live: args.live,
            size_unit: args.size_unit,
            frame_format: args.frame_format,
            reverse_stacks: args.reverse_stacks,
            time_range: TimeRange::from_seconds(args.start_timestamp, args.end_timestamp),
            strict: args.strict,
        }
    }
}

/// Counters from a conversion pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    /// Events that passed the kind and time filters
    pub accepted: u64,

    /// Accepted events whose stacks contained no resolvable frame
    pub empty_stacks: u64,

    /// Matched events skipped for lack of an expected field
    pub skipped_missing_field: u64,

    /// Sum of classified weights over accepted events
    pub total_weight: u64,
}

/// Execute the convert command
///
/// **Public** - main entry point called from main.rs
pub fn execute_convert(args: ConvertArgs) -> Result<()> {
    info!(
        "Converting {} ({} events) to {} output",
        args.input.display(),
        args.event_kind.option_name(),
        match args.output_kind {
            OutputKind::Folded => "folded",
            OutputKind::Json => "json",
        }
    );

    let recording = load_recording(&args.input, args.decompress)
        .context("Failed to load the recording")?;

    let config = ConvertConfig::from(&args);
    let (aggregate, stats) = convert_recording(&recording, &config)
        .context("Failed to convert the recording")?;

    // The aggregate is complete; only now is the sink opened, so a failed
    // conversion never leaves partial output behind.
    write_aggregate_to(&aggregate, args.output.as_deref())
        .context("Failed to write output")?;

    info!(
        "Converted {} events (total weight {}), {} with empty stacks, {} skipped",
        stats.accepted, stats.total_weight, stats.empty_stacks, stats.skipped_missing_field
    );

    Ok(())
}

/// Run the aggregation pass over a loaded recording
///
/// **Public** - the library-level pipeline, also used by tests
///
/// # Errors
/// * `ConvertError::NoMatchingEvents` - nothing passed the kind and time
///   filters; an empty flame graph is never useful
/// * `ConvertError::MissingField` - only in strict mode; otherwise such
///   events are skipped with a warning
pub fn convert_recording(
    recording: &Recording,
    config: &ConvertConfig,
) -> Result<(StackAggregate, ConvertStats), ConvertError> {
    let mut aggregate = StackAggregate::new(config.output_kind, config.live);
    let mut stats = ConvertStats::default();

    for event in recording.events() {
        if !config.event_kind.matches(event) {
            continue;
        }
        if !config
            .time_range
            .contains_event(event.start_timestamp, event.end_timestamp)
        {
            continue;
        }

        let weight = match config.event_kind.value(event, config.size_unit) {
            Ok(weight) => weight,
            Err(err) if config.strict => return Err(err),
            Err(err) => {
                warn!("{}; skipping event", err);
                stats.skipped_missing_field += 1;
                continue;
            }
        };

        stats.accepted += 1;
        stats.total_weight += weight;

        let frames = normalize_stack(event, &config.frame_format, config.reverse_stacks);
        if frames.is_empty() {
            stats.empty_stacks += 1;
        }

        aggregate.fold(&frames, weight, event.start_timestamp);
    }

    if stats.accepted == 0 {
        let available = recording.event_type_names().into_iter().collect();
        return Err(ConvertError::NoMatchingEvents { available });
    }

    debug!(
        "Aggregation pass done: {} accepted, {} skipped",
        stats.accepted, stats.skipped_missing_field
    );

    Ok((aggregate, stats))
}

/// Validate convert arguments
///
/// **Public** - can be called before execute_convert for early validation
pub fn validate_args(args: &ConvertArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    if let (Some(start), Some(end)) = (args.start_timestamp, args.end_timestamp) {
        if start > end {
            anyhow::bail!("Start timestamp must not be after end timestamp");
        }
    }

    if args.live && args.output_kind != OutputKind::Json {
        anyhow::bail!("Live mode is only available for json output");
    }

    Ok(())
}
