//! Details command implementation.
//!
//! Prints the recording's overall time range and, for the selected event
//! kind, the span actually covered by matching events. Useful for picking
//! start/end timestamps before converting.

use crate::events::EventKind;
use crate::recording::load_recording;
use anyhow::{bail, Context, Result};
use chrono::{Local, TimeZone};
use std::path::PathBuf;

/// Arguments for the details command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct DetailsArgs {
    /// Path to the recording event dump
    pub input: PathBuf,

    /// Treat the input as gzip-compressed
    pub decompress: bool,

    /// Event kind the event-span lines are computed for
    pub event_kind: EventKind,

    /// Print raw epoch seconds instead of formatted datetimes
    pub print_timestamp: bool,
}

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Execute the details command
///
/// **Public** - main entry point called from main.rs
pub fn execute_details(args: DetailsArgs) -> Result<()> {
    let recording = load_recording(&args.input, args.decompress)
        .context("Failed to load the recording")?;

    let Some((start, end)) = recording.time_range() else {
        bail!("The recording contains no events");
    };

    let event_span = matching_event_span(&recording, args.event_kind);

    println!("Recording Details");
    print_line("Start", start / NANOS_PER_SEC, args.print_timestamp);
    print_line("End", end / NANOS_PER_SEC, args.print_timestamp);

    match event_span {
        Some((min_start, max_end)) => {
            print_line("Min Start Event", min_start / NANOS_PER_SEC, args.print_timestamp);
            print_line("Max End Event", max_end / NANOS_PER_SEC, args.print_timestamp);
            println!(
                "{:<16}: {}",
                "Events Duration",
                format_duration(max_end - min_start)
            );
        }
        None => {
            println!(
                "{:<16}: no '{}' events in this recording",
                "Events",
                args.event_kind.option_name()
            );
        }
    }
    println!("{:<16}: {}", "Total Duration", format_duration(end - start));

    Ok(())
}

/// Min start / max end over events matching the kind
///
/// **Private** - diagnostic scan, no aggregation
fn matching_event_span(
    recording: &crate::recording::Recording,
    kind: EventKind,
) -> Option<(i64, i64)> {
    let mut span: Option<(i64, i64)> = None;
    for event in recording.events() {
        if !kind.matches(event) {
            continue;
        }
        span = Some(match span {
            Some((min_start, max_end)) => (
                min_start.min(event.start_timestamp),
                max_end.max(event.end_timestamp),
            ),
            None => (event.start_timestamp, event.end_timestamp),
        });
    }
    span
}

fn print_line(label: &str, epoch_seconds: i64, raw: bool) {
    if raw {
        println!("{:<16}: {}", label, epoch_seconds);
    } else {
        println!("{:<16}: {}", label, format_instant(epoch_seconds));
    }
}

/// Render an epoch second in the local timezone
fn format_instant(epoch_seconds: i64) -> String {
    match Local.timestamp_opt(epoch_seconds, 0).single() {
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S %Z").to_string(),
        None => epoch_seconds.to_string(),
    }
}

/// Render a nanosecond span as "N h M min"
fn format_duration(nanos: i64) -> String {
    let total_minutes = nanos / NANOS_PER_SEC / 60;
    format!("{} h {} min", total_minutes / 60, total_minutes % 60)
}
