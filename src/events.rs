//! Event classification and weight extraction.
//!
//! Each [`EventKind`] can be selected on the command line and matches one
//! or many recording event types. Each kind knows how to turn an event into
//! the numeric value that makes the flame graph most meaningful: for
//! allocation events the number of bytes allocated, for I/O the duration of
//! the operation, for CPU samples a plain count.

use crate::recording::RecordingEvent;
use crate::utils::error::ConvertError;

const NANOS_PER_MILLI: i64 = 1_000_000;

/// Closed set of event kinds a flame graph can be built from
///
/// **Public** - selected once at configuration time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Method profiling samples (CPU)
    Cpu,
    /// Allocations satisfied inside a new TLAB
    AllocationInNewTlab,
    /// Allocations that bypassed the TLAB
    AllocationOutsideTlab,
    /// Thrown Java exceptions
    Exceptions,
    /// Time spent blocked on a monitor
    MonitorBlocked,
    /// File and socket read/write operations
    Io,
}

/// How an event kind turns an event into a weight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueRule {
    /// Every event counts as 1
    Count,
    /// Event duration, truncated from nanoseconds to milliseconds
    DurationMillis,
    /// A named byte-count field, scaled by the configured size unit
    SizeField(&'static str),
}

/// Unit for byte-count weights
///
/// Historical converters disagreed on whether allocation weights are bytes
/// or kilobytes, so the divisor is explicit configuration here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    Bytes,
    Kilobytes,
}

impl SizeUnit {
    pub fn from_option_name(name: &str) -> Option<Self> {
        match name {
            "bytes" => Some(SizeUnit::Bytes),
            "kilobytes" => Some(SizeUnit::Kilobytes),
            _ => None,
        }
    }

    fn divisor(self) -> u64 {
        match self {
            SizeUnit::Bytes => 1,
            SizeUnit::Kilobytes => 1000,
        }
    }
}

impl Default for SizeUnit {
    fn default() -> Self {
        SizeUnit::Kilobytes
    }
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::Cpu,
        EventKind::AllocationInNewTlab,
        EventKind::AllocationOutsideTlab,
        EventKind::Exceptions,
        EventKind::MonitorBlocked,
        EventKind::Io,
    ];

    /// Parse a command line option name into a kind
    ///
    /// **Public** - the CLI-facing converter; returns `None` for unknown names
    pub fn from_option_name(name: &str) -> Option<Self> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.option_name() == name)
    }

    /// The option name used to select this kind on the command line
    pub fn option_name(&self) -> &'static str {
        match self {
            EventKind::Cpu => "cpu",
            EventKind::AllocationInNewTlab => "allocation-tlab",
            EventKind::AllocationOutsideTlab => "allocation-outside-tlab",
            EventKind::Exceptions => "exceptions",
            EventKind::MonitorBlocked => "monitor-blocked",
            EventKind::Io => "io",
        }
    }

    /// Recording event type names this kind matches
    pub fn event_names(&self) -> &'static [&'static str] {
        match self {
            EventKind::Cpu => &["Method Profiling Sample"],
            EventKind::AllocationInNewTlab => &["Allocation in new TLAB"],
            EventKind::AllocationOutsideTlab => &["Allocation outside TLAB"],
            EventKind::Exceptions => &["Java Exception"],
            EventKind::MonitorBlocked => &["Java Monitor Blocked"],
            EventKind::Io => &["File Read", "File Write", "Socket Read", "Socket Write"],
        }
    }

    fn value_rule(&self) -> ValueRule {
        match self {
            EventKind::Cpu | EventKind::Exceptions => ValueRule::Count,
            EventKind::AllocationInNewTlab => ValueRule::SizeField("tlabSize"),
            EventKind::AllocationOutsideTlab => ValueRule::SizeField("allocationSize"),
            EventKind::MonitorBlocked | EventKind::Io => ValueRule::DurationMillis,
        }
    }

    /// Whether an event belongs to this kind
    ///
    /// **Public** - pure read, no side effects
    pub fn matches(&self, event: &RecordingEvent) -> bool {
        self.event_names()
            .iter()
            .any(|name| *name == event.event_type)
    }

    /// Extract the weight of a matched event
    ///
    /// **Public** - pure read, no side effects
    ///
    /// # Errors
    /// `ConvertError::MissingField` when a byte-count kind matched an event
    /// that does not carry the expected field. A missing field is never
    /// treated as zero.
    pub fn value(&self, event: &RecordingEvent, size_unit: SizeUnit) -> Result<u64, ConvertError> {
        match self.value_rule() {
            ValueRule::Count => Ok(1),
            ValueRule::DurationMillis => Ok((event.duration / NANOS_PER_MILLI).max(0) as u64),
            ValueRule::SizeField(field) => {
                let size = event.field(field).ok_or_else(|| ConvertError::MissingField {
                    event_type: event.event_type.clone(),
                    field,
                })?;
                Ok(size / size_unit.divisor())
            }
        }
    }
}
