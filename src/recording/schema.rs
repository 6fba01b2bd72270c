//! Normalized event schema for recorded profiling data.
//!
//! One [`RecordingEvent`] per profiling event, with nanosecond timestamps,
//! the recording's event-type name, named numeric fields, and an optional
//! stack trace whose frames are ordered leaf-first.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// A single profiling event from a recording
///
/// **Public** - the unit of input for the whole conversion pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingEvent {
    /// Event type name as recorded (e.g. "Method Profiling Sample")
    pub event_type: String,

    /// Start timestamp in nanoseconds since epoch
    pub start_timestamp: i64,

    /// End timestamp in nanoseconds since epoch
    pub end_timestamp: i64,

    /// Event duration in nanoseconds
    #[serde(default)]
    pub duration: i64,

    /// Named numeric fields (e.g. "allocationSize", "tlabSize")
    #[serde(default)]
    pub fields: HashMap<String, u64>,

    /// Stack trace captured with the event, frames ordered leaf-first
    #[serde(default)]
    pub stack_trace: Option<StackTraceRecord>,
}

impl RecordingEvent {
    /// Look up a named numeric field
    ///
    /// **Public** - used by weight extraction
    pub fn field(&self, name: &str) -> Option<u64> {
        self.fields.get(name).copied()
    }
}

/// Stack trace handle attached to an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackTraceRecord {
    pub frames: Vec<FrameRecord>,
}

/// One stack level
///
/// A frame without a resolvable method (native or unresolved code) has
/// `method: None` and is dropped during normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    #[serde(default)]
    pub method: Option<MethodRecord>,

    #[serde(default)]
    pub line_number: Option<i32>,
}

/// Method descriptor for a resolved frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodRecord {
    /// Fully qualified declaring type (e.g. "java.lang.String")
    #[serde(default)]
    pub type_name: Option<String>,

    /// Method name (e.g. "length")
    pub method_name: String,

    /// Argument type descriptors, fully qualified
    #[serde(default)]
    pub arguments: Vec<String>,

    /// Return type descriptor
    #[serde(default)]
    pub return_type: Option<String>,
}

/// A fully loaded recording
///
/// The whole event stream is buffered before aggregation; events are
/// yielded in recording order, which is what makes output deterministic.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    events: Vec<RecordingEvent>,
}

impl Recording {
    /// **Public** - constructor, also used by tests to build recordings in memory
    pub fn new(events: Vec<RecordingEvent>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[RecordingEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Overall time range of the recording in nanoseconds, or `None` when empty
    ///
    /// **Public** - diagnostic accessor for the details command
    pub fn time_range(&self) -> Option<(i64, i64)> {
        let start = self.events.iter().map(|e| e.start_timestamp).min()?;
        let end = self.events.iter().map(|e| e.end_timestamp).max()?;
        Some((start, end))
    }

    /// Distinct event type names present in the recording
    ///
    /// **Public** - used for diagnostics and for the no-matching-events error
    pub fn event_type_names(&self) -> BTreeSet<String> {
        self.events.iter().map(|e| e.event_type.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, start: i64, end: i64) -> RecordingEvent {
        RecordingEvent {
            event_type: name.to_string(),
            start_timestamp: start,
            end_timestamp: end,
            duration: end - start,
            fields: HashMap::new(),
            stack_trace: None,
        }
    }

    #[test]
    fn test_time_range_spans_all_events() {
        let recording = Recording::new(vec![
            event("Method Profiling Sample", 200, 250),
            event("File Read", 100, 400),
            event("Method Profiling Sample", 300, 350),
        ]);

        assert_eq!(recording.time_range(), Some((100, 400)));
    }

    #[test]
    fn test_time_range_empty_recording() {
        assert_eq!(Recording::default().time_range(), None);
    }

    #[test]
    fn test_event_type_names_deduplicated() {
        let recording = Recording::new(vec![
            event("Method Profiling Sample", 1, 2),
            event("File Read", 3, 4),
            event("Method Profiling Sample", 5, 6),
        ]);

        let names: Vec<String> = recording.event_type_names().into_iter().collect();
        assert_eq!(names, vec!["File Read", "Method Profiling Sample"]);
    }

    #[test]
    fn test_field_lookup() {
        let mut e = event("Allocation in new TLAB", 1, 1);
        e.fields.insert("tlabSize".to_string(), 8192);

        assert_eq!(e.field("tlabSize"), Some(8192));
        assert_eq!(e.field("allocationSize"), None);
    }

    #[test]
    fn test_event_deserializes_with_defaults() {
        let json = r#"{"event_type":"Java Exception","start_timestamp":5,"end_timestamp":5}"#;
        let e: RecordingEvent = serde_json::from_str(json).unwrap();

        assert_eq!(e.duration, 0);
        assert!(e.fields.is_empty());
        assert!(e.stack_trace.is_none());
    }
}
