//! Stack normalization: turning raw frames into ordered label sequences.
//!
//! The recording stores frames leaf-first. Normalization renders each
//! resolvable frame as a label, drops unresolved frames, and optionally
//! reverses the sequence so the aggregators produce bottom-up graphs.

use crate::recording::{FrameRecord, MethodRecord, RecordingEvent};

/// Frame label formatting options
///
/// **Public** - four independent switches, mirrored by CLI flags
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameFormat {
    /// Prepend the method's return type
    pub show_return_value: bool,

    /// Strip package qualifiers from type names
    pub use_simple_names: bool,

    /// Omit the argument list
    pub hide_arguments: bool,

    /// Omit source line numbers
    pub ignore_line_numbers: bool,
}

/// Produce the ordered frame-label sequence for an event
///
/// **Public** - the aggregation input contract
///
/// Labels come out leaf-first (the recording's native order); with
/// `reverse` set the sequence is inverted in place, nothing is relabeled.
/// Unresolved frames are dropped entirely, so the result may be empty.
pub fn normalize_stack(event: &RecordingEvent, format: &FrameFormat, reverse: bool) -> Vec<String> {
    let Some(stack_trace) = &event.stack_trace else {
        return Vec::new();
    };

    let mut labels: Vec<String> = stack_trace
        .frames
        .iter()
        .filter_map(|frame| frame_label(frame, format))
        .collect();

    if reverse {
        labels.reverse();
    }

    labels
}

/// Render a single frame as a label, or `None` for unresolved frames
///
/// **Public** - also exercised directly by tests
pub fn frame_label(frame: &FrameRecord, format: &FrameFormat) -> Option<String> {
    let method = frame.method.as_ref()?;

    let mut label = String::new();

    if format.show_return_value {
        if let Some(return_type) = &method.return_type {
            label.push_str(&type_label(return_type, format));
            label.push(' ');
        }
    }

    if let Some(type_name) = &method.type_name {
        label.push_str(&type_label(type_name, format));
        label.push('.');
    }
    label.push_str(&method.method_name);

    if !format.hide_arguments {
        label.push('(');
        label.push_str(&argument_list(method, format));
        label.push(')');
    }

    if !format.ignore_line_numbers {
        if let Some(line) = frame.line_number {
            label.push(':');
            label.push_str(&line.to_string());
        }
    }

    Some(label)
}

fn argument_list(method: &MethodRecord, format: &FrameFormat) -> String {
    method
        .arguments
        .iter()
        .map(|arg| type_label(arg, format))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reduce "java.lang.String" to "String" when simple names are requested
fn type_label(name: &str, format: &FrameFormat) -> String {
    if format.use_simple_names {
        name.rsplit('.').next().unwrap_or(name).to_string()
    } else {
        name.to_string()
    }
}
