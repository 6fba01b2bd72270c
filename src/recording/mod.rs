//! Normalized recording model and loader.
//!
//! Decoding the binary JFR container is not done here; recordings are
//! consumed as normalized event dumps (one JSON object per event, see
//! [`schema`]). The rest of the crate only ever sees this module's types.

pub mod reader;
pub mod schema;

pub use reader::load_recording;
pub use schema::{FrameRecord, MethodRecord, Recording, RecordingEvent, StackTraceRecord};
