//! Command implementations.
//!
//! `convert` is the main pipeline (classify, filter, normalize, fold,
//! serialize); `details` prints recording diagnostics without converting.

pub mod convert;
pub mod details;

pub use convert::{convert_recording, execute_convert, ConvertArgs, ConvertConfig, ConvertStats};
pub use details::{execute_details, DetailsArgs};
