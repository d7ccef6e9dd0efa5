//! Input JSON schema definitions for recordings.
//!
//! A recording is a list of events, each optionally carrying a stack trace:
//!
//! ```json
//! { "events": [
//!     { "stackTrace": { "truncated": false, "frames": [
//!         { "package": "java.util", "type": "HashMap", "method": "get",
//!           "descriptor": "(Ljava/lang/Object;)Ljava/lang/Object;",
//!           "line": 42, "bci": 7, "frameType": "JIT compiled" } ] } },
//!     { "stackTrace": null }
//! ] }
//! ```
//!
//! Frames are listed top of stack first.

use serde::{Deserialize, Serialize};

/// A single frame as written by the exporter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFrame {
    /// Package of the declaring type; empty for the default package
    #[serde(default)]
    pub package: String,

    /// Declaring type name, without package
    #[serde(rename = "type", alias = "class")]
    pub type_name: String,

    pub method: String,

    #[serde(default)]
    pub descriptor: String,

    #[serde(default)]
    pub line: Option<u32>,

    #[serde(default)]
    pub bci: Option<u32>,

    /// Optimization tier, e.g. "Interpreted" or "JIT compiled"
    #[serde(default, alias = "frame_type")]
    pub frame_type: Option<String>,
}

/// Stack trace as written by the exporter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStackTrace {
    #[serde(default)]
    pub truncated: bool,

    #[serde(default)]
    pub frames: Vec<RawFrame>,
}

/// One recorded event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(default, alias = "stack_trace", alias = "stack")]
    pub stack_trace: Option<RawStackTrace>,
}
