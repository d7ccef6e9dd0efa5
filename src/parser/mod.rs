//! Recording parsing and schema definitions.
//!
//! This module handles:
//! - Deserializing raw recording JSON
//! - Interning frame identities
//! - Exposing events as tree model records

pub mod recording;
pub mod schema;

// Re-export main types
pub use recording::{parse_recording, read_recording, Event, Recording};
pub use schema::{RawEvent, RawFrame, RawStackTrace};
