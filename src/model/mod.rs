//! Stack trace aggregation model.
//!
//! This module groups records by shared stack prefixes into a lazily
//! expanded tree:
//! - Frame identities and the record contract (`frame`)
//! - The frame comparison policy (`separator`)
//! - Depth-wise grouping of records (`grouping`)
//! - The fork/branch tree itself (`tree`)
//! - Selection paths and frame text (`path`, `format`)

pub mod format;
pub mod frame;
pub mod grouping;
pub mod path;
pub mod separator;
pub mod tree;

// Re-export main types
pub use format::frame_text;
pub use frame::{Frame, FrameType, Method, Package, Record, StackTrace, TypeRef};
pub use grouping::{group_by_frame, FrameEntry, ItemIndex, TraversalDirection};
pub use path::TreePath;
pub use separator::{CategoryKey, FrameCategorization, FrameSeparator};
pub use tree::{Branch, Fork, StacktraceFrame, StacktraceModel};
