//! Partitioning records by the frame found at a given depth.

use super::frame::{Frame, Record, StackTrace};
use super::separator::{CategoryKey, FrameSeparator};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Index of a record in the model's record list
pub type ItemIndex = usize;

/// Which end of the stack the tree grows from
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum TraversalDirection {
    /// Depth 0 is the thread's entry point (the bottom of the stack)
    #[value(name = "thread-root")]
    ThreadRootAtTop,
    /// Depth 0 is the innermost call
    #[default]
    #[value(name = "top-frame")]
    TopFrameFirst,
}

impl fmt::Display for TraversalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThreadRootAtTop => f.write_str("thread root at top"),
            Self::TopFrameFirst => f.write_str("top frame first"),
        }
    }
}

/// Frame at `depth` of `trace` when read in `direction`
///
/// With the thread root at the top, a truncated trace is missing its real
/// bottom, so depth 0 yields `unknown` and the recorded frames follow.
pub fn frame_at<'a>(
    trace: &'a StackTrace,
    depth: usize,
    direction: TraversalDirection,
    unknown: &'a Frame,
) -> Option<&'a Frame> {
    let frames = &trace.frames;
    match direction {
        TraversalDirection::TopFrameFirst => frames.get(depth),
        TraversalDirection::ThreadRootAtTop if trace.truncated => {
            if depth == 0 {
                Some(unknown)
            } else if depth <= frames.len() {
                frames.get(frames.len() - depth)
            } else {
                None
            }
        }
        TraversalDirection::ThreadRootAtTop => {
            if depth < frames.len() {
                frames.get(frames.len() - 1 - depth)
            } else {
                None
            }
        }
    }
}

/// Frame of a record at `depth`, if the record has a trace that deep
pub fn record_frame_at<'a, R: Record>(
    record: &'a R,
    depth: usize,
    direction: TraversalDirection,
    unknown: &'a Frame,
) -> Option<&'a Frame> {
    record
        .stack_trace()
        .and_then(|trace| frame_at(trace, depth, direction, unknown))
}

/// A frame together with the records sharing it at one depth
#[derive(Debug, Clone)]
pub struct FrameEntry {
    pub frame: Frame,
    pub items: Vec<ItemIndex>,
}

/// Group `items` by their frame at `depth`
///
/// Frames are bucketed by [`FrameSeparator::category`]; inside a bucket the
/// existing entries are scanned with [`FrameSeparator::compare_details`].
/// Entries come back in discovery order. Items without a frame at `depth` are
/// dropped.
pub fn group_by_frame<R: Record>(
    records: &[R],
    items: impl IntoIterator<Item = ItemIndex>,
    depth: usize,
    direction: TraversalDirection,
    separator: &FrameSeparator,
    unknown: &Frame,
) -> Vec<FrameEntry> {
    let mut entries: Vec<FrameEntry> = Vec::new();
    let mut buckets: HashMap<CategoryKey, Vec<usize>> = HashMap::new();

    for item in items {
        let Some(frame) = records
            .get(item)
            .and_then(|record| record_frame_at(record, depth, direction, unknown))
        else {
            continue;
        };

        let bucket = buckets.entry(separator.category(frame)).or_default();
        let existing = bucket
            .iter()
            .copied()
            .find(|&slot| separator.compare_details(&entries[slot].frame, frame));

        match existing {
            Some(slot) => entries[slot].items.push(item),
            None => {
                bucket.push(entries.len());
                entries.push(FrameEntry {
                    frame: frame.clone(),
                    items: vec![item],
                });
            }
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::frame::{FrameType, Method, Package, TypeRef};
    use crate::model::separator::FrameCategorization;
    use std::rc::Rc;

    fn frame(name: &str, line: u32) -> Frame {
        let package = Rc::new(Package::new("p"));
        let ty = Rc::new(TypeRef::new(package, "T"));
        Frame::new(
            Rc::new(Method::new(ty, name, "()V")),
            Some(line),
            None,
            FrameType::JitCompiled,
        )
    }

    #[test]
    fn frame_at_reads_from_the_requested_end() {
        let unknown = Frame::unknown();
        let trace = StackTrace::new(vec![frame("a", 1), frame("b", 1), frame("c", 1)], false);

        let top = frame_at(&trace, 0, TraversalDirection::TopFrameFirst, &unknown);
        assert_eq!(top.map(|f| f.method().name.as_str()), Some("a"));

        let root = frame_at(&trace, 0, TraversalDirection::ThreadRootAtTop, &unknown);
        assert_eq!(root.map(|f| f.method().name.as_str()), Some("c"));

        assert!(frame_at(&trace, 3, TraversalDirection::ThreadRootAtTop, &unknown).is_none());
        assert!(frame_at(&trace, 3, TraversalDirection::TopFrameFirst, &unknown).is_none());
    }

    #[test]
    fn truncated_trace_starts_with_unknown_from_root() {
        let unknown = Frame::unknown();
        let trace = StackTrace::new(vec![frame("a", 1), frame("b", 1)], true);
        let dir = TraversalDirection::ThreadRootAtTop;

        assert!(frame_at(&trace, 0, dir, &unknown).is_some_and(Frame::is_unknown));
        assert_eq!(
            frame_at(&trace, 1, dir, &unknown).map(|f| f.method().name.as_str()),
            Some("b")
        );
        assert_eq!(
            frame_at(&trace, 2, dir, &unknown).map(|f| f.method().name.as_str()),
            Some("a")
        );
        assert!(frame_at(&trace, 3, dir, &unknown).is_none());

        // top-first reads are unaffected by truncation
        let top = frame_at(&trace, 0, TraversalDirection::TopFrameFirst, &unknown);
        assert_eq!(top.map(|f| f.method().name.as_str()), Some("a"));
    }

    #[test]
    fn lines_split_within_one_method_bucket() {
        let unknown = Frame::unknown();
        let records = vec![
            StackTrace::new(vec![frame("a", 1)], false),
            StackTrace::new(vec![frame("a", 2)], false),
            StackTrace::new(vec![frame("a", 1)], false),
            StackTrace::new(vec![], false),
        ];

        let by_line = FrameSeparator::new(FrameCategorization::Line, false);
        let entries = group_by_frame(
            &records,
            0..records.len(),
            0,
            TraversalDirection::TopFrameFirst,
            &by_line,
            &unknown,
        );
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].items, vec![0, 2]);
        assert_eq!(entries[1].items, vec![1]);

        let by_method = FrameSeparator::new(FrameCategorization::Method, false);
        let entries = group_by_frame(
            &records,
            0..records.len(),
            0,
            TraversalDirection::TopFrameFirst,
            &by_method,
            &unknown,
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].items, vec![0, 1, 2]);
    }
}
