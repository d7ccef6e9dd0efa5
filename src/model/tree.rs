//! Lazily expanded stack trace tree.
//!
//! The tree alternates between two node kinds:
//! - [`Fork`]: a set of sibling branches diverging from a common point
//! - [`Branch`]: a run of frames shared by a group of records, without
//!   internal divergence, ending in another (possibly empty) fork
//!
//! Nothing below the root fork is built until it is asked for. Every lazy
//! accessor computes its value once, caches it in a [`OnceCell`] and hands out
//! the identical instance afterwards. The tree is not `Send`: expansion mutates
//! those caches without locking.
//!
//! # Example
//! ```
//! use stacktrace_tree::model::{
//!     Frame, FrameCategorization, FrameSeparator, FrameType, Method, Package, StackTrace,
//!     StacktraceModel, TraversalDirection, TypeRef,
//! };
//! use std::rc::Rc;
//!
//! let ty = Rc::new(TypeRef::new(Rc::new(Package::new("demo")), "Main"));
//! let frame = |name: &str| {
//!     Frame::new(Rc::new(Method::new(ty.clone(), name, "()V")), None, None, FrameType::Interpreted)
//! };
//! let records = vec![
//!     StackTrace::new(vec![frame("leaf"), frame("main")], false),
//!     StackTrace::new(vec![frame("other"), frame("main")], false),
//! ];
//!
//! let model = StacktraceModel::new(
//!     TraversalDirection::ThreadRootAtTop,
//!     FrameSeparator::new(FrameCategorization::Method, false),
//!     records,
//! );
//! let root = model.root_fork();
//! assert_eq!(root.branch_count(), 1);
//! assert_eq!(root.branches()[0].end_fork().branch_count(), 2);
//! ```

use super::frame::{Frame, Record};
use super::grouping::{group_by_frame, record_frame_at, FrameEntry, ItemIndex, TraversalDirection};
use super::separator::FrameSeparator;
use log::debug;
use std::cell::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

/// State shared by every node of one model
struct ModelData<R> {
    direction: TraversalDirection,
    separator: FrameSeparator,
    records: Vec<R>,
    unknown: Frame,
}

impl<R: Record> ModelData<R> {
    fn frame_at(&self, item: ItemIndex, depth: usize) -> Option<&Frame> {
        self.records
            .get(item)
            .and_then(|record| record_frame_at(record, depth, self.direction, &self.unknown))
    }

    fn group(&self, items: &[ItemIndex], depth: usize) -> Vec<FrameEntry> {
        group_by_frame(
            &self.records,
            items.iter().copied(),
            depth,
            self.direction,
            &self.separator,
            &self.unknown,
        )
    }
}

// ============================================================================
// Model
// ============================================================================

/// Stack trace aggregation model over a fixed set of records
///
/// Built once for a (direction, separator, records) triple. A change of any
/// of the three calls for a new model; an existing tree is never updated.
pub struct StacktraceModel<R> {
    data: Rc<ModelData<R>>,
    root: OnceCell<Rc<Fork<R>>>,
}

impl<R: Record> StacktraceModel<R> {
    pub fn new(direction: TraversalDirection, separator: FrameSeparator, records: Vec<R>) -> Self {
        Self {
            data: Rc::new(ModelData {
                direction,
                separator,
                records,
                unknown: Frame::unknown(),
            }),
            root: OnceCell::new(),
        }
    }

    /// Top-level fork over every record that has a stack trace
    pub fn root_fork(&self) -> Rc<Fork<R>> {
        self.root
            .get_or_init(|| {
                let all: Vec<ItemIndex> = (0..self.data.records.len()).collect();
                Fork::build(self.data.clone(), None, 0, 0, &all)
            })
            .clone()
    }
}

impl<R> StacktraceModel<R> {
    pub fn direction(&self) -> TraversalDirection {
        self.data.direction
    }

    pub fn separator(&self) -> FrameSeparator {
        self.data.separator
    }

    /// Records indexed by the item indices found throughout the tree
    pub fn records(&self) -> &[R] {
        &self.data.records
    }

    /// The sentinel frame used for truncated traces in this model
    pub fn unknown_frame(&self) -> &Frame {
        &self.data.unknown
    }
}

impl<R: PartialEq> PartialEq for StacktraceModel<R> {
    fn eq(&self, other: &Self) -> bool {
        self.data.direction == other.data.direction
            && self.data.separator == other.data.separator
            && self.data.records == other.data.records
    }
}

impl<R: Eq> Eq for StacktraceModel<R> {}

impl<R: Hash> Hash for StacktraceModel<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.direction.hash(state);
        self.data.separator.hash(state);
        self.data.records.hash(state);
    }
}

impl<R> fmt::Debug for StacktraceModel<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StacktraceModel")
            .field("direction", &self.data.direction)
            .field("separator", &self.data.separator)
            .field("records", &self.data.records.len())
            .field("expanded", &self.root.get().is_some())
            .finish()
    }
}

// ============================================================================
// Fork
// ============================================================================

/// Sibling branches diverging at one depth
pub struct Fork<R> {
    parent: Option<Weak<Branch<R>>>,
    branches: Vec<Rc<Branch<R>>>,
    frame_index: usize,
    item_offset: usize,
    items_in_fork: usize,
}

impl<R: Record> Fork<R> {
    /// Group `items` at `frame_index` and lay out one branch per group,
    /// largest first
    fn build(
        data: Rc<ModelData<R>>,
        parent: Option<Weak<Branch<R>>>,
        frame_index: usize,
        item_offset: usize,
        items: &[ItemIndex],
    ) -> Rc<Self> {
        let mut entries = data.group(items, frame_index);
        // stable: equal counts keep discovery order
        entries.sort_by(|a, b| b.items.len().cmp(&a.items.len()));

        debug!(
            "Built fork at depth {} with {} branches over {} items",
            frame_index,
            entries.len(),
            items.len()
        );

        Rc::new_cyclic(|fork| {
            let mut branches = Vec::with_capacity(entries.len());
            let mut offset = 0;
            for (sibling_index, entry) in entries.into_iter().enumerate() {
                let count = entry.items.len();
                branches.push(Branch::new(
                    data.clone(),
                    fork.clone(),
                    entry,
                    frame_index,
                    sibling_index,
                    item_offset,
                    offset,
                ));
                offset += count;
            }

            Fork {
                parent,
                branches,
                frame_index,
                item_offset,
                items_in_fork: offset,
            }
        })
    }
}

impl<R> Fork<R> {
    /// Branches sorted by non-increasing item count
    pub fn branches(&self) -> &[Rc<Branch<R>>] {
        &self.branches
    }

    pub fn branch(&self, index: usize) -> Option<&Rc<Branch<R>>> {
        self.branches.get(index)
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Number of records flowing into this fork's branches
    pub fn items_in_fork(&self) -> usize {
        self.items_in_fork
    }

    /// Position of this fork's first item among all root items
    pub fn item_offset(&self) -> usize {
        self.item_offset
    }

    /// Depth of the first frame of every branch in this fork
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Branch this fork ends; `None` for the root fork
    pub fn parent_branch(&self) -> Option<Rc<Branch<R>>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl<R> fmt::Debug for Fork<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fork")
            .field("frame_index", &self.frame_index)
            .field("item_offset", &self.item_offset)
            .field("items_in_fork", &self.items_in_fork)
            .field("branches", &self.branches.len())
            .finish()
    }
}

// ============================================================================
// Branch
// ============================================================================

/// A non-forking run of frames
pub struct Branch<R> {
    data: Rc<ModelData<R>>,
    parent: Weak<Fork<R>>,
    first_frame: StacktraceFrame<R>,
    tail_frames: OnceCell<Vec<StacktraceFrame<R>>>,
    end_fork: OnceCell<Rc<Fork<R>>>,
    sibling_index: usize,
    fork_item_offset: usize,
    item_offset_in_fork: usize,
}

/// Outcome of looking one frame past a node
enum NextFrame {
    /// Every continuing item agrees; the narrowed items share `frame`
    Common { frame: Frame, items: Rc<[ItemIndex]> },
    /// Continuing items disagree; the end fork starts here
    Diverges,
    /// No item continues
    Exhausted,
}

impl<R: Record> Branch<R> {
    fn new(
        data: Rc<ModelData<R>>,
        parent: Weak<Fork<R>>,
        entry: FrameEntry,
        depth: usize,
        sibling_index: usize,
        fork_item_offset: usize,
        item_offset_in_fork: usize,
    ) -> Rc<Self> {
        Rc::new_cyclic(|branch| Branch {
            data,
            parent,
            first_frame: StacktraceFrame {
                frame: entry.frame,
                items: entry.items.into(),
                branch: branch.clone(),
                index_in_branch: 0,
                depth,
            },
            tail_frames: OnceCell::new(),
            end_fork: OnceCell::new(),
            sibling_index,
            fork_item_offset,
            item_offset_in_fork,
        })
    }

    /// True when some item of the first frame continues one level deeper
    pub fn has_tail(&self) -> bool {
        let depth = self.first_frame.depth + 1;
        self.first_frame
            .items
            .iter()
            .any(|&item| self.data.frame_at(item, depth).is_some())
    }

    /// Frames following the first one, up to the point where items diverge
    pub fn tail_frames(&self) -> &[StacktraceFrame<R>] {
        self.tail_frames.get_or_init(|| self.build_tail())
    }

    /// Last frame of this branch: the final tail frame, or the first frame
    pub fn last_frame(&self) -> &StacktraceFrame<R> {
        self.tail_frames().last().unwrap_or(&self.first_frame)
    }

    /// Fork reached after the last frame; empty for a dead end
    pub fn end_fork(&self) -> Rc<Fork<R>> {
        self.end_fork
            .get_or_init(|| {
                let last = self.last_frame();
                Fork::build(
                    self.data.clone(),
                    Some(self.first_frame.branch.clone()),
                    last.depth + 1,
                    self.item_offset(),
                    &last.items,
                )
            })
            .clone()
    }

    fn build_tail(&self) -> Vec<StacktraceFrame<R>> {
        let mut tail = Vec::new();
        let mut items = self.first_frame.items.clone();
        let mut depth = self.first_frame.depth;

        loop {
            depth += 1;
            match self.next_frame(&items, depth) {
                NextFrame::Common {
                    frame,
                    items: continuing,
                } => {
                    tail.push(StacktraceFrame {
                        frame,
                        items: continuing.clone(),
                        branch: self.first_frame.branch.clone(),
                        index_in_branch: tail.len() + 1,
                        depth,
                    });
                    items = continuing;
                }
                NextFrame::Diverges | NextFrame::Exhausted => break,
            }
        }

        tail
    }

    fn next_frame(&self, items: &Rc<[ItemIndex]>, depth: usize) -> NextFrame {
        let separator = &self.data.separator;
        let mut exemplar: Option<&Frame> = None;
        let mut continuing = Vec::with_capacity(items.len());

        for &item in items.iter() {
            let Some(frame) = self.data.frame_at(item, depth) else {
                continue;
            };
            match exemplar {
                None => exemplar = Some(frame),
                Some(first) if separator.is_separate(first, frame) => return NextFrame::Diverges,
                Some(_) => {}
            }
            continuing.push(item);
        }

        match exemplar {
            None => NextFrame::Exhausted,
            Some(frame) => {
                // reuse the parent's allocation when nobody dropped out
                let items = if continuing.len() == items.len() {
                    items.clone()
                } else {
                    continuing.into()
                };
                NextFrame::Common {
                    frame: frame.clone(),
                    items,
                }
            }
        }
    }
}

impl<R> Branch<R> {
    pub fn first_frame(&self) -> &StacktraceFrame<R> {
        &self.first_frame
    }

    /// Number of records in this branch
    pub fn item_count(&self) -> usize {
        self.first_frame.items.len()
    }

    /// Position among the parent fork's branches
    pub fn sibling_index(&self) -> usize {
        self.sibling_index
    }

    /// Position of this branch's first item within the parent fork
    pub fn item_offset_in_fork(&self) -> usize {
        self.item_offset_in_fork
    }

    /// Position of this branch's first item among all root items
    pub fn item_offset(&self) -> usize {
        self.fork_item_offset + self.item_offset_in_fork
    }

    pub fn parent_fork(&self) -> Option<Rc<Fork<R>>> {
        self.parent.upgrade()
    }

    /// True once the tail has been expanded
    pub fn is_tail_expanded(&self) -> bool {
        self.tail_frames.get().is_some()
    }

    /// True once the end fork has been built
    pub fn is_end_fork_built(&self) -> bool {
        self.end_fork.get().is_some()
    }
}

impl<R> fmt::Debug for Branch<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Branch")
            .field("first_frame", &self.first_frame)
            .field("sibling_index", &self.sibling_index)
            .field("item_offset_in_fork", &self.item_offset_in_fork)
            .field("tail_frames", &self.tail_frames.get().map(Vec::len))
            .finish()
    }
}

// ============================================================================
// StacktraceFrame
// ============================================================================

/// A frame bound to the records that reach it within one branch
pub struct StacktraceFrame<R> {
    frame: Frame,
    items: Rc<[ItemIndex]>,
    branch: Weak<Branch<R>>,
    index_in_branch: usize,
    depth: usize,
}

impl<R> StacktraceFrame<R> {
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Indices of the records reaching this frame
    pub fn items(&self) -> &[ItemIndex] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn branch(&self) -> Option<Rc<Branch<R>>> {
        self.branch.upgrade()
    }

    /// 0 for a branch's first frame, then 1, 2, ... along its tail
    pub fn index_in_branch(&self) -> usize {
        self.index_in_branch
    }

    /// Depth of this frame in the traversal direction
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl<R> fmt::Debug for StacktraceFrame<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StacktraceFrame")
            .field("method", &self.frame.method().name)
            .field("items", &self.items.len())
            .field("index_in_branch", &self.index_in_branch)
            .field("depth", &self.depth)
            .finish()
    }
}
