//! Build collapsed stack format from a stack trace tree.
//!
//! Collapsed stacks are the input format for flamegraph generation.
//! Format: "root;child;grandchild weight"
//!
//! Example: "Thread.run();Worker.poll();HashMap.get(Object) 12"
//! Separator characters inside a frame text are replaced before joining.
//! This means: 12 records had exactly that stack, read in tree order.

use crate::model::{frame_text, Branch, Fork, Frame, FrameSeparator, Record, StacktraceModel};
use crate::utils::config::{COLLAPSED_FRAME_SEPARATOR, COLLAPSED_SEPARATOR_REPLACEMENT};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single collapsed stack entry
///
/// **Public** - used by flamegraph generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapsedStack {
    /// Stack as semicolon-separated frame texts, in tree order
    pub stack: String,

    /// Number of records ending at this stack
    pub weight: u64,
}

impl CollapsedStack {
    /// Create a new collapsed stack
    pub fn new(stack: String, weight: u64) -> Self {
        Self { stack, weight }
    }

    /// Folded line as consumed by flamegraph tools
    pub fn to_line(&self) -> String {
        format!("{} {}", self.stack, self.weight)
    }

    pub fn frames(&self) -> impl Iterator<Item = &str> {
        self.stack.split(COLLAPSED_FRAME_SEPARATOR)
    }
}

/// Build collapsed stacks by walking the tree
///
/// **Public** - main entry point for stack building
///
/// # Arguments
/// * `model` - Tree to walk; forks are expanded as needed
/// * `max_depth` - Optional frame limit; deeper records are attributed to the
///   frame at the limit
///
/// # Returns
/// One entry per distinct stack, sorted by weight (descending). Weights sum to
/// the root fork's item count.
///
/// # Algorithm
/// 1. Walk branches depth-first, frame by frame
/// 2. At each frame, count the records that go no further
/// 3. Emit the frame path with that count
/// 4. Aggregate by stack string (sum weights)
pub fn build_collapsed_stacks<R: Record>(
    model: &StacktraceModel<R>,
    max_depth: Option<usize>,
) -> Vec<CollapsedStack> {
    let root = model.root_fork();
    debug!(
        "Building collapsed stacks from {} items in {} root branches",
        root.items_in_fork(),
        root.branch_count()
    );

    let mut walker = Walker {
        model,
        max_depth,
        path: Vec::new(),
        stack_map: HashMap::new(),
    };
    walker.visit_fork(&root);

    let mut stacks: Vec<CollapsedStack> = walker
        .stack_map
        .into_iter()
        .map(|(stack, weight)| CollapsedStack::new(stack, weight))
        .collect();

    stacks.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.stack.cmp(&b.stack)));
    debug!("Built {} unique collapsed stacks", stacks.len());

    stacks
}

/// Frame text safe to join into a folded line
///
/// **Public** - a frame must never read as two frames once collapsed
pub fn folded_frame_text(frame: &Frame, separator: &FrameSeparator) -> String {
    frame_text(frame, separator).replace(
        COLLAPSED_FRAME_SEPARATOR,
        &COLLAPSED_SEPARATOR_REPLACEMENT.to_string(),
    )
}

/// Depth-first tree walk state
struct Walker<'m, R> {
    model: &'m StacktraceModel<R>,
    max_depth: Option<usize>,
    path: Vec<String>,
    stack_map: HashMap<String, u64>,
}

impl<R: Record> Walker<'_, R> {
    fn visit_fork(&mut self, fork: &Fork<R>) {
        for branch in fork.branches() {
            self.visit_branch(branch);
        }
    }

    fn visit_branch(&mut self, branch: &Branch<R>) {
        let separator = self.model.separator();
        let frames: Vec<_> = std::iter::once(branch.first_frame())
            .chain(branch.tail_frames())
            .collect();
        let pushed_before = self.path.len();

        for (position, node) in frames.iter().enumerate() {
            self.path.push(folded_frame_text(node.frame(), &separator));

            if self.max_depth.is_some_and(|limit| self.path.len() >= limit) {
                self.emit(node.item_count());
                self.path.truncate(pushed_before);
                return;
            }

            let continuing = match frames.get(position + 1) {
                Some(next) => next.item_count(),
                None => branch.end_fork().items_in_fork(),
            };
            self.emit(node.item_count().saturating_sub(continuing));
        }

        self.visit_fork(&branch.end_fork());
        self.path.truncate(pushed_before);
    }

    fn emit(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        let stack = self.path.join(&COLLAPSED_FRAME_SEPARATOR.to_string());
        *self.stack_map.entry(stack).or_insert(0) += count as u64;
    }
}
