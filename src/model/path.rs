//! Caller-owned selection path into a tree.
//!
//! The tree itself stays purely structural. A UI tracks its selection as a
//! [`TreePath`]: one branch index per fork descended, starting at the root.

use super::frame::Record;
use super::tree::{Branch, Fork, StacktraceModel};
use crate::utils::error::PathError;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Branch indices from the root fork downwards
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TreePath {
    indices: Vec<usize>,
}

impl TreePath {
    /// Path selecting nothing (the root fork itself)
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// Path of an existing branch, recovered through parent links
    pub fn of<R>(branch: &Branch<R>) -> Self {
        let mut indices = vec![branch.sibling_index()];
        let mut fork = branch.parent_fork();
        while let Some(parent) = fork.as_ref().and_then(|f| f.parent_branch()) {
            indices.push(parent.sibling_index());
            fork = parent.parent_fork();
        }
        indices.reverse();
        Self { indices }
    }

    pub fn push(&mut self, index: usize) {
        self.indices.push(index);
    }

    pub fn pop(&mut self) -> Option<usize> {
        self.indices.pop()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Branch selected by this path, expanding forks along the way
    ///
    /// `None` for the root path or when an index is out of range.
    pub fn resolve<R: Record>(&self, model: &StacktraceModel<R>) -> Option<Rc<Branch<R>>> {
        let (first, rest) = self.indices.split_first()?;
        let mut branch = model.root_fork().branch(*first)?.clone();
        for &index in rest {
            let next = branch.end_fork().branch(index)?.clone();
            branch = next;
        }
        Some(branch)
    }

    /// Fork below the selected branch, or the root fork for the root path
    pub fn resolve_fork<R: Record>(&self, model: &StacktraceModel<R>) -> Option<Rc<Fork<R>>> {
        if self.is_empty() {
            return Some(model.root_fork());
        }
        self.resolve(model).map(|branch| branch.end_fork())
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.indices.is_empty() {
            return f.write_str("/");
        }
        for index in &self.indices {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

impl FromStr for TreePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == "/" {
            return Ok(Self::root());
        }

        let body = trimmed.strip_prefix('/').unwrap_or(trimmed);
        let indices = body
            .split('/')
            .map(|segment| {
                segment
                    .parse::<usize>()
                    .map_err(|_| PathError::InvalidSegment(segment.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { indices })
    }
}
