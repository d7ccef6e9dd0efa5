//! Frame comparison policy.
//!
//! A [`FrameSeparator`] decides when two frames are "the same" for the purpose
//! of branching the tree. Comparison happens on two levels: a coarse
//! [`CategoryKey`] that is hashed to bucket frames, and a fine-grained detail
//! check (line, bci, optimization tier) applied only inside one bucket.

use super::frame::{Frame, FrameType, Method, Package, TypeRef};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// How much of a frame must match for two frames to merge
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum FrameCategorization {
    /// Method and byte code index
    Bci,
    /// Method and line number
    Line,
    #[default]
    Method,
    Class,
    Package,
}

impl fmt::Display for FrameCategorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bci => "Byte Code Index",
            Self::Line => "Line Number",
            Self::Method => "Method",
            Self::Class => "Class",
            Self::Package => "Package",
        };
        f.write_str(name)
    }
}

/// Coarse comparison key of a frame
///
/// Only used for equality and hashing, never displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryKey {
    Package(Rc<Package>),
    Type(Rc<TypeRef>),
    Method(Rc<Method>),
    /// Key of the truncation sentinel; equal to no real frame's key
    Unknown,
}

/// Immutable comparison policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FrameSeparator {
    categorization: FrameCategorization,
    distinguish_by_optimization: bool,
}

impl FrameSeparator {
    pub fn new(categorization: FrameCategorization, distinguish_by_optimization: bool) -> Self {
        Self {
            categorization,
            distinguish_by_optimization,
        }
    }

    pub fn categorization(&self) -> FrameCategorization {
        self.categorization
    }

    pub fn distinguish_by_optimization(&self) -> bool {
        self.distinguish_by_optimization
    }

    /// Coarse key selected by categorization level
    pub fn category(&self, frame: &Frame) -> CategoryKey {
        if frame.is_unknown() {
            return CategoryKey::Unknown;
        }
        match self.categorization {
            FrameCategorization::Package => CategoryKey::Package(frame.package().clone()),
            FrameCategorization::Class => CategoryKey::Type(frame.declaring_type().clone()),
            FrameCategorization::Method | FrameCategorization::Line | FrameCategorization::Bci => {
                CategoryKey::Method(frame.method().clone())
            }
        }
    }

    /// True when the two frames must end up in different branches
    pub fn is_separate(&self, a: &Frame, b: &Frame) -> bool {
        self.category(a) != self.category(b) || !self.compare_details(a, b)
    }

    /// Fine-grained equality for two frames already known to share a category
    pub fn compare_details(&self, a: &Frame, b: &Frame) -> bool {
        if self.distinguish_by_optimization && a.frame_type() != b.frame_type() {
            return false;
        }
        match self.categorization {
            FrameCategorization::Bci => a.bci() == b.bci(),
            FrameCategorization::Line => a.line() == b.line(),
            _ => true,
        }
    }

    /// Tier shown next to a frame when tiers are distinguished
    pub fn visible_tier(&self, frame: &Frame) -> Option<FrameType> {
        self.distinguish_by_optimization.then(|| frame.frame_type())
    }
}

impl fmt::Display for FrameSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.categorization)?;
        if self.distinguish_by_optimization {
            f.write_str(" + optimization")?;
        }
        Ok(())
    }
}
