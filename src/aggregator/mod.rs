//! Aggregation of stack trace trees into collapsed stacks and metrics.
//!
//! This module transforms a lazily expanded tree into:
//! - Collapsed stack format (for flamegraph generation)
//! - Hot path analysis (most common stacks)
//! - Sample distribution statistics

pub mod metrics;
pub mod stack_builder;

// Re-export main types and functions
pub use metrics::{calculate_hot_paths, calculate_sample_distribution, HotPath, SampleDistribution};
pub use stack_builder::{build_collapsed_stacks, folded_frame_text, CollapsedStack};
