//! Calculate hot paths and sample distribution from collapsed stacks.
//!
//! Hot paths are the stacks shared by the most records.
//! These are the primary targets for optimization.

use super::stack_builder::CollapsedStack;
use log::debug;
use serde::{Deserialize, Serialize};

/// A hot path in the recording (stack with record count)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotPath {
    /// Collapsed stack representation
    pub stack: String,

    /// Records ending at this stack
    pub count: u64,

    /// Percentage of all records
    pub percentage: f64,
}

/// Calculate hot paths from collapsed stacks
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `stacks` - Collapsed stacks from stack_builder, heaviest first
/// * `top_n` - Number of top paths to return (e.g., 10)
pub fn calculate_hot_paths(stacks: &[CollapsedStack], top_n: usize) -> Vec<HotPath> {
    debug!(
        "Calculating top {} hot paths from {} stacks",
        top_n,
        stacks.len()
    );

    let total: u64 = stacks.iter().map(|s| s.weight).sum();

    stacks
        .iter()
        .take(top_n)
        .map(|stack| create_hot_path(stack, total))
        .collect()
}

/// Create a HotPath from a CollapsedStack
pub fn create_hot_path(stack: &CollapsedStack, denominator: u64) -> HotPath {
    HotPath {
        stack: stack.stack.clone(),
        count: stack.weight,
        percentage: percentage(stack.weight, denominator),
    }
}

/// Calculate sample distribution statistics
///
/// **Public** - provides summary statistics
pub fn calculate_sample_distribution(stacks: &[CollapsedStack]) -> SampleDistribution {
    if stacks.is_empty() {
        return SampleDistribution::default();
    }

    let total: u64 = stacks.iter().map(|s| s.weight).sum();
    let count = stacks.len();
    let mean = total / count as u64;

    let mut weights: Vec<u64> = stacks.iter().map(|s| s.weight).collect();
    weights.sort_unstable();
    let median = weights[weights.len() / 2];

    // Top 10% of stacks (by weight)
    weights.reverse();
    let top_10_percent_count = (count as f64 * 0.1).ceil() as usize;
    let top_10_percent_items: u64 = weights.iter().take(top_10_percent_count).sum();

    SampleDistribution {
        total_items: total,
        stack_count: count,
        mean_items_per_stack: mean,
        median_items_per_stack: median,
        top_10_percent_percentage: percentage(top_10_percent_items, total),
    }
}

fn percentage(part: u64, whole: u64) -> f64 {
    if whole > 0 {
        (part as f64 / whole as f64) * 100.0
    } else {
        0.0
    }
}

/// Sample distribution statistics
///
/// **Public** - returned from calculate_sample_distribution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleDistribution {
    /// Records across all stacks
    pub total_items: u64,

    /// Number of unique stacks
    pub stack_count: usize,

    pub mean_items_per_stack: u64,

    pub median_items_per_stack: u64,

    /// Percentage of records in the heaviest 10% of stacks
    pub top_10_percent_percentage: f64,
}

impl SampleDistribution {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Total: {} | Stacks: {} | Mean: {} | Median: {} | Top 10%: {:.1}%",
            self.total_items,
            self.stack_count,
            self.mean_items_per_stack,
            self.median_items_per_stack,
            self.top_10_percent_percentage
        )
    }
}
