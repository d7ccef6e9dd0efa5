//! Flamegraph generation using the inferno library.
//!
//! This module converts collapsed stacks into interactive SVG flamegraphs
//! and renders trees as text for terminals.

pub mod generator;

// Re-export main types
pub use generator::{
    generate_flamegraph, generate_hot_path_table, generate_text_summary, FlamegraphConfig,
    TextSummaryConfig,
};
