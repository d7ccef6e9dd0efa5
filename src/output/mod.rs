//! Output writers for reports, collapsed stacks and flamegraphs.
//!
//! This module handles writing data to disk in various formats:
//! - JSON tree reports
//! - Collapsed (folded) stacks
//! - SVG flamegraphs

pub mod json;
pub mod svg;

// Re-export main functions
pub use json::{
    build_report, read_report, report_to_string, write_collapsed, write_report, BranchReport,
    ForkReport, TreeReport,
};
pub use svg::{validate_svg_content, write_svg};
