//! Stacktrace Tree
//!
//! Groups profiling records by shared stack trace prefixes (or suffixes,
//! depending on traversal direction) into a lazily expanded tree of forks
//! and branches, the model behind flame graph and call tree views.
//!
//! This crate provides the core model plus the pieces of the
//! `stacktrace-tree` CLI tool: recording parsing, stack collapsing,
//! flamegraph rendering and report output.
//!
//! ## Getting Started
//!
//! ```bash
//! cargo install stacktrace-tree
//! stacktrace-tree analyze --input recording.json --summary
//! ```

pub mod aggregator;
pub mod commands;
pub mod flamegraph;
pub mod model;
pub mod output;
pub mod parser;
pub mod utils;
