//! JSON tree report and collapsed stack writers.
//!
//! A report is a snapshot of the tree expanded to a fixed depth. It is meant
//! for inspection and tooling, not for reloading into a model.

use crate::aggregator::{CollapsedStack, HotPath};
use crate::model::{frame_text, Branch, Fork, FrameSeparator, Record, StacktraceModel, TraversalDirection};
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Top-level report structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    pub direction: TraversalDirection,

    pub separator: FrameSeparator,

    /// Records with a stack trace
    pub total_items: usize,

    /// Top stacks (ranked by record count)
    pub hot_paths: Vec<HotPath>,

    pub root: ForkReport,
}

/// Snapshot of one fork
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForkReport {
    pub frame_index: usize,
    pub item_offset: usize,
    pub items_in_fork: usize,
    pub branches: Vec<BranchReport>,
}

/// Snapshot of one branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchReport {
    /// Text of the first frame
    pub frame: String,

    pub item_count: usize,

    pub item_offset: usize,

    /// Texts of the tail frames, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tail: Vec<String>,

    /// Forks below this branch; absent for dead ends and at the depth limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_fork: Option<Box<ForkReport>>,

    /// True when expansion stopped here because of the depth limit
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub depth_limited: bool,
}

/// Snapshot `model` down to `max_depth` forks below the root
///
/// **Public** - builds the report written by `write_report`
pub fn build_report<R: Record>(
    model: &StacktraceModel<R>,
    hot_paths: Vec<HotPath>,
    max_depth: usize,
) -> TreeReport {
    let root = model.root_fork();
    let separator = model.separator();

    TreeReport {
        version: SCHEMA_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        direction: model.direction(),
        separator,
        total_items: root.items_in_fork(),
        hot_paths,
        root: fork_report(&root, &separator, max_depth),
    }
}

fn fork_report<R: Record>(fork: &Fork<R>, separator: &FrameSeparator, depth_left: usize) -> ForkReport {
    ForkReport {
        frame_index: fork.frame_index(),
        item_offset: fork.item_offset(),
        items_in_fork: fork.items_in_fork(),
        branches: fork
            .branches()
            .iter()
            .map(|branch| branch_report(branch, separator, depth_left))
            .collect(),
    }
}

fn branch_report<R: Record>(
    branch: &Branch<R>,
    separator: &FrameSeparator,
    depth_left: usize,
) -> BranchReport {
    let tail = branch
        .tail_frames()
        .iter()
        .map(|node| frame_text(node.frame(), separator))
        .collect();

    let (end_fork, depth_limited) = if depth_left == 0 {
        // a dead end at the limit is not cut short
        (None, !branch.end_fork().is_empty())
    } else {
        let end = branch.end_fork();
        if end.is_empty() {
            (None, false)
        } else {
            (Some(Box::new(fork_report(&end, separator, depth_left - 1))), false)
        }
    };

    BranchReport {
        frame: frame_text(branch.first_frame().frame(), separator),
        item_count: branch.item_count(),
        item_offset: branch.item_offset(),
        tail,
        end_fork,
        depth_limited,
    }
}

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &TreeReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    let file = create_output_file(output_path)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    info!(
        "Report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Serialize a report to a pretty JSON string
pub fn report_to_string(report: &TreeReport) -> Result<String, OutputError> {
    serde_json::to_string_pretty(report).map_err(OutputError::SerializationFailed)
}

/// Read a report from a JSON file
///
/// **Public** - used by the validate command and tests
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<TreeReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let report: TreeReport =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, {} items",
        report.version, report.total_items
    );

    Ok(report)
}

/// Write collapsed stacks, one `stack count` line each
///
/// **Public** - the folded format other flamegraph tools accept
pub fn write_collapsed(
    stacks: &[CollapsedStack],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing {} collapsed stacks to: {}", stacks.len(), output_path.display());

    let file = create_output_file(output_path)?;
    let mut writer = BufWriter::new(file);
    for stack in stacks {
        writeln!(writer, "{}", stack.to_line())?;
    }
    writer.flush()?;

    Ok(())
}

/// Validate the path, create missing parents and open the file
///
/// **Private** - shared by the writers above
fn create_output_file(output_path: &Path) -> Result<File, OutputError> {
    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    File::create(output_path).map_err(OutputError::WriteFailed)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
pub(crate) fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_output_path_empty() {
        let result = validate_output_path(Path::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = validate_output_path(temp_dir.path());
        assert!(result.is_err());
    }
}
