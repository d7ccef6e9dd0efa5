use crate::flamegraph::FlamegraphConfig;
use crate::model::{FrameCategorization, FrameSeparator, TraversalDirection, TreePath};
use crate::utils::config::{DEFAULT_REPORT_DEPTH, DEFAULT_TOP_PATHS};
use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Recording JSON to read
    pub input: PathBuf,

    /// Which end of the stack the tree grows from
    pub direction: TraversalDirection,

    /// Frame comparison policy
    pub separator: FrameSeparator,

    /// Output path for the JSON tree report (optional)
    pub output_json: Option<PathBuf>,

    /// Output path for collapsed stacks (optional)
    pub output_collapsed: Option<PathBuf>,

    /// Output path for SVG flamegraph (optional)
    pub output_svg: Option<PathBuf>,

    /// Number of top hot paths to include in the report
    pub top_paths: usize,

    /// Frame limit for collapsed stacks
    pub max_depth: Option<usize>,

    /// Forks expanded below the root in the JSON report
    pub report_depth: usize,

    /// Flamegraph configuration
    pub flamegraph_config: FlamegraphConfig,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("recording.json"),
            direction: TraversalDirection::default(),
            separator: FrameSeparator::new(FrameCategorization::Method, false),
            output_json: None,
            output_collapsed: None,
            output_svg: None,
            top_paths: DEFAULT_TOP_PATHS,
            max_depth: None,
            report_depth: DEFAULT_REPORT_DEPTH,
            flamegraph_config: FlamegraphConfig::default(),
            print_summary: false,
        }
    }
}

/// Arguments for the browse command
#[derive(Debug, Clone)]
pub struct BrowseArgs {
    pub input: PathBuf,
    pub direction: TraversalDirection,
    pub separator: FrameSeparator,
    /// Branch to show; the root path lists the root fork
    pub path: TreePath,
}
