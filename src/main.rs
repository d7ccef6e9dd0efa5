//! Stacktrace Tree CLI
//!
//! Builds stack trace trees from profiling recordings and writes
//! reports, collapsed stacks and flamegraphs.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use stacktrace_tree::commands::{
    display_version, execute_analyze, execute_browse, validate_args, validate_report_file,
    AnalyzeArgs, BrowseArgs,
};
use stacktrace_tree::flamegraph::FlamegraphConfig;
use stacktrace_tree::model::{FrameCategorization, FrameSeparator, TraversalDirection, TreePath};
use stacktrace_tree::utils::config::{
    DEFAULT_FLAMEGRAPH_WIDTH, DEFAULT_REPORT_DEPTH, DEFAULT_TOP_PATHS,
};

/// Stacktrace Tree - stack trace aggregation for profiling recordings
#[derive(Parser, Debug)]
#[command(name = "stacktrace-tree")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Options shared by every command that builds a tree
#[derive(Args, Debug)]
struct TreeOptions {
    /// Recording JSON file
    #[arg(short, long)]
    input: PathBuf,

    /// Which end of the stack the tree grows from
    #[arg(long, value_enum, default_value = "top-frame")]
    direction: TraversalDirection,

    /// How much of a frame must match for frames to merge
    #[arg(long, value_enum, default_value = "method")]
    categorization: FrameCategorization,

    /// Keep frames of different optimization tiers apart
    #[arg(long)]
    distinguish_optimization: bool,
}

impl TreeOptions {
    fn separator(&self) -> FrameSeparator {
        FrameSeparator::new(self.categorization, self.distinguish_optimization)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the tree and write reports
    Analyze {
        #[command(flatten)]
        tree: TreeOptions,

        /// Output path for the JSON tree report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output path for collapsed (folded) stacks
        #[arg(long)]
        collapsed: Option<PathBuf>,

        /// Output path for SVG flamegraph
        #[arg(short, long)]
        flamegraph: Option<PathBuf>,

        /// Flamegraph title
        #[arg(long)]
        title: Option<String>,

        /// Flamegraph width in pixels
        #[arg(long, default_value_t = DEFAULT_FLAMEGRAPH_WIDTH)]
        width: usize,

        /// Draw the flamegraph as an icicle (root at the top)
        #[arg(long)]
        inverted: bool,

        /// Number of top hot paths to include
        #[arg(long, default_value_t = DEFAULT_TOP_PATHS)]
        top_paths: usize,

        /// Frame limit for collapsed stacks
        #[arg(long)]
        max_depth: Option<usize>,

        /// Forks expanded below the root in the JSON report
        #[arg(long, default_value_t = DEFAULT_REPORT_DEPTH)]
        report_depth: usize,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Show one branch of the tree, selected by path (e.g. /0/2)
    Browse {
        #[command(flatten)]
        tree: TreeOptions,

        /// Branch indices from the root, "/" for the root fork
        #[arg(short, long, default_value = "/")]
        path: TreePath,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Analyze {
            tree,
            output,
            collapsed,
            flamegraph,
            title,
            width,
            inverted,
            top_paths,
            max_depth,
            report_depth,
            summary,
        } => {
            let mut fg_config = FlamegraphConfig::new()
                .with_width(width)
                .with_inverted(inverted);
            if let Some(title_str) = title {
                fg_config = fg_config.with_title(title_str);
            }

            let args = AnalyzeArgs {
                separator: tree.separator(),
                input: tree.input,
                direction: tree.direction,
                output_json: output,
                output_collapsed: collapsed,
                output_svg: flamegraph,
                top_paths,
                max_depth,
                report_depth,
                flamegraph_config: fg_config,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Browse { tree, path } => {
            execute_browse(BrowseArgs {
                separator: tree.separator(),
                input: tree.input,
                direction: tree.direction,
                path,
            })?;
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
