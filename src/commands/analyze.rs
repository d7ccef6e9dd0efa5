//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Reads the recording
//! 2. Builds the stack trace tree
//! 3. Collapses it into stacks
//! 4. Calculates hot paths
//! 5. Writes the requested outputs

use super::models::AnalyzeArgs;
use crate::aggregator::{build_collapsed_stacks, calculate_hot_paths, calculate_sample_distribution};
use crate::flamegraph::{
    generate_flamegraph, generate_hot_path_table, generate_text_summary, TextSummaryConfig,
};
use crate::model::StacktraceModel;
use crate::output::{build_report, write_collapsed, write_report, write_svg};
use crate::parser::read_recording;
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Recording read/parse errors
/// * Flamegraph rendering errors
/// * File write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Starting analysis of: {}", args.input.display());

    // Step 1: Read recording
    info!("Step 1/5: Reading recording...");
    let recording = read_recording(&args.input)
        .with_context(|| format!("Failed to read recording {}", args.input.display()))?;
    debug!(
        "Recording: {} events, {} with stack traces",
        recording.events.len(),
        recording.events_with_trace()
    );

    // Step 2: Build tree
    info!(
        "Step 2/5: Building tree ({}, {})...",
        args.separator, args.direction
    );
    let model = StacktraceModel::new(args.direction, args.separator, recording.events);
    let root = model.root_fork();
    info!(
        "Root fork: {} branches over {} items",
        root.branch_count(),
        root.items_in_fork()
    );

    // Step 3: Collapse stacks
    info!("Step 3/5: Building collapsed stacks...");
    let stacks = build_collapsed_stacks(&model, args.max_depth);
    let distribution = calculate_sample_distribution(&stacks);
    info!("Sample distribution: {}", distribution.summary());

    // Step 4: Hot paths
    info!("Step 4/5: Calculating top {} hot paths...", args.top_paths);
    let hot_paths = calculate_hot_paths(&stacks, args.top_paths);
    for (i, path) in hot_paths.iter().take(3).enumerate() {
        debug!(
            "  {}. {} items ({:.1}%): {}",
            i + 1,
            path.count,
            path.percentage,
            path.stack
        );
    }

    // Step 5: Outputs
    info!("Step 5/5: Writing output files...");

    if let Some(path) = &args.output_json {
        let report = build_report(&model, hot_paths, args.report_depth);
        write_report(&report, path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", path.display());
    }

    if let Some(path) = &args.output_collapsed {
        write_collapsed(&stacks, path).context("Failed to write collapsed stacks")?;
        info!("✓ Collapsed stacks written to: {}", path.display());
    }

    if let Some(path) = &args.output_svg {
        let svg = generate_flamegraph(&stacks, &args.flamegraph_config)
            .context("Failed to generate flamegraph")?;
        write_svg(&svg, path).context("Failed to write flamegraph SVG")?;
        info!("✓ Flamegraph written to: {}", path.display());
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("STACK TRACE SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Input:         {}", args.input.display());
        println!("Items:         {}", root.items_in_fork());
        println!("Unique Stacks: {}", stacks.len());
        println!("\n{}", generate_text_summary(&model, &TextSummaryConfig::default()));
        println!("\n{}", generate_hot_path_table(&stacks, 10));
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.top_paths == 0 {
        anyhow::bail!("top_paths must be greater than 0");
    }

    if args.top_paths > 1000 {
        anyhow::bail!("top_paths is too large (max 1000)");
    }

    if args.max_depth == Some(0) {
        anyhow::bail!("max_depth must be greater than 0");
    }

    if args.output_svg.is_some() && args.flamegraph_config.width == 0 {
        anyhow::bail!("Flamegraph width must be greater than 0");
    }

    Ok(())
}
