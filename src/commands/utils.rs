use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::Path;

/// Validate a report JSON file
pub fn validate_report_file(file_path: &Path) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path)?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Direction: {}", report.direction);
    println!("  Separator: {}", report.separator);
    println!("  Total Items: {}", report.total_items);
    println!("  Root Branches: {}", report.root.branches.len());
    println!("  Hot Paths: {}", report.hot_paths.len());

    if report.version != SCHEMA_VERSION {
        println!(
            "  ⚠ Schema version differs from this build ({})",
            SCHEMA_VERSION
        );
    }

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Stacktrace Tree v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Lazily expanded stack trace aggregation for profiling recordings.");
}
