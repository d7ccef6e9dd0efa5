//! SVG flamegraph output writer.

use super::json::validate_output_path;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write SVG content to a file
///
/// **Public** - main entry point for SVG output
///
/// # Errors
/// * `OutputError::InvalidSvg` - Content does not look like an SVG document
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
///
/// # Example
/// ```ignore
/// let svg = generate_flamegraph(&stacks, &FlamegraphConfig::default())?;
/// write_svg(&svg, "flamegraph.svg")?;
/// ```
pub fn write_svg(svg_content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing SVG to: {}", output_path.display());

    validate_svg_content(svg_content)?;
    validate_output_path(output_path)?;

    if let Some(ext) = output_path.extension() {
        if ext != "svg" {
            debug!("Warning: File does not have .svg extension: {}", output_path.display());
        }
    }

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent)
                .map_err(|e| OutputError::InvalidPath(format!("Cannot create directory: {}", e)))?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(svg_content.as_bytes())?;
    writer.flush()?;

    let file_size = svg_content.len();
    info!(
        "SVG written successfully ({} bytes, {:.2} KB)",
        file_size,
        file_size as f64 / 1024.0
    );

    Ok(())
}

/// Check that the content starts like an SVG document
pub fn validate_svg_content(svg_content: &str) -> Result<(), OutputError> {
    let head = svg_content.trim_start();
    if head.starts_with("<?xml") || head.starts_with("<svg") || head.starts_with("<!DOCTYPE svg") {
        Ok(())
    } else {
        Err(OutputError::InvalidSvg(
            "content does not start with an XML or SVG header".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_svg_content() {
        assert!(validate_svg_content("<svg></svg>").is_ok());
        assert!(validate_svg_content("  <?xml version=\"1.0\"?><svg/>").is_ok());
        assert!(validate_svg_content("not an svg").is_err());
    }
}
