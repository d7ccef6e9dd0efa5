//! Browse command: print one branch of the tree and what follows it.

use super::models::BrowseArgs;
use crate::model::{frame_text, Fork, Record, StacktraceModel};
use crate::parser::read_recording;
use anyhow::{Context, Result};
use log::info;

/// Execute the browse command
///
/// **Public** - main entry point called from main.rs
pub fn execute_browse(args: BrowseArgs) -> Result<()> {
    let recording = read_recording(&args.input)
        .with_context(|| format!("Failed to read recording {}", args.input.display()))?;
    let model = StacktraceModel::new(args.direction, args.separator, recording.events);

    info!("Resolving path {}", args.path);
    println!("{}", render_path(&model, &args)?);
    Ok(())
}

/// Render the branch selected by `args.path` followed by its end fork
///
/// **Public** - separated from printing for tests
pub fn render_path<R: Record>(model: &StacktraceModel<R>, args: &BrowseArgs) -> Result<String> {
    let separator = model.separator();
    let mut lines = Vec::new();

    let fork = if args.path.is_empty() {
        lines.push(format!("Root fork ({} items)", model.root_fork().items_in_fork()));
        model.root_fork()
    } else {
        let branch = args
            .path
            .resolve(model)
            .with_context(|| format!("No branch at path {}", args.path))?;

        lines.push(format!(
            "Branch {} ({} items, offset {})",
            args.path,
            branch.item_count(),
            branch.item_offset()
        ));
        let frames = std::iter::once(branch.first_frame()).chain(branch.tail_frames());
        for node in frames {
            lines.push(format!(
                "  {:>8}  {}",
                node.item_count(),
                frame_text(node.frame(), &separator)
            ));
        }
        branch.end_fork()
    };

    render_fork_listing(&fork, model, &mut lines);
    Ok(lines.join("\n"))
}

fn render_fork_listing<R: Record>(fork: &Fork<R>, model: &StacktraceModel<R>, lines: &mut Vec<String>) {
    if fork.is_empty() {
        lines.push("No further branches".to_string());
        return;
    }

    let separator = model.separator();
    lines.push(format!("Fork with {} branches:", fork.branch_count()));
    for (index, branch) in fork.branches().iter().enumerate() {
        lines.push(format!(
            "  [{}] {:>8}  {}",
            index,
            branch.item_count(),
            frame_text(branch.first_frame().frame(), &separator)
        ));
    }
}
