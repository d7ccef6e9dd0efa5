//! SVG flamegraph and text tree rendering.
//!
//! SVGs are produced by inferno from collapsed stacks. Text summaries are
//! rendered straight from the tree, expanding only the forks they print.

use crate::aggregator::stack_builder::CollapsedStack;
use crate::model::{frame_text, Fork, Record, StacktraceModel};
use crate::utils::config::{DEFAULT_FLAMEGRAPH_WIDTH, DEFAULT_MIN_PERCENT};
use crate::utils::error::FlamegraphError;
use inferno::flamegraph::{self, Direction, Options};
use log::info;

/// Flamegraph configuration
#[derive(Debug, Clone)]
pub struct FlamegraphConfig {
    pub title: String,
    pub width: usize,
    /// Icicle layout: root at the top, growing downwards
    pub inverted: bool,
    /// Unit shown in tooltips
    pub count_name: String,
}

impl Default for FlamegraphConfig {
    fn default() -> Self {
        Self {
            title: "Stack Trace Profile".to_string(),
            width: DEFAULT_FLAMEGRAPH_WIDTH,
            inverted: false,
            count_name: "samples".to_string(),
        }
    }
}

impl FlamegraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }
}

/// Generate SVG flamegraph from collapsed stacks
pub fn generate_flamegraph(
    stacks: &[CollapsedStack],
    config: &FlamegraphConfig,
) -> Result<String, FlamegraphError> {
    if stacks.is_empty() {
        return Err(FlamegraphError::EmptyStacks);
    }

    info!("Generating flamegraph with {} stacks", stacks.len());

    let mut options = Options::default();
    options.title = config.title.clone();
    options.count_name = config.count_name.clone();
    options.image_width = Some(config.width);
    if config.inverted {
        options.direction = Direction::Inverted;
    }

    // merging frames requires lexically sorted input
    let mut lines: Vec<String> = stacks.iter().map(CollapsedStack::to_line).collect();
    lines.sort_unstable();
    let mut svg = Vec::new();
    flamegraph::from_lines(&mut options, lines.iter().map(String::as_str), &mut svg)
        .map_err(|e| FlamegraphError::RenderFailed(e.to_string()))?;

    let svg = String::from_utf8(svg).map_err(|e| FlamegraphError::RenderFailed(e.to_string()))?;
    info!("Flamegraph generated successfully ({} bytes)", svg.len());
    Ok(svg)
}

/// Text summary configuration
#[derive(Debug, Clone)]
pub struct TextSummaryConfig {
    /// Forks printed below the root
    pub max_depth: usize,
    /// Branches below this share of all items are folded into one line
    pub min_percent: f64,
    /// Width of the bar for a branch holding every item
    pub bar_width: usize,
}

impl Default for TextSummaryConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            min_percent: DEFAULT_MIN_PERCENT,
            bar_width: 20,
        }
    }
}

/// Render the tree as indented text, one line per branch
pub fn generate_text_summary<R: Record>(
    model: &StacktraceModel<R>,
    config: &TextSummaryConfig,
) -> String {
    let root = model.root_fork();
    let mut lines = vec![format!(
        "  STACK TRACE TREE ({} items, {}, {})",
        root.items_in_fork(),
        model.separator(),
        model.direction()
    )];

    let mut renderer = TextRenderer {
        model,
        config,
        total: root.items_in_fork().max(1),
        lines: &mut lines,
    };
    renderer.render_fork(&root, 0);

    lines.join("\n")
}

struct TextRenderer<'a, R> {
    model: &'a StacktraceModel<R>,
    config: &'a TextSummaryConfig,
    total: usize,
    lines: &'a mut Vec<String>,
}

impl<R: Record> TextRenderer<'_, R> {
    fn render_fork(&mut self, fork: &Fork<R>, level: usize) {
        let separator = self.model.separator();
        let indent = "  ".repeat(level + 1);
        let mut hidden_branches = 0;
        let mut hidden_items = 0;

        for branch in fork.branches() {
            let count = branch.item_count();
            let percent = count as f64 * 100.0 / self.total as f64;
            if percent < self.config.min_percent {
                hidden_branches += 1;
                hidden_items += count;
                continue;
            }

            let bar_len = (percent / 100.0 * self.config.bar_width as f64).round() as usize;
            self.lines.push(format!(
                "{}├─ {:>8} {:>5.1}% {:<width$} {}",
                indent,
                count,
                percent,
                "█".repeat(bar_len),
                frame_text(branch.first_frame().frame(), &separator),
                width = self.config.bar_width
            ));

            if let Some(last) = branch.tail_frames().last() {
                self.lines.push(format!(
                    "{}│  … {} more frames, last: {}",
                    indent,
                    branch.tail_frames().len(),
                    frame_text(last.frame(), &separator)
                ));
            }

            if level < self.config.max_depth {
                self.render_fork(&branch.end_fork(), level + 1);
            }
        }

        if hidden_branches > 0 {
            self.lines.push(format!(
                "{}└─ ({} smaller branches, {} items)",
                indent, hidden_branches, hidden_items
            ));
        }
    }
}

/// Create a hot path table from collapsed stacks
pub fn generate_hot_path_table(stacks: &[CollapsedStack], max_lines: usize) -> String {
    let total: u64 = stacks.iter().map(|s| s.weight).sum::<u64>().max(1);
    let mut lines = Vec::new();

    lines.push("  HOT PATHS".to_string());
    lines.push(format!("  {:<60} {:>10} {:>7}", "Stack (leaf)", "COUNT", "%"));
    lines.push(format!("  {}", "─".repeat(79)));

    for stack in stacks.iter().take(max_lines) {
        let percentage = stack.weight as f64 * 100.0 / total as f64;
        let leaf = stack.frames().last().unwrap_or(stack.stack.as_str());

        // Keep the end of long frame texts, it carries the method name
        let display = if leaf.chars().count() > 60 {
            let tail: String = leaf.chars().rev().take(57).collect::<Vec<_>>().into_iter().rev().collect();
            format!("...{}", tail)
        } else {
            leaf.to_string()
        };

        lines.push(format!("  {:<60} {:>10} {:>6.1}%", display, stack.weight, percentage));
    }

    if stacks.len() > max_lines {
        lines.push(String::new());
        lines.push(format!(
            "   (Showing top {} of {} unique paths)",
            max_lines,
            stacks.len()
        ));
    }

    lines.join("\n")
}
