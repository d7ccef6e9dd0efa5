//! Configuration and constants for the CLI.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Number of hot paths kept in a report unless overridden
pub const DEFAULT_TOP_PATHS: usize = 20;

/// Flamegraph width in pixels
pub const DEFAULT_FLAMEGRAPH_WIDTH: usize = 1200;

/// Forks expanded below the root when writing a JSON report
pub const DEFAULT_REPORT_DEPTH: usize = 32;

/// Branches below this share of the root are left out of text summaries
pub const DEFAULT_MIN_PERCENT: f64 = 1.0;

/// Collapsed stack frame separator (the folded format used by flamegraph tools)
pub const COLLAPSED_FRAME_SEPARATOR: char = ';';

/// Stand-in for separator characters inside a frame text (JVM descriptors use `;`)
pub const COLLAPSED_SEPARATOR_REPLACEMENT: char = ':';

// Field names for the event list (different exporters use different names)
pub const EVENT_FIELD_NAMES: &[&str] = &["events", "samples", "records", "items"];

