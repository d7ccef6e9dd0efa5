//! Human-readable frame text at a separator's granularity.

use super::frame::{Frame, UNKNOWN_FRAME_NAME};
use super::separator::{FrameCategorization, FrameSeparator};

/// Label shown for frames of the unnamed package
pub const DEFAULT_PACKAGE_LABEL: &str = "(default package)";

/// Render `frame` showing exactly the detail `separator` compares on
pub fn frame_text(frame: &Frame, separator: &FrameSeparator) -> String {
    if frame.is_unknown() {
        return UNKNOWN_FRAME_NAME.to_string();
    }

    let mut text = match separator.categorization() {
        FrameCategorization::Package => {
            let package = frame.package();
            if package.is_default() {
                DEFAULT_PACKAGE_LABEL.to_string()
            } else {
                package.name.clone()
            }
        }
        FrameCategorization::Class => frame.declaring_type().qualified_name(),
        FrameCategorization::Method => method_text(frame),
        FrameCategorization::Line => match frame.line() {
            Some(line) => format!("{}:{}", method_text(frame), line),
            None => method_text(frame),
        },
        FrameCategorization::Bci => match frame.bci() {
            Some(bci) => format!("{}@{}", method_text(frame), bci),
            None => method_text(frame),
        },
    };

    if let Some(tier) = separator.visible_tier(frame) {
        text.push_str(&format!(" [{}]", tier));
    }
    text
}

/// `pkg.Type.method(descriptor)`
fn method_text(frame: &Frame) -> String {
    let method = frame.method();
    format!(
        "{}.{}({})",
        frame.declaring_type().qualified_name(),
        method.name,
        method.descriptor
    )
}
