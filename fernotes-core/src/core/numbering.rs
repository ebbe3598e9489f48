//! Sibling ordinal resolution for numbered list items.

use crate::core::line::{indent_width, Line};

/// Computes the ordinal for a numbered item at `target_width`, given the
/// lines strictly before it.
///
/// The scan runs backward and skips blank lines. The nearest numbered line
/// at the same width continues its run; any shallower line, numbered or
/// not, starts a new branch at 1. Deeper lines and equal-width lines
/// without a numbered marker are scanned past.
///
/// The line being assigned a number is never part of `prior_lines`: when
/// re-indenting an existing line, pass the lines above it; when continuing
/// a list on Enter, pass everything above the insertion point, which
/// includes the item being continued.
pub fn next_ordinal(prior_lines: &[&str], target_width: usize) -> u32 {
    for raw in prior_lines.iter().rev() {
        match Line::classify(raw) {
            Line::Blank => {}
            Line::Numbered {
                indent, ordinal, ..
            } => {
                let width = indent_width(indent);
                if width == target_width {
                    return ordinal.saturating_add(1);
                }
                if width < target_width {
                    return 1;
                }
            }
            Line::Bulleted { indent, .. } | Line::Plain { indent, .. } => {
                if indent_width(indent) < target_width {
                    return 1;
                }
            }
        }
    }
    1
}
