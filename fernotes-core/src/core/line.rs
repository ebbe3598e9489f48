//! Outline line classification.
//!
//! Every raw line of outline text is one of four shapes: a bulleted item,
//! a numbered item, a plain line, or blank. Classification is an explicit
//! recognizer with fixed precedence (bullet, then numbered, then plain);
//! a line can only ever match one of the two marker patterns, but the
//! ordering is part of the contract.

/// Characters accepted as bullet markers.
pub const BULLET_MARKERS: [char; 3] = ['-', '*', '+'];

/// A classified line, borrowing its pieces from the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Indentation, one of `-`/`*`/`+`, at least one space, content.
    Bulleted {
        indent: &'a str,
        marker: char,
        content: &'a str,
    },
    /// Indentation, digits, a literal `.`, at least one space, content.
    Numbered {
        indent: &'a str,
        ordinal: u32,
        content: &'a str,
    },
    /// Indentation followed by anything else.
    Plain { indent: &'a str, content: &'a str },
    /// Empty or whitespace-only; never produces a note and is skipped by
    /// the numbering scan.
    Blank,
}

impl<'a> Line<'a> {
    /// Classifies one line of text. `raw` must not contain newlines.
    pub fn classify(raw: &'a str) -> Self {
        let trimmed = raw.trim_start();
        if trimmed.is_empty() {
            return Line::Blank;
        }
        let indent = &raw[..raw.len() - trimmed.len()];

        let mut chars = trimmed.chars();
        if let Some(marker) = chars.next().filter(|c| BULLET_MARKERS.contains(c)) {
            let rest = chars.as_str();
            if rest.starts_with(char::is_whitespace) {
                return Line::Bulleted {
                    indent,
                    marker,
                    content: rest.trim_start(),
                };
            }
        }

        let digit_count = trimmed.bytes().take_while(u8::is_ascii_digit).count();
        if digit_count > 0 {
            if let Some(rest) = trimmed[digit_count..].strip_prefix('.') {
                if rest.starts_with(char::is_whitespace) {
                    // Absurdly long digit runs fall through to Plain.
                    if let Ok(ordinal) = trimmed[..digit_count].parse::<u32>() {
                        return Line::Numbered {
                            indent,
                            ordinal,
                            content: rest.trim_start(),
                        };
                    }
                }
            }
        }

        Line::Plain {
            indent,
            content: trimmed,
        }
    }

    /// Indentation width of this line (see [`indent_width`]).
    pub fn indent_width(&self) -> usize {
        match self {
            Line::Blank => 0,
            Line::Bulleted { indent, .. }
            | Line::Numbered { indent, .. }
            | Line::Plain { indent, .. } => indent_width(indent),
        }
    }

    /// The content with any marker and leading whitespace stripped.
    pub fn content(&self) -> &'a str {
        match self {
            Line::Blank => "",
            Line::Bulleted { content, .. }
            | Line::Numbered { content, .. }
            | Line::Plain { content, .. } => content,
        }
    }

    /// Whether this line carries a bullet or numbered marker.
    pub fn is_list_item(&self) -> bool {
        matches!(self, Line::Bulleted { .. } | Line::Numbered { .. })
    }
}

/// Width of an indentation prefix: spaces and tabs each count as one unit,
/// mixing is permitted and simply summed.
pub fn indent_width(prefix: &str) -> usize {
    prefix.chars().filter(|c| *c == ' ' || *c == '\t').count()
}
