//! Interactive outline editing: indent/unindent and Enter-key list
//! continuation.

use crate::core::line::{indent_width, Line};
use crate::core::numbering::next_ordinal;

/// Characters added or removed per indent step.
const INDENT_UNIT: usize = 2;

/// Which way [`EditBuffer::indent`] moves the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentDirection {
    Increase,
    Decrease,
}

/// A text buffer plus a caret.
///
/// Every operation re-derives "the current line" as the text between the
/// last newline at-or-before the caret and the caret itself; there is no
/// selection, only a caret position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    cursor: usize,
}

impl EditBuffer {
    /// Creates a buffer with the caret at the end of `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Caret position as a byte offset into the text.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the caret, clamping to the buffer and snapping back onto a
    /// character boundary.
    pub fn set_cursor(&mut self, offset: usize) {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        self.cursor = offset;
    }

    fn line_start(&self) -> usize {
        self.text[..self.cursor].rfind('\n').map_or(0, |i| i + 1)
    }

    fn current_line(&self) -> &str {
        &self.text[self.line_start()..self.cursor]
    }

    /// Lines strictly above the current one.
    fn lines_above(&self) -> Vec<&str> {
        self.text[..self.line_start()].lines().collect()
    }

    /// Indents or unindents the current line by one unit of two
    /// characters. Only list items move; numbered items are renumbered for
    /// their new depth against the lines above. Returns whether the buffer
    /// changed; unindenting a line with fewer than two indentation
    /// characters is a silent no-op, as is the whole operation on plain
    /// lines.
    pub fn indent(&mut self, direction: IndentDirection) -> bool {
        let line_start = self.line_start();
        let new_line = match Line::classify(self.current_line()) {
            Line::Bulleted {
                indent,
                marker,
                content,
            } => {
                let Some(new_indent) = step_indent(indent, direction) else {
                    return false;
                };
                format!("{new_indent}{marker} {content}")
            }
            Line::Numbered {
                indent, content, ..
            } => {
                let Some(new_indent) = step_indent(indent, direction) else {
                    return false;
                };
                let ordinal = next_ordinal(&self.lines_above(), indent_width(&new_indent));
                format!("{new_indent}{ordinal}. {content}")
            }
            Line::Plain { .. } | Line::Blank => return false,
        };
        self.text.replace_range(line_start..self.cursor, &new_line);
        self.cursor = line_start + new_line.len();
        true
    }

    /// Smart Enter handling.
    ///
    /// Continues a bullet or numbered list by inserting a newline plus the
    /// next marker; a marker-only line instead has its marker deleted and
    /// a bare newline inserted (exits list mode). Returns false for plain
    /// and blank lines so the caller falls back to [`Self::insert_newline`].
    pub fn continue_list(&mut self) -> bool {
        let line_start = self.line_start();
        let continuation = match Line::classify(self.current_line()) {
            Line::Bulleted {
                indent,
                marker,
                content,
            } => {
                if content.trim().is_empty() {
                    None
                } else {
                    Some(format!("\n{indent}{marker} "))
                }
            }
            Line::Numbered {
                indent, content, ..
            } => {
                if content.trim().is_empty() {
                    None
                } else {
                    // The item being continued sits above the insertion
                    // point, so it belongs to the prior-line set.
                    let prior: Vec<&str> = self.text[..self.cursor].lines().collect();
                    let ordinal = next_ordinal(&prior, indent_width(indent));
                    Some(format!("\n{indent}{ordinal}. "))
                }
            }
            Line::Plain { .. } | Line::Blank => return false,
        };
        match continuation {
            Some(insertion) => {
                self.text.insert_str(self.cursor, &insertion);
                self.cursor += insertion.len();
            }
            None => {
                self.text.replace_range(line_start..self.cursor, "\n");
                self.cursor = line_start + 1;
            }
        }
        true
    }

    /// Inserts a plain newline at the caret (default Enter behavior).
    pub fn insert_newline(&mut self) {
        self.text.insert(self.cursor, '\n');
        self.cursor += 1;
    }
}

fn step_indent(indent: &str, direction: IndentDirection) -> Option<String> {
    match direction {
        IndentDirection::Increase => Some(format!("{indent}  ")),
        IndentDirection::Decrease => {
            if indent.chars().count() < INDENT_UNIT {
                return None;
            }
            Some(indent.chars().skip(INDENT_UNIT).collect())
        }
    }
}
