//! Core library for Fernotes, an outline-driven note hierarchy editor.
//!
//! The user writes an indented outline of titles mixing bullet lists,
//! numbered lists, and bare indented lines. [`Document::parse`] turns that
//! text into a forest of notes with stable slash-paths, ready to carry
//! content and aliases keyed by path. [`EditBuffer`] keeps the outline
//! text itself self-consistent while it is edited (indent/unindent with
//! sibling renumbering, smart Enter-key list continuation), and
//! [`Workspace`] ties everything to local storage with debounced
//! auto-saving.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core`
//! module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    autosave::{Autosaver, AUTOSAVE_DELAY},
    document::{Document, PersistedDocument, PersistedNote},
    editor::{EditBuffer, IndentDirection},
    error::{FernotesError, Result},
    export::{export_document, import_document, ExportDocument, NoteExport},
    line::{indent_width, Line, BULLET_MARKERS},
    note::{Forest, Note, NoteId},
    numbering::next_ordinal,
    parse::{parse_outline, write_outline},
    storage::{Storage, DOCUMENT_KEY},
    title::{sanitize_file_name, title_problem, FORBIDDEN_CHARS},
    workspace::Workspace,
};
