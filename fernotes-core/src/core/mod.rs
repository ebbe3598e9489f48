//! Internal domain modules for the Fernotes core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod autosave;
pub mod document;
pub mod editor;
pub mod error;
pub mod export;
pub mod line;
pub mod note;
pub mod numbering;
pub mod parse;
pub mod storage;
pub mod title;
pub mod workspace;

#[doc(inline)]
pub use autosave::{Autosaver, AUTOSAVE_DELAY};
#[doc(inline)]
pub use document::{Document, PersistedDocument, PersistedNote};
#[doc(inline)]
pub use editor::{EditBuffer, IndentDirection};
#[doc(inline)]
pub use error::{FernotesError, Result};
#[doc(inline)]
pub use export::{export_document, import_document, ExportDocument, NoteExport};
#[doc(inline)]
pub use line::{indent_width, Line, BULLET_MARKERS};
#[doc(inline)]
pub use note::{Forest, Note, NoteId};
#[doc(inline)]
pub use numbering::next_ordinal;
#[doc(inline)]
pub use parse::{parse_outline, write_outline};
#[doc(inline)]
pub use storage::{Storage, DOCUMENT_KEY};
#[doc(inline)]
pub use title::{sanitize_file_name, title_problem, FORBIDDEN_CHARS};
#[doc(inline)]
pub use workspace::Workspace;
