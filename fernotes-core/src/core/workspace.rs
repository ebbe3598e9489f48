//! High-level operations over an open Fernotes workspace.

use std::path::Path;

use crate::core::autosave::Autosaver;
use crate::core::document::{Document, PersistedDocument};
use crate::core::editor::{EditBuffer, IndentDirection};
use crate::core::export::{export_document, import_document};
use crate::core::storage::{Storage, DOCUMENT_KEY};
use crate::Result;

/// An open workspace: the outline buffer being edited, the parsed
/// document, and the storage both save paths write to.
///
/// `Workspace` is the primary interface for all mutations. Buffer and
/// store edits schedule a debounced persist; parse, import, and
/// [`Workspace::save`] write through immediately. Exactly one caller
/// drives a workspace at a time.
pub struct Workspace {
    storage: Storage,
    autosaver: Autosaver,
    buffer: EditBuffer,
    document: Document,
}

impl Workspace {
    /// Opens (or creates) the workspace at `path` and loads the stored
    /// document if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FernotesError::Database`] for any SQLite failure,
    /// or [`crate::FernotesError::Json`] if the stored snapshot is corrupt.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let storage = Storage::open(&path)?;

        let (buffer, document) = match storage.get(DOCUMENT_KEY)? {
            Some(json) => {
                let persisted: PersistedDocument = serde_json::from_str(&json)?;
                (
                    EditBuffer::new(persisted.hierarchy_text.clone()),
                    Document::from_persisted(&persisted),
                )
            }
            None => (EditBuffer::default(), Document::default()),
        };

        let autosaver = Autosaver::spawn(path);
        Ok(Self {
            storage,
            autosaver,
            buffer,
            document,
        })
    }

    pub fn outline_text(&self) -> &str {
        self.buffer.text()
    }

    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    pub fn set_cursor(&mut self, offset: usize) {
        self.buffer.set_cursor(offset);
    }

    /// Replaces the outline buffer wholesale; the caret moves to the end.
    pub fn set_outline_text(&mut self, text: &str) {
        self.buffer = EditBuffer::new(text);
        self.schedule_autosave();
    }

    /// Re-parses the outline buffer into a fresh document and persists.
    ///
    /// Destructive: content and aliases keyed by path are not carried
    /// over from the previous document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FernotesError::EmptyOutline`] when the buffer is
    /// blank; the current document is left untouched.
    pub fn parse(&mut self) -> Result<()> {
        self.document = Document::parse(self.buffer.text())?;
        self.save()
    }

    /// Indents or unindents the current line, renumbering numbered items
    /// for their new depth. No-op on plain lines and on unindentable
    /// lines; successful mutations schedule a persist.
    pub fn indent_current_line(&mut self, direction: IndentDirection) -> bool {
        let changed = self.buffer.indent(direction);
        if changed {
            self.schedule_autosave();
        }
        changed
    }

    /// Handles the Enter key: continues bullet and numbered lists, exits
    /// list mode on marker-only items, otherwise inserts a plain newline.
    pub fn newline(&mut self) {
        if !self.buffer.continue_list() {
            self.buffer.insert_newline();
        }
        self.schedule_autosave();
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Sets or clears the content attached to `path`.
    pub fn set_note_content(&mut self, path: &str, content: &str) {
        self.document.set_content(path, content);
        self.schedule_autosave();
    }

    /// Sets or clears the aliases attached to `path` (comma-separated
    /// input).
    pub fn set_note_aliases(&mut self, path: &str, input: &str) {
        self.document.set_aliases(path, input);
        self.schedule_autosave();
    }

    /// Serializes the workspace for exchange.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FernotesError::Json`] if serialization fails.
    pub fn export_json(&self) -> Result<String> {
        let export = export_document(self.buffer.text(), &self.document);
        Ok(serde_json::to_string_pretty(&export)?)
    }

    /// Replaces the whole workspace state from an exchange payload and
    /// persists. All-or-nothing: on error nothing is touched.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FernotesError::InvalidImport`] for a malformed
    /// payload, or any error from [`Workspace::save`].
    pub fn import_json(&mut self, json: &str) -> Result<()> {
        let (text, document) = import_document(json)?;
        self.buffer = EditBuffer::new(text);
        self.document = document;
        self.save()
    }

    /// Writes the current snapshot through to storage immediately.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FernotesError::Json`] or
    /// [`crate::FernotesError::Database`].
    pub fn save(&self) -> Result<()> {
        let persisted = self.document.to_persisted(self.buffer.text());
        self.storage
            .put(DOCUMENT_KEY, &serde_json::to_string(&persisted)?)?;
        // Anything still pending in the debounce window predates this
        // write-through and must not clobber it.
        self.autosaver.cancel();
        Ok(())
    }

    fn schedule_autosave(&self) {
        match serde_json::to_string(&self.document.to_persisted(self.buffer.text())) {
            Ok(json) => self.autosaver.schedule(json),
            Err(e) => log::warn!("autosave: snapshot failed to serialize: {e}"),
        }
    }
}
