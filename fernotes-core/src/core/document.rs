//! Document state: the parsed forest plus its content and alias stores.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::note::{Forest, Note, NoteId};
use crate::core::parse::parse_outline;
use crate::Result;

/// The parsed state of one outline: the forest and the two path-keyed
/// stores.
///
/// Store entries are absent rather than empty. Clearing a value removes
/// its entry, so "no content" and "content never set" are the same state.
#[derive(Debug, Clone, Default)]
pub struct Document {
    forest: Forest,
    contents: BTreeMap<String, String>,
    aliases: BTreeMap<String, Vec<String>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `text` into a fresh document.
    ///
    /// Re-parsing is destructive: the result starts with empty content and
    /// alias stores, so a caller replacing an existing document drops
    /// everything keyed by path. Callers should warn before doing this to
    /// a document that has content.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FernotesError::EmptyOutline`] for blank input.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self {
            forest: parse_outline(text)?,
            contents: BTreeMap::new(),
            aliases: BTreeMap::new(),
        })
    }

    pub(crate) fn from_parts(
        forest: Forest,
        contents: BTreeMap<String, String>,
        aliases: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self {
            forest,
            contents,
            aliases,
        }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn content(&self, path: &str) -> Option<&str> {
        self.contents.get(path).map(String::as_str)
    }

    /// Sets or clears the content stored for `path`; blank input removes
    /// the entry.
    pub fn set_content(&mut self, path: &str, content: &str) {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            self.contents.remove(path);
        } else {
            self.contents.insert(path.to_string(), trimmed.to_string());
        }
    }

    pub fn aliases(&self, path: &str) -> Option<&[String]> {
        self.aliases.get(path).map(Vec::as_slice)
    }

    /// Sets the aliases for `path` from comma-separated input. Entries are
    /// trimmed and empties dropped; input with no surviving entries
    /// removes the aliases.
    pub fn set_aliases(&mut self, path: &str, input: &str) {
        let list: Vec<String> = input
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect();
        if list.is_empty() {
            self.aliases.remove(path);
        } else {
            self.aliases.insert(path.to_string(), list);
        }
    }

    /// Flattens this document plus its outline text into the persisted
    /// form.
    pub fn to_persisted(&self, hierarchy_text: &str) -> PersistedDocument {
        PersistedDocument {
            hierarchy_text: hierarchy_text.to_string(),
            notes: self
                .forest
                .roots()
                .iter()
                .map(|&id| persist_note(&self.forest, id))
                .collect(),
            note_contents: self
                .contents
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            note_aliases: self
                .aliases
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Rebuilds a document from the persisted form, reconstructing parent
    /// links from the nesting. Stored levels and paths are trusted as-is.
    pub fn from_persisted(persisted: &PersistedDocument) -> Self {
        let mut forest = Forest::new();
        for root in &persisted.notes {
            let id = restore_note(&mut forest, root, None);
            forest.push_root(id);
        }
        Self {
            forest,
            contents: persisted
                .note_contents
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            aliases: persisted
                .note_aliases
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

/// Snapshot written to local key-value storage: the full outline text, the
/// forest with parent links omitted, and the two stores flattened to
/// association lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedDocument {
    #[serde(default)]
    pub hierarchy_text: String,
    #[serde(default)]
    pub notes: Vec<PersistedNote>,
    #[serde(default)]
    pub note_contents: Vec<(String, String)>,
    #[serde(default)]
    pub note_aliases: Vec<(String, Vec<String>)>,
}

/// One persisted note; children nest recursively, the parent link is
/// rebuilt on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedNote {
    pub title: String,
    pub level: usize,
    pub path: String,
    #[serde(default)]
    pub has_warning: bool,
    #[serde(default)]
    pub children: Vec<PersistedNote>,
}

fn persist_note(forest: &Forest, id: NoteId) -> PersistedNote {
    let note = forest.note(id);
    PersistedNote {
        title: note.title.clone(),
        level: note.level,
        path: note.path.clone(),
        has_warning: note.has_warning,
        children: note
            .children
            .iter()
            .map(|&child| persist_note(forest, child))
            .collect(),
    }
}

fn restore_note(forest: &mut Forest, persisted: &PersistedNote, parent: Option<NoteId>) -> NoteId {
    let id = forest.push(Note {
        title: persisted.title.clone(),
        level: persisted.level,
        path: persisted.path.clone(),
        parent,
        children: Vec::new(),
        has_warning: persisted.has_warning,
    });
    for child in &persisted.children {
        restore_note(forest, child, Some(id));
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_content_removes_the_entry() {
        let mut doc = Document::parse("A").unwrap();
        doc.set_content("A", "hello");
        assert_eq!(doc.content("A"), Some("hello"));

        doc.set_content("A", "   ");
        assert_eq!(doc.content("A"), None);
    }

    #[test]
    fn test_alias_input_is_split_trimmed_and_filtered() {
        let mut doc = Document::parse("A").unwrap();
        doc.set_aliases("A", " first , second,, third ,");
        assert_eq!(
            doc.aliases("A"),
            Some(&["first".to_string(), "second".to_string(), "third".to_string()][..])
        );

        doc.set_aliases("A", " , ,");
        assert_eq!(doc.aliases("A"), None);
    }

    #[test]
    fn test_reparsing_clears_the_stores() {
        let mut doc = Document::parse("A\n- B").unwrap();
        doc.set_content("A/B", "body");

        let reparsed = Document::parse("A\n- B").unwrap();
        assert_eq!(reparsed.content("A/B"), None);
        assert_eq!(doc.content("A/B"), Some("body"));
    }

    #[test]
    fn test_persisted_round_trip_preserves_everything() {
        let mut doc = Document::parse("Project\n- Tasks\n  - First\n- Notes").unwrap();
        doc.set_content("Project/Tasks", "do things");
        doc.set_aliases("Project/Notes", "scratch, journal");

        let persisted = doc.to_persisted("Project\n- Tasks\n  - First\n- Notes");
        let json = serde_json::to_string(&persisted).unwrap();
        let reloaded: PersistedDocument = serde_json::from_str(&json).unwrap();
        let restored = Document::from_persisted(&reloaded);

        assert_eq!(reloaded.hierarchy_text, persisted.hierarchy_text);
        assert_eq!(restored.content("Project/Tasks"), Some("do things"));
        assert_eq!(
            restored.aliases("Project/Notes"),
            Some(&["scratch".to_string(), "journal".to_string()][..])
        );

        let before: Vec<(String, usize, String)> = doc
            .forest()
            .walk()
            .map(|n| (n.title.clone(), n.level, n.path.clone()))
            .collect();
        let after: Vec<(String, usize, String)> = restored
            .forest()
            .walk()
            .map(|n| (n.title.clone(), n.level, n.path.clone()))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_persisted_parent_links_are_rebuilt() {
        let doc = Document::parse("A\n- B\n  - C").unwrap();
        let restored = Document::from_persisted(&doc.to_persisted("A\n- B\n  - C"));

        let forest = restored.forest();
        let a = forest.note(forest.roots()[0]);
        assert_eq!(a.parent, None);
        let b = forest.note(a.children[0]);
        assert_eq!(b.parent, Some(forest.roots()[0]));
        let c = forest.note(b.children[0]);
        assert_eq!(forest.note(c.parent.unwrap()).title, "B");
    }

    #[test]
    fn test_persisted_json_uses_camel_case_keys() {
        let doc = Document::parse("A/B").unwrap();
        let json = serde_json::to_string(&doc.to_persisted("A/B")).unwrap();
        assert!(json.contains("\"hierarchyText\""));
        assert!(json.contains("\"noteContents\""));
        assert!(json.contains("\"noteAliases\""));
        assert!(json.contains("\"hasWarning\":true"));
    }
}
