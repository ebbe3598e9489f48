//! Outline text to note forest, and back.

use crate::core::line::Line;
use crate::core::note::{Forest, Note, NoteId};
use crate::core::title::{sanitize_file_name, title_problem};
use crate::{FernotesError, Result};

/// Parses an indented outline into a note forest.
///
/// Single forward pass. A stack holds the currently open ancestor at each
/// depth; each line pops the stack down to its own level and attaches
/// under whatever remains on top. List items take their level from their
/// indentation width directly; plain lines do the same, at one space per
/// level.
///
/// Flush-left list items that follow a plain line are a special case: the
/// plain line becomes an anchor and the whole run of zero-indent items
/// nests one level beneath it, so users can write a bare title and bullet
/// its children without indenting. A blank line or a discarded
/// (marker-only) line ends the run.
///
/// # Errors
///
/// Returns [`FernotesError::EmptyOutline`] when `text` is empty or
/// whitespace-only. Nothing else fails: any line that matches no marker
/// pattern is a plain title by definition.
pub fn parse_outline(text: &str) -> Result<Forest> {
    if text.trim().is_empty() {
        return Err(FernotesError::EmptyOutline);
    }

    let mut forest = Forest::new();
    let mut stack: Vec<NoteId> = Vec::new();
    // Level of the most recently accepted plain line, while its run of
    // flush-left list items is still open.
    let mut plain_anchor: Option<usize> = None;

    for raw in text.lines() {
        let line = Line::classify(raw);
        if matches!(line, Line::Blank) {
            plain_anchor = None;
            continue;
        }

        let title = line.content().trim();
        let mut level = line.indent_width();
        if line.is_list_item() && level == 0 && !stack.is_empty() {
            if let Some(anchor) = plain_anchor {
                level = anchor + 1;
            }
        }

        // A marker with nothing after it produces no node and ends the run.
        if title.is_empty() {
            plain_anchor = None;
            continue;
        }

        stack.truncate(level);

        let parent = stack.last().copied();
        let path = match parent {
            Some(pid) => format!("{}/{}", forest.note(pid).path, sanitize_file_name(title)),
            None => sanitize_file_name(title),
        };
        let has_warning = title_problem(title).is_some();
        if has_warning {
            log::warn!("title {title:?} contains filename-illegal characters");
        }

        let id = forest.push(Note {
            title: title.to_string(),
            level,
            path,
            parent,
            children: Vec::new(),
            has_warning,
        });
        if level == 0 {
            forest.push_root(id);
        }
        stack.push(id);

        if !line.is_list_item() {
            plain_anchor = Some(level);
        }
    }

    log::debug!(
        "parsed {} notes across {} roots",
        forest.len(),
        forest.roots().len()
    );
    Ok(forest)
}

/// Renders the reachable forest back into outline syntax.
///
/// Every note becomes a bulleted line indented one space per level, which
/// re-parses to an isomorphic forest.
pub fn write_outline(forest: &Forest) -> String {
    let mut out = String::new();
    for note in forest.walk() {
        for _ in 0..note.level {
            out.push(' ');
        }
        out.push_str("- ");
        out.push_str(&note.title);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles_by_level(forest: &Forest) -> Vec<(String, usize)> {
        forest
            .walk()
            .map(|n| (n.title.clone(), n.level))
            .collect()
    }

    #[test]
    fn test_empty_input_is_rejected_up_front() {
        assert!(matches!(
            parse_outline(""),
            Err(FernotesError::EmptyOutline)
        ));
        assert!(matches!(
            parse_outline("  \n\t\n"),
            Err(FernotesError::EmptyOutline)
        ));
    }

    #[test]
    fn test_flush_left_bullets_nest_under_a_preceding_plain_line() {
        let forest = parse_outline("A\n- B\n- C\n  - D").unwrap();

        assert_eq!(
            titles_by_level(&forest),
            vec![
                ("A".to_string(), 0),
                ("B".to_string(), 1),
                ("C".to_string(), 1),
                ("D".to_string(), 2),
            ]
        );
        let a = forest.note(forest.roots()[0]);
        assert_eq!(a.children.len(), 2);
        let c = forest.note(a.children[1]);
        assert_eq!(c.title, "C");
        assert_eq!(c.children.len(), 1);
        assert_eq!(forest.note(c.children[0]).title, "D");
    }

    #[test]
    fn test_flush_left_numbered_items_without_an_anchor_stay_roots() {
        let forest = parse_outline("1. First\n2. Second\n  1. Sub").unwrap();

        assert_eq!(forest.roots().len(), 2);
        assert_eq!(
            titles_by_level(&forest),
            vec![
                ("First".to_string(), 0),
                ("Second".to_string(), 0),
                ("Sub".to_string(), 2),
            ]
        );
        let second = forest.note(forest.roots()[1]);
        assert_eq!(forest.note(second.children[0]).title, "Sub");
    }

    #[test]
    fn test_one_space_of_plain_indentation_is_one_level() {
        let forest = parse_outline("Root\n Child\n  Grandchild").unwrap();
        assert_eq!(
            titles_by_level(&forest),
            vec![
                ("Root".to_string(), 0),
                ("Child".to_string(), 1),
                ("Grandchild".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_blank_line_ends_the_anchor_run() {
        let forest = parse_outline("A\n- B\n\n- C").unwrap();
        // C starts over at the root level; only B hangs off A.
        assert_eq!(forest.roots().len(), 2);
        let a = forest.note(forest.roots()[0]);
        assert_eq!(a.children.len(), 1);
        assert_eq!(forest.note(forest.roots()[1]).title, "C");
    }

    #[test]
    fn test_marker_only_lines_are_discarded() {
        let forest = parse_outline("A\n- \n- B").unwrap();
        // The empty item also ends the anchor run, so B is a root.
        let titles: Vec<String> = forest.walk().map(|n| n.title.clone()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(forest.roots().len(), 2);
    }

    #[test]
    fn test_forbidden_title_still_creates_the_node_with_a_warning() {
        let forest = parse_outline("A/B").unwrap();
        let note = forest.note(forest.roots()[0]);
        assert!(note.has_warning);
        assert_eq!(note.title, "A/B");
        assert_eq!(note.path, "A–B");
    }

    #[test]
    fn test_paths_join_sanitized_ancestor_titles() {
        let forest = parse_outline("Top\n- Mid/Section\n  - Leaf").unwrap();
        let paths: Vec<String> = forest.walk().map(|n| n.path.clone()).collect();
        assert_eq!(paths, vec!["Top", "Top/Mid–Section", "Top/Mid–Section/Leaf"]);
    }

    #[test]
    fn test_path_always_matches_the_ancestor_chain() {
        let forest =
            parse_outline("Projects\n- Alpha\n  - Notes\n- Beta\nArchive\n- Old:stuff").unwrap();
        for note in forest.walk() {
            let expected = match note.parent {
                Some(pid) => format!(
                    "{}/{}",
                    forest.note(pid).path,
                    sanitize_file_name(&note.title)
                ),
                None => sanitize_file_name(&note.title),
            };
            assert_eq!(note.path, expected);
        }
    }

    #[test]
    fn test_tabs_count_as_indentation_units() {
        let forest = parse_outline("- A\n\t- B").unwrap();
        assert_eq!(
            titles_by_level(&forest),
            vec![("A".to_string(), 0), ("B".to_string(), 1)]
        );
    }

    #[test]
    fn test_level_jumps_attach_to_the_nearest_open_ancestor() {
        // Deep opens at level 4 while occupying the second stack slot, so
        // the level-2 line that follows still nests beneath it.
        let forest = parse_outline("- A\n    - Deep\n  - Back").unwrap();
        let a = forest.note(forest.roots()[0]);
        assert_eq!(a.children.len(), 1);
        let deep = forest.note(a.children[0]);
        assert_eq!(deep.level, 4);
        assert_eq!(deep.children.len(), 1);
        assert_eq!(forest.note(deep.children[0]).level, 2);
    }

    #[test]
    fn test_indented_first_line_is_unreachable() {
        let forest = parse_outline("  - floating\n- grounded").unwrap();
        assert_eq!(forest.roots().len(), 1);
        assert_eq!(forest.note(forest.roots()[0]).title, "grounded");
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn test_reparsing_the_written_outline_is_isomorphic() {
        let sources = [
            "A\n- B\n- C\n  - D",
            "1. First\n2. Second\n  1. Sub",
            "Projects\n- Alpha\n  - Notes\n- Beta\nArchive",
            "- A\n    - Deep\n  - Back",
        ];
        for source in sources {
            let first = parse_outline(source).unwrap();
            let second = parse_outline(&write_outline(&first)).unwrap();
            assert_eq!(
                titles_by_level(&first),
                titles_by_level(&second),
                "round trip changed {source:?}"
            );
            let first_paths: Vec<String> = first.walk().map(|n| n.path.clone()).collect();
            let second_paths: Vec<String> = second.walk().map(|n| n.path.clone()).collect();
            assert_eq!(first_paths, second_paths);
        }
    }
}
