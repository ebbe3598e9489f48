//! Note title validation and filename sanitization.

/// Characters that are illegal in a note filename.
pub const FORBIDDEN_CHARS: [char; 8] = ['#', '^', '[', ']', '|', '\\', '/', ':'];

/// What forbidden characters are replaced with when building paths.
const REPLACEMENT: char = '–';

/// Returns a reason when `title` cannot be used as a filename as-is.
///
/// Not an error: the note is still created, callers surface the result as
/// a warning on the node.
pub fn title_problem(title: &str) -> Option<&'static str> {
    if title.chars().any(|c| FORBIDDEN_CHARS.contains(&c)) {
        Some("Contains invalid characters: # ^ [ ] | \\ / :")
    } else {
        None
    }
}

/// Converts a title into a safe path segment.
///
/// Each forbidden character becomes an en-dash, then leading and trailing
/// dots are stripped, then surrounding whitespace is trimmed. Total over
/// all input and idempotent on trimmed titles.
pub fn sanitize_file_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if FORBIDDEN_CHARS.contains(&c) {
                REPLACEMENT
            } else {
                c
            }
        })
        .collect();
    replaced.trim_matches('.').trim().to_string()
}
