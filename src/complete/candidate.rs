//! Candidate construction and replace-range anchoring.
//!
//! Resolvers produce [`Suggestion`]s that only know the text prefix they
//! replace. Anchoring turns them into editor-ready [`Candidate`]s whose
//! replace range ends at the cursor and starts `replace` characters back
//! on the last non-empty line, so applying the edit puts the insert text
//! exactly where the partial token stood.

use serde::Serialize;

/// A zero-based editor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    /// Line number.
    pub line: u32,
    /// Character offset within the line.
    pub ch: u32,
}

impl Position {
    /// Construct a position.
    pub fn new(line: u32, ch: u32) -> Self {
        Self { line, ch }
    }
}

/// A resolver-level completion: display text, insertable text, and the
/// already-typed prefix it replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Text shown in the hint list.
    pub display: String,
    /// Text inserted on selection.
    pub insert: String,
    /// The typed prefix being replaced (may be empty).
    pub replace: String,
}

impl Suggestion {
    /// A suggestion whose display and insert text coincide.
    pub fn plain(text: impl Into<String>, replace: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            display: text.clone(),
            insert: text,
            replace: replace.into(),
        }
    }
}

/// A position-anchored completion candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Text shown in the hint list.
    pub display_text: String,
    /// Text inserted on selection (empty for placeholders and errors).
    pub insert_text: String,
    /// Start of the replaced range.
    pub replace_from: Position,
    /// End of the replaced range (the cursor).
    pub replace_to: Position,
}

/// Anchor suggestions at the cursor.
///
/// `text_to_cursor` is the untrimmed buffer text up to the cursor; the
/// replace range for a non-empty prefix is computed against its
/// right-trimmed form, mirroring how the editor widget trims trailing
/// whitespace before matching the partial token.
pub fn anchor(suggestions: Vec<Suggestion>, cursor: Position, text_to_cursor: &str) -> Vec<Candidate> {
    suggestions
        .into_iter()
        .map(|s| {
            let replace_from = if s.replace.is_empty() {
                cursor
            } else {
                prefix_start(text_to_cursor, &s.replace, cursor)
            };
            Candidate {
                display_text: s.display,
                insert_text: s.insert,
                replace_from,
                replace_to: cursor,
            }
        })
        .collect()
}

/// Where the typed prefix starts: on the last non-empty line of the
/// trimmed text, `replace` characters back from its end.
fn prefix_start(text_to_cursor: &str, replace: &str, cursor: Position) -> Position {
    let trimmed = text_to_cursor.trim_end();
    if trimmed.is_empty() {
        return cursor;
    }
    let lines: Vec<&str> = trimmed
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    let line = (lines.len() - 1) as u32;
    let last_len = lines.last().map(|l| l.chars().count()).unwrap_or(0);
    let ch = last_len.saturating_sub(replace.chars().count()) as u32;
    Position::new(line, ch)
}

/// The non-inserting placeholder shown when no suggestion is valid.
pub fn no_results_placeholder(cursor: Position) -> Candidate {
    Candidate {
        display_text: "No valid results".to_string(),
        insert_text: String::new(),
        replace_from: cursor,
        replace_to: cursor,
    }
}

/// Text up to an editor position, used to derive `text_to_cursor` from a
/// full buffer.
pub fn text_up_to(text: &str, cursor: Position) -> String {
    let mut out = String::new();
    for (i, line) in text.split('\n').enumerate() {
        let i = i as u32;
        if i > cursor.line {
            break;
        }
        if i > 0 {
            out.push('\n');
        }
        if i == cursor.line {
            out.extend(line.chars().take(cursor.ch as usize));
            break;
        }
        out.push_str(line);
    }
    out
}
