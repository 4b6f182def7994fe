//! Lexical tokens of a parsed query.
//!
//! The remote parser hands back a nested token tree; every element is
//! either an opaque text leaf, a bracketed predicate (possibly still open
//! at the cursor), or a quoted literal. Predicate direction is a function
//! of the brackets alone, never of the label.

use crate::error::{CompleteError, CompleteResult};

/// Forward predicate opener: `-[`.
pub const FORWARD_OPEN: &str = "-[";
/// Backward predicate opener: `<-[`.
pub const BACKWARD_OPEN: &str = "<-[";
/// Forward predicate closer: `]->`.
pub const FORWARD_CLOSE: &str = "]->";
/// Backward predicate closer: `]-`.
pub const BACKWARD_CLOSE: &str = "]-";

/// Forward plain arrow.
pub const FORWARD_ARROW: &str = "->";
/// Backward plain arrow.
pub const BACKWARD_ARROW: &str = "<-";

/// Every arrow or predicate opener a trailing `-` can become.
pub const ALL_ARROWS: [&str; 4] = [FORWARD_ARROW, BACKWARD_ARROW, FORWARD_OPEN, BACKWARD_OPEN];

/// One lexical unit of a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Opaque text fragment: identifier, keyword, arrow, whitespace.
    Leaf(String),
    /// Bracketed predicate, e.g. `-[regulates]->`.
    Predicate(Predicate),
    /// Quoted literal, possibly unterminated, e.g. `'/schem`.
    Quoted {
        /// The opening quote character.
        quote: char,
        /// Text typed so far inside the quotes.
        text: String,
    },
}

impl Token {
    /// Convenience constructor for a leaf token.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::Leaf(text.into())
    }

    /// True if this token is a predicate (complete or still open).
    pub fn is_predicate(&self) -> bool {
        matches!(self, Self::Predicate(_))
    }

    /// Leaf text, if this is a leaf.
    pub fn leaf_text(&self) -> Option<&str> {
        match self {
            Self::Leaf(text) => Some(text),
            _ => None,
        }
    }

    /// Predicate payload, if this is a predicate.
    pub fn as_predicate(&self) -> Option<&Predicate> {
        match self {
            Self::Predicate(p) => Some(p),
            _ => None,
        }
    }

    /// True if this is a leaf containing a line break.
    pub fn is_linebreak(&self) -> bool {
        matches!(self, Self::Leaf(text) if text.contains('\n') || text.contains('\r'))
    }

    /// True if this is a leaf made entirely of whitespace.
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Self::Leaf(text) if !text.is_empty() && text.chars().all(char::is_whitespace))
    }
}

/// A bracketed predicate token.
///
/// `close` is `None` while the user is still typing inside the brackets
/// (`-[` or `-[regul`); the parser only fills the third slot once the
/// closing bracket has been typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    /// Opening bracket: `-[` or `<-[`.
    pub open: String,
    /// Predicate type label, possibly empty.
    pub label: String,
    /// Closing bracket, absent while the predicate is still open.
    pub close: Option<String>,
}

impl Predicate {
    /// A complete predicate with the direction-correct closing bracket.
    pub fn new(open: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            label: label.into(),
            close: None,
        }
        .complete_bracket()
    }

    /// An open (unterminated) predicate.
    pub fn open_bracket(open: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            label: label.into(),
            close: None,
        }
    }

    /// Normalize a plain arrow into an empty-label predicate of the same
    /// direction. Returns `None` for non-arrow input.
    pub fn from_arrow(arrow: &str) -> Option<Self> {
        match arrow {
            FORWARD_ARROW => Some(Self::new(FORWARD_OPEN, "")),
            BACKWARD_ARROW => Some(Self::new(BACKWARD_OPEN, "")),
            _ => None,
        }
    }

    /// True iff the opening bracket points backward.
    pub fn is_backward(&self) -> bool {
        self.open == BACKWARD_OPEN
    }

    /// True while the closing bracket has not been typed yet.
    pub fn is_open(&self) -> bool {
        self.close.is_none()
    }

    /// A direction-normalized copy: forward brackets, label preserved.
    pub fn to_forward(&self) -> Self {
        Self {
            open: FORWARD_OPEN.to_string(),
            label: self.label.clone(),
            close: Some(FORWARD_CLOSE.to_string()),
        }
    }

    /// Fill in the direction-correct closing bracket, leaving the opening
    /// bracket and label untouched.
    pub fn complete_bracket(mut self) -> Self {
        let close = if self.is_backward() {
            BACKWARD_CLOSE
        } else {
            FORWARD_CLOSE
        };
        self.close = Some(close.to_string());
        self
    }
}

/// Strip a named alias from a concept reference.
///
/// Concept references may carry a user-chosen alias before a single `:`
/// (`f1:Foo` names the concept type `Foo`). More than one separator is a
/// hard error; no separator returns the text unchanged.
pub fn extract_concept_type(text: &str) -> CompleteResult<&str> {
    let mut parts = text.split(':');
    let first = parts.next().unwrap_or_default();
    match (parts.next(), parts.next()) {
        (None, _) => Ok(first),
        (Some(type_name), None) => Ok(type_name),
        (Some(_), Some(_)) => Err(CompleteError::MalformedIdentifier(text.to_string())),
    }
}
