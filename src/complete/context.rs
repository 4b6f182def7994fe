//! Cursor context classification.
//!
//! Reconstructs the grammatical position of the cursor from the trailing
//! tokens of the incomplete statement. The parser may have truncated the
//! statement mid-token, so classification works purely on the final one to
//! three tokens plus a lookahead into the complete-buffer parse of the
//! same statement.

use crate::error::{CompleteError, CompleteResult};
use crate::query::statement::Statement;
use crate::query::token::{extract_concept_type, Predicate, Token};

/// The grammatical position the cursor occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorContext {
    /// Trailing `-`: about to start an arrow or predicate opener.
    ArrowChoice,

    /// Inside an unterminated predicate bracket.
    PredicateBody {
        /// Concept type to the left of the bracket, alias-stripped.
        previous_concept: String,
        /// The open predicate, bracket-completed, label as typed.
        predicate: Predicate,
        /// Concept after the bracket in the complete buffer, if any.
        next_concept: Option<String>,
    },

    /// Only the statement keyword has been typed.
    FirstConcept,

    /// A single concept is being typed, no predicate yet.
    ConceptTyping {
        /// The typed concept prefix, alias-stripped.
        current: String,
    },

    /// A concept is expected right after an arrow or completed predicate.
    PostPredicateConcept {
        /// Concept on the known side of the predicate, alias-stripped.
        previous_concept: String,
        /// The predicate (bare arrows become empty-label predicates).
        predicate: Predicate,
    },

    /// A concept is being typed after a predicate.
    MidConcept {
        /// Concept on the known side, alias-stripped.
        previous_concept: String,
        /// The predicate between the two concepts.
        predicate: Predicate,
        /// The typed concept prefix, alias-stripped.
        current: String,
    },
}

/// Classify the cursor position within `statement`.
///
/// `lookahead` is the positionally-aligned statement from the
/// complete-buffer parse; it supplies the concept that may already exist
/// past the cursor. Both statements must have linebreaks stripped.
pub fn classify(statement: &Statement, lookahead: &Statement) -> CompleteResult<CursorContext> {
    let keyword = statement
        .keyword()
        .ok_or(CompleteError::UnrecognizedContext)?
        .to_string();
    let last = statement
        .from_end(1)
        .ok_or(CompleteError::UnrecognizedContext)?;

    // Trailing `-`: the user is choosing between the four arrow forms.
    if last.leaf_text() == Some("-") {
        return Ok(CursorContext::ArrowChoice);
    }

    // An open bracket: completing the predicate label.
    if let Some(predicate) = last.as_predicate().filter(|p| p.is_open()) {
        let previous_concept = concept_at(statement, 2)?;
        let next_concept = lookahead_concept(statement, lookahead)?;
        return Ok(CursorContext::PredicateBody {
            previous_concept,
            predicate: predicate.clone().complete_bracket(),
            next_concept,
        });
    }

    // Nothing typed past the keyword yet.
    if last.leaf_text() == Some(keyword.as_str()) {
        return Ok(CursorContext::FirstConcept);
    }

    // A single concept in progress: `select ge`.
    if statement.from_end(2).and_then(Token::leaf_text) == Some(keyword.as_str()) {
        return Ok(CursorContext::ConceptTyping {
            current: concept_at(statement, 1)?,
        });
    }

    // Directly after an arrow or completed predicate: `select gene->`.
    if let Some(predicate) = normalize_predicate(last) {
        return Ok(CursorContext::PostPredicateConcept {
            previous_concept: concept_at(statement, 2)?,
            predicate,
        });
    }

    // Typing the concept on the far side of a predicate:
    // `select gene->chem`.
    if let Some(predicate) = statement.from_end(2).and_then(normalize_predicate) {
        return Ok(CursorContext::MidConcept {
            previous_concept: concept_at(statement, 3)?,
            predicate,
            current: concept_at(statement, 1)?,
        });
    }

    Err(CompleteError::UnrecognizedContext)
}

/// Alias-stripped concept from the `n`-th token counted from the end.
fn concept_at(statement: &Statement, n: usize) -> CompleteResult<String> {
    let token = statement
        .from_end(n)
        .and_then(Token::leaf_text)
        .ok_or(CompleteError::UnrecognizedContext)?;
    extract_concept_type(token).map(str::to_string)
}

/// Concept already typed past the cursor, taken from the complete-buffer
/// parse of the same statement.
fn lookahead_concept(
    statement: &Statement,
    lookahead: &Statement,
) -> CompleteResult<Option<String>> {
    match lookahead.tokens().get(statement.len()) {
        Some(Token::Leaf(text)) => Ok(Some(extract_concept_type(text)?.to_string())),
        _ => Ok(None),
    }
}

/// A completed predicate as-is, a bare arrow as an empty-label predicate.
fn normalize_predicate(token: &Token) -> Option<Predicate> {
    match token {
        Token::Predicate(p) if !p.is_open() => Some(p.clone()),
        Token::Leaf(text) => Predicate::from_arrow(text),
        _ => None,
    }
}
