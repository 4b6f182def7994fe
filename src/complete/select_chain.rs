//! Walking a `select` statement's concept/predicate chain.
//!
//! A chain alternates concept and predicate tokens:
//! `c0 p0 c1 p1 c2 ...`. Hops overlap on their shared concept, so the
//! walk advances with stride two.

use crate::error::{CompleteError, CompleteResult};
use crate::query::statement::Statement;
use crate::query::token::{extract_concept_type, Predicate, Token};

/// One concept-predicate-concept transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    /// Concept on the left of the predicate, alias-stripped.
    pub previous: String,
    /// The predicate (bare arrows normalized to empty-label predicates).
    pub predicate: Predicate,
    /// Concept on the right, alias-stripped.
    pub current: String,
}

/// The shape of a select chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chain {
    /// No tokens after the keyword yet.
    Empty,
    /// A single concept, no predicate.
    Single(String),
    /// One or more predicate transitions. May be empty when the chain
    /// ends on a dangling predicate; an empty hop list constrains
    /// nothing.
    Hops(Vec<Hop>),
}

/// Extract the chain from a `select` statement.
pub fn parse_chain(select: &Statement) -> CompleteResult<Chain> {
    let tokens = select.chain();

    match tokens.len() {
        0 => Ok(Chain::Empty),
        1 => Ok(Chain::Single(concept(tokens[0])?)),
        len => {
            let mut hops = Vec::new();
            let mut i = 0;
            while i + 2 < len {
                hops.push(Hop {
                    previous: concept(tokens[i])?,
                    predicate: predicate(tokens[i + 1])?,
                    current: concept(tokens[i + 2])?,
                });
                i += 2;
            }
            Ok(Chain::Hops(hops))
        }
    }
}

fn concept(token: &Token) -> CompleteResult<String> {
    let text = token
        .leaf_text()
        .ok_or(CompleteError::UnrecognizedContext)?;
    extract_concept_type(text).map(str::to_string)
}

fn predicate(token: &Token) -> CompleteResult<Predicate> {
    match token {
        Token::Predicate(p) => Ok(p.clone().complete_bracket()),
        Token::Leaf(text) => {
            Predicate::from_arrow(text).ok_or(CompleteError::UnrecognizedContext)
        }
        _ => Err(CompleteError::UnrecognizedContext),
    }
}
