//! Decoding of the parser service's JSON tree format.
//!
//! The parser answers one call with a two-element array: the tree for the
//! text up to the cursor and the tree for the entire buffer. The last
//! element of each tree is the statement block. Tokens arrive as plain
//! strings (leaves), bracket arrays of one to three slots (predicates), or
//! quote-fragment arrays (quoted literals). A rejected parse arrives as an
//! object carrying `status` and `errors` instead of a tree.

use serde_json::Value;

use crate::error::{CompleteError, CompleteResult, ParseDiagnostic};
use crate::query::statement::{Block, ParsePair, Statement};
use crate::query::token::{Predicate, Token, BACKWARD_OPEN, FORWARD_OPEN};

/// Decoded parser response: either a block pair or a rejection.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// The query parsed; both blocks are available.
    Pair(ParsePair),
    /// The parser rejected the text.
    Rejected {
        /// Status string from the parser.
        status: String,
        /// Parser diagnostics.
        errors: Vec<ParseDiagnostic>,
    },
}

/// Decode a raw parser response.
pub fn decode_parse_response(value: &Value) -> CompleteResult<ParseOutcome> {
    if let Some(object) = value.as_object() {
        if let Some(errors) = object.get("errors") {
            let status = object
                .get("status")
                .and_then(Value::as_str)
                .unwrap_or("error")
                .to_string();
            let errors: Vec<ParseDiagnostic> = serde_json::from_value(errors.clone())
                .map_err(|e| CompleteError::Decode(format!("bad error list: {e}")))?;
            return Ok(ParseOutcome::Rejected { status, errors });
        }
        return Err(CompleteError::Decode(
            "expected tree pair or error object".to_string(),
        ));
    }
    decode_parse_pair(value).map(ParseOutcome::Pair)
}

/// Decode the `[incompleteTree, completeTree]` pair.
pub fn decode_parse_pair(value: &Value) -> CompleteResult<ParsePair> {
    let pair = value
        .as_array()
        .filter(|a| a.len() == 2)
        .ok_or_else(|| CompleteError::Decode("expected a two-element tree pair".to_string()))?;

    Ok(ParsePair {
        incomplete: decode_tree(&pair[0])?,
        complete: decode_tree(&pair[1])?,
    })
}

/// The block is the last element of a parse tree.
fn decode_tree(value: &Value) -> CompleteResult<Block> {
    let tree = value
        .as_array()
        .ok_or_else(|| CompleteError::Decode("parse tree is not an array".to_string()))?;
    let block = tree
        .last()
        .ok_or_else(|| CompleteError::Decode("parse tree is empty".to_string()))?;
    decode_block(block)
}

fn decode_block(value: &Value) -> CompleteResult<Block> {
    let statements = value
        .as_array()
        .ok_or_else(|| CompleteError::Decode("statement block is not an array".to_string()))?;
    statements
        .iter()
        .map(decode_statement)
        .collect::<CompleteResult<Vec<_>>>()
        .map(Block::new)
}

fn decode_statement(value: &Value) -> CompleteResult<Statement> {
    let tokens = value
        .as_array()
        .ok_or_else(|| CompleteError::Decode("statement is not an array".to_string()))?;
    tokens
        .iter()
        .map(decode_token)
        .collect::<CompleteResult<Vec<_>>>()
        .map(Statement::new)
}

fn decode_token(value: &Value) -> CompleteResult<Token> {
    match value {
        Value::String(text) => Ok(Token::Leaf(text.clone())),
        Value::Array(slots) => decode_composite(slots),
        other => Err(CompleteError::Decode(format!(
            "unexpected token shape: {other}"
        ))),
    }
}

/// An array token is a predicate (`["-[", label, "]->"]`, possibly
/// truncated after any slot) or a quoted literal (`["'", text]`, sometimes
/// nested one level as quote fragments).
fn decode_composite(slots: &[Value]) -> CompleteResult<Token> {
    match slots.first() {
        Some(Value::String(first)) if first == FORWARD_OPEN || first == BACKWARD_OPEN => {
            let label = match slots.get(1) {
                Some(Value::String(label)) => label.clone(),
                None => String::new(),
                Some(other) => {
                    return Err(CompleteError::Decode(format!(
                        "predicate label is not a string: {other}"
                    )))
                }
            };
            let close = match slots.get(2) {
                Some(Value::String(close)) => Some(close.clone()),
                None => None,
                Some(other) => {
                    return Err(CompleteError::Decode(format!(
                        "predicate close is not a string: {other}"
                    )))
                }
            };
            Ok(Token::Predicate(Predicate {
                open: first.clone(),
                label,
                close,
            }))
        }
        Some(Value::String(first)) if first == "'" || first == "\"" => Ok(Token::Quoted {
            quote: first.chars().next().unwrap_or('\''),
            text: slots
                .get(1)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }),
        // Quote fragments: the last fragment holds the open quote and the
        // text typed so far.
        Some(Value::Array(_)) => {
            let last = slots
                .last()
                .and_then(Value::as_array)
                .ok_or_else(|| CompleteError::Decode("empty quote fragment list".to_string()))?;
            decode_composite(last)
        }
        other => Err(CompleteError::Decode(format!(
            "unrecognized composite token: {other:?}"
        ))),
    }
}
