//! Parsed query representation: tokens, statements, blocks, and the wire
//! format the remote parser delivers them in.

pub mod statement;
pub mod token;
pub mod wire;

pub use statement::{Block, ParsePair, Statement, StatementKind};
pub use token::{extract_concept_type, Predicate, Token, ALL_ARROWS};
pub use wire::{decode_parse_pair, decode_parse_response, ParseOutcome};
