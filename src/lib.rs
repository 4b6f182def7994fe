//! # relq
//!
//! Contextual completion engine for the relq graph query language.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          Editor buffer + cursor (external host)          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [remote parser service]
//! ┌─────────────────────────────────────────────────────────┐
//! │     Incomplete / complete token blocks   [query]         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [classifier]
//! ┌─────────────────────────────────────────────────────────┐
//! │     CursorContext (closed position enum)  [complete]     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [resolvers ↔ schema graph]
//! ┌─────────────────────────────────────────────────────────┐
//! │     Ranked, replace-range-aware candidates               │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The [`engine::CompletionSession`] drives one cycle at a time per
//! editor session, superseding in-flight cycles so stale results never
//! reach the editor.

pub mod complete;
pub mod engine;
pub mod error;
pub mod query;
pub mod schema;

pub use complete::{Candidate, CursorContext, Position, Suggestion};
pub use engine::{CompletionRequest, CompletionSession};
pub use error::{CompleteError, CompleteResult, ParseDiagnostic};
pub use query::{Block, ParseOutcome, ParsePair, Predicate, Statement, StatementKind, Token};
pub use schema::{KnowledgeGraph, ReasonerCatalog, SchemaGraph, SCHEMA_REASONER};
