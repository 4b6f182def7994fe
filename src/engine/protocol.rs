//! External collaborator boundaries.
//!
//! The engine never talks to a network or an editor directly; it goes
//! through these traits. The parser, the schema graph, and the reasoner
//! catalog are all eventually-ready remote resources, so their providers
//! are async. The editor host is fire-and-forget.

use std::sync::Arc;

use async_trait::async_trait;

use crate::complete::candidate::Candidate;
use crate::error::{CompleteResult, ParseDiagnostic};
use crate::query::wire::ParseOutcome;
use crate::schema::catalog::ReasonerCatalog;
use crate::schema::graph::SchemaGraph;

/// The remote parser service.
///
/// One call parses both the text up to the cursor and the entire buffer,
/// yielding the incomplete/complete block pair or a rejection.
#[async_trait]
pub trait ParseService: Send + Sync {
    /// Parse `(text_to_cursor, entire_text)`.
    async fn parse_incomplete(
        &self,
        text_to_cursor: &str,
        entire_text: &str,
    ) -> CompleteResult<ParseOutcome>;
}

/// Source of the current schema graph snapshot.
#[async_trait]
pub trait SchemaProvider: Send + Sync {
    /// The current snapshot; may suspend until the graph is first loaded.
    async fn schema(&self) -> CompleteResult<Arc<SchemaGraph>>;
}

/// Source of the reasoner catalog.
#[async_trait]
pub trait ReasonerProvider: Send + Sync {
    /// The current catalog; may suspend until first loaded. The engine
    /// adds the synthetic schema entry itself.
    async fn reasoners(&self) -> CompleteResult<ReasonerCatalog>;
}

/// The editor surface the engine drives. Consumed, not implemented, by
/// the core; call order per cycle always ends with candidates, an error,
/// or a bare close.
pub trait EditorHost: Send + Sync {
    /// Show the loading indicator.
    fn show_loading(&self);
    /// Clear the hint list and any loading indicator.
    fn close_hints(&self);
    /// Present the final candidate list.
    fn show_candidates(&self, candidates: Vec<Candidate>);
    /// Present an error hint with drill-down diagnostics.
    fn show_error(&self, message: &str, errors: &[ParseDiagnostic]);
}

/// A provider serving one fixed schema snapshot.
pub struct StaticSchemaProvider(pub Arc<SchemaGraph>);

#[async_trait]
impl SchemaProvider for StaticSchemaProvider {
    async fn schema(&self) -> CompleteResult<Arc<SchemaGraph>> {
        Ok(Arc::clone(&self.0))
    }
}

/// A provider serving one fixed reasoner catalog.
pub struct StaticReasonerProvider(pub ReasonerCatalog);

#[async_trait]
impl ReasonerProvider for StaticReasonerProvider {
    async fn reasoners(&self) -> CompleteResult<ReasonerCatalog> {
        Ok(self.0.clone())
    }
}

/// A parse service replaying one fixed outcome, for fixtures and tests.
pub struct StaticParseService(pub ParseOutcome);

#[async_trait]
impl ParseService for StaticParseService {
    async fn parse_incomplete(
        &self,
        _text_to_cursor: &str,
        _entire_text: &str,
    ) -> CompleteResult<ParseOutcome> {
        Ok(self.0.clone())
    }
}
