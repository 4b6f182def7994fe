//! Completion resolution: classifying the cursor position and computing
//! the valid candidate set against the schema graph.

pub mod candidate;
pub mod context;
pub mod from;
pub mod select;
pub mod select_chain;

pub use candidate::{anchor, no_results_placeholder, Candidate, Position, Suggestion};
pub use context::{classify, CursorContext};
pub use from::resolve_from;
pub use select::resolve_select;

use crate::error::{CompleteError, CompleteResult};
use crate::query::statement::{ParsePair, StatementKind};
use crate::schema::catalog::ReasonerCatalog;
use crate::schema::graph::SchemaGraph;

/// Resolve suggestions for the statement under the cursor.
///
/// Pure and synchronous: the orchestrator supplies the parse pair and the
/// data snapshots, this picks the resolver matching the statement kind.
/// `where` is a recognized kind that deliberately yields no candidates.
pub fn resolve_block(
    pair: &ParsePair,
    graph: &SchemaGraph,
    catalog: &ReasonerCatalog,
) -> CompleteResult<Vec<Suggestion>> {
    let incomplete = pair.incomplete.without_linebreaks();
    let complete = pair.complete.without_linebreaks();

    let statement = incomplete
        .last_statement()
        .ok_or(CompleteError::UnrecognizedContext)?;

    match statement.kind() {
        Some(StatementKind::Select) => {
            // The complete block aligns positionally on the last
            // incomplete statement; past-cursor statements are ignored.
            let lookahead = complete
                .statements()
                .get(incomplete.len() - 1)
                .cloned()
                .unwrap_or_else(|| statement.clone());
            let context = classify(statement, &lookahead)?;
            resolve_select(&context, graph)
        }
        Some(StatementKind::From) => resolve_from(statement, &incomplete, graph, catalog),
        Some(StatementKind::Where) => Ok(Vec::new()),
        None => Err(CompleteError::UnrecognizedContext),
    }
}
