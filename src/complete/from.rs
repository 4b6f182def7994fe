//! Candidate resolution for `from` statements.
//!
//! A `from` statement picks the reasoner that will answer the query, so
//! its candidates are exactly the reasoners whose subgraph supports every
//! hop of the already-typed `select` chain.

use crate::complete::candidate::Suggestion;
use crate::complete::select_chain::{parse_chain, Chain, Hop};
use crate::error::{CompleteError, CompleteResult};
use crate::query::statement::{Block, Statement};
use crate::query::token::Token;
use crate::schema::catalog::ReasonerCatalog;
use crate::schema::graph::{EdgeFilter, KindMatch, NodeMatch, SchemaGraph};

/// Resolve reasoner candidates for the `from` statement being typed.
///
/// `statement` is the incomplete `from` statement; `block` is the whole
/// incomplete block, which by grammar invariant holds the `select`
/// statement first.
pub fn resolve_from(
    statement: &Statement,
    block: &Block,
    graph: &SchemaGraph,
    catalog: &ReasonerCatalog,
) -> CompleteResult<Vec<Suggestion>> {
    let select = block
        .select_statement()
        .ok_or(CompleteError::UnrecognizedContext)?;
    let chain = parse_chain(select)?;

    // The typed prefix lives inside the quoted literal; when no quote has
    // been typed yet, the inserted text supplies the opening quote.
    let (typed, quote_prefix) = match statement.tokens().get(1) {
        Some(Token::Quoted { text, .. }) => (text.as_str(), ""),
        _ => ("", "'"),
    };

    let valid = catalog
        .iter()
        .filter(|(id, _)| chain_supported(&chain, graph, id))
        .map(|(_, value)| value)
        .filter(|value| value.starts_with(typed))
        .map(|value| Suggestion {
            display: value.to_string(),
            insert: format!("{quote_prefix}{value}"),
            replace: typed.to_string(),
        })
        .collect();

    Ok(valid)
}

/// Whether `reasoner` supports every hop of the chain.
///
/// Validity is an AND over all hops: one unsupported hop disqualifies the
/// reasoner no matter how many earlier hops succeeded. Only reasoner-set
/// membership matters, never edge order. A single-concept chain checks
/// node reasoner sets, where the synthetic schema entry never appears; it
/// only qualifies once the chain has a hop for it to match.
fn chain_supported(chain: &Chain, graph: &SchemaGraph, reasoner: &str) -> bool {
    match chain {
        Chain::Empty => true,
        Chain::Single(concept) => graph.reasoners_serving_prefix(concept).contains(reasoner),
        Chain::Hops(hops) => hops.iter().all(|hop| hop_supported(hop, graph, reasoner)),
    }
}

fn hop_supported(hop: &Hop, graph: &SchemaGraph, reasoner: &str) -> bool {
    let kind = if hop.predicate.label.is_empty() {
        KindMatch::Any
    } else {
        KindMatch::Is(&hop.predicate.label)
    };
    let filter = if hop.predicate.is_backward() {
        EdgeFilter {
            source: NodeMatch::StartsWith(&hop.current),
            target: NodeMatch::Is(&hop.previous),
            kind,
            reasoner: Some(reasoner),
        }
    } else {
        EdgeFilter {
            source: NodeMatch::Is(&hop.previous),
            target: NodeMatch::StartsWith(&hop.current),
            kind,
            reasoner: Some(reasoner),
        }
    };
    graph.any_edge_matching(&filter)
}
