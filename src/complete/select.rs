//! Candidate resolution for `select` statements.

use crate::complete::candidate::Suggestion;
use crate::complete::context::CursorContext;
use crate::error::CompleteResult;
use crate::query::token::{Predicate, ALL_ARROWS};
use crate::schema::graph::{dedupe_by_kind, EdgeFilter, KindMatch, NodeMatch, SchemaGraph};

/// Resolve candidates for a classified cursor position in a `select`
/// statement.
pub fn resolve_select(
    context: &CursorContext,
    graph: &SchemaGraph,
) -> CompleteResult<Vec<Suggestion>> {
    match context {
        CursorContext::ArrowChoice => Ok(arrow_suggestions()),
        CursorContext::PredicateBody {
            previous_concept,
            predicate,
            next_concept,
        } => Ok(predicate_suggestions(
            graph,
            previous_concept,
            predicate,
            next_concept.as_deref(),
        )),
        CursorContext::FirstConcept => Ok(node_suggestions(graph, "")),
        CursorContext::ConceptTyping { current } => Ok(node_suggestions(graph, current)),
        CursorContext::PostPredicateConcept {
            previous_concept,
            predicate,
        } => Ok(chained_concept_suggestions(
            graph,
            previous_concept,
            predicate,
            "",
        )),
        CursorContext::MidConcept {
            previous_concept,
            predicate,
            current,
        } => Ok(chained_concept_suggestions(
            graph,
            previous_concept,
            predicate,
            current,
        )),
    }
}

/// The four arrow/predicate-opener forms, each replacing the typed `-`.
fn arrow_suggestions() -> Vec<Suggestion> {
    ALL_ARROWS
        .iter()
        .map(|arrow| Suggestion::plain(*arrow, "-"))
        .collect()
}

/// Predicate labels valid between the previous concept and the optional
/// lookahead concept, prefix-matched against the typed label.
fn predicate_suggestions(
    graph: &SchemaGraph,
    previous_concept: &str,
    predicate: &Predicate,
    next_concept: Option<&str>,
) -> Vec<Suggestion> {
    let next = next_concept.map(NodeMatch::Is).unwrap_or_default();
    let filter = if predicate.is_backward() {
        EdgeFilter {
            source: next,
            target: NodeMatch::Is(previous_concept),
            kind: KindMatch::StartsWith(&predicate.label),
            reasoner: None,
        }
    } else {
        EdgeFilter {
            source: NodeMatch::Is(previous_concept),
            target: next,
            kind: KindMatch::StartsWith(&predicate.label),
            reasoner: None,
        }
    };

    dedupe_by_kind(graph.edges_matching(&filter))
        .into_iter()
        .map(|edge| {
            // The far endpoint disambiguates identically-named predicates.
            let hint = if predicate.is_backward() {
                &edge.source_id
            } else {
                &edge.target_id
            };
            Suggestion {
                display: format!("{} ({})", edge.kind, hint),
                insert: edge.kind.clone(),
                replace: predicate.label.clone(),
            }
        })
        .collect()
}

/// All concept types with the typed prefix; used when no predicate is in
/// play yet.
fn node_suggestions(graph: &SchemaGraph, prefix: &str) -> Vec<Suggestion> {
    graph
        .nodes_with_prefix(prefix)
        .into_iter()
        .map(|id| Suggestion::plain(id, prefix))
        .collect()
}

/// Concepts reachable from `previous_concept` through `predicate`,
/// prefix-matched on the side being typed.
fn chained_concept_suggestions(
    graph: &SchemaGraph,
    previous_concept: &str,
    predicate: &Predicate,
    current: &str,
) -> Vec<Suggestion> {
    // An empty label means any predicate; a typed label must match
    // exactly.
    let kind = if predicate.label.is_empty() {
        KindMatch::Any
    } else {
        KindMatch::Is(&predicate.label)
    };
    let filter = if predicate.is_backward() {
        EdgeFilter {
            source: NodeMatch::StartsWith(current),
            target: NodeMatch::Is(previous_concept),
            kind,
            reasoner: None,
        }
    } else {
        EdgeFilter {
            source: NodeMatch::Is(previous_concept),
            target: NodeMatch::StartsWith(current),
            kind,
            reasoner: None,
        }
    };

    let mut seen = std::collections::BTreeSet::new();
    graph
        .edges_matching(&filter)
        .into_iter()
        .map(|edge| {
            if predicate.is_backward() {
                edge.source_id.as_str()
            } else {
                edge.target_id.as_str()
            }
        })
        .filter(|concept| seen.insert(*concept))
        .map(|concept| Suggestion::plain(concept, current))
        .collect()
}
