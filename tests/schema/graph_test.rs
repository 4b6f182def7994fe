//! Schema graph index queries.

use std::collections::BTreeSet;

use relq::schema::catalog::SCHEMA_REASONER;
use relq::schema::graph::{
    dedupe_by_kind, EdgeFilter, KindMatch, KnowledgeGraph, NodeMatch, SchemaEdge, SchemaGraph,
    SchemaNode,
};

fn node(id: &str, reasoners: &[&str]) -> SchemaNode {
    SchemaNode {
        id: id.to_string(),
        reasoner: reasoners.iter().map(|r| r.to_string()).collect(),
    }
}

fn edge(source: &str, kind: &str, target: &str, reasoners: &[&str]) -> SchemaEdge {
    SchemaEdge {
        source_id: source.to_string(),
        target_id: target.to_string(),
        kind: kind.to_string(),
        reasoner: reasoners.iter().map(|r| r.to_string()).collect(),
    }
}

fn sample() -> SchemaGraph {
    SchemaGraph::from_knowledge_graph(KnowledgeGraph {
        nodes: vec![
            node("gene", &["r1"]),
            node("gene_product", &["r1"]),
            node("chemical_substance", &["r1", "r2"]),
            node("disease", &["r2"]),
        ],
        edges: vec![
            edge("gene", "regulates", "chemical_substance", &["r1"]),
            edge("gene", "regulates", "disease", &["r1"]),
            edge("gene", "affects", "disease", &["r2"]),
            edge("chemical_substance", "treats", "disease", &["r2"]),
        ],
    })
}

#[test]
fn test_nodes_with_prefix_is_exact_and_order_stable() {
    let g = sample();
    // Exactly the prefix-matching set, in insertion order.
    assert_eq!(g.nodes_with_prefix("gene"), vec!["gene", "gene_product"]);
    assert_eq!(
        g.nodes_with_prefix(""),
        vec!["gene", "gene_product", "chemical_substance", "disease"]
    );
    assert!(g.nodes_with_prefix("zz").is_empty());

    // Repeated queries yield the same order.
    assert_eq!(g.nodes_with_prefix("gene"), g.nodes_with_prefix("gene"));
}

#[test]
fn test_edges_matching_combines_filters_with_and() {
    let g = sample();
    let hits = g.edges_matching(&EdgeFilter {
        source: NodeMatch::Is("gene"),
        target: NodeMatch::Is("disease"),
        kind: KindMatch::StartsWith("reg"),
        reasoner: None,
    });
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].kind, "regulates");
    assert_eq!(hits[0].target_id, "disease");
}

#[test]
fn test_endpoint_prefix_match() {
    let g = sample();
    let hits = g.edges_matching(&EdgeFilter {
        source: NodeMatch::Is("gene"),
        target: NodeMatch::StartsWith("d"),
        kind: KindMatch::Any,
        reasoner: None,
    });
    let kinds: BTreeSet<_> = hits.iter().map(|e| e.kind.as_str()).collect();
    assert_eq!(kinds, BTreeSet::from(["regulates", "affects"]));
}

#[test]
fn test_reasoner_constraint_checks_set_membership() {
    let g = sample();
    let r1 = EdgeFilter {
        source: NodeMatch::Is("gene"),
        kind: KindMatch::Is("affects"),
        reasoner: Some("r1"),
        ..EdgeFilter::default()
    };
    assert!(!g.any_edge_matching(&r1));

    let r2 = EdgeFilter { reasoner: Some("r2"), ..r1 };
    assert!(g.any_edge_matching(&r2));

    // The schema meta-reasoner matches unconditionally.
    let meta = EdgeFilter {
        reasoner: Some(SCHEMA_REASONER),
        ..r1
    };
    assert!(g.any_edge_matching(&meta));
}

#[test]
fn test_dedupe_by_kind_keeps_first_seen_and_is_idempotent() {
    let g = sample();
    let all = g.edges_matching(&EdgeFilter {
        source: NodeMatch::Is("gene"),
        ..EdgeFilter::default()
    });
    assert_eq!(all.len(), 3);

    let once = dedupe_by_kind(all);
    let kinds: Vec<_> = once.iter().map(|e| e.kind.as_str()).collect();
    assert_eq!(kinds, vec!["regulates", "affects"]);
    // First-seen edge survives for the duplicated kind.
    assert_eq!(once[0].target_id, "chemical_substance");

    let twice = dedupe_by_kind(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn test_reasoners_serving_prefix_unions_node_sets() {
    let g = sample();
    let serving: BTreeSet<_> = g.reasoners_serving_prefix("c").into_iter().collect();
    assert_eq!(serving, BTreeSet::from(["r1", "r2"]));
    assert!(g.reasoners_serving_prefix("zz").is_empty());
}

#[test]
fn test_edge_with_unknown_endpoint_still_queryable() {
    let g = SchemaGraph::from_knowledge_graph(KnowledgeGraph {
        nodes: vec![node("gene", &["r1"])],
        edges: vec![edge("gene", "mentions", "publication", &["r1"])],
    });
    assert_eq!(g.node_count(), 2);
    assert!(g.any_edge_matching(&EdgeFilter {
        target: NodeMatch::Is("publication"),
        ..EdgeFilter::default()
    }));
}
