//! From-statement resolution, end to end through `resolve_block`.

use relq::complete::resolve_block;
use relq::query::statement::{Block, ParsePair, Statement};
use relq::query::token::{Predicate, Token, BACKWARD_OPEN, FORWARD_OPEN};
use relq::schema::catalog::{ReasonerCatalog, SCHEMA_REASONER};
use relq::schema::graph::{KnowledgeGraph, SchemaEdge, SchemaNode};
use relq::schema::SchemaGraph;

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

fn graph() -> SchemaGraph {
    SchemaGraph::from_knowledge_graph(KnowledgeGraph {
        nodes: vec![
            node("gene", &["r1", "r2"]),
            node("chemical_substance", &["r1", "r2"]),
            node("disease", &["r2"]),
        ],
        edges: vec![
            edge("gene", "regulates", "chemical_substance", &["r1"]),
            edge("chemical_substance", "treats", "disease", &["r2"]),
        ],
    })
}

fn catalog() -> ReasonerCatalog {
    ReasonerCatalog::from_pairs([
        ("r1", "https://r1.example/query"),
        ("r2", "https://r2.example/query"),
    ])
    .with_schema_entry()
}

fn pair_of(statements: Vec<Statement>) -> ParsePair {
    let block = Block::new(statements);
    ParsePair {
        incomplete: block.clone(),
        complete: block,
    }
}

fn regulates_select() -> Statement {
    Statement::new(vec![
        Token::leaf("select"),
        Token::leaf("gene"),
        Token::Predicate(Predicate::new(FORWARD_OPEN, "regulates")),
        Token::leaf("chemical_substance"),
    ])
}

#[test]
fn test_only_supporting_reasoners_and_schema_offered() {
    // gene-[regulates]->chemical_substance is an r1 edge; r2 serves both
    // endpoints but not the hop.
    let pair = pair_of(vec![
        regulates_select(),
        Statement::new(vec![Token::leaf("from")]),
    ]);
    let out = resolve_block(&pair, &graph(), &catalog()).unwrap();
    let displays: Vec<_> = out.iter().map(|s| s.display.as_str()).collect();
    assert_eq!(displays, vec!["https://r1.example/query", SCHEMA_REASONER]);
}

#[test]
fn test_opening_quote_auto_inserted() {
    let pair = pair_of(vec![
        regulates_select(),
        Statement::new(vec![Token::leaf("from")]),
    ]);
    let out = resolve_block(&pair, &graph(), &catalog()).unwrap();
    assert!(!out.is_empty());
    assert!(out.iter().all(|s| s.insert.starts_with('\'')));
    assert!(out.iter().all(|s| s.replace.is_empty()));
}

#[test]
fn test_typed_prefix_inside_quotes_filters_and_replaces() {
    let from = Statement::new(vec![
        Token::leaf("from"),
        Token::Quoted {
            quote: '\'',
            text: "https://r1".to_string(),
        },
    ]);
    let pair = pair_of(vec![regulates_select(), from]);
    let out = resolve_block(&pair, &graph(), &catalog()).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].insert, "https://r1.example/query");
    assert_eq!(out[0].replace, "https://r1");
}

#[test]
fn test_all_hops_must_hold() {
    // First hop is an r1 edge, second an r2 edge; no single reasoner
    // supports both, leaving only the schema meta-reasoner.
    let select = Statement::new(vec![
        Token::leaf("select"),
        Token::leaf("gene"),
        Token::leaf("->"),
        Token::leaf("chemical_substance"),
        Token::leaf("->"),
        Token::leaf("disease"),
    ]);
    let pair = pair_of(vec![select, Statement::new(vec![Token::leaf("from")])]);
    let out = resolve_block(&pair, &graph(), &catalog()).unwrap();
    let displays: Vec<_> = out.iter().map(|s| s.display.as_str()).collect();
    assert_eq!(displays, vec![SCHEMA_REASONER]);
}

#[test]
fn test_single_concept_chain_excludes_the_schema_meta_reasoner() {
    // With no predicate typed yet, validity comes from node reasoner
    // sets alone; the synthetic schema entry is never a node reasoner.
    let select = Statement::new(vec![Token::leaf("select"), Token::leaf("gene")]);
    let pair = pair_of(vec![select, Statement::new(vec![Token::leaf("from")])]);
    let out = resolve_block(&pair, &graph(), &catalog()).unwrap();
    let displays: Vec<_> = out.iter().map(|s| s.display.as_str()).collect();
    assert_eq!(
        displays,
        vec!["https://r1.example/query", "https://r2.example/query"]
    );
}

#[test]
fn test_empty_chain_offers_everything() {
    let pair = pair_of(vec![
        Statement::new(vec![Token::leaf("select")]),
        Statement::new(vec![Token::leaf("from")]),
    ]);
    let out = resolve_block(&pair, &graph(), &catalog()).unwrap();
    assert_eq!(out.len(), 3);
}

#[test]
fn test_backward_hop_checks_reversed_edge() {
    // chemical_substance <-[regulates]- gene matches the same r1 edge.
    let select = Statement::new(vec![
        Token::leaf("select"),
        Token::leaf("chemical_substance"),
        Token::Predicate(Predicate::new(BACKWARD_OPEN, "regulates")),
        Token::leaf("gene"),
    ]);
    let pair = pair_of(vec![select, Statement::new(vec![Token::leaf("from")])]);
    let out = resolve_block(&pair, &graph(), &catalog()).unwrap();
    let displays: Vec<_> = out.iter().map(|s| s.display.as_str()).collect();
    assert_eq!(displays, vec!["https://r1.example/query", SCHEMA_REASONER]);
}
