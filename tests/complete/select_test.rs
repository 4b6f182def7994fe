//! Select-statement resolution, end to end through `resolve_block`.

use relq::complete::resolve_block;
use relq::query::statement::{Block, ParsePair, Statement};
use relq::query::token::{Predicate, Token, FORWARD_OPEN};
use relq::schema::catalog::ReasonerCatalog;
use relq::schema::graph::{KnowledgeGraph, SchemaEdge, SchemaNode};
use relq::schema::SchemaGraph;

fn node(id: &str) -> SchemaNode {
    SchemaNode {
        id: id.to_string(),
        reasoner: ["r1"].iter().map(|s| s.to_string()).collect(),
    }
}

fn edge(source: &str, kind: &str, target: &str) -> SchemaEdge {
    SchemaEdge {
        source_id: source.to_string(),
        target_id: target.to_string(),
        kind: kind.to_string(),
        reasoner: ["r1"].iter().map(|s| s.to_string()).collect(),
    }
}

fn graph() -> SchemaGraph {
    SchemaGraph::from_knowledge_graph(KnowledgeGraph {
        nodes: vec![node("gene"), node("chemical_substance")],
        edges: vec![
            edge("gene", "regulates", "chemical_substance"),
            edge("gene", "regulates", "gene"),
            edge("chemical_substance", "interacts_with", "gene"),
        ],
    })
}

fn pair_of(tokens: Vec<Token>) -> ParsePair {
    let block = Block::new(vec![Statement::new(tokens)]);
    ParsePair {
        incomplete: block.clone(),
        complete: block,
    }
}

#[test]
fn test_bare_select_offers_every_concept() {
    // "select " with nothing typed: every node type, replacing nothing.
    let pair = pair_of(vec![Token::leaf("select")]);
    let out = resolve_block(&pair, &graph(), &ReasonerCatalog::new()).unwrap();
    let inserts: Vec<_> = out.iter().map(|s| s.insert.as_str()).collect();
    assert_eq!(inserts, vec!["gene", "chemical_substance"]);
    assert!(out.iter().all(|s| s.replace.is_empty()));
}

#[test]
fn test_trailing_dash_offers_the_four_arrows() {
    // "select gene-"
    let pair = pair_of(vec![
        Token::leaf("select"),
        Token::leaf("gene"),
        Token::leaf("-"),
    ]);
    let out = resolve_block(&pair, &graph(), &ReasonerCatalog::new()).unwrap();
    let inserts: Vec<_> = out.iter().map(|s| s.insert.as_str()).collect();
    assert_eq!(inserts, vec!["->", "<-", "-[", "<-["]);
    assert!(out.iter().all(|s| s.replace == "-"));
}

#[test]
fn test_fully_typed_label_yields_single_exact_candidate() {
    // "select gene-[regulates" with two regulates edges in the graph:
    // one candidate, insert text exactly the type.
    let pair = pair_of(vec![
        Token::leaf("select"),
        Token::leaf("gene"),
        Token::Predicate(Predicate::open_bracket(FORWARD_OPEN, "regulates")),
    ]);
    let out = resolve_block(&pair, &graph(), &ReasonerCatalog::new()).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].insert, "regulates");
    assert_eq!(out[0].replace, "regulates");
}

#[test]
fn test_lookahead_constrains_predicate_candidates() {
    // Incomplete: "select gene-[", complete buffer continues with gene.
    let incomplete = Block::new(vec![Statement::new(vec![
        Token::leaf("select"),
        Token::leaf("gene"),
        Token::Predicate(Predicate::open_bracket(FORWARD_OPEN, "")),
    ])]);
    let complete = Block::new(vec![Statement::new(vec![
        Token::leaf("select"),
        Token::leaf("gene"),
        Token::Predicate(Predicate::open_bracket(FORWARD_OPEN, "")),
        Token::leaf("gene"),
    ])]);
    let pair = ParsePair {
        incomplete,
        complete,
    };
    let out = resolve_block(&pair, &graph(), &ReasonerCatalog::new()).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].display, "regulates (gene)");
}

#[test]
fn test_mid_concept_dedupes_endpoints() {
    // "select gene->g": regulates reaches gene twice at most once.
    let pair = pair_of(vec![
        Token::leaf("select"),
        Token::leaf("gene"),
        Token::leaf("->"),
        Token::leaf("g"),
    ]);
    let out = resolve_block(&pair, &graph(), &ReasonerCatalog::new()).unwrap();
    let inserts: Vec<_> = out.iter().map(|s| s.insert.as_str()).collect();
    assert_eq!(inserts, vec!["gene"]);
    assert_eq!(out[0].replace, "g");
}

#[test]
fn test_linebreak_tokens_are_ignored() {
    let pair = pair_of(vec![
        Token::leaf("select"),
        Token::leaf("\n"),
        Token::leaf("gene"),
        Token::leaf("\n"),
        Token::leaf("-"),
    ]);
    let out = resolve_block(&pair, &graph(), &ReasonerCatalog::new()).unwrap();
    assert_eq!(out.len(), 4);
}

#[test]
fn test_where_statement_is_a_silent_stub() {
    let block = Block::new(vec![
        Statement::new(vec![Token::leaf("select"), Token::leaf("gene")]),
        Statement::new(vec![Token::leaf("where")]),
    ]);
    let pair = ParsePair {
        incomplete: block.clone(),
        complete: block,
    };
    let out = resolve_block(&pair, &graph(), &ReasonerCatalog::new()).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_unknown_statement_kind_is_unrecognized() {
    let pair = pair_of(vec![Token::leaf("explain"), Token::leaf("gene")]);
    assert!(resolve_block(&pair, &graph(), &ReasonerCatalog::new()).is_err());
}
