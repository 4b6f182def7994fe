//! In-memory schema graph index.
//!
//! Concept types are nodes, predicates are directed edges tagged with the
//! reasoners that can answer them. Built once from a knowledge-graph
//! snapshot and read-only afterwards; resolvers never mutate it, so a
//! completion cycle can hold an `Arc` to it without locking.

use std::collections::{BTreeSet, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::schema::catalog::SCHEMA_REASONER;

/// A concept type in the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Concept type name, e.g. `gene`.
    pub id: String,
    /// Reasoners that serve this concept.
    #[serde(default)]
    pub reasoner: BTreeSet<String>,
}

/// A directed predicate edge: `source_id --kind--> target_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaEdge {
    /// Source concept type.
    pub source_id: String,
    /// Target concept type.
    pub target_id: String,
    /// Predicate type name.
    #[serde(rename = "type")]
    pub kind: String,
    /// Reasoners that support this edge.
    #[serde(default)]
    pub reasoner: BTreeSet<String>,
}

/// Raw knowledge-graph snapshot as delivered by the schema provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    /// All concept nodes.
    pub nodes: Vec<SchemaNode>,
    /// All predicate edges.
    pub edges: Vec<SchemaEdge>,
}

/// Constraint on one endpoint of an edge query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NodeMatch<'a> {
    /// Endpoint unconstrained.
    #[default]
    Any,
    /// Endpoint id must equal this concept type.
    Is(&'a str),
    /// Endpoint id must start with this prefix.
    StartsWith(&'a str),
}

impl NodeMatch<'_> {
    fn accepts(&self, id: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Is(wanted) => id == *wanted,
            Self::StartsWith(prefix) => id.starts_with(prefix),
        }
    }
}

/// Constraint on the predicate kind of an edge query.
///
/// Prefix and exact constraints are mutually exclusive by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KindMatch<'a> {
    /// Any predicate kind.
    #[default]
    Any,
    /// Kind must equal this name.
    Is(&'a str),
    /// Kind must start with this prefix.
    StartsWith(&'a str),
}

impl KindMatch<'_> {
    fn accepts(&self, kind: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Is(wanted) => kind == *wanted,
            Self::StartsWith(prefix) => kind.starts_with(prefix),
        }
    }
}

/// AND-combined edge query filters.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeFilter<'a> {
    /// Source endpoint constraint.
    pub source: NodeMatch<'a>,
    /// Target endpoint constraint.
    pub target: NodeMatch<'a>,
    /// Predicate kind constraint.
    pub kind: KindMatch<'a>,
    /// Require this reasoner on the edge. The schema meta-reasoner
    /// matches every edge unconditionally.
    pub reasoner: Option<&'a str>,
}

impl EdgeFilter<'_> {
    fn accepts(&self, edge: &SchemaEdge) -> bool {
        self.source.accepts(&edge.source_id)
            && self.target.accepts(&edge.target_id)
            && self.kind.accepts(&edge.kind)
            && match self.reasoner {
                None => true,
                Some(SCHEMA_REASONER) => true,
                Some(reasoner) => edge.reasoner.contains(reasoner),
            }
    }
}

/// The queryable schema graph.
#[derive(Debug, Clone, Default)]
pub struct SchemaGraph {
    graph: DiGraph<SchemaNode, SchemaEdge>,
    node_index: HashMap<String, NodeIndex>,
}

impl SchemaGraph {
    /// Build the index from a knowledge-graph snapshot.
    ///
    /// Duplicate node ids are merged by unioning their reasoner sets;
    /// edges referencing unknown concepts get their endpoints added with
    /// empty reasoner sets so the edge is still queryable.
    pub fn from_knowledge_graph(kg: KnowledgeGraph) -> Self {
        let mut index = Self::default();
        for node in kg.nodes {
            index.add_node(node);
        }
        for edge in kg.edges {
            index.add_edge(edge);
        }
        index
    }

    fn add_node(&mut self, node: SchemaNode) -> NodeIndex {
        match self.node_index.get(&node.id) {
            Some(&idx) => {
                self.graph[idx].reasoner.extend(node.reasoner);
                idx
            }
            None => {
                let id = node.id.clone();
                let idx = self.graph.add_node(node);
                self.node_index.insert(id, idx);
                idx
            }
        }
    }

    fn add_edge(&mut self, edge: SchemaEdge) {
        let source = self.ensure_node(&edge.source_id);
        let target = self.ensure_node(&edge.target_id);
        self.graph.add_edge(source, target, edge);
    }

    fn ensure_node(&mut self, id: &str) -> NodeIndex {
        self.add_node(SchemaNode {
            id: id.to_string(),
            reasoner: BTreeSet::new(),
        })
    }

    /// Number of distinct concept types.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of predicate edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All concept type names starting with `prefix`, in insertion order.
    pub fn nodes_with_prefix(&self, prefix: &str) -> Vec<&str> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].id.as_str())
            .filter(|id| id.starts_with(prefix))
            .collect()
    }

    /// Union of reasoner sets over concepts matching `prefix`.
    pub fn reasoners_serving_prefix(&self, prefix: &str) -> BTreeSet<&str> {
        self.graph
            .node_indices()
            .map(|idx| &self.graph[idx])
            .filter(|node| node.id.starts_with(prefix))
            .flat_map(|node| node.reasoner.iter().map(String::as_str))
            .collect()
    }

    /// All edges accepted by `filter`, in insertion order.
    pub fn edges_matching(&self, filter: &EdgeFilter<'_>) -> Vec<&SchemaEdge> {
        self.graph
            .edge_references()
            .map(|e| e.weight())
            .filter(|edge| filter.accepts(edge))
            .collect()
    }

    /// True if at least one edge is accepted by `filter`.
    pub fn any_edge_matching(&self, filter: &EdgeFilter<'_>) -> bool {
        self.graph
            .edge_references()
            .any(|e| filter.accepts(e.weight()))
    }
}

/// Keep the first-seen edge per distinct predicate kind, stable order.
///
/// Idempotent: applying it to an already-deduplicated list is a no-op.
pub fn dedupe_by_kind<'a>(edges: Vec<&'a SchemaEdge>) -> Vec<&'a SchemaEdge> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    edges
        .into_iter()
        .filter(|edge| seen.insert(edge.kind.as_str()))
        .collect()
}
