//! Schema graph and reasoner catalog - the data the resolvers validate
//! completions against.

pub mod catalog;
pub mod graph;

pub use catalog::{ReasonerCatalog, SCHEMA_REASONER};
pub use graph::{
    dedupe_by_kind, EdgeFilter, KindMatch, KnowledgeGraph, NodeMatch, SchemaEdge, SchemaGraph,
    SchemaNode,
};
