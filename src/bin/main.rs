//! relq CLI - run one completion cycle against file-backed fixtures.
//!
//! Usage:
//!   relq complete --schema graph.json --parse pair.json --text "select ge" --line 0 --ch 9
//!   relq complete --schema graph.json --catalog reasoners.json --parse pair.json --text "..." --line 0 --ch 5
//!
//! The parse fixture is the raw JSON the parser service returns for the
//! query; the schema fixture is a `{nodes, edges}` knowledge graph; the
//! catalog fixture maps reasoner ids to display values.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use relq::complete::candidate::Candidate;
use relq::engine::protocol::{
    EditorHost, StaticParseService, StaticReasonerProvider, StaticSchemaProvider,
};
use relq::error::ParseDiagnostic;
use relq::query::wire::decode_parse_response;
use relq::schema::graph::KnowledgeGraph;
use relq::{CompletionRequest, CompletionSession, Position, ReasonerCatalog, SchemaGraph};

#[derive(Parser)]
#[command(name = "relq")]
#[command(about = "relq - contextual completion for the relq graph query language")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve completion candidates for a query at a cursor position
    Complete {
        /// Path to the knowledge-graph JSON ({nodes, edges})
        #[arg(long)]
        schema: PathBuf,

        /// Path to the reasoner catalog JSON (id -> display value)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Path to the parser response JSON for this query
        #[arg(long)]
        parse: PathBuf,

        /// The full query text
        #[arg(long)]
        text: String,

        /// Cursor line (zero-based)
        #[arg(long, default_value_t = 0)]
        line: u32,

        /// Cursor character (zero-based)
        #[arg(long)]
        ch: u32,
    },
}

/// Editor host that prints to stdout.
struct PrintEditor;

impl EditorHost for PrintEditor {
    fn show_loading(&self) {}

    fn close_hints(&self) {}

    fn show_candidates(&self, candidates: Vec<Candidate>) {
        for c in candidates {
            if c.insert_text.is_empty() {
                println!("{}", c.display_text);
            } else {
                println!(
                    "{}\t{}\t{}:{}..{}:{}",
                    c.display_text,
                    c.insert_text,
                    c.replace_from.line,
                    c.replace_from.ch,
                    c.replace_to.line,
                    c.replace_to.ch
                );
            }
        }
    }

    fn show_error(&self, message: &str, errors: &[ParseDiagnostic]) {
        eprintln!("error: {message}");
        for diag in errors {
            eprintln!("  {}", diag.message);
            if let Some(details) = &diag.details {
                eprintln!("    {details}");
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Complete {
            schema,
            catalog,
            parse,
            text,
            line,
            ch,
        } => run_complete(schema, catalog, parse, text, Position::new(line, ch)).await,
    }
}

async fn run_complete(
    schema: PathBuf,
    catalog: Option<PathBuf>,
    parse: PathBuf,
    text: String,
    cursor: Position,
) -> ExitCode {
    let graph = match load_schema(&schema) {
        Ok(graph) => graph,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    let reasoners = match catalog.map(|path| load_catalog(&path)).transpose() {
        Ok(reasoners) => reasoners.unwrap_or_default(),
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = match load_parse(&parse) {
        Ok(outcome) => outcome,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    let session = CompletionSession::new(
        Arc::new(StaticParseService(outcome)),
        Arc::new(StaticSchemaProvider(Arc::new(graph))),
        Arc::new(StaticReasonerProvider(reasoners)),
    );

    let request = CompletionRequest::at_cursor(text, cursor);
    match session.complete(&request, &PrintEditor).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn load_schema(path: &Path) -> Result<SchemaGraph, String> {
    let raw = fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let kg: KnowledgeGraph =
        serde_json::from_str(&raw).map_err(|e| format!("bad schema {}: {e}", path.display()))?;
    Ok(SchemaGraph::from_knowledge_graph(kg))
}

fn load_catalog(path: &Path) -> Result<ReasonerCatalog, String> {
    let raw = fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| format!("bad catalog {}: {e}", path.display()))?;
    ReasonerCatalog::from_json(&value).map_err(|e| format!("bad catalog {}: {e}", path.display()))
}

fn load_parse(path: &Path) -> Result<relq::ParseOutcome, String> {
    let raw = fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| format!("bad parse fixture {}: {e}", path.display()))?;
    decode_parse_response(&value).map_err(|e| format!("bad parse fixture {}: {e}", path.display()))
}
