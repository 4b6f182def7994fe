//! The completion request orchestrator.
//!
//! One [`CompletionSession`] lives per editor session. Each call to
//! [`CompletionSession::complete`] runs a single cycle: cancel the
//! predecessor, fetch the parse pair, await schema and catalog readiness,
//! resolve, and present. The only suspension points are those three
//! awaits; resolution itself is synchronous.

pub mod protocol;

use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::complete::candidate::{anchor, no_results_placeholder, Position};
use crate::complete::resolve_block;
use crate::error::{CompleteError, CompleteResult};
use crate::query::wire::ParseOutcome;
use protocol::{EditorHost, ParseService, ReasonerProvider, SchemaProvider};

/// One completion trigger: the buffer, its cursor, and the text up to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Buffer text up to the cursor, untrimmed.
    pub text_to_cursor: String,
    /// The entire buffer.
    pub entire_text: String,
    /// Cursor position.
    pub cursor: Position,
}

impl CompletionRequest {
    /// Build a request from the full buffer and a cursor position.
    pub fn at_cursor(entire_text: impl Into<String>, cursor: Position) -> Self {
        let entire_text = entire_text.into();
        Self {
            text_to_cursor: crate::complete::candidate::text_up_to(&entire_text, cursor),
            entire_text,
            cursor,
        }
    }
}

/// Identity of one in-flight cycle.
struct CycleHandle {
    token: CancellationToken,
    id: Uuid,
}

/// Per-editor-session completion engine.
///
/// Owns the cancellation token for the in-flight cycle; a new cycle
/// replaces (never reuses) the token, so results of a superseded cycle
/// can never reach the editor.
pub struct CompletionSession {
    parser: Arc<dyn ParseService>,
    schema: Arc<dyn SchemaProvider>,
    reasoners: Arc<dyn ReasonerProvider>,
    current: Mutex<CycleHandle>,
}

impl CompletionSession {
    /// Create a session over the three external collaborators.
    pub fn new(
        parser: Arc<dyn ParseService>,
        schema: Arc<dyn SchemaProvider>,
        reasoners: Arc<dyn ReasonerProvider>,
    ) -> Self {
        Self {
            parser,
            schema,
            reasoners,
            current: Mutex::new(CycleHandle {
                token: CancellationToken::new(),
                id: Uuid::new_v4(),
            }),
        }
    }

    /// Cancel the previous cycle and register a fresh one.
    fn begin_cycle(&self) -> (CancellationToken, Uuid) {
        let mut current = self.current.lock().expect("cycle lock poisoned");
        current.token.cancel();
        current.token = CancellationToken::new();
        current.id = Uuid::new_v4();
        (current.token.clone(), current.id)
    }

    /// True once a newer cycle has started.
    fn is_stale(&self, token: &CancellationToken, id: Uuid) -> bool {
        if token.is_cancelled() {
            return true;
        }
        let current = self.current.lock().expect("cycle lock poisoned");
        current.id != id
    }

    /// Run one completion cycle.
    ///
    /// Every non-cancelled path terminates by presenting candidates or an
    /// error through `editor`. A superseded cycle returns
    /// [`CompleteError::Cancelled`] without touching the editor again;
    /// callers may discard that error.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
        editor: &dyn EditorHost,
    ) -> CompleteResult<()> {
        let (token, cycle) = self.begin_cycle();

        editor.show_loading();
        let outcome = cancellable(
            &token,
            self.parser
                .parse_incomplete(&request.text_to_cursor, &request.entire_text),
        )
        .await;

        let pair = match outcome {
            Ok(ParseOutcome::Pair(pair)) => pair,
            Ok(ParseOutcome::Rejected { status, errors }) => {
                self.guard(&token, cycle)?;
                editor.show_error(&format!("Failed to parse: {status}"), &errors);
                return Ok(());
            }
            Err(err) => return self.present_failure(editor, &token, cycle, err),
        };

        let graph = match cancellable(&token, self.schema.schema()).await {
            Ok(graph) => graph,
            Err(err) => return self.present_failure(editor, &token, cycle, err),
        };
        let catalog = match cancellable(&token, self.reasoners.reasoners()).await {
            Ok(catalog) => catalog.with_schema_entry(),
            Err(err) => return self.present_failure(editor, &token, cycle, err),
        };

        // Resolution is synchronous; the failure boundary converts any
        // fault into an error candidate instead of propagating.
        let suggestions = match resolve_block(&pair, &graph, &catalog) {
            Ok(suggestions) => suggestions,
            Err(CompleteError::UnrecognizedContext) => Vec::new(),
            Err(err) => return self.present_failure(editor, &token, cycle, err),
        };

        self.guard(&token, cycle)?;
        editor.close_hints();

        let mut candidates = anchor(suggestions, request.cursor, &request.text_to_cursor);
        if candidates.is_empty() {
            candidates.push(no_results_placeholder(request.cursor));
        }
        editor.show_candidates(candidates);
        Ok(())
    }

    /// Bail out silently once superseded.
    fn guard(&self, token: &CancellationToken, cycle: Uuid) -> CompleteResult<()> {
        if self.is_stale(token, cycle) {
            Err(CompleteError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Surface a cycle failure, unless the cycle was superseded.
    fn present_failure(
        &self,
        editor: &dyn EditorHost,
        token: &CancellationToken,
        cycle: Uuid,
        err: CompleteError,
    ) -> CompleteResult<()> {
        if err.is_silent() {
            return Err(err);
        }
        self.guard(token, cycle)?;
        let message = match &err {
            CompleteError::Parse { status, .. } => format!("Failed to parse: {status}"),
            CompleteError::MalformedIdentifier(_) | CompleteError::Decode(_) => {
                "Failed to parse".to_string()
            }
            _ => "Error".to_string(),
        };
        editor.show_error(&message, &err.diagnostics());
        Ok(())
    }
}

/// Race a future against cycle cancellation.
async fn cancellable<T>(
    token: &CancellationToken,
    fut: impl Future<Output = CompleteResult<T>>,
) -> CompleteResult<T> {
    tokio::select! {
        _ = token.cancelled() => Err(CompleteError::Cancelled),
        result = fut => result,
    }
}
