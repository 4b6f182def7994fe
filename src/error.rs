//! Unified error type for the completion engine.
//!
//! Every fault that can surface during a completion cycle is represented
//! here. The orchestrator converts most variants into a user-visible error
//! candidate; only [`CompleteError::Cancelled`] is dropped silently.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for completion operations.
pub type CompleteResult<T> = Result<T, CompleteError>;

/// A single diagnostic reported by the remote parser service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseDiagnostic {
    /// Human-readable message.
    pub message: String,
    /// Optional drill-down detail (e.g. a source excerpt or stack).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ParseDiagnostic {
    /// Create a diagnostic with just a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }
}

/// Errors that can occur while resolving completions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompleteError {
    /// The remote parser rejected the query text.
    #[error("query rejected by parser: {status}")]
    Parse {
        /// Status string reported by the parser.
        status: String,
        /// Parser-reported diagnostics.
        errors: Vec<ParseDiagnostic>,
    },

    /// A concept alias contained more than one `:` separator.
    #[error("invalid concept identifier {0:?}")]
    MalformedIdentifier(String),

    /// The cursor position matched no known grammatical pattern.
    ///
    /// Treated as "no suggestions" rather than a hard failure.
    #[error("cursor position does not match any completion context")]
    UnrecognizedContext,

    /// The cycle was superseded by a newer completion request.
    #[error("completion cycle superseded")]
    Cancelled,

    /// Network or IO fault talking to the parser or a data provider.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The parser response did not have the expected tree shape.
    #[error("malformed parse tree: {0}")]
    Decode(String),
}

impl CompleteError {
    /// Build a transport error from any displayable source.
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    /// True if this error must never be surfaced to the user.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Diagnostics to attach when presenting this error in the hint list.
    pub fn diagnostics(&self) -> Vec<ParseDiagnostic> {
        match self {
            Self::Parse { errors, .. } => errors.clone(),
            other => vec![ParseDiagnostic::message(other.to_string())],
        }
    }
}
