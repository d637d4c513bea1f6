//! Error types for the search engine, the roadmap builder and the problem
//! file readers.
//!
//! Running out of frontier or depth is not an error: those outcomes are
//! reported through [`crate::search::Termination`].

use thiserror::Error;

/// Contract violations surfaced by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A state listed a successor but refused to price the edge to it.
    #[error("no edge from {from} to {to}")]
    MissingEdge { from: String, to: String },
    /// The goal path or its cost was requested without a successful run.
    #[error("no goal path available: the search has not found the goal")]
    NoGoalPath,
}

/// Failures while reading problem and solution text files.
///
/// Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("line {line} expected, but the input ended")]
    MissingLine { line: usize },
    #[error("invalid number on line {line}: {token:?}")]
    InvalidNumber { line: usize, token: String },
    #[error("not enough tokens on line {line}: {expected} required")]
    MissingToken { line: usize, expected: usize },
    #[error("unknown location on line {line}: {name:?}")]
    UnknownLocation { line: usize, name: String },
    #[error("invalid board on line {line}: {reason}")]
    InvalidBoard { line: usize, reason: String },
}

/// Requests a roadmap cannot be built for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoadmapError {
    /// The initial or goal configuration fails `Workspace::is_valid`.
    #[error("{endpoint} configuration {config} is not valid in the workspace")]
    InvalidEndpoint {
        endpoint: &'static str,
        config: String,
    },
}
