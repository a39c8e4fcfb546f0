//! Error types shared by the indexer and querier

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while building, saving or loading an index.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("index capacity must be greater than zero")]
    ZeroCapacity,

    #[error("cannot index an empty word")]
    EmptyWord,

    #[error("document ids start at 1")]
    InvalidDocId,

    #[error("cannot open index file {}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("I/O error on index file {}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("malformed index file at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Reasons a query line is rejected. None of these are fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("empty query")]
    Empty,

    #[error("bad character '{0}' in query")]
    BadCharacter(char),

    #[error("'{0}' cannot be first")]
    LeadingOperator(String),

    #[error("'{0}' cannot be last")]
    TrailingOperator(String),

    #[error("'{0}' and '{1}' cannot be adjacent")]
    AdjacentOperators(String, String),
}

/// Fatal setup failures. Each maps to a distinct process exit code.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("{0}")]
    Usage(String),

    #[error("empty {0} argument")]
    NullArgument(&'static str),

    #[error("directory {} does not exist", .0.display())]
    MissingDirectory(PathBuf),

    #[error("{} is not a crawler directory (no .crawler marker)", .0.display())]
    NotCrawlerDirectory(PathBuf),

    #[error("cannot load index {}", .path.display())]
    UnreadableIndex { path: PathBuf, source: IndexError },
}

impl SetupError {
    pub fn exit_code(&self) -> i32 {
        match self {
            SetupError::Usage(_) => 1,
            SetupError::NullArgument(_) => 2,
            SetupError::MissingDirectory(_) => 3,
            SetupError::NotCrawlerDirectory(_) => 4,
            SetupError::UnreadableIndex { .. } => 5,
        }
    }
}
