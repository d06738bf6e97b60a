// Error types for qq.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the instrumented program.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("qq logger is already initialized")]
    AlreadyInitialized,
}

/// Failure to append a line to the log.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("cannot open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write log file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to produce a syntax tree for a call site. Never reaches the caller.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("source file not found: {0}")]
    NotFound(String),

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },
}

/// An expression node the pretty-printer has no rendering for.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("cannot render {0}")]
    Unsupported(&'static str),
}
