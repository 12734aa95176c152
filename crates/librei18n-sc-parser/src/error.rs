use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScParserError {
    /// Source text that is not valid Rust.
    #[error("Invalid Rust syntax at {line}:{column}: {source}")]
    Parse {
        line: usize,
        column: usize,
        #[source]
        source: syn::Error,
    },

    /// A Rust file that is not valid Rust.
    #[error("Failed to parse Rust file '{path}' at {line}:{column}: {source}")]
    Syn {
        path: PathBuf,
        line: usize,
        column: usize,
        #[source]
        source: syn::Error,
    },

    /// An IO error.
    #[error("IO error accessing path '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),

    /// An error that occurs when walking a directory.
    #[error("Error walking directory '{0}': {1}")]
    WalkDir(PathBuf, #[source] walkdir::Error),
}

/// One-based line and column of a syn error.
pub(crate) fn position(error: &syn::Error) -> (usize, usize) {
    let start = error.span().start();
    (start.line, start.column + 1)
}
