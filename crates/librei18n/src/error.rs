use crate::format::Format;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The format hint matches no supported catalog format.
    #[error("unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    /// The content is not valid for the declared format.
    #[error("failed to parse {format} catalog: {message}")]
    Parse {
        format: Format,
        /// Diagnostic from the underlying parser.
        message: String,
    },

    /// The catalog could not be encoded in the requested format.
    #[error("failed to serialize {format} catalog: {message}")]
    Serialize { format: Format, message: String },

    /// Reading or writing a catalog file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum RenderError {
    /// The selected template text does not parse.
    #[error("template '{name}' is invalid at byte {offset}: {reason}")]
    Syntax {
        name: String,
        offset: usize,
        reason: String,
    },

    /// A referenced field is absent or cannot be printed.
    #[error("template '{name}' failed on field '{field}': {reason}")]
    Execution {
        name: String,
        field: String,
        reason: String,
    },
}
