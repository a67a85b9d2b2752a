//! Application error types

use std::path::PathBuf;

use netconsole_application::AdapterError;
use thiserror::Error;

/// Errors reported by the command-line tool.
#[derive(Debug, Error)]
pub enum AppError {
    /// A format adapter or use case failed.
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// Reading an input file or writing an output file failed.
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Writing to standard output failed.
    #[error("cannot write output: {0}")]
    Output(#[source] std::io::Error),

    /// The configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The document is larger than `max_document_size`.
    #[error("{} is {size} bytes, more than the {max} bytes allowed", .path.display())]
    TooLarge {
        /// The file involved.
        path: PathBuf,
        /// Size of the file in bytes.
        size: usize,
        /// The configured limit.
        max: usize,
    },

    /// No known format accepts the document.
    #[error("no known format recognizes {}", .0.display())]
    Unrecognized(PathBuf),

    /// `--to` names no known format.
    #[error("unknown format: {0}")]
    UnknownFormat(String),

    /// `--select` names no environment of the source file.
    #[error("no environment named {0:?}")]
    UnknownEnvironment(String),
}

/// Result type alias for the command-line tool.
pub type AppResult<T> = Result<T, AppError>;
