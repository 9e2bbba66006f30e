//! Errors raised by the CLI.

use thiserror::Error;

use traceflow::TraceflowError;

/// Failure of a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input file is not a valid flowchart document.
    ///
    /// Keeps the source text so reports can point at the offending span.
    #[error("Invalid document {path}: {}", .err.message())]
    Document {
        path: String,
        src: String,
        #[source]
        err: toml::de::Error,
    },

    #[error(transparent)]
    Traceflow(#[from] TraceflowError),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Traceflow(TraceflowError::Io(err))
    }
}
