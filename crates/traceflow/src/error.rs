//! Error types for Traceflow operations.
//!
//! This module provides the main error type [`TraceflowError`] which wraps
//! the error conditions that can occur while resolving, laying out and
//! rendering a flowchart.

use std::io;

use thiserror::Error;

use traceflow_core::theme::ThemeError;

/// The main error type for Traceflow operations.
#[derive(Debug, Error)]
pub enum TraceflowError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Theme error: {0}")]
    Theme(#[from] ThemeError),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),

    #[error("Document error: {0}")]
    Document(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<crate::export::Error> for TraceflowError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
