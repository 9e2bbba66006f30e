//! Error adapter for converting CLI errors to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Document errors
//! carry their TOML source and point at the offending span; every other
//! error is reported without source code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use traceflow::TraceflowError;

use crate::CliError;

/// Adapter for a malformed TOML document.
pub struct DocumentAdapter<'a> {
    path: &'a str,
    err: &'a toml::de::Error,
    src: &'a str,
}

impl<'a> DocumentAdapter<'a> {
    pub fn new(path: &'a str, err: &'a toml::de::Error, src: &'a str) -> Self {
        Self { path, err, src }
    }
}

impl fmt::Debug for DocumentAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentAdapter")
            .field("path", &self.path)
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for DocumentAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid document {}", self.path)
    }
}

impl std::error::Error for DocumentAdapter<'_> {}

impl MietteDiagnostic for DocumentAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("traceflow::document"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "documents hold `nodes` and `edges` arrays, an optional `direction` (TB, BT, LR, RL) and an optional `theme`",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.err.span()?;
        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some(self.err.message().to_string()),
            span,
        ))))
    }
}

/// Adapter for [`TraceflowError`] variants.
///
/// These errors have no source location: I/O, configuration, theme,
/// layout and export failures.
pub struct ErrorAdapter<'a>(pub &'a TraceflowError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TraceflowError::Io(_) => "traceflow::io",
            TraceflowError::Theme(_) => "traceflow::theme",
            TraceflowError::Layout(_) => "traceflow::layout",
            TraceflowError::Export(_) => "traceflow::export",
            TraceflowError::Document(_) => "traceflow::document",
            TraceflowError::Config(_) => "traceflow::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            TraceflowError::Theme(_) => Some(Box::new(
                "built-in themes are default, blueprint, corporate and vibrant",
            )),
            TraceflowError::Config(_) => Some(Box::new(
                "configuration files have optional [theme] and [layout] sections",
            )),
            _ => None,
        }
    }
}

/// Wrap `err` in the diagnostic that renders it.
pub fn to_reportable(err: &CliError) -> Box<dyn MietteDiagnostic + '_> {
    match err {
        CliError::Document { path, src, err } => Box::new(DocumentAdapter::new(path, err, src)),
        CliError::Traceflow(err) => Box::new(ErrorAdapter(err)),
    }
}
