//! Export functionality for Traceflow diagrams.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! turning a [`LayoutResult`] into an output format. It is the final stage of
//! the pipeline:
//!
//! ```text
//! Document
//!     ↓ resolve theme
//! ResolvedTheme
//!     ↓ layout + route
//! LayoutResult
//!     ↓ export (this module)
//! Output file
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]

/// SVG export backend.
pub mod svg;

use crate::layout::LayoutResult;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Exports a laid-out diagram to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layout cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_layout(&mut self, layout: &LayoutResult) -> Result<(), Error>;
}

/// Errors that can occur during diagram export.
///
/// Converted into [`TraceflowError::Export`](crate::TraceflowError::Export)
/// at the crate boundary.
#[derive(Debug)]
pub enum Error {
    /// A rendering or configuration failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
