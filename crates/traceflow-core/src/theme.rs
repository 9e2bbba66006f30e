//! Themes: token sets, the registry of named themes and their resolution.
//!
//! A [`Theme`] carries light and dark color sets next to the mode-invariant
//! tokens. Resolution picks one mode, applies any [`ThemeOverrides`] and
//! flattens the result into a [`ResolvedTheme`] that rendering consumes.
//!
//! ```text
//! ThemeSpec ──► ThemeRegistry lookup ──► overrides merge ──► mode selection ──► ResolvedTheme
//! ```
//!
//! # Organization
//!
//! - [`tokens`] - Token groups and the [`Theme`] definition
//! - [`builtin`] - The themes shipped with Traceflow
//! - [`overrides`] - Typed partial token groups and their merge
//! - [`registry`] - [`ThemeRegistry`], the explicit theme context
//! - [`resolver`] - [`ThemeSpec`], [`ThemeResolver`] and [`ResolvedTheme`]
//! - [`scheme`] - The ambient color-scheme observer

pub mod builtin;
pub mod overrides;
pub mod registry;
pub mod resolver;
pub mod scheme;
pub mod tokens;

use std::fmt::{self, Display};

use serde::Deserialize;
use thiserror::Error;

pub use overrides::ThemeOverrides;
pub use registry::ThemeRegistry;
pub use resolver::{
    ResolvedBackground, ResolvedColors, ResolvedTheme, ThemeConfig, ThemeResolver, ThemeSpec,
};
pub use scheme::{
    ColorSchemeBroadcaster, ColorSchemeSource, FixedColorScheme, SchemeCallback, Subscription,
};
pub use tokens::{CurveStyle, GridStyle, Theme};

/// Name of the theme used when a document names none.
pub const DEFAULT_THEME_NAME: &str = "default";

/// A concrete color scheme.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ColorScheme {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err("Unsupported color scheme"),
        }
    }
}

/// The mode requested by a theme specification.
///
/// `System` defers to the ambient color-scheme source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    System,
}

impl ThemeMode {
    /// Returns the concrete scheme, or `None` for `System`.
    pub fn scheme(self) -> Option<ColorScheme> {
        match self {
            Self::Light => Some(ColorScheme::Light),
            Self::Dark => Some(ColorScheme::Dark),
            Self::System => None,
        }
    }
}

/// Errors raised while setting up or resolving themes.
#[derive(Debug, Error, PartialEq)]
pub enum ThemeError {
    /// Resolution was attempted against a registry without a default theme.
    #[error("theme registry not initialized: no default theme `{0}` is registered")]
    RegistryNotInitialized(String),

    #[error("unknown theme `{0}`")]
    UnknownTheme(String),

    #[error("invalid theme color: {0}")]
    InvalidColor(String),
}
