//! Configuration types for Traceflow rendering.
//!
//! This module provides configuration structures that control which theme
//! is used and how diagrams are laid out when no theme supplies spacing.
//! All types implement [`serde::Deserialize`] for loading from TOML.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining theme and layout settings.
//! - [`ThemeConfig`] - Default theme name and color-scheme override.
//! - [`LayoutConfig`] - Fallback spacing and node sizes.
//!
//! # Example
//!
//! ```
//! # use traceflow::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.theme().name(), None);
//! assert_eq!(config.layout().node_width(), 180.0);
//! ```

use serde::Deserialize;

use traceflow_core::theme::ColorScheme;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Theme configuration section.
    #[serde(default)]
    theme: ThemeConfig,

    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    pub fn new(theme: ThemeConfig, layout: LayoutConfig) -> Self {
        Self { theme, layout }
    }

    /// Returns the theme configuration.
    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Theme selection defaults.
///
/// A document's own theme specification wins over `name`; `mode` wins over
/// the document's mode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThemeConfig {
    /// Theme used for documents that name none.
    #[serde(default)]
    name: Option<String>,

    /// Forces a color scheme for every render.
    #[serde(default)]
    mode: Option<ColorScheme>,
}

impl ThemeConfig {
    pub fn new(name: Option<String>, mode: Option<ColorScheme>) -> Self {
        Self { name, mode }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn mode(&self) -> Option<ColorScheme> {
        self.mode
    }
}

/// Spacing and sizing used when laying out without a resolved theme.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    node_width: f32,
    node_height: f32,
    decision_height: f32,
    node_spacing: f32,
    rank_spacing: f32,
    margin: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 180.0,
            node_height: 60.0,
            decision_height: 80.0,
            node_spacing: 50.0,
            rank_spacing: 80.0,
            margin: 40.0,
        }
    }
}

impl LayoutConfig {
    /// Node width used when no theme is supplied.
    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    /// Height of every node type except decisions.
    pub fn node_height(&self) -> f32 {
        self.node_height
    }

    /// Height of decision nodes.
    pub fn decision_height(&self) -> f32 {
        self.decision_height
    }

    /// Separation between nodes of the same rank.
    pub fn node_spacing(&self) -> f32 {
        self.node_spacing
    }

    /// Separation between ranks.
    pub fn rank_spacing(&self) -> f32 {
        self.rank_spacing
    }

    /// Margin around the whole diagram.
    pub fn margin(&self) -> f32 {
        self.margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_layout_section_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [theme]
            name = "corporate"
            mode = "dark"

            [layout]
            node_spacing = 70.0
            "#,
        )
        .unwrap();

        assert_eq!(config.theme().name(), Some("corporate"));
        assert_eq!(config.theme().mode(), Some(ColorScheme::Dark));
        assert_eq!(config.layout().node_spacing(), 70.0);
        assert_eq!(config.layout().rank_spacing(), 80.0);
        assert_eq!(config.layout().node_width(), 180.0);
    }

    #[test]
    fn test_empty_config() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.theme().mode(), None);
        assert_eq!(config.layout().decision_height(), 80.0);
        assert_eq!(config.layout().margin(), 40.0);
    }
}
