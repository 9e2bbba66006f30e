//! Theme token groups.
//!
//! Token groups are plain data. A [`Theme`] holds one [`ModeColors`] set per
//! color scheme; everything else is shared between modes.

use serde::Deserialize;

use crate::color::Color;

/// Accent colors shared by both modes.
#[derive(Debug, Clone, PartialEq)]
pub struct AccentColors {
    /// End nodes and high-emphasis borders
    pub primary: Color,
    pub muted: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

/// Colors that differ between the light and the dark scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeColors {
    pub background: Color,
    pub node_background: Color,
    pub node_border: Color,
    pub text: Color,
    pub text_muted: Color,
    pub connector_stroke: Color,
    pub grid_color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Typography {
    /// CSS font-family stack
    pub font_family: String,
    pub font_size_label: f32,
    pub font_size_description: f32,
    pub font_weight_label: u16,
    pub font_weight_description: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeTokens {
    pub node_corner_radius: f32,
    pub node_padding: f32,
    /// CSS box-shadow value, or `none`
    pub node_shadow: String,
    pub node_min_width: f32,
    pub node_max_width: f32,
    pub node_border_width: f32,
    /// Border colors cycled by node order when set
    pub node_colors: Option<Vec<Color>>,
}

/// How connectors bend at their waypoints.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveStyle {
    /// Rounded corners
    #[default]
    Bezier,
    /// Sharp corners
    Orthogonal,
    /// Rounded corners
    Organic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorTokens {
    pub stroke_width: f32,
    pub curve_style: CurveStyle,
    pub arrow_size: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutTokens {
    /// Separation between nodes of the same rank
    pub node_spacing_x: f32,
    /// Separation between ranks
    pub node_spacing_y: f32,
    pub group_padding: f32,
    /// Margin around the whole diagram
    pub canvas_padding: f32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridStyle {
    #[default]
    Dots,
    Lines,
    Blueprint,
}

impl GridStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dots => "dots",
            Self::Lines => "lines",
            Self::Blueprint => "blueprint",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundTokens {
    pub show_grid: bool,
    pub grid_style: GridStyle,
    pub grid_spacing: f32,
}

/// A complete named theme.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Registry key
    pub name: String,
    pub display_name: String,
    pub accent: AccentColors,
    pub light: ModeColors,
    pub dark: ModeColors,
    pub typography: Typography,
    pub shapes: ShapeTokens,
    pub connectors: ConnectorTokens,
    pub layout: LayoutTokens,
    pub background: BackgroundTokens,
}

impl Theme {
    /// Returns the color set for the given scheme.
    pub fn colors(&self, scheme: super::ColorScheme) -> &ModeColors {
        match scheme {
            super::ColorScheme::Light => &self.light,
            super::ColorScheme::Dark => &self.dark,
        }
    }
}
