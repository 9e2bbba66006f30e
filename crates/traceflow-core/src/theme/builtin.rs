//! Themes shipped with Traceflow.
//!
//! - `default` - Clean, minimal teal on light gray
//! - `blueprint` - Technical look, monospace type on navy
//! - `corporate` - Professional blues, no grid
//! - `vibrant` - Purple accents, rounder shapes

use super::{
    ThemeError,
    tokens::{
        AccentColors, BackgroundTokens, ConnectorTokens, CurveStyle, GridStyle, LayoutTokens,
        ModeColors, ShapeTokens, Theme, Typography,
    },
};
use crate::color::Color;

fn color(value: &str) -> Result<Color, ThemeError> {
    Color::new(value).map_err(ThemeError::InvalidColor)
}

#[allow(clippy::too_many_arguments)]
fn mode_colors(
    background: &str,
    node_background: &str,
    node_border: &str,
    text: &str,
    text_muted: &str,
    connector_stroke: &str,
    grid_color: &str,
) -> Result<ModeColors, ThemeError> {
    Ok(ModeColors {
        background: color(background)?,
        node_background: color(node_background)?,
        node_border: color(node_border)?,
        text: color(text)?,
        text_muted: color(text_muted)?,
        connector_stroke: color(connector_stroke)?,
        grid_color: color(grid_color)?,
    })
}

fn accent(
    primary: &str,
    muted: &str,
    success: &str,
    warning: &str,
    error: &str,
) -> Result<AccentColors, ThemeError> {
    Ok(AccentColors {
        primary: color(primary)?,
        muted: color(muted)?,
        success: color(success)?,
        warning: color(warning)?,
        error: color(error)?,
    })
}

/// All built-in themes, `default` first.
pub fn all() -> Result<Vec<Theme>, ThemeError> {
    Ok(vec![default()?, blueprint()?, corporate()?, vibrant()?])
}

/// The `default` theme.
pub fn default() -> Result<Theme, ThemeError> {
    Ok(Theme {
        name: "default".to_string(),
        display_name: "Default".to_string(),
        accent: accent("#3a7d69", "#d4e8e2", "#22C55E", "#F59E0B", "#EF4444")?,
        light: mode_colors(
            "#F8F8F8", "#FFFFFF", "#E0E0E0", "#1A1A1A", "#6B6B6B", "#E0E0E0", "#E0E0E0",
        )?,
        dark: mode_colors(
            "#1A1A1A", "#1E1E1E", "#3A3A3A", "#F5F5F5", "#A0A0A0", "#4A4A4A", "#252525",
        )?,
        typography: Typography {
            font_family: "Inter, system-ui, -apple-system, sans-serif".to_string(),
            font_size_label: 14.0,
            font_size_description: 12.0,
            font_weight_label: 600,
            font_weight_description: 400,
        },
        shapes: ShapeTokens {
            node_corner_radius: 12.0,
            node_padding: 16.0,
            node_shadow: "0 2px 8px rgba(0, 0, 0, 0.08)".to_string(),
            node_min_width: 120.0,
            node_max_width: 280.0,
            node_border_width: 1.0,
            node_colors: None,
        },
        connectors: ConnectorTokens {
            stroke_width: 2.0,
            curve_style: CurveStyle::Bezier,
            arrow_size: 10.0,
        },
        layout: LayoutTokens {
            node_spacing_x: 50.0,
            node_spacing_y: 80.0,
            group_padding: 24.0,
            canvas_padding: 40.0,
        },
        background: BackgroundTokens {
            show_grid: true,
            grid_style: GridStyle::Dots,
            grid_spacing: 20.0,
        },
    })
}

/// The `blueprint` theme.
pub fn blueprint() -> Result<Theme, ThemeError> {
    Ok(Theme {
        name: "blueprint".to_string(),
        display_name: "Blueprint".to_string(),
        accent: accent("#60A5FA", "#1E3A5F", "#34D399", "#FBBF24", "#F87171")?,
        light: mode_colors(
            "#1E3A5F", "#254E78", "#60A5FA", "#FFFFFF", "#94A3B8", "#60A5FA", "#2D5A8A",
        )?,
        dark: mode_colors(
            "#0F172A", "#1E293B", "#3B82F6", "#F8FAFC", "#64748B", "#3B82F6", "#1E3A5F",
        )?,
        typography: Typography {
            font_family: r#""JetBrains Mono", "Fira Code", monospace"#.to_string(),
            font_size_label: 13.0,
            font_size_description: 11.0,
            font_weight_label: 500,
            font_weight_description: 400,
        },
        shapes: ShapeTokens {
            node_corner_radius: 4.0,
            node_padding: 12.0,
            node_shadow: "none".to_string(),
            node_min_width: 140.0,
            node_max_width: 260.0,
            node_border_width: 1.0,
            node_colors: None,
        },
        connectors: ConnectorTokens {
            stroke_width: 1.5,
            curve_style: CurveStyle::Orthogonal,
            arrow_size: 8.0,
        },
        layout: LayoutTokens {
            node_spacing_x: 60.0,
            node_spacing_y: 70.0,
            group_padding: 20.0,
            canvas_padding: 30.0,
        },
        background: BackgroundTokens {
            show_grid: true,
            grid_style: GridStyle::Lines,
            grid_spacing: 24.0,
        },
    })
}

/// The `corporate` theme.
pub fn corporate() -> Result<Theme, ThemeError> {
    Ok(Theme {
        name: "corporate".to_string(),
        display_name: "Corporate".to_string(),
        accent: accent("#2563EB", "#DBEAFE", "#059669", "#D97706", "#DC2626")?,
        light: mode_colors(
            "#F9FAFB", "#FFFFFF", "#D1D5DB", "#111827", "#6B7280", "#9CA3AF", "#E5E7EB",
        )?,
        dark: mode_colors(
            "#111827", "#1F2937", "#374151", "#F9FAFB", "#9CA3AF", "#4B5563", "#1F2937",
        )?,
        typography: Typography {
            font_family:
                r#""SF Pro Display", -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif"#
                    .to_string(),
            font_size_label: 14.0,
            font_size_description: 12.0,
            font_weight_label: 500,
            font_weight_description: 400,
        },
        shapes: ShapeTokens {
            node_corner_radius: 8.0,
            node_padding: 16.0,
            node_shadow: "0 1px 3px rgba(0, 0, 0, 0.1)".to_string(),
            node_min_width: 140.0,
            node_max_width: 300.0,
            node_border_width: 1.0,
            node_colors: None,
        },
        connectors: ConnectorTokens {
            stroke_width: 1.5,
            curve_style: CurveStyle::Bezier,
            arrow_size: 10.0,
        },
        layout: LayoutTokens {
            node_spacing_x: 60.0,
            node_spacing_y: 80.0,
            group_padding: 24.0,
            canvas_padding: 40.0,
        },
        background: BackgroundTokens {
            show_grid: false,
            grid_style: GridStyle::Dots,
            grid_spacing: 20.0,
        },
    })
}

/// The `vibrant` theme.
pub fn vibrant() -> Result<Theme, ThemeError> {
    Ok(Theme {
        name: "vibrant".to_string(),
        display_name: "Vibrant".to_string(),
        accent: accent("#8B5CF6", "#DDD6FE", "#10B981", "#F59E0B", "#EF4444")?,
        light: mode_colors(
            "#FFFBF5", "#FFFFFF", "#E9D5FF", "#1F2937", "#6B7280", "#C4B5FD", "#F3E8FF",
        )?,
        dark: mode_colors(
            "#1E1B2E", "#2D2A3E", "#6D28D9", "#F5F3FF", "#A78BFA", "#7C3AED", "#2D2A3E",
        )?,
        typography: Typography {
            font_family: r#""Plus Jakarta Sans", "DM Sans", system-ui, sans-serif"#.to_string(),
            font_size_label: 14.0,
            font_size_description: 12.0,
            font_weight_label: 600,
            font_weight_description: 400,
        },
        shapes: ShapeTokens {
            node_corner_radius: 16.0,
            node_padding: 18.0,
            node_shadow: "0 4px 14px rgba(139, 92, 246, 0.15)".to_string(),
            node_min_width: 130.0,
            node_max_width: 280.0,
            node_border_width: 1.0,
            node_colors: None,
        },
        connectors: ConnectorTokens {
            stroke_width: 2.5,
            curve_style: CurveStyle::Bezier,
            arrow_size: 12.0,
        },
        layout: LayoutTokens {
            node_spacing_x: 55.0,
            node_spacing_y: 85.0,
            group_padding: 28.0,
            canvas_padding: 45.0,
        },
        background: BackgroundTokens {
            show_grid: true,
            grid_style: GridStyle::Dots,
            grid_spacing: 24.0,
        },
    })
}
