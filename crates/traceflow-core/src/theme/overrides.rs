//! Typed partial token groups.
//!
//! Every override group mirrors one token group with each field optional.
//! Applying a group replaces the specified fields wholesale (lists included)
//! and keeps the base value for every other field. Merging always builds a
//! new value; the base theme is never touched.
//!
//! Field names follow the theme document format (`fontSizeLabel`,
//! `nodeCornerRadius`, ...).

use serde::Deserialize;

use super::tokens::{
    AccentColors, BackgroundTokens, ConnectorTokens, CurveStyle, GridStyle, LayoutTokens,
    ModeColors, ShapeTokens, Theme, Typography,
};
use crate::color::Color;

/// Partial overrides for every token group of a theme.
///
/// `colors` applies only to the color scheme that is finally selected, so it
/// is kept apart from [`ThemeOverrides::apply`] and merged during flattening.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemeOverrides {
    pub colors: Option<ColorsOverride>,
    pub accent: Option<AccentOverride>,
    pub typography: Option<TypographyOverride>,
    pub shapes: Option<ShapesOverride>,
    pub connectors: Option<ConnectorsOverride>,
    pub layout: Option<LayoutOverride>,
    pub background: Option<BackgroundOverride>,
}

impl ThemeOverrides {
    /// Returns a copy of `base` with all mode-invariant groups merged.
    ///
    /// The light and dark color sets are copied unchanged.
    pub fn apply(&self, base: &Theme) -> Theme {
        let Self {
            colors: _,
            accent,
            typography,
            shapes,
            connectors,
            layout,
            background,
        } = self;

        Theme {
            name: base.name.clone(),
            display_name: base.display_name.clone(),
            accent: merge_group(&base.accent, accent.as_ref(), AccentOverride::apply),
            light: base.light.clone(),
            dark: base.dark.clone(),
            typography: merge_group(&base.typography, typography.as_ref(), TypographyOverride::apply),
            shapes: merge_group(&base.shapes, shapes.as_ref(), ShapesOverride::apply),
            connectors: merge_group(&base.connectors, connectors.as_ref(), ConnectorsOverride::apply),
            layout: merge_group(&base.layout, layout.as_ref(), LayoutOverride::apply),
            background: merge_group(&base.background, background.as_ref(), BackgroundOverride::apply),
        }
    }

    /// Merges the `colors` group into the selected mode's color set.
    pub fn apply_colors(&self, base: &ModeColors) -> ModeColors {
        merge_group(base, self.colors.as_ref(), ColorsOverride::apply)
    }
}

fn merge_group<T: Clone, O>(base: &T, overrides: Option<&O>, apply: impl Fn(&O, &T) -> T) -> T {
    match overrides {
        Some(overrides) => apply(overrides, base),
        None => base.clone(),
    }
}

fn pick<T: Clone>(value: &Option<T>, base: &T) -> T {
    value.as_ref().unwrap_or(base).clone()
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ColorsOverride {
    pub background: Option<Color>,
    pub node_background: Option<Color>,
    pub node_border: Option<Color>,
    pub text: Option<Color>,
    pub text_muted: Option<Color>,
    pub connector_stroke: Option<Color>,
    pub grid_color: Option<Color>,
}

impl ColorsOverride {
    pub fn apply(&self, base: &ModeColors) -> ModeColors {
        let Self {
            background,
            node_background,
            node_border,
            text,
            text_muted,
            connector_stroke,
            grid_color,
        } = self;
        ModeColors {
            background: pick(background, &base.background),
            node_background: pick(node_background, &base.node_background),
            node_border: pick(node_border, &base.node_border),
            text: pick(text, &base.text),
            text_muted: pick(text_muted, &base.text_muted),
            connector_stroke: pick(connector_stroke, &base.connector_stroke),
            grid_color: pick(grid_color, &base.grid_color),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AccentOverride {
    pub primary: Option<Color>,
    pub muted: Option<Color>,
    pub success: Option<Color>,
    pub warning: Option<Color>,
    pub error: Option<Color>,
}

impl AccentOverride {
    pub fn apply(&self, base: &AccentColors) -> AccentColors {
        let Self {
            primary,
            muted,
            success,
            warning,
            error,
        } = self;
        AccentColors {
            primary: pick(primary, &base.primary),
            muted: pick(muted, &base.muted),
            success: pick(success, &base.success),
            warning: pick(warning, &base.warning),
            error: pick(error, &base.error),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TypographyOverride {
    pub font_family: Option<String>,
    pub font_size_label: Option<f32>,
    pub font_size_description: Option<f32>,
    pub font_weight_label: Option<u16>,
    pub font_weight_description: Option<u16>,
}

impl TypographyOverride {
    pub fn apply(&self, base: &Typography) -> Typography {
        let Self {
            font_family,
            font_size_label,
            font_size_description,
            font_weight_label,
            font_weight_description,
        } = self;
        Typography {
            font_family: pick(font_family, &base.font_family),
            font_size_label: pick(font_size_label, &base.font_size_label),
            font_size_description: pick(font_size_description, &base.font_size_description),
            font_weight_label: pick(font_weight_label, &base.font_weight_label),
            font_weight_description: pick(font_weight_description, &base.font_weight_description),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ShapesOverride {
    pub node_corner_radius: Option<f32>,
    pub node_padding: Option<f32>,
    pub node_shadow: Option<String>,
    pub node_min_width: Option<f32>,
    pub node_max_width: Option<f32>,
    pub node_border_width: Option<f32>,
    pub node_colors: Option<Vec<Color>>,
}

impl ShapesOverride {
    pub fn apply(&self, base: &ShapeTokens) -> ShapeTokens {
        let Self {
            node_corner_radius,
            node_padding,
            node_shadow,
            node_min_width,
            node_max_width,
            node_border_width,
            node_colors,
        } = self;
        ShapeTokens {
            node_corner_radius: pick(node_corner_radius, &base.node_corner_radius),
            node_padding: pick(node_padding, &base.node_padding),
            node_shadow: pick(node_shadow, &base.node_shadow),
            node_min_width: pick(node_min_width, &base.node_min_width),
            node_max_width: pick(node_max_width, &base.node_max_width),
            node_border_width: pick(node_border_width, &base.node_border_width),
            node_colors: match node_colors {
                Some(colors) => Some(colors.clone()),
                None => base.node_colors.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConnectorsOverride {
    pub stroke_width: Option<f32>,
    pub curve_style: Option<CurveStyle>,
    pub arrow_size: Option<f32>,
}

impl ConnectorsOverride {
    pub fn apply(&self, base: &ConnectorTokens) -> ConnectorTokens {
        let Self {
            stroke_width,
            curve_style,
            arrow_size,
        } = self;
        ConnectorTokens {
            stroke_width: pick(stroke_width, &base.stroke_width),
            curve_style: pick(curve_style, &base.curve_style),
            arrow_size: pick(arrow_size, &base.arrow_size),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LayoutOverride {
    pub node_spacing_x: Option<f32>,
    pub node_spacing_y: Option<f32>,
    pub group_padding: Option<f32>,
    pub canvas_padding: Option<f32>,
}

impl LayoutOverride {
    pub fn apply(&self, base: &LayoutTokens) -> LayoutTokens {
        let Self {
            node_spacing_x,
            node_spacing_y,
            group_padding,
            canvas_padding,
        } = self;
        LayoutTokens {
            node_spacing_x: pick(node_spacing_x, &base.node_spacing_x),
            node_spacing_y: pick(node_spacing_y, &base.node_spacing_y),
            group_padding: pick(group_padding, &base.group_padding),
            canvas_padding: pick(canvas_padding, &base.canvas_padding),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BackgroundOverride {
    pub show_grid: Option<bool>,
    pub grid_style: Option<GridStyle>,
    pub grid_spacing: Option<f32>,
}

impl BackgroundOverride {
    pub fn apply(&self, base: &BackgroundTokens) -> BackgroundTokens {
        let Self {
            show_grid,
            grid_style,
            grid_spacing,
        } = self;
        BackgroundTokens {
            show_grid: pick(show_grid, &base.show_grid),
            grid_style: pick(grid_style, &base.grid_style),
            grid_spacing: pick(grid_spacing, &base.grid_spacing),
        }
    }
}
