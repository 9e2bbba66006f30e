//! Shared `<defs>` content: drop shadow, arrowhead and background grid.

use log::warn;
use svg::{Node, node::element as svg_element};

use traceflow_core::{
    color::Color,
    theme::{GridStyle, ResolvedTheme},
};

pub const SHADOW_ID: &str = "shadow";
pub const ARROWHEAD_ID: &str = "arrowhead";
pub const GRID_ID: &str = "grid";

/// A parsed CSS `box-shadow` value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropShadow {
    dx: f32,
    dy: f32,
    blur: f32,
    color: Color,
}

impl DropShadow {
    /// Parses `offset-x offset-y [blur [spread]] [color]`.
    ///
    /// Returns `None` for `none`, an empty value, or anything unparseable.
    /// Lengths may carry a `px` suffix; the spread radius is ignored.
    pub fn parse(css: &str) -> Option<Self> {
        let css = css.trim();
        if css.is_empty() || css.eq_ignore_ascii_case("none") {
            return None;
        }

        let mut lengths = Vec::new();
        let mut rest = css;
        loop {
            let trimmed = rest.trim_start();
            let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
            match parse_length(&trimmed[..end]) {
                Some(length) => {
                    lengths.push(length);
                    rest = &trimmed[end..];
                }
                None => {
                    rest = trimmed;
                    break;
                }
            }
        }

        let color = match rest.trim() {
            "" => Ok(Color::default()),
            color => Color::new(color),
        };

        match (lengths.as_slice(), color) {
            ([dx, dy, rest @ ..], Ok(color)) if rest.len() <= 2 => Some(Self {
                dx: *dx,
                dy: *dy,
                blur: rest.first().copied().unwrap_or(0.0),
                color,
            }),
            _ => {
                warn!(node_shadow = css; "Ignoring unparseable node shadow");
                None
            }
        }
    }

    pub fn dx(&self) -> f32 {
        self.dx
    }

    pub fn dy(&self) -> f32 {
        self.dy
    }

    /// Gaussian standard deviation equivalent to the CSS blur radius.
    pub fn std_deviation(&self) -> f32 {
        self.blur / 2.0
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

fn parse_length(token: &str) -> Option<f32> {
    token.strip_suffix("px").unwrap_or(token).parse().ok()
}

/// Builds the `<defs>` block for `theme`.
pub fn definitions(theme: &ResolvedTheme) -> svg_element::Definitions {
    let mut defs = svg_element::Definitions::new();

    if let Some(shadow) = DropShadow::parse(&theme.shapes.node_shadow) {
        defs = defs.add(shadow_filter(&shadow));
    }
    defs = defs.add(arrowhead_marker(theme));

    if theme.background.show_grid {
        defs = defs.add(grid_pattern(theme));
    }
    defs
}

fn shadow_filter(shadow: &DropShadow) -> svg_element::Filter {
    let mut drop = svg_element::Element::new("feDropShadow");
    drop.assign("dx", shadow.dx());
    drop.assign("dy", shadow.dy());
    drop.assign("stdDeviation", shadow.std_deviation());
    drop.assign("flood-color", shadow.color().with_alpha(1.0));
    drop.assign("flood-opacity", shadow.color().alpha());

    svg_element::Filter::new()
        .set("id", SHADOW_ID)
        .set("x", "-20%")
        .set("y", "-20%")
        .set("width", "140%")
        .set("height", "140%")
        .add(drop)
}

/// Chevron marker sized by the theme's arrow size.
fn arrowhead_marker(theme: &ResolvedTheme) -> svg_element::Marker {
    let chevron = svg_element::Polyline::new()
        .set("points", "0 0, 4 3, 0 6")
        .set("fill", "none")
        .set("stroke", theme.colors.connector_stroke)
        .set("stroke-width", 1)
        .set("stroke-linecap", "round")
        .set("stroke-linejoin", "round");

    svg_element::Marker::new()
        .set("id", ARROWHEAD_ID)
        .set("viewBox", "0 0 6 6")
        .set("markerUnits", "userSpaceOnUse")
        .set("markerWidth", theme.connectors.arrow_size)
        .set("markerHeight", theme.connectors.arrow_size)
        .set("refX", 5)
        .set("refY", 3)
        .set("orient", "auto")
        .add(chevron)
}

/// One repeating grid tile in the theme's grid style.
fn grid_pattern(theme: &ResolvedTheme) -> svg_element::Pattern {
    let spacing = theme.background.grid_spacing;
    let color = theme.background.grid_color;
    let pattern = svg_element::Pattern::new()
        .set("id", GRID_ID)
        .set("class", format!("trace-grid-{}", theme.background.grid_style.as_str()))
        .set("width", spacing)
        .set("height", spacing)
        .set("patternUnits", "userSpaceOnUse");

    match theme.background.grid_style {
        GridStyle::Dots => pattern.add(
            svg_element::Circle::new()
                .set("cx", spacing / 2.0)
                .set("cy", spacing / 2.0)
                .set("r", 1)
                .set("fill", color),
        ),
        GridStyle::Lines => pattern.add(grid_lines(spacing, color, 0.5)),
        GridStyle::Blueprint => {
            let major = svg_element::Rectangle::new()
                .set("width", spacing)
                .set("height", spacing)
                .set("fill", "none")
                .set("stroke", color)
                .set("stroke-width", 1);
            let minor = svg_element::Path::new()
                .set(
                    "d",
                    format!("M {half} 0 L {half} {spacing} M 0 {half} L {spacing} {half}", half = spacing / 2.0),
                )
                .set("fill", "none")
                .set("stroke", color.with_alpha(color.alpha() * 0.5))
                .set("stroke-width", 0.5);
            pattern.add(major).add(minor)
        }
    }
}

/// Right and bottom tile edges, so adjacent tiles form a continuous grid.
fn grid_lines(spacing: f32, color: Color, width: f32) -> svg_element::Path {
    svg_element::Path::new()
        .set("d", format!("M {spacing} 0 L 0 0 L 0 {spacing}"))
        .set("fill", "none")
        .set("stroke", color)
        .set("stroke-width", width)
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn test_parse_default_shadow() {
        let shadow = DropShadow::parse("0 2px 8px rgba(0, 0, 0, 0.08)").unwrap();
        assert_eq!(shadow.dx(), 0.0);
        assert_eq!(shadow.dy(), 2.0);
        assert_eq!(shadow.std_deviation(), 4.0);
        assert!(approx_eq!(f32, shadow.color().alpha(), 0.08, epsilon = 1e-3));
    }

    #[test]
    fn test_parse_shadow_with_spread_and_hex_color() {
        let shadow = DropShadow::parse("1px 3px 6px 0 #333").unwrap();
        assert_eq!(shadow.dx(), 1.0);
        assert_eq!(shadow.std_deviation(), 3.0);
        assert!(approx_eq!(f32, shadow.color().alpha(), 1.0));
    }

    #[test]
    fn test_parse_shadow_without_color() {
        let shadow = DropShadow::parse("0 1px").unwrap();
        assert_eq!(shadow.dy(), 1.0);
        assert_eq!(shadow.std_deviation(), 0.0);
    }

    #[test]
    fn test_none_and_garbage_disable_shadow() {
        assert_eq!(DropShadow::parse("none"), None);
        assert_eq!(DropShadow::parse(""), None);
        assert_eq!(DropShadow::parse("inset"), None);
        assert_eq!(DropShadow::parse("0 2px 8px not-a-color"), None);
    }
}
