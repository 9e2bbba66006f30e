//! SVG rendering for edges and their labels.

use svg::node::element as svg_element;

use traceflow_core::{
    escape::sanitize_id,
    geometry::{Point, Size},
    graph::EdgeStyle,
    theme::CurveStyle,
};

use super::{Svg, defs::ARROWHEAD_ID, group::DataGroup};
use crate::{
    layout::PositionedEdge,
    path::{CORNER_RADIUS, EdgePath},
};

/// Approximate advance of one label character, relative to the font size.
const CHAR_WIDTH_FACTOR: f32 = 0.6;
/// Horizontal padding inside a label pill, per side.
const LABEL_PADDING_X: f32 = 8.0;
/// Vertical padding inside a label pill, per side.
const LABEL_PADDING_Y: f32 = 4.0;

/// `stroke-dasharray` for an edge style.
pub fn dash_array(style: EdgeStyle) -> Option<&'static str> {
    match style {
        EdgeStyle::Solid => None,
        EdgeStyle::Dashed => Some("8 4"),
        EdgeStyle::Dotted => Some("2 4"),
    }
}

/// Size of the background pill behind a label of `label` at `font_size`.
pub fn label_pill_size(label: &str, font_size: f32) -> Size {
    let chars = label.chars().count() as f32;
    Size::new(
        chars * font_size * CHAR_WIDTH_FACTOR + 2.0 * LABEL_PADDING_X,
        font_size + 2.0 * LABEL_PADDING_Y,
    )
}

impl Svg {
    /// Renders an edge group: optional `<title>`, path and label.
    ///
    /// `index` is the edge's position in the layout and keeps element ids
    /// unique when two edges join the same pair of nodes.
    pub fn render_edge(&self, positioned: &PositionedEdge, index: usize) -> DataGroup {
        let theme = self.theme();
        let edge = positioned.edge();
        let radius = match theme.connectors.curve_style {
            CurveStyle::Orthogonal => 0.0,
            CurveStyle::Bezier | CurveStyle::Organic => CORNER_RADIUS,
        };
        let path = EdgePath::new(positioned.waypoints(), radius);

        let mut group = DataGroup::new()
            .set("class", "trace-edge")
            .set("data-from", edge.from())
            .set("data-to", edge.to());
        if let Some(description) = edge.description() {
            group = group.add(Self::title(description));
        }

        let mut line = svg_element::Path::new()
            .set(
                "id",
                format!(
                    "edge-{}-{}-{index}",
                    sanitize_id(edge.from()),
                    sanitize_id(edge.to())
                ),
            )
            .set("d", path.data())
            .set("fill", "none")
            .set("stroke", theme.colors.connector_stroke)
            .set("stroke-width", theme.connectors.stroke_width)
            .set("marker-end", format!("url(#{ARROWHEAD_ID})"));

        // An animated edge needs a dash pattern for the offset to move.
        let dashes = dash_array(edge.style()).or(edge.animate().then_some("8 4"));
        if let Some(dashes) = dashes {
            line = line.set("stroke-dasharray", dashes);
        }
        if edge.animate() {
            line = line.add(
                svg_element::Animate::new()
                    .set("attributeName", "stroke-dashoffset")
                    .set("from", 24)
                    .set("to", 0)
                    .set("dur", "1s")
                    .set("repeatCount", "indefinite"),
            );
        }
        group = group.add(line);

        if let Some(label) = edge.label() {
            group = group.add(self.render_edge_label(label, path.label_anchor()));
        }
        group
    }

    fn render_edge_label(&self, label: &str, anchor: Point) -> svg_element::Group {
        let theme = self.theme();
        let font_size = theme.typography.font_size_description;
        let pill = label_pill_size(label, font_size);

        let background = svg_element::Rectangle::new()
            .set("x", anchor.x() - pill.width() / 2.0)
            .set("y", anchor.y() - pill.height() / 2.0)
            .set("width", pill.width())
            .set("height", pill.height())
            .set("rx", pill.height() / 2.0)
            .set("fill", theme.colors.background);

        let text = Self::text(label)
            .set("x", anchor.x())
            .set("y", anchor.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("fill", theme.colors.text_muted)
            .set("font-family", theme.typography.font_family.as_str())
            .set("font-size", font_size)
            .set("font-weight", theme.typography.font_weight_description);

        svg_element::Group::new()
            .set("class", "trace-edge-label")
            .add(background)
            .add(text)
    }
}

#[cfg(test)]
mod tests {
    use traceflow_core::{
        graph::Edge,
        theme::{ResolvedTheme, ThemeRegistry, ThemeResolver, ThemeSpec},
    };

    use super::*;

    fn theme(name: &str) -> ResolvedTheme {
        let registry = ThemeRegistry::builtin().unwrap();
        ThemeResolver::new(&registry)
            .resolve(Some(&ThemeSpec::named(name)), None)
            .unwrap()
    }

    fn elbow(edge: Edge) -> PositionedEdge {
        PositionedEdge::new(
            edge,
            vec![
                Point::new(0.0, 0.0),
                Point::new(0.0, 100.0),
                Point::new(100.0, 100.0),
            ],
        )
    }

    #[test]
    fn test_dash_arrays() {
        assert_eq!(dash_array(EdgeStyle::Solid), None);
        assert_eq!(dash_array(EdgeStyle::Dashed), Some("8 4"));
        assert_eq!(dash_array(EdgeStyle::Dotted), Some("2 4"));
    }

    #[test]
    fn test_label_pill_grows_with_label() {
        let short = label_pill_size("no", 12.0);
        let long = label_pill_size("not yet approved", 12.0);
        assert!(long.width() > short.width());
        assert_eq!(short.height(), 20.0);
    }

    #[test]
    fn test_edge_markup() {
        let svg = Svg::for_theme(theme("default"));
        let edge = Edge::new("a b", "c")
            .with_style(EdgeStyle::Dotted)
            .with_label("yes & no")
            .with_description("<i>why</i>");
        let markup = svg.render_edge(&elbow(edge), 3).to_string();

        assert!(markup.contains("class=\"trace-edge\""));
        assert!(markup.contains("data-from=\"a b\""));
        assert!(markup.contains("id=\"edge-a_b-c-3\""));
        assert!(markup.contains("stroke-dasharray=\"2 4\""));
        assert!(markup.contains("marker-end=\"url(#arrowhead)\""));
        assert!(markup.contains("Q 0 100 16 100"));
        assert!(markup.contains("yes &amp; no"));
        assert!(markup.contains("&lt;i&gt;why&lt;/i&gt;"));
        assert!(!markup.contains("<i>"));
    }

    #[test]
    fn test_endpoint_attributes_escaped_exactly_once() {
        let svg = Svg::for_theme(theme("default"));
        let edge = Edge::new("r&d", "say \"hi\"\n").with_label("go");
        let markup = svg.render_edge(&elbow(edge), 0).to_string();

        assert!(markup.contains("data-from=\"r&amp;d\""));
        assert!(markup.contains("data-to=\"say &quot;hi&quot;&#xA;\""));
        assert!(markup.contains("font-family=\"Inter, system-ui, -apple-system, sans-serif\""));
        assert!(!markup.contains("&amp;amp;"));
        assert!(!markup.contains("&amp;quot;"));
    }

    #[test]
    fn test_orthogonal_theme_draws_sharp_corners() {
        let svg = Svg::for_theme(theme("blueprint"));
        let markup = svg.render_edge(&elbow(Edge::new("a", "b")), 0).to_string();
        assert!(markup.contains("M 0 0 L 0 100 L 100 100"));
        assert!(!markup.contains("stroke-dasharray"));
    }

    #[test]
    fn test_animated_edge() {
        let svg = Svg::for_theme(theme("default"));
        let markup = svg
            .render_edge(&elbow(Edge::new("a", "b").with_animate(true)), 0)
            .to_string();
        assert!(markup.contains("<animate"));
        assert!(markup.contains("stroke-dashoffset"));
        assert!(markup.contains("stroke-dasharray=\"8 4\""));
    }
}
