//! SVG rendering for nodes.

use svg::node::element as svg_element;

use traceflow_core::{
    color::Color,
    escape::sanitize_id,
    graph::{Emphasis, NodeType, Status},
    theme::ResolvedTheme,
};

use super::{Svg, defs::SHADOW_ID, group::DataGroup};
use crate::{layout::PositionedNode, shape};

/// Opacity applied to low-emphasis nodes.
const LOW_EMPHASIS_OPACITY: f32 = 0.6;

/// Paint for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    fill: Color,
    stroke: Color,
    stroke_width: f32,
    text: Color,
    opacity: Option<f32>,
}

impl NodeStyle {
    /// Style of the node at position `index` in document order.
    pub fn new(node: &PositionedNode, index: usize, theme: &ResolvedTheme) -> Self {
        let colors = &theme.colors;
        let border_width = theme.shapes.node_border_width;
        let node = node.node();

        let (fill, text) = match node.node_type() {
            NodeType::End => (colors.accent, Color::white()),
            _ => (colors.node_background, colors.text),
        };

        let status_color = match node.status() {
            Status::Default => None,
            Status::Success => Some(colors.success),
            Status::Warning => Some(colors.warning),
            Status::Error => Some(colors.error),
        };
        let palette_color = theme
            .shapes
            .node_colors
            .as_deref()
            .filter(|palette| !palette.is_empty())
            .map(|palette| palette[index % palette.len()]);

        let (stroke, stroke_width) = match node.emphasis() {
            Emphasis::High => (colors.accent, border_width * 2.0),
            _ => (
                status_color.or(palette_color).unwrap_or(colors.node_border),
                border_width,
            ),
        };

        let opacity = (node.emphasis() == Emphasis::Low).then_some(LOW_EMPHASIS_OPACITY);

        Self {
            fill,
            stroke,
            stroke_width,
            text,
            opacity,
        }
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn stroke(&self) -> Color {
        self.stroke
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn text(&self) -> Color {
        self.text
    }

    pub fn opacity(&self) -> Option<f32> {
        self.opacity
    }
}

impl Svg {
    /// Renders a node group: optional `<title>`, outline and label.
    pub fn render_node(&self, positioned: &PositionedNode, index: usize) -> DataGroup {
        let theme = self.theme();
        let node = positioned.node();
        let style = NodeStyle::new(positioned, index, theme);
        let node_shape = shape::shape_for(node.node_type(), theme.shapes.node_corner_radius);

        let mut group = DataGroup::new()
            .set("class", "trace-node")
            .set("data-id", node.id())
            .set("data-type", node.node_type().as_str());
        if let Some(opacity) = style.opacity() {
            group = group.set("opacity", opacity);
        }
        if let Some(description) = node.description() {
            group = group.add(Self::title(description));
        }

        let mut outline = svg_element::Path::new()
            .set("id", format!("node-{}", sanitize_id(node.id())))
            .set("d", node_shape.outline(positioned.center(), positioned.size()))
            .set("fill", style.fill())
            .set("stroke", style.stroke())
            .set("stroke-width", style.stroke_width());
        if self.has_shadow() {
            outline = outline.set("filter", format!("url(#{SHADOW_ID})"));
        }

        let label = Self::text(node.label())
            .set("class", "trace-node-label")
            .set("x", positioned.center().x())
            .set("y", positioned.center().y())
            .set("dy", "0.35em")
            .set("text-anchor", "middle")
            .set("fill", style.text())
            .set("font-family", theme.typography.font_family.as_str())
            .set("font-size", theme.typography.font_size_label)
            .set("font-weight", theme.typography.font_weight_label);

        group.add(outline).add(label)
    }
}

#[cfg(test)]
mod tests {
    use traceflow_core::{
        geometry::{Point, Size},
        graph::Node,
        theme::{ThemeRegistry, ThemeResolver, ThemeSpec},
    };

    use super::*;

    fn theme() -> ResolvedTheme {
        let registry = ThemeRegistry::builtin().unwrap();
        ThemeResolver::new(&registry).resolve(None, None).unwrap()
    }

    fn positioned(node: Node) -> PositionedNode {
        PositionedNode::new(node, Point::new(100.0, 100.0), Size::new(120.0, 60.0))
    }

    #[test]
    fn test_end_node_uses_accent_fill() {
        let theme = theme();
        let style = NodeStyle::new(&positioned(Node::new("done", "Done", NodeType::End)), 0, &theme);
        assert_eq!(style.fill(), theme.colors.accent);
        assert_eq!(style.text(), Color::white());
        assert_eq!(style.stroke(), theme.colors.node_border);
    }

    #[test]
    fn test_high_emphasis_doubles_border() {
        let theme = theme();
        let node = Node::new("a", "A", NodeType::Process)
            .with_emphasis(Emphasis::High)
            .with_status(Status::Error);
        let style = NodeStyle::new(&positioned(node), 0, &theme);
        assert_eq!(style.stroke(), theme.colors.accent);
        assert_eq!(style.stroke_width(), theme.shapes.node_border_width * 2.0);
    }

    #[test]
    fn test_low_emphasis_and_status() {
        let theme = theme();
        let node = Node::new("a", "A", NodeType::Process)
            .with_emphasis(Emphasis::Low)
            .with_status(Status::Warning);
        let style = NodeStyle::new(&positioned(node), 0, &theme);
        assert_eq!(style.opacity(), Some(LOW_EMPHASIS_OPACITY));
        assert_eq!(style.stroke(), theme.colors.warning);
        assert_eq!(style.stroke_width(), theme.shapes.node_border_width);
    }

    #[test]
    fn test_palette_cycles_by_index() {
        let mut theme = theme();
        let palette = vec![Color::new("red").unwrap(), Color::new("blue").unwrap()];
        theme.shapes.node_colors = Some(palette.clone());
        let node = positioned(Node::new("a", "A", NodeType::Process));

        assert_eq!(NodeStyle::new(&node, 0, &theme).stroke(), palette[0]);
        assert_eq!(NodeStyle::new(&node, 1, &theme).stroke(), palette[1]);
        assert_eq!(NodeStyle::new(&node, 2, &theme).stroke(), palette[0]);
    }

    #[test]
    fn test_rendered_node_escapes_user_text() {
        let svg = Svg::for_theme(theme());
        let node = Node::new("a\"><script>", "<b>Label</b>", NodeType::Decision)
            .with_description("x < y");
        let markup = svg.render_node(&positioned(node), 0).to_string();

        assert!(markup.contains("data-id=\"a&quot;&gt;&lt;script&gt;\""));
        assert!(markup.contains("id=\"node-a___script_\""));
        assert!(markup.contains("&lt;b&gt;Label&lt;/b&gt;"));
        assert!(markup.contains("<title>"));
        assert!(markup.contains("x &lt; y"));
        assert!(!markup.contains("<script>"));
        assert!(!markup.contains("<b>"));
        assert!(markup.contains("M 100 70 L 160 100 L 100 130 L 40 100 Z"));
    }

    #[test]
    fn test_node_attributes_escaped_exactly_once() {
        let registry = ThemeRegistry::builtin().unwrap();
        let blueprint = ThemeResolver::new(&registry)
            .resolve(Some(&ThemeSpec::named("blueprint")), None)
            .unwrap();
        let svg = Svg::for_theme(blueprint);

        let markup = svg
            .render_node(&positioned(Node::new("a&b", "A", NodeType::Process)), 0)
            .to_string();
        assert!(markup.contains("data-id=\"a&amp;b\""));
        assert!(markup.contains("font-family=\"&quot;JetBrains Mono&quot;, &quot;Fira Code&quot;, monospace\""));
        assert!(!markup.contains("&amp;amp;"));
        assert!(!markup.contains("&amp;quot;"));

        let markup = svg
            .render_node(&positioned(Node::new("line\r\nnext\tcol", "A", NodeType::Process)), 0)
            .to_string();
        assert!(markup.contains("data-id=\"line&#xD;&#xA;next&#x9;col\""));
        assert!(!markup.contains("&amp;#x"));
    }
}
