//! SVG export.
//!
//! [`Svg`] turns a [`LayoutResult`] into an `svg::Document`:
//!
//! ```text
//! <svg viewBox="0 0 W H" class="trace-diagram">
//!   <title/>             document title, when set
//!   <defs/>              shadow filter, arrowhead marker, grid pattern
//!   <rect/>              background
//!   <rect/>              grid, when enabled
//!   <g transform>        layout origin mapped to (0, 0)
//!     <g class="trace-edges"/>
//!     <g class="trace-nodes"/>
//!   </g>
//! </svg>
//! ```
//!
//! Every piece of user text is escaped exactly once with
//! [`traceflow_core::escape`] and inserted verbatim, so the writer never
//! sees unescaped markup.

mod defs;
mod edge;
mod group;
mod node;

pub use defs::DropShadow;
pub use edge::{dash_array, label_pill_size};
pub use group::DataGroup;
pub use node::NodeStyle;

use std::{fs::File, io::Write};

use log::{debug, error, info};
use svg::{
    Document, Node,
    node::{Blob, element as svg_element},
};

use traceflow_core::{escape::escape_text, geometry::Point, theme::ResolvedTheme};

use crate::{export, layout::LayoutResult};

/// SVG exporter bound to a resolved theme.
#[derive(Debug)]
pub struct Svg {
    file_name: Option<String>,
    theme: ResolvedTheme,
    title: Option<String>,
    description: Option<String>,
    shadow: bool,
}

/// Builder for [`Svg`].
#[derive(Debug, Default)]
pub struct SvgBuilder {
    file_name: Option<String>,
    theme: Option<ResolvedTheme>,
    title: Option<String>,
    description: Option<String>,
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// File written by [`Exporter::export_layout`](export::Exporter::export_layout).
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_theme(mut self, theme: ResolvedTheme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Document title, rendered as the root `<title>`.
    pub fn with_title(mut self, title: Option<&str>) -> Self {
        self.title = title.map(str::to_string);
        self
    }

    /// Document description, rendered as the root `<desc>`.
    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.description = description.map(str::to_string);
        self
    }

    /// # Errors
    ///
    /// Returns [`export::Error::Render`] when no theme was supplied.
    pub fn build(self) -> Result<Svg, export::Error> {
        let theme = self
            .theme
            .ok_or_else(|| export::Error::Render("SVG exporter requires a resolved theme".to_string()))?;
        let mut svg = Svg::for_theme(theme);
        svg.file_name = self.file_name;
        svg.title = self.title;
        svg.description = self.description;
        Ok(svg)
    }
}

impl Svg {
    /// In-memory exporter for `theme`, with no title and no output file.
    pub fn for_theme(theme: ResolvedTheme) -> Self {
        let shadow = DropShadow::parse(&theme.shapes.node_shadow).is_some();
        Self {
            file_name: None,
            theme,
            title: None,
            description: None,
            shadow,
        }
    }

    pub fn theme(&self) -> &ResolvedTheme {
        &self.theme
    }

    /// Whether node outlines reference the drop-shadow filter.
    fn has_shadow(&self) -> bool {
        self.shadow
    }

    /// Renders `layout` into a complete document.
    pub fn render_document(&self, layout: &LayoutResult) -> Document {
        let width = layout.width();
        let height = layout.height();
        let offset = Point::default().sub_point(layout.origin());

        let mut doc = Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height)
            .set("class", "trace-diagram");

        if let Some(title) = &self.title {
            doc = doc.add(Self::title(title));
        }
        if let Some(description) = &self.description {
            doc = doc.add(Self::escaped_element("desc", description));
        }

        doc = doc.add(defs::definitions(&self.theme)).add(
            svg_element::Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", self.theme.colors.background),
        );
        if self.theme.background.show_grid {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", format!("url(#{})", defs::GRID_ID)),
            );
        }

        let edges = layout
            .edges()
            .iter()
            .enumerate()
            .fold(svg_element::Group::new().set("class", "trace-edges"), |group, (idx, edge)| {
                group.add(self.render_edge(edge, idx))
            });
        let nodes = layout
            .nodes()
            .iter()
            .enumerate()
            .fold(svg_element::Group::new().set("class", "trace-nodes"), |group, (idx, node)| {
                group.add(self.render_node(node, idx))
            });

        let content = svg_element::Group::new()
            .set(
                "transform",
                format!("translate({}, {})", offset.x(), offset.y()),
            )
            .add(edges)
            .add(nodes);

        debug!(width = width, height = height, nodes = layout.nodes().len(), edges = layout.edges().len(); "SVG document rendered");
        doc.add(content)
    }

    /// Writes an SVG document to the configured file.
    pub fn write_document(&self, doc: Document) -> Result<(), export::Error> {
        let Some(file_name) = self.file_name.as_deref() else {
            return Err(export::Error::Render(
                "SVG exporter has no output file".to_string(),
            ));
        };

        info!(file_name = file_name; "Creating SVG file");
        let mut f = match File::create(file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name = file_name, err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(f, "{doc}") {
            error!(file_name = file_name, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }

    /// `<title>` holding escaped `content`.
    fn title(content: &str) -> svg_element::Element {
        Self::escaped_element("title", content)
    }

    fn escaped_element(name: &str, content: &str) -> svg_element::Element {
        let mut element = svg_element::Element::new(name);
        element.append(Blob::new(escape_text(content)));
        element
    }

    /// `<text>` holding escaped `content`.
    fn text(content: &str) -> svg_element::Text {
        svg_element::Text::new("").add(Blob::new(escape_text(content)))
    }
}

impl export::Exporter for Svg {
    fn export_layout(&mut self, layout: &LayoutResult) -> Result<(), export::Error> {
        let doc = self.render_document(layout);
        self.write_document(doc)
    }
}
