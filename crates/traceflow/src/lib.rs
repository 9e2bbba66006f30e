//! Traceflow - layout and SVG rendering for flowchart documents.
//!
//! A [`Document`] is a list of typed nodes and styled edges with a flow
//! direction and an optional theme specification. Rendering runs in stages:
//!
//! 1. Theme resolution into a flat [`ResolvedTheme`]
//! 2. Node dimensioning and layered placement ([`layout`])
//! 3. Orthogonal edge routing ([`routing`])
//! 4. Rounded path geometry and node outlines ([`path`], [`shape`])
//! 5. Escaped SVG serialization ([`export`])
//!
//! [`DiagramBuilder`] drives the whole pipeline.

pub mod config;
pub mod export;
pub mod layout;
pub mod path;
pub mod routing;
pub mod shape;

mod error;

pub use traceflow_core::{color, escape, geometry, graph, theme};

pub use error::TraceflowError;

use std::path::Path;

use log::{debug, info, trace, warn};

use traceflow_core::{
    graph::Document,
    theme::{ColorSchemeSource, ResolvedTheme, ThemeRegistry, ThemeResolver, ThemeSpec},
};

use config::AppConfig;
use export::{Exporter, svg::SvgBuilder};
use layout::{LayoutCoordinator, LayoutResult, PositionedEdge};
use routing::EdgeRouter;

/// Builder for resolving, laying out and rendering Traceflow documents.
///
/// The builder owns the theme registry used for every resolution, so
/// several builders with different registries can coexist.
///
/// # Examples
///
/// ```rust
/// use traceflow::{
///     DiagramBuilder,
///     config::AppConfig,
///     graph::{Direction, Document, Edge, Node, NodeType},
/// };
///
/// let document = Document::new(
///     Direction::TopBottom,
///     vec![
///         Node::new("start", "Start", NodeType::Start),
///         Node::new("done", "Done", NodeType::End),
///     ],
///     vec![Edge::new("start", "done")],
/// );
///
/// let builder = DiagramBuilder::with_builtin_themes(AppConfig::default())
///     .expect("built-in themes are valid");
/// let svg = builder.render_svg(&document).expect("Failed to render");
/// assert!(svg.contains("trace-node"));
/// ```
pub struct DiagramBuilder {
    config: AppConfig,
    registry: ThemeRegistry,
    color_scheme: Option<Box<dyn ColorSchemeSource + Send + Sync>>,
}

impl DiagramBuilder {
    /// Create a new diagram builder resolving themes against `registry`.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including theme defaults and layout fallbacks
    /// * `registry` - Themes available to documents
    pub fn new(config: AppConfig, registry: ThemeRegistry) -> Self {
        Self {
            config,
            registry,
            color_scheme: None,
        }
    }

    /// Create a builder over the built-in themes.
    ///
    /// # Errors
    ///
    /// Returns `TraceflowError::Theme` if a built-in theme fails to load.
    pub fn with_builtin_themes(config: AppConfig) -> Result<Self, TraceflowError> {
        Ok(Self::new(config, ThemeRegistry::builtin()?))
    }

    /// Consult `source` for the color scheme when neither the configuration
    /// nor the document fixes one.
    pub fn with_color_scheme(mut self, source: Box<dyn ColorSchemeSource + Send + Sync>) -> Self {
        self.color_scheme = Some(source);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    /// Resolve the theme for `document`.
    ///
    /// The document's own theme specification wins; without one the
    /// configured default theme name is used. A configured mode overrides
    /// the theme specification's mode.
    ///
    /// # Errors
    ///
    /// Returns `TraceflowError::Theme` if the registry has no default theme.
    pub fn resolve_theme(&self, document: &Document) -> Result<ResolvedTheme, TraceflowError> {
        let configured = self.config.theme().name().map(ThemeSpec::named);
        let spec = document.theme().or(configured.as_ref());

        let mut resolver = ThemeResolver::new(&self.registry);
        if let Some(source) = &self.color_scheme {
            resolver = resolver.with_color_scheme(source.as_ref());
        }

        let theme = resolver.resolve(spec, self.config.theme().mode())?;
        match spec.and_then(ThemeSpec::name) {
            Some(name) if name != theme.name => {
                warn!(requested = name, resolved = theme.name.as_str(); "Unknown theme, using default");
            }
            _ => {}
        }
        info!(theme = theme.name.as_str(), mode:% = theme.mode; "Theme resolved");
        Ok(theme)
    }

    /// Position every node and route every edge of `document`.
    ///
    /// Edges whose endpoints are missing are skipped.
    ///
    /// # Errors
    ///
    /// Returns `TraceflowError::Layout` if the positioning engine fails.
    pub fn layout(&self, document: &Document, theme: &ResolvedTheme) -> Result<LayoutResult, TraceflowError> {
        let coordinator = LayoutCoordinator::new(self.config.layout().clone());
        let placement = coordinator.place(
            document.nodes(),
            document.edges(),
            document.direction(),
            Some(theme),
        )?;

        let (nodes, connections) = placement.into_parts();
        let router = EdgeRouter::new(&nodes, document.direction());
        let edges: Vec<PositionedEdge> = connections
            .into_iter()
            .filter_map(|connection| {
                let edge = connection.into_edge();
                router
                    .route(&edge)
                    .map(|waypoints| PositionedEdge::new(edge, waypoints))
            })
            .collect();
        debug!(edges = edges.len(); "Edges routed");

        let result = LayoutResult::new(
            nodes.into_values().collect(),
            edges,
            document.direction(),
            theme.layout.canvas_padding,
        );
        info!(width = result.width(), height = result.height(); "Layout calculated");
        trace!(bounds:? = result.bounds(); "Layout bounds");
        Ok(result)
    }

    /// Serialize a laid-out diagram to SVG markup.
    ///
    /// `document` supplies the title and description.
    pub fn render(&self, document: &Document, layout: &LayoutResult, theme: &ResolvedTheme) -> Result<String, TraceflowError> {
        let svg = SvgBuilder::new()
            .with_theme(theme.clone())
            .with_title(document.title())
            .with_description(document.description())
            .build()?;
        Ok(svg.render_document(layout).to_string())
    }

    /// Resolve, lay out and render `document` in one call.
    ///
    /// # Errors
    ///
    /// Returns `TraceflowError` for theme, layout or rendering errors.
    pub fn render_svg(&self, document: &Document) -> Result<String, TraceflowError> {
        let theme = self.resolve_theme(document)?;
        let layout = self.layout(document, &theme)?;
        let svg = self.render(document, &layout, &theme)?;
        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// Render `document` straight into the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `TraceflowError::Export` if the file cannot be written.
    pub fn export_svg(&self, document: &Document, path: &Path) -> Result<(), TraceflowError> {
        let theme = self.resolve_theme(document)?;
        let layout = self.layout(document, &theme)?;

        let mut exporter = SvgBuilder::new()
            .with_theme(theme)
            .with_title(document.title())
            .with_description(document.description())
            .with_file_name(path.to_string_lossy())
            .build()?;
        exporter.export_layout(&layout)?;
        Ok(())
    }
}
