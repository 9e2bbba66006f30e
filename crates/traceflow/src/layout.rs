//! Layout coordination.
//!
//! The [`LayoutCoordinator`] owns the node dimensioning policy and adapts a
//! document's nodes and edges to the [`engines::LayeredEngine`] that assigns
//! positions:
//!
//! - Width is the theme's minimum node width (or the configured fallback).
//! - Height is the decision height for decision nodes, the standard node
//!   height otherwise.
//! - Spacing comes from the theme's layout tokens (or the configured
//!   fallbacks).

pub mod engines;
mod positioned;

pub use positioned::{LayoutResult, PositionedEdge, PositionedNode};

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, warn};

use traceflow_core::{
    geometry::{Point, Size},
    graph::{Direction, Edge, Node, NodeType},
    theme::ResolvedTheme,
};

use crate::{
    config::LayoutConfig,
    error::TraceflowError,
    layout::engines::{LayeredEngine, LayeredGraph, Spacing, SugiyamaEngine},
};

/// An edge whose endpoints were both found, with the engine's raw points.
#[derive(Debug, Clone)]
pub struct Connection {
    edge: Edge,
    points: Vec<Point>,
}

impl Connection {
    pub fn edge(&self) -> &Edge {
        &self.edge
    }

    /// Raw points reported by the engine (source and target centers).
    ///
    /// Informational only. The drawn waypoints come from
    /// [`crate::routing::EdgeRouter`].
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_edge(self) -> Edge {
        self.edge
    }
}

/// Output of the coordinator: positioned nodes keyed by id in document
/// order, plus the connections to route.
#[derive(Debug, Clone, Default)]
pub struct Placement {
    nodes: IndexMap<String, PositionedNode>,
    connections: Vec<Connection>,
}

impl Placement {
    pub fn nodes(&self) -> &IndexMap<String, PositionedNode> {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn into_parts(self) -> (IndexMap<String, PositionedNode>, Vec<Connection>) {
        (self.nodes, self.connections)
    }
}

/// Sizes nodes and delegates positioning to a layered engine.
pub struct LayoutCoordinator {
    engine: Box<dyn LayeredEngine>,
    fallback: LayoutConfig,
}

impl Default for LayoutCoordinator {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl LayoutCoordinator {
    /// Create a coordinator backed by the Sugiyama engine.
    pub fn new(fallback: LayoutConfig) -> Self {
        Self {
            engine: Box::new(SugiyamaEngine::new()),
            fallback,
        }
    }

    /// Replace the positioning engine.
    pub fn with_engine(mut self, engine: Box<dyn LayeredEngine>) -> Self {
        self.engine = engine;
        self
    }

    /// Box size for a node of the given type.
    pub fn node_size(&self, node_type: NodeType, theme: Option<&ResolvedTheme>) -> Size {
        let width = theme
            .map(|theme| theme.shapes.node_min_width)
            .filter(|width| *width > 0.0)
            .unwrap_or(self.fallback.node_width());
        let height = match node_type {
            NodeType::Decision => self.fallback.decision_height(),
            _ => self.fallback.node_height(),
        };
        Size::new(width, height)
    }

    /// Node separation, rank separation and margins.
    pub fn spacing(&self, theme: Option<&ResolvedTheme>) -> Spacing {
        match theme {
            Some(theme) => Spacing::new(
                theme.layout.node_spacing_x,
                theme.layout.node_spacing_y,
                theme.layout.canvas_padding,
            ),
            None => Spacing::new(
                self.fallback.node_spacing(),
                self.fallback.rank_spacing(),
                self.fallback.margin(),
            ),
        }
    }

    /// Positions every node.
    ///
    /// Edges referencing unknown node ids are skipped with a warning.
    ///
    /// # Errors
    /// Returns `TraceflowError::Layout` if the engine fails or returns a
    /// result that does not match the input.
    pub fn place(
        &self,
        nodes: &[Node],
        edges: &[Edge],
        direction: Direction,
        theme: Option<&ResolvedTheme>,
    ) -> Result<Placement, TraceflowError> {
        let indices: HashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id(), idx))
            .collect();

        let mut kept_edges = Vec::with_capacity(edges.len());
        let mut index_pairs = Vec::with_capacity(edges.len());
        for edge in edges {
            match (indices.get(edge.from()), indices.get(edge.to())) {
                (Some(&source), Some(&target)) => {
                    kept_edges.push(edge);
                    index_pairs.push((source, target));
                }
                _ => {
                    warn!(from = edge.from(), to = edge.to(); "Skipping edge with unknown endpoint");
                }
            }
        }

        let sizes: Vec<Size> = nodes
            .iter()
            .map(|node| self.node_size(node.node_type(), theme))
            .collect();
        let graph = LayeredGraph::new(sizes, index_pairs, direction, self.spacing(theme));

        debug!(nodes = nodes.len(), edges = kept_edges.len(), direction:% = direction; "Positioning nodes");
        let output = self.engine.layout(&graph)?;

        if output.centers().len() != nodes.len() || output.sizes().len() != nodes.len() {
            return Err(TraceflowError::Layout(format!(
                "Engine positioned {} of {} nodes",
                output.centers().len(),
                nodes.len()
            )));
        }

        let positioned: IndexMap<String, PositionedNode> = nodes
            .iter()
            .zip(output.centers().iter().zip(output.sizes()))
            .map(|(node, (&center, &size))| {
                (
                    node.id().to_string(),
                    PositionedNode::new(node.clone(), center, size),
                )
            })
            .collect();

        let connections = kept_edges
            .into_iter()
            .enumerate()
            .map(|(idx, edge)| Connection {
                edge: edge.clone(),
                points: output.edge_points().get(idx).cloned().unwrap_or_default(),
            })
            .collect();

        Ok(Placement {
            nodes: positioned,
            connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use traceflow_core::{
        geometry::Point,
        graph::EdgeStyle,
        theme::{ThemeRegistry, ThemeResolver},
    };

    use super::*;
    use crate::layout::engines::LayeredOutput;

    /// Places nodes on a diagonal, one rank per node.
    struct DiagonalEngine;

    impl LayeredEngine for DiagonalEngine {
        fn layout(&self, graph: &LayeredGraph) -> Result<LayeredOutput, TraceflowError> {
            let centers: Vec<Point> = (0..graph.sizes().len())
                .map(|i| Point::new(100.0 * i as f32, 100.0 * i as f32))
                .collect();
            let edge_points = graph
                .edges()
                .iter()
                .map(|&(s, t)| vec![centers[s], centers[t]])
                .collect();
            Ok(LayeredOutput::new(centers, graph.sizes().to_vec(), edge_points))
        }
    }

    struct BrokenEngine;

    impl LayeredEngine for BrokenEngine {
        fn layout(&self, _graph: &LayeredGraph) -> Result<LayeredOutput, TraceflowError> {
            Ok(LayeredOutput::default())
        }
    }

    fn theme() -> ResolvedTheme {
        let registry = ThemeRegistry::builtin().unwrap();
        ThemeResolver::new(&registry).resolve(None, None).unwrap()
    }

    #[test]
    fn test_node_sizes_from_theme() {
        let coordinator = LayoutCoordinator::default();
        let theme = theme();

        assert_eq!(
            coordinator.node_size(NodeType::Process, Some(&theme)),
            Size::new(120.0, 60.0)
        );
        assert_eq!(
            coordinator.node_size(NodeType::Decision, Some(&theme)),
            Size::new(120.0, 80.0)
        );
    }

    #[test]
    fn test_fallbacks_without_theme() {
        let coordinator = LayoutCoordinator::default();
        assert_eq!(coordinator.node_size(NodeType::Start, None), Size::new(180.0, 60.0));
        assert_eq!(coordinator.node_size(NodeType::Decision, None), Size::new(180.0, 80.0));
        assert_eq!(coordinator.spacing(None), Spacing::new(50.0, 80.0, 40.0));
    }

    #[test]
    fn test_spacing_from_theme() {
        let coordinator = LayoutCoordinator::default();
        assert_eq!(coordinator.spacing(Some(&theme())), Spacing::new(50.0, 80.0, 40.0));
    }

    #[test]
    fn test_place_builds_ordered_lookup() {
        let coordinator = LayoutCoordinator::default().with_engine(Box::new(DiagonalEngine));
        let nodes = vec![
            Node::new("start", "Start", NodeType::Start),
            Node::new("check", "Check", NodeType::Decision),
            Node::new("done", "Done", NodeType::End),
        ];
        let edges = vec![Edge::new("start", "check"), Edge::new("check", "done")];

        let placement = coordinator
            .place(&nodes, &edges, Direction::TopBottom, None)
            .unwrap();

        let ids: Vec<_> = placement.nodes().keys().map(String::as_str).collect();
        assert_eq!(ids, ["start", "check", "done"]);
        let check = &placement.nodes()["check"];
        assert_eq!(check.center(), Point::new(100.0, 100.0));
        assert_eq!(check.size(), Size::new(180.0, 80.0));
        assert_eq!(placement.connections().len(), 2);
        assert_eq!(placement.connections()[1].points().len(), 2);
    }

    #[test]
    fn test_connections_hand_back_document_edges() {
        let coordinator = LayoutCoordinator::default().with_engine(Box::new(DiagonalEngine));
        let nodes = vec![
            Node::new("a", "A", NodeType::Decision),
            Node::new("b", "B", NodeType::Process),
        ];
        let edges = vec![Edge::new("a", "b").with_label("yes").with_style(EdgeStyle::Dashed)];

        let (positioned, connections) = coordinator
            .place(&nodes, &edges, Direction::TopBottom, None)
            .unwrap()
            .into_parts();
        assert_eq!(positioned.len(), 2);

        let routed: Vec<Edge> = connections.into_iter().map(Connection::into_edge).collect();
        assert_eq!(routed, edges);
    }

    #[test]
    fn test_place_skips_dangling_edges() {
        let coordinator = LayoutCoordinator::default().with_engine(Box::new(DiagonalEngine));
        let nodes = vec![Node::new("a", "A", NodeType::Process)];
        let edges = vec![Edge::new("a", "ghost")];

        let placement = coordinator
            .place(&nodes, &edges, Direction::TopBottom, None)
            .unwrap();
        assert_eq!(placement.nodes().len(), 1);
        assert!(placement.connections().is_empty());
    }

    #[test]
    fn test_place_rejects_mismatched_engine_output() {
        let coordinator = LayoutCoordinator::default().with_engine(Box::new(BrokenEngine));
        let nodes = vec![Node::new("a", "A", NodeType::Process)];
        let result = coordinator.place(&nodes, &[], Direction::TopBottom, None);
        assert!(matches!(result, Err(TraceflowError::Layout(_))));
    }

    #[test]
    fn test_every_positioned_node_has_positive_size() {
        let coordinator = LayoutCoordinator::default();
        let theme = theme();
        let nodes: Vec<_> = [
            NodeType::Start,
            NodeType::End,
            NodeType::Process,
            NodeType::Decision,
            NodeType::Database,
            NodeType::External,
            NodeType::Manual,
            NodeType::Delay,
        ]
        .into_iter()
        .enumerate()
        .map(|(i, node_type)| Node::new(format!("n{i}"), "Step", node_type))
        .collect();
        let edges: Vec<_> = (1..nodes.len())
            .map(|i| Edge::new(format!("n{}", i - 1), format!("n{i}")))
            .collect();

        let placement = coordinator
            .place(&nodes, &edges, Direction::TopBottom, Some(&theme))
            .unwrap();
        for node in placement.nodes().values() {
            assert!(node.size().width() > 0.0);
            assert!(node.size().height() > 0.0);
        }
    }
}
