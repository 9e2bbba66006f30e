//! Positioned diagram elements and the final layout result.

use traceflow_core::{
    geometry::{Bounds, Point, Size},
    graph::{Direction, Edge, Node},
};

/// A node with its center and box size.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    node: Node,
    center: Point,
    size: Size,
}

impl PositionedNode {
    pub fn new(node: Node, center: Point, size: Size) -> Self {
        Self { node, center, size }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn id(&self) -> &str {
        self.node.id()
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// The node's box.
    pub fn bounds(&self) -> Bounds {
        self.center.to_bounds(self.size)
    }
}

/// An edge with its ordered waypoints, first to last in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedEdge {
    edge: Edge,
    waypoints: Vec<Point>,
}

impl PositionedEdge {
    pub fn new(edge: Edge, waypoints: Vec<Point>) -> Self {
        debug_assert!(waypoints.len() >= 2, "an edge needs at least two waypoints");
        Self { edge, waypoints }
    }

    pub fn edge(&self) -> &Edge {
        &self.edge
    }

    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }
}

/// Positioned nodes and edges plus the padded box enclosing all of them.
///
/// The box covers every node box and every waypoint, grown by the canvas
/// padding. Renderers map its origin to `(0, 0)`.
#[derive(Debug, Clone)]
pub struct LayoutResult {
    nodes: Vec<PositionedNode>,
    edges: Vec<PositionedEdge>,
    direction: Direction,
    bounds: Bounds,
}

impl LayoutResult {
    pub fn new(
        nodes: Vec<PositionedNode>,
        edges: Vec<PositionedEdge>,
        direction: Direction,
        padding: f32,
    ) -> Self {
        let content = nodes
            .iter()
            .map(PositionedNode::bounds)
            .chain(
                edges
                    .iter()
                    .flat_map(|edge| edge.waypoints().iter().copied().map(Bounds::from_point)),
            )
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default();

        Self {
            nodes,
            edges,
            direction,
            bounds: content.inflate(padding),
        }
    }

    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[PositionedEdge] {
        &self.edges
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The padded bounding box in layout coordinates.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Top-left corner of the padded bounding box.
    pub fn origin(&self) -> Point {
        self.bounds.min_point()
    }

    pub fn width(&self) -> f32 {
        self.bounds.width().max(0.0)
    }

    pub fn height(&self) -> f32 {
        self.bounds.height().max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use traceflow_core::graph::NodeType;

    use super::*;

    #[test]
    fn test_bounds_include_nodes_waypoints_and_padding() {
        let a = PositionedNode::new(
            Node::new("a", "A", NodeType::Process),
            Point::new(100.0, 50.0),
            Size::new(120.0, 60.0),
        );
        let b = PositionedNode::new(
            Node::new("b", "B", NodeType::Process),
            Point::new(100.0, 250.0),
            Size::new(120.0, 60.0),
        );
        let edge = PositionedEdge::new(
            Edge::new("b", "a"),
            vec![
                Point::new(160.0, 250.0),
                Point::new(200.0, 250.0),
                Point::new(200.0, 50.0),
                Point::new(160.0, 50.0),
            ],
        );

        let result = LayoutResult::new(vec![a, b], vec![edge], Direction::TopBottom, 40.0);

        assert_eq!(result.origin(), Point::new(0.0, -20.0));
        assert_eq!(result.width(), 240.0);
        assert_eq!(result.height(), 340.0);
    }

    #[test]
    fn test_empty_layout_is_padding_only() {
        let result = LayoutResult::new(vec![], vec![], Direction::LeftRight, 40.0);
        assert_eq!(result.width(), 80.0);
        assert_eq!(result.height(), 80.0);
        assert!(result.nodes().is_empty());
    }
}
