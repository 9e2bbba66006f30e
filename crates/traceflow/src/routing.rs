//! Orthogonal edge routing.
//!
//! Every route is a polyline whose consecutive points share an x or a y
//! coordinate. The rules depend on the flow direction:
//!
//! - Vertical flow (TB, BT): forward edges run straight down when source and
//!   target are nearly aligned and jog through the mid-rank gap otherwise.
//!   Branch edges, and forward edges whose straight line would cross another
//!   node, detour around the side of the whole diagram. Back edges always
//!   detour around the right side.
//! - Horizontal flow (LR, RL): forward edges run straight when nearly aligned
//!   and make an L-shape otherwise. Back edges detour below the diagram.

use indexmap::IndexMap;
use log::trace;

use traceflow_core::{
    geometry::{Bounds, Point},
    graph::{Direction, Edge},
};

use crate::layout::PositionedNode;

/// Distance between the outermost node box and a detour channel.
const ROUTE_MARGIN: f32 = 40.0;
/// Clearance added around a node box when testing for collisions.
const BOX_PADDING: f32 = 10.0;
/// Horizontal offset below which a vertical edge is drawn straight.
const VERTICAL_ALIGN_TOLERANCE: f32 = 60.0;
/// Vertical offset below which a horizontal edge is drawn straight.
const HORIZONTAL_ALIGN_TOLERANCE: f32 = 20.0;

/// Side of the diagram a detour runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Computes waypoints for edges between positioned nodes.
pub struct EdgeRouter<'a> {
    nodes: &'a IndexMap<String, PositionedNode>,
    direction: Direction,
    extent: Bounds,
}

impl<'a> EdgeRouter<'a> {
    pub fn new(nodes: &'a IndexMap<String, PositionedNode>, direction: Direction) -> Self {
        let extent = nodes
            .values()
            .map(PositionedNode::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default();
        Self {
            nodes,
            direction,
            extent,
        }
    }

    /// Waypoints for `edge`, or `None` if either endpoint is unknown.
    ///
    /// The result always has at least two points.
    pub fn route(&self, edge: &Edge) -> Option<Vec<Point>> {
        let source = self.nodes.get(edge.from())?;
        let target = self.nodes.get(edge.to())?;

        let points = if self.direction.is_vertical() {
            self.route_vertical(edge, source, target)
        } else {
            self.route_horizontal(source, target)
        };
        trace!(from = edge.from(), to = edge.to(), points = points.len(); "Routed edge");
        Some(points)
    }

    /// +1 when the flow runs along the axis, -1 against it.
    fn flow_sign(&self) -> f32 {
        if self.direction.is_reversed() { -1.0 } else { 1.0 }
    }

    fn route_vertical(&self, edge: &Edge, source: &PositionedNode, target: &PositionedNode) -> Vec<Point> {
        let sign = self.flow_sign();
        let (s, t) = (source.center(), target.center());
        let (sb, tb) = (source.bounds(), target.bounds());

        if (t.y() - s.y()) * sign <= 0.0 {
            return self.detour_vertical(Side::Right, source, target);
        }

        if edge.style().is_branch() || self.blocked_vertical(s.x(), s.y(), t.y(), edge) {
            let side = if t.x() >= s.x() { Side::Right } else { Side::Left };
            return self.detour_vertical(side, source, target);
        }

        let (exit_y, entry_y) = if self.direction.is_reversed() {
            (sb.min_y(), tb.max_y())
        } else {
            (sb.max_y(), tb.min_y())
        };

        if (t.x() - s.x()).abs() < VERTICAL_ALIGN_TOLERANCE {
            let mid_x = (s.x() + t.x()) / 2.0;
            return vec![Point::new(mid_x, exit_y), Point::new(mid_x, entry_y)];
        }

        let mid_y = (exit_y + entry_y) / 2.0;
        vec![
            Point::new(s.x(), exit_y),
            Point::new(s.x(), mid_y),
            Point::new(t.x(), mid_y),
            Point::new(t.x(), entry_y),
        ]
    }

    /// Route out of the source's side, along a channel outside every node,
    /// and into the target's side.
    fn detour_vertical(&self, side: Side, source: &PositionedNode, target: &PositionedNode) -> Vec<Point> {
        let (sb, tb) = (source.bounds(), target.bounds());
        let (sy, ty) = (source.center().y(), target.center().y());
        let (route_x, source_x, target_x) = match side {
            Side::Right => (self.extent.max_x() + ROUTE_MARGIN, sb.max_x(), tb.max_x()),
            Side::Left => (self.extent.min_x() - ROUTE_MARGIN, sb.min_x(), tb.min_x()),
        };
        vec![
            Point::new(source_x, sy),
            Point::new(route_x, sy),
            Point::new(route_x, ty),
            Point::new(target_x, ty),
        ]
    }

    /// Whether a vertical line at `x` between `y1` and `y2` passes through a
    /// node other than the edge's endpoints.
    fn blocked_vertical(&self, x: f32, y1: f32, y2: f32, edge: &Edge) -> bool {
        self.nodes
            .values()
            .filter(|node| node.id() != edge.from() && node.id() != edge.to())
            .map(|node| node.bounds().inflate(BOX_PADDING))
            .any(|bounds| bounds.contains_x(x) && bounds.overlaps_y_span(y1, y2))
    }

    fn route_horizontal(&self, source: &PositionedNode, target: &PositionedNode) -> Vec<Point> {
        let sign = self.flow_sign();
        let (s, t) = (source.center(), target.center());
        let (sb, tb) = (source.bounds(), target.bounds());

        if (t.x() - s.x()) * sign <= 0.0 {
            let route_y = self.extent.max_y() + ROUTE_MARGIN;
            return vec![
                Point::new(s.x(), sb.max_y()),
                Point::new(s.x(), route_y),
                Point::new(t.x(), route_y),
                Point::new(t.x(), tb.max_y()),
            ];
        }

        let (exit_x, entry_x) = if self.direction.is_reversed() {
            (sb.min_x(), tb.max_x())
        } else {
            (sb.max_x(), tb.min_x())
        };

        if (t.y() - s.y()).abs() < HORIZONTAL_ALIGN_TOLERANCE {
            let mid_y = (s.y() + t.y()) / 2.0;
            return vec![Point::new(exit_x, mid_y), Point::new(entry_x, mid_y)];
        }

        let entry_y = if t.y() > s.y() { tb.min_y() } else { tb.max_y() };
        vec![
            Point::new(exit_x, s.y()),
            Point::new(t.x(), s.y()),
            Point::new(t.x(), entry_y),
        ]
    }
}
