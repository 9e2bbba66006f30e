//! Node outlines.
//!
//! Each node type maps to a [`NodeShape`] that turns a center and box size
//! into closed SVG path data. Outlines depend on nothing but those two
//! values.

use std::fmt::{self, Write};

use traceflow_core::{
    geometry::{Point, Size},
    graph::NodeType,
};

/// Corner radius used when the theme does not provide one.
pub const DEFAULT_CORNER_RADIUS: f32 = 12.0;

/// A closed outline drawn around a node's box.
pub trait NodeShape: fmt::Debug {
    /// Get a string identifier for this shape type
    fn name(&self) -> &'static str;

    /// Closed path data for a box of `size` centered on `center`.
    fn outline(&self, center: Point, size: Size) -> String;
}

/// Rectangle whose short ends are semicircles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stadium;

impl NodeShape for Stadium {
    fn name(&self) -> &'static str {
        "stadium"
    }

    fn outline(&self, center: Point, size: Size) -> String {
        let edges = BoxEdges::new(center, size);
        let r = size.height().min(size.width()) / 2.0;
        format!(
            "M {} {} L {} {} A {r} {r} 0 0 1 {} {} L {} {} A {r} {r} 0 0 1 {} {} Z",
            edges.left + r,
            edges.top,
            edges.right - r,
            edges.top,
            edges.right - r,
            edges.bottom,
            edges.left + r,
            edges.bottom,
            edges.left + r,
            edges.top,
        )
    }
}

/// Rhombus through the midpoints of the box sides.
#[derive(Debug, Clone, Copy, Default)]
pub struct Diamond;

impl NodeShape for Diamond {
    fn name(&self) -> &'static str {
        "diamond"
    }

    fn outline(&self, center: Point, size: Size) -> String {
        let edges = BoxEdges::new(center, size);
        format!(
            "M {} {} L {} {} L {} {} L {} {} Z",
            center.x(),
            edges.top,
            edges.right,
            center.y(),
            center.x(),
            edges.bottom,
            edges.left,
            center.y(),
        )
    }
}

/// Rectangle with quadratic corners.
#[derive(Debug, Clone, Copy)]
pub struct RoundedRect {
    radius: f32,
}

impl RoundedRect {
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.max(0.0),
        }
    }
}

impl Default for RoundedRect {
    fn default() -> Self {
        Self::new(DEFAULT_CORNER_RADIUS)
    }
}

impl NodeShape for RoundedRect {
    fn name(&self) -> &'static str {
        "rounded_rect"
    }

    fn outline(&self, center: Point, size: Size) -> String {
        let BoxEdges {
            left,
            top,
            right,
            bottom,
        } = BoxEdges::new(center, size);
        let r = self.radius.min(size.width() / 2.0).min(size.height() / 2.0);

        let mut data = String::with_capacity(160);
        // Writing into a String cannot fail.
        let _ = write!(data, "M {} {top} L {} {top}", left + r, right - r);
        let _ = write!(data, " Q {right} {top} {right} {}", top + r);
        let _ = write!(data, " L {right} {}", bottom - r);
        let _ = write!(data, " Q {right} {bottom} {} {bottom}", right - r);
        let _ = write!(data, " L {} {bottom}", left + r);
        let _ = write!(data, " Q {left} {bottom} {left} {}", bottom - r);
        let _ = write!(data, " L {left} {}", top + r);
        let _ = write!(data, " Q {left} {top} {} {top} Z", left + r);
        data
    }
}

/// Shape for a node type.
///
/// Databases are drawn as rounded rectangles rather than cylinders.
pub fn shape_for(node_type: NodeType, corner_radius: f32) -> Box<dyn NodeShape> {
    match node_type {
        NodeType::Start | NodeType::End => Box::new(Stadium),
        NodeType::Decision => Box::new(Diamond),
        NodeType::Database => Box::new(RoundedRect::default()),
        NodeType::Process
        | NodeType::External
        | NodeType::Manual
        | NodeType::Delay => Box::new(RoundedRect::new(corner_radius)),
    }
}

struct BoxEdges {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl BoxEdges {
    fn new(center: Point, size: Size) -> Self {
        let bounds = center.to_bounds(size);
        Self {
            left: bounds.min_x(),
            top: bounds.min_y(),
            right: bounds.max_x(),
            bottom: bounds.max_y(),
        }
    }
}
