//! Layered-graph positioning engines.
//!
//! Rank assignment, ordering within ranks and coordinate assignment are
//! delegated to a [`LayeredEngine`]. The coordinator hands it plain node
//! sizes and index pairs; the engine answers with one center per node.

mod sugiyama;

pub use sugiyama::SugiyamaEngine;

use traceflow_core::{
    geometry::{Point, Size},
    graph::Direction,
};

use crate::error::TraceflowError;

/// Spacing parameters handed to an engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    node: f32,
    rank: f32,
    margin: f32,
}

impl Spacing {
    pub fn new(node: f32, rank: f32, margin: f32) -> Self {
        Self { node, rank, margin }
    }

    /// Separation between neighbouring nodes of the same rank
    pub fn node(&self) -> f32 {
        self.node
    }

    /// Separation between consecutive ranks
    pub fn rank(&self) -> f32 {
        self.rank
    }

    /// Distance from the canvas origin to the first node box
    pub fn margin(&self) -> f32 {
        self.margin
    }
}

/// Engine input: node sizes and edges as index pairs into `sizes`.
#[derive(Debug, Clone)]
pub struct LayeredGraph {
    sizes: Vec<Size>,
    edges: Vec<(usize, usize)>,
    direction: Direction,
    spacing: Spacing,
}

impl LayeredGraph {
    pub fn new(
        sizes: Vec<Size>,
        edges: Vec<(usize, usize)>,
        direction: Direction,
        spacing: Spacing,
    ) -> Self {
        Self {
            sizes,
            edges,
            direction,
            spacing,
        }
    }

    pub fn sizes(&self) -> &[Size] {
        &self.sizes
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }
}

/// Engine output, indexed like the input.
#[derive(Debug, Clone, Default)]
pub struct LayeredOutput {
    centers: Vec<Point>,
    sizes: Vec<Size>,
    edge_points: Vec<Vec<Point>>,
}

impl LayeredOutput {
    pub fn new(centers: Vec<Point>, sizes: Vec<Size>, edge_points: Vec<Vec<Point>>) -> Self {
        Self {
            centers,
            sizes,
            edge_points,
        }
    }

    /// Center of every node.
    pub fn centers(&self) -> &[Point] {
        &self.centers
    }

    /// Size the engine assigned to every node.
    pub fn sizes(&self) -> &[Size] {
        &self.sizes
    }

    /// Raw points of every edge, as reported by the engine.
    pub fn edge_points(&self) -> &[Vec<Point>] {
        &self.edge_points
    }
}

/// Trait defining the interface for layered-graph positioning engines.
pub trait LayeredEngine {
    /// Positions every node of `graph`.
    ///
    /// # Errors
    /// Returns `TraceflowError::Layout` if the engine fails to calculate positions.
    fn layout(&self, graph: &LayeredGraph) -> Result<LayeredOutput, TraceflowError>;
}
