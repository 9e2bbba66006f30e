//! Sugiyama layout engine.
//!
//! Rank and in-rank order come from the rust-sugiyama implementation; this
//! adapter turns its abstract coordinates into canvas coordinates:
//!
//! 1. Ranks are the distinct layer coordinates of each connected component,
//!    oriented so that most edges point forward.
//! 2. Components are placed side by side along the cross axis.
//! 3. Nodes without edges share one extra rank after all others.
//! 4. Rank extents and spacing give the primary-axis coordinate; BT and RL
//!    mirror it, LR and RL swap the axes.

use std::collections::HashSet;

use log::{debug, trace, warn};
use rust_sugiyama::configure::Config;

use traceflow_core::geometry::{Point, Size};

use super::{LayeredEngine, LayeredGraph, LayeredOutput};
use crate::error::TraceflowError;

/// Abstract placement of one node: rank index and cross-axis slot.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Slot {
    rank: usize,
    cross: f64,
}

/// The Sugiyama layout engine
/// Based on the Sugiyama algorithm for layered drawing of directed graphs
pub struct SugiyamaEngine {
    /// Vertex spacing passed to rust-sugiyama; only used to normalize its x coordinates
    vertex_spacing: f64,
}

impl Default for SugiyamaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SugiyamaEngine {
    pub fn new() -> Self {
        Self {
            vertex_spacing: 2.0,
        }
    }

    /// Runs rust-sugiyama, turning a panic into a layout error.
    fn run(&self, edges: Vec<(u32, u32)>) -> Result<Vec<Vec<(usize, (f64, f64))>>, TraceflowError> {
        let vertex_spacing = self.vertex_spacing;
        let layouts = std::panic::catch_unwind(move || {
            let config = Config {
                minimum_length: 1,
                vertex_spacing,
                ..Default::default()
            };
            rust_sugiyama::from_edges(&edges, &config)
        });

        match layouts {
            Ok(results) if !results.is_empty() => Ok(results
                .into_iter()
                .map(|(coords, _width, _height)| coords)
                .collect()),
            Ok(_) => Err(TraceflowError::Layout(
                "Rust-sugiyama returned empty layout results".to_string(),
            )),
            Err(err) => {
                let message = if let Some(panic_msg) = err.downcast_ref::<String>() {
                    format!("Rust-sugiyama layout engine panicked: {panic_msg}")
                } else if let Some(panic_msg) = err.downcast_ref::<&str>() {
                    format!("Rust-sugiyama layout engine panicked: {panic_msg}")
                } else {
                    "Rust-sugiyama layout engine panicked with unknown error".to_string()
                };
                Err(TraceflowError::Layout(message))
            }
        }
    }

    /// Assigns a slot to every node that takes part in an edge.
    fn slots(
        &self,
        node_count: usize,
        edges: &[(u32, u32)],
    ) -> Result<Vec<Option<Slot>>, TraceflowError> {
        let mut slots: Vec<Option<Slot>> = vec![None; node_count];
        if edges.is_empty() {
            return Ok(slots);
        }

        let components = self.run(edges.to_vec())?;
        debug!(components = components.len(); "Sugiyama layout calculated");

        let mut cross_offset = 0.0;
        for coords in components {
            let mut layer_values: Vec<f64> = coords.iter().map(|&(_, (_, y))| y).collect();
            layer_values.sort_by(f64::total_cmp);
            layer_values.dedup_by(|a, b| (*a - *b).abs() < 1e-6);

            let min_x = coords
                .iter()
                .map(|&(_, (x, _))| x)
                .fold(f64::INFINITY, f64::min);

            let mut members = Vec::with_capacity(coords.len());
            let mut max_cross: f64 = 0.0;
            for &(id, (x, y)) in &coords {
                if id >= node_count {
                    warn!(id = id; "Rust-sugiyama returned an unknown vertex");
                    continue;
                }
                let rank = layer_values
                    .iter()
                    .position(|value| (value - y).abs() < 1e-6)
                    .unwrap_or_default();
                let cross = (x - min_x) / self.vertex_spacing;
                max_cross = max_cross.max(cross);
                members.push(id);
                slots[id] = Some(Slot {
                    rank,
                    cross: cross + cross_offset,
                });
            }

            orient_forward(&mut slots, &members, edges);
            cross_offset += max_cross + 1.0;
        }

        if slots.iter().all(Option::is_none) {
            return Err(TraceflowError::Layout(
                "Failed to map any rust-sugiyama positions back to graph nodes".to_string(),
            ));
        }
        Ok(slots)
    }
}

/// Flips the ranks of a component when most of its edges point backward.
fn orient_forward(slots: &mut [Option<Slot>], members: &[usize], edges: &[(u32, u32)]) {
    let member_set: HashSet<usize> = members.iter().copied().collect();
    let (mut forward, mut backward) = (0usize, 0usize);
    for &(source, target) in edges {
        let (source, target) = (source as usize, target as usize);
        if !member_set.contains(&source) {
            continue;
        }
        if let (Some(s), Some(t)) = (slots[source], slots[target]) {
            if s.rank < t.rank {
                forward += 1;
            } else if s.rank > t.rank {
                backward += 1;
            }
        }
    }

    if backward > forward {
        trace!(forward = forward, backward = backward; "Flipping component ranks");
        let max_rank = members
            .iter()
            .filter_map(|&id| slots[id].map(|slot| slot.rank))
            .max()
            .unwrap_or_default();
        for &id in members {
            if let Some(slot) = slots[id].as_mut() {
                slot.rank = max_rank - slot.rank;
            }
        }
    }
}

impl LayeredEngine for SugiyamaEngine {
    fn layout(&self, graph: &LayeredGraph) -> Result<LayeredOutput, TraceflowError> {
        let sizes = graph.sizes();
        let node_count = sizes.len();
        let spacing = graph.spacing();
        let direction = graph.direction();
        let vertical = direction.is_vertical();

        // Self-loops and repeated edges carry no ranking information.
        let mut seen = HashSet::new();
        let edges: Vec<(u32, u32)> = graph
            .edges()
            .iter()
            .filter(|&&(source, target)| source != target && source < node_count && target < node_count)
            .filter(|&&pair| seen.insert(pair))
            .map(|&(source, target)| (source as u32, target as u32))
            .collect();

        debug!(nodes = node_count, edges = edges.len(); "Applying Sugiyama algorithm");
        let mut slots = self.slots(node_count, &edges)?;

        // Nodes without edges go into one extra rank after all others.
        let isolated_rank = slots
            .iter()
            .flatten()
            .map(|slot| slot.rank + 1)
            .max()
            .unwrap_or_default();
        let mut next_isolated = 0.0;
        for slot in slots.iter_mut().filter(|slot| slot.is_none()) {
            *slot = Some(Slot {
                rank: isolated_rank,
                cross: next_isolated,
            });
            next_isolated += 1.0;
        }
        let slots: Vec<Slot> = slots.into_iter().flatten().collect();

        let primary_size = |size: Size| if vertical { size.height() } else { size.width() };
        let cross_size = |size: Size| if vertical { size.width() } else { size.height() };

        let rank_count = slots.iter().map(|slot| slot.rank + 1).max().unwrap_or_default();
        let mut rank_extents = vec![0.0f32; rank_count];
        for (slot, &size) in slots.iter().zip(sizes) {
            rank_extents[slot.rank] = rank_extents[slot.rank].max(primary_size(size));
        }

        let mut rank_centers = Vec::with_capacity(rank_count);
        let mut cursor = spacing.margin();
        for extent in &rank_extents {
            rank_centers.push(cursor + extent / 2.0);
            cursor += extent + spacing.rank();
        }
        let primary_total = if rank_count == 0 {
            2.0 * spacing.margin()
        } else {
            cursor - spacing.rank() + spacing.margin()
        };

        let max_cross = sizes.iter().map(|&size| cross_size(size)).fold(0.0, f32::max);
        let cross_unit = max_cross + spacing.node();

        let centers: Vec<Point> = slots
            .iter()
            .map(|slot| {
                let mut primary = rank_centers[slot.rank];
                if direction.is_reversed() {
                    primary = primary_total - primary;
                }
                let cross = spacing.margin() + max_cross / 2.0 + slot.cross as f32 * cross_unit;
                if vertical {
                    Point::new(cross, primary)
                } else {
                    Point::new(primary, cross)
                }
            })
            .collect();

        let edge_points = graph
            .edges()
            .iter()
            .map(|&(source, target)| match (centers.get(source), centers.get(target)) {
                (Some(&from), Some(&to)) => vec![from, to],
                _ => Vec::new(),
            })
            .collect();

        trace!(centers:?; "Sugiyama node centers");
        Ok(LayeredOutput::new(centers, sizes.to_vec(), edge_points))
    }
}

#[cfg(test)]
mod tests {
    use traceflow_core::graph::Direction;

    use super::*;
    use crate::layout::engines::Spacing;

    fn graph(node_count: usize, edges: Vec<(usize, usize)>, direction: Direction) -> LayeredGraph {
        LayeredGraph::new(
            vec![Size::new(120.0, 60.0); node_count],
            edges,
            direction,
            Spacing::new(50.0, 80.0, 40.0),
        )
    }

    #[test]
    fn test_chain_top_bottom() {
        let output = SugiyamaEngine::new()
            .layout(&graph(3, vec![(0, 1), (1, 2)], Direction::TopBottom))
            .unwrap();

        let centers = output.centers();
        assert_eq!(centers.len(), 3);
        assert_eq!(centers[0].y(), 70.0);
        assert_eq!(centers[1].y(), 210.0);
        assert_eq!(centers[2].y(), 350.0);
        assert_eq!(centers[0].x(), centers[1].x());
        assert_eq!(centers[1].x(), centers[2].x());
        assert_eq!(output.edge_points()[0], vec![centers[0], centers[1]]);
    }

    #[test]
    fn test_chain_bottom_top_is_mirrored() {
        let output = SugiyamaEngine::new()
            .layout(&graph(2, vec![(0, 1)], Direction::BottomTop))
            .unwrap();
        let centers = output.centers();
        assert!(centers[1].y() < centers[0].y());
        assert_eq!(centers[0].y() + centers[1].y(), 280.0);
    }

    #[test]
    fn test_chain_left_right_swaps_axes() {
        let output = SugiyamaEngine::new()
            .layout(&graph(2, vec![(0, 1)], Direction::LeftRight))
            .unwrap();
        let centers = output.centers();
        assert_eq!(centers[0].y(), centers[1].y());
        assert_eq!(centers[0].x(), 100.0);
        assert_eq!(centers[1].x(), 100.0 + 120.0 + 80.0);
    }

    #[test]
    fn test_chain_right_left() {
        let output = SugiyamaEngine::new()
            .layout(&graph(2, vec![(0, 1)], Direction::RightLeft))
            .unwrap();
        let centers = output.centers();
        assert!(centers[1].x() < centers[0].x());
    }

    #[test]
    fn test_nodes_without_edges() {
        let output = SugiyamaEngine::new()
            .layout(&graph(3, vec![], Direction::TopBottom))
            .unwrap();
        let centers = output.centers();
        assert!(centers.iter().all(|c| c.y() == 70.0));
        assert_eq!(centers[0].x(), 100.0);
        assert_eq!(centers[1].x(), 100.0 + 170.0);
        assert_eq!(centers[2].x(), 100.0 + 340.0);
    }

    #[test]
    fn test_isolated_node_goes_below_connected_ranks() {
        let output = SugiyamaEngine::new()
            .layout(&graph(3, vec![(0, 1)], Direction::TopBottom))
            .unwrap();
        let centers = output.centers();
        assert!(centers[2].y() > centers[1].y());
        assert!(centers[1].y() > centers[0].y());
    }

    #[test]
    fn test_self_loop_and_duplicates_are_tolerated() {
        let output = SugiyamaEngine::new()
            .layout(&graph(2, vec![(0, 0), (0, 1), (0, 1)], Direction::TopBottom))
            .unwrap();
        assert_eq!(output.centers().len(), 2);
        assert_eq!(output.edge_points().len(), 3);
        assert_eq!(output.edge_points()[0].len(), 2);
    }

    #[test]
    fn test_empty_graph() {
        let output = SugiyamaEngine::new()
            .layout(&graph(0, vec![], Direction::TopBottom))
            .unwrap();
        assert!(output.centers().is_empty());
    }

    #[test]
    fn test_sizes_are_passed_through() {
        let mut input = graph(2, vec![(0, 1)], Direction::TopBottom);
        input.sizes[1] = Size::new(180.0, 80.0);
        let output = SugiyamaEngine::new().layout(&input).unwrap();
        assert_eq!(output.sizes()[1], Size::new(180.0, 80.0));
    }
}
