//! Minimum-cost seam between two overlapping layers on a 4-connected pixel grid
//!
//! The overlay (packed corners) is laid over the underlay (source texture)
//! inside one tile. Neighbouring pixels are joined by edges whose capacity
//! grows with how much the layers disagree at both ends, so the minimum cut
//! runs where switching layers is least visible. Constrained pixels are
//! tied to the source or sink terminal with infinite capacity.

use crate::io::error::{Result, WangError, computation_error};
use crate::synthesis::constraints::{Constraint, ConstraintMap};
use bitvec::prelude::*;
use image::RgbImage;
use ndarray::Array2;
use std::collections::VecDeque;

// Residual capacity at or below this is treated as saturated
const FLOW_EPSILON: f32 = 1e-6;

/// Outcome of a single max-flow computation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CutStatistics {
    /// Number of augmenting paths found
    pub augmenting_paths: usize,
    /// Total flow pushed from source to sink (the cut cost)
    pub max_flow: f32,
}

#[derive(Debug, Clone)]
struct Arc {
    to: usize,
    capacity: f32,
    flow: f32,
    reverse: usize,
}

impl Arc {
    fn residual(&self) -> f32 {
        self.capacity - self.flow
    }
}

/// Flow network for one tile
pub struct GraphCut {
    size: usize,
    nodes: Vec<Vec<Arc>>,
}

impl GraphCut {
    /// Build the network for the tile whose top-left pixel is `origin`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The layers have different dimensions
    /// - The tile does not fit inside the layers
    /// - The constraint map is smaller than two pixels
    pub fn new(
        overlay: &RgbImage,
        underlay: &RgbImage,
        origin: (u32, u32),
        constraints: &ConstraintMap,
    ) -> Result<Self> {
        let size = constraints.size();
        if size < 2 {
            return Err(computation_error(
                "graph cut",
                &format!("patch size {size} is too small"),
            ));
        }
        if overlay.dimensions() != underlay.dimensions() {
            return Err(WangError::DimensionMismatch {
                expected: overlay.dimensions(),
                actual: underlay.dimensions(),
            });
        }
        let extent = origin.0 as usize + size;
        if extent > overlay.width() as usize || origin.1 as usize + size > overlay.height() as usize
        {
            return Err(computation_error(
                "graph cut",
                &format!(
                    "patch at ({}, {}) of size {size} exceeds {}x{}",
                    origin.0,
                    origin.1,
                    overlay.width(),
                    overlay.height()
                ),
            ));
        }

        let difference: Vec<f32> = (0..size * size)
            .map(|node| {
                let x = origin.0 + (node % size) as u32;
                let y = origin.1 + (node / size) as u32;
                match (overlay.get_pixel_checked(x, y), underlay.get_pixel_checked(x, y)) {
                    (Some(a), Some(b)) => color_distance(a.0, b.0),
                    _ => 0.0,
                }
            })
            .collect();

        let mut graph = Self {
            size,
            nodes: vec![Vec::new(); size * size + 2],
        };

        for y in 0..size {
            for x in 0..size {
                let node = y * size + x;
                let cost_to = |other: usize| {
                    difference.get(node).copied().unwrap_or(0.0)
                        + difference.get(other).copied().unwrap_or(0.0)
                        + 1.0
                };
                if x + 1 < size {
                    graph.add_edge(node, node + 1, cost_to(node + 1));
                }
                if y + 1 < size {
                    graph.add_edge(node, node + size, cost_to(node + size));
                }
            }
        }

        let (source, sink) = (graph.source(), graph.sink());
        for y in 0..size {
            for x in 0..size {
                let node = y * size + x;
                match constraints.get(x, y) {
                    Constraint::Source => graph.add_edge(source, node, f32::INFINITY),
                    Constraint::Sink => graph.add_edge(node, sink, f32::INFINITY),
                    Constraint::Free => {}
                }
            }
        }

        Ok(graph)
    }

    /// Side length of the tile in pixels
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Run max flow and return the overlay mask for the tile
    ///
    /// Pixels still reachable from the source in the residual graph take the
    /// overlay (255); the rest take the underlay (0).
    ///
    /// # Errors
    ///
    /// Returns an error if an augmenting path has unbounded capacity, which
    /// happens only when a pixel is bound to both terminals
    pub fn compute_mask(&mut self) -> Result<(Array2<u8>, CutStatistics)> {
        let mut statistics = CutStatistics::default();
        let mut parents: Vec<Option<(usize, usize)>> = vec![None; self.nodes.len()];

        while self.search(&mut parents, true) {
            let path = self.path_to_sink(&parents);
            let bottleneck = path
                .iter()
                .filter_map(|&(node, arc)| self.arc(node, arc).map(Arc::residual))
                .fold(f32::INFINITY, f32::min);
            if !bottleneck.is_finite() {
                return Err(computation_error(
                    "graph cut",
                    &"augmenting path with unbounded capacity",
                ));
            }

            for &(node, arc) in &path {
                self.push(node, arc, bottleneck);
            }
            statistics.augmenting_paths += 1;
            statistics.max_flow += bottleneck;
        }

        let reachable = self.search(&mut parents, false);
        debug_assert!(!reachable, "sink reachable after max flow");

        let size = self.size;
        let mask = Array2::from_shape_fn((size, size), |(y, x)| {
            if parents.get(y * size + x).copied().flatten().is_some() {
                255
            } else {
                0
            }
        });
        Ok((mask, statistics))
    }

    const fn source(&self) -> usize {
        self.size * self.size
    }

    const fn sink(&self) -> usize {
        self.size * self.size + 1
    }

    fn add_edge(&mut self, a: usize, b: usize, capacity: f32) {
        let reverse_a = self.nodes.get(b).map_or(0, Vec::len);
        let reverse_b = self.nodes.get(a).map_or(0, Vec::len);
        if let Some(arcs) = self.nodes.get_mut(a) {
            arcs.push(Arc {
                to: b,
                capacity,
                flow: 0.0,
                reverse: reverse_a,
            });
        }
        if let Some(arcs) = self.nodes.get_mut(b) {
            arcs.push(Arc {
                to: a,
                capacity,
                flow: 0.0,
                reverse: reverse_b,
            });
        }
    }

    fn arc(&self, node: usize, arc: usize) -> Option<&Arc> {
        self.nodes.get(node).and_then(|arcs| arcs.get(arc))
    }

    fn push(&mut self, node: usize, arc: usize, amount: f32) {
        let Some(forward) = self.nodes.get_mut(node).and_then(|arcs| arcs.get_mut(arc)) else {
            return;
        };
        forward.flow += amount;
        let (to, reverse) = (forward.to, forward.reverse);
        if let Some(backward) = self.nodes.get_mut(to).and_then(|arcs| arcs.get_mut(reverse)) {
            backward.flow -= amount;
        }
    }

    /// Breadth-first search over unsaturated arcs from the source
    ///
    /// Fills `parents` with the arc used to reach each node; the source is its
    /// own parent. Returns whether the sink was reached.
    fn search(&self, parents: &mut [Option<(usize, usize)>], stop_at_sink: bool) -> bool {
        let (source, sink) = (self.source(), self.sink());
        parents.fill(None);
        let mut visited = bitvec![0; self.nodes.len()];
        visited.set(source, true);
        if let Some(slot) = parents.get_mut(source) {
            *slot = Some((source, usize::MAX));
        }

        let mut queue = VecDeque::from([source]);
        while let Some(current) = queue.pop_front() {
            let Some(arcs) = self.nodes.get(current) else {
                continue;
            };
            for (index, arc) in arcs.iter().enumerate() {
                if visited.get(arc.to).as_deref() == Some(&true) || arc.residual() <= FLOW_EPSILON
                {
                    continue;
                }
                visited.set(arc.to, true);
                if let Some(slot) = parents.get_mut(arc.to) {
                    *slot = Some((current, index));
                }
                if stop_at_sink && arc.to == sink {
                    return true;
                }
                queue.push_back(arc.to);
            }
        }
        visited.get(sink).as_deref() == Some(&true)
    }

    /// Arcs from source to sink recorded by the last search, sink end first
    fn path_to_sink(&self, parents: &[Option<(usize, usize)>]) -> Vec<(usize, usize)> {
        let source = self.source();
        let mut path = Vec::new();
        let mut node = self.sink();
        while node != source {
            let Some((parent, arc)) = parents.get(node).copied().flatten() else {
                break;
            };
            path.push((parent, arc));
            node = parent;
        }
        path
    }
}

// Euclidean distance between two colours in normalised RGB
fn color_distance(a: [u8; 3], b: [u8; 3]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(&p, &q)| {
            let d = (f32::from(p) - f32::from(q)) / 255.0;
            d * d
        })
        .sum::<f32>()
        .sqrt()
}
