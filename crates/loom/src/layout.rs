//! Rank assignment and positioning of dependency graphs.
//!
//! Layout runs in two phases:
//! 1. A ranking engine gives every node an integer rank such that edges
//!    point from lower to higher ranks.
//! 2. Nodes are grouped by rank. Rank picks the column and the order of
//!    creation within a rank picks the row.
//!
//! Two ranking engines are available, selected by [`LayoutEngine`]:
//! - `relaxation`: repeated passes over the edge set raising each target to
//!   one past its source. Bounded by a pass count and stops early at a fixed
//!   point.
//! - `longest_path`: exact longest-path layering over a topological order.
//!   Graphs with a cycle fall back to relaxation.

mod longest_path;
mod relaxation;

use indexmap::IndexMap;
use log::{debug, info};

use loom_core::{geometry::Point, semantic::LayoutEngine};

use crate::{config::LayoutConfig, graph::Graph};

/// Configured layout pass.
///
/// # Examples
///
/// ```
/// use loom::layout::Layout;
/// use loom::semantic::LayoutEngine;
///
/// let layout = Layout::new(LayoutEngine::Relaxation)
///     .with_passes(5)
///     .with_rank_spacing(200)
///     .with_order_spacing(100)
///     .with_margin(20);
/// assert_eq!(layout.engine(), LayoutEngine::Relaxation);
/// ```
#[derive(Debug, Clone)]
pub struct Layout {
    engine: LayoutEngine,
    passes: Option<usize>,
    rank_spacing: i32,
    order_spacing: i32,
    margin: i32,
}

impl Default for Layout {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl Layout {
    /// Create a layout with the given engine and default spacing.
    pub fn new(engine: LayoutEngine) -> Self {
        Self::from_config(&LayoutConfig::new(engine))
    }

    /// Create a layout from the `[layout]` configuration section.
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            engine: config.engine(),
            passes: config.passes(),
            rank_spacing: config.rank_spacing(),
            order_spacing: config.order_spacing(),
            margin: config.margin(),
        }
    }

    /// Set the relaxation pass bound. Without one, the node count is used.
    pub fn with_passes(mut self, passes: usize) -> Self {
        self.passes = Some(passes);
        self
    }

    /// Set the horizontal distance between ranks.
    pub fn with_rank_spacing(mut self, spacing: i32) -> Self {
        self.rank_spacing = spacing;
        self
    }

    /// Set the vertical distance between nodes that share a rank.
    pub fn with_order_spacing(mut self, spacing: i32) -> Self {
        self.order_spacing = spacing;
        self
    }

    /// Set the offset of the first column and row.
    pub fn with_margin(mut self, margin: i32) -> Self {
        self.margin = margin;
        self
    }

    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    /// Rank and position every node of `graph` in place.
    pub fn apply(&self, graph: &mut Graph) {
        let ranks = self.ranks(graph);

        let mut layers: IndexMap<usize, Vec<usize>> = IndexMap::new();
        for (index, rank) in ranks.iter().enumerate() {
            layers.entry(*rank).or_default().push(index);
        }
        info!(engine:% = self.engine, layers_count = layers.len(); "Layout calculated");

        let mut positions = vec![Point::default(); ranks.len()];
        for (rank, members) in &layers {
            for (order, index) in members.iter().enumerate() {
                positions[*index] = Point::new(
                    self.offset(*rank, self.rank_spacing),
                    self.offset(order, self.order_spacing),
                );
            }
        }

        for ((node, rank), position) in graph.nodes_mut().zip(ranks).zip(positions) {
            node.set_rank(rank);
            node.set_position(position);
        }
    }

    fn ranks(&self, graph: &Graph) -> Vec<usize> {
        let edges = edge_indices(graph);
        let node_count = graph.node_count();
        let passes = self.passes.unwrap_or(node_count);

        match self.engine {
            LayoutEngine::Relaxation => relaxation::ranks(node_count, &edges, passes),
            LayoutEngine::LongestPath => longest_path::ranks(node_count, &edges)
                .unwrap_or_else(|| {
                    debug!("Graph has a cycle, falling back to relaxation");
                    relaxation::ranks(node_count, &edges, passes)
                }),
        }
    }

    fn offset(&self, step: usize, spacing: i32) -> i32 {
        let step = i32::try_from(step).unwrap_or(i32::MAX);
        self.margin.saturating_add(step.saturating_mul(spacing))
    }
}

/// Edges as pairs of node positions in creation order.
fn edge_indices(graph: &Graph) -> Vec<(usize, usize)> {
    graph
        .edges()
        .filter_map(|edge| {
            Some((
                graph.node_index(edge.source())?,
                graph.node_index(edge.target())?,
            ))
        })
        .collect()
}
