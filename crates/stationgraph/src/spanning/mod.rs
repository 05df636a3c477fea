//! Spanning backbone of the station graph (Kruskal over union-find).
//!
//! Purpose
//! - Extract an acyclic backbone touching every station; on a disconnected
//!   graph this is a spanning forest and the component count says so.
//!
//! Weighting
//! - `EdgeWeighting::Uniform` (default): every edge weighs 1, so any spanning
//!   tree is minimal and the result is fixed by the edge processing order,
//!   the canonical `(min id, max id)` order of `AdjacencyGraph::edges`.
//! - `EdgeWeighting::Euclidean`: edges weigh the planar distance between
//!   their stations; ties keep the canonical order. Needs a `PointSet` that
//!   covers every node.

mod kruskal;
mod union_find;

use serde::Serialize;
use thiserror::Error;

use crate::station::StationId;
use crate::triangulation::AdjacencyGraph;

pub use kruskal::{minimum_spanning_forest, spanning_forest_with, weighted_spanning_forest};
pub use union_find::DisjointSet;

/// Edge weight model for Kruskal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeWeighting {
    #[default]
    Uniform,
    Euclidean,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MstCfg {
    pub weighting: EdgeWeighting,
}

/// Non-fatal: the graph had more than one connected component.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("graph is disconnected: spanning forest has {components} components over {nodes} stations")]
pub struct DisconnectedGraph {
    pub components: usize,
    pub nodes: usize,
}

/// Spanning tree (one component) or forest.
///
/// Invariants:
/// - `edges.len() == nodes.len() - components`; no cycles.
/// - Edges are `(min, max)` pairs in the order Kruskal accepted them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpanningForest {
    #[serde(skip)]
    pub nodes: Vec<StationId>,
    pub edges: Vec<(StationId, StationId)>,
    pub components: usize,
    pub total_weight: f64,
}

impl SpanningForest {
    #[inline]
    pub fn is_tree(&self) -> bool {
        self.components <= 1
    }

    /// `Some` when the forest has more than one component.
    pub fn disconnected(&self) -> Option<DisconnectedGraph> {
        (self.components > 1).then_some(DisconnectedGraph {
            components: self.components,
            nodes: self.nodes.len(),
        })
    }

    /// The forest as a new graph on the same node set.
    pub fn to_graph(&self) -> AdjacencyGraph {
        AdjacencyGraph::from_edges(self.nodes.iter().cloned(), self.edges.iter().cloned())
    }
}
