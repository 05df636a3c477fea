//! Kruskal's algorithm over the canonical edge order.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::union_find::DisjointSet;
use super::{EdgeWeighting, MstCfg, SpanningForest};
use crate::error::{GraphError, GraphResult};
use crate::station::{PointSet, StationId};
use crate::triangulation::AdjacencyGraph;

/// Candidate edge: endpoints as node indices plus weight.
struct Candidate {
    a: usize,
    b: usize,
    weight: f64,
}

/// Unweighted spanning forest; edges are tried in canonical order.
pub fn minimum_spanning_forest(graph: &AdjacencyGraph) -> SpanningForest {
    let nodes: Vec<StationId> = graph.nodes().cloned().collect();
    let slots = slot_map(&nodes);
    let candidates = graph
        .edges()
        .map(|(a, b)| Candidate {
            a: slots[a],
            b: slots[b],
            weight: 1.0,
        })
        .collect();
    kruskal(nodes, candidates)
}

/// Minimum-weight spanning forest with planar edge lengths from `points`.
pub fn weighted_spanning_forest(
    graph: &AdjacencyGraph,
    points: &PointSet,
) -> GraphResult<SpanningForest> {
    let nodes: Vec<StationId> = graph.nodes().cloned().collect();
    let slots = slot_map(&nodes);
    let mut candidates = Vec::with_capacity(graph.edge_count());
    for (a, b) in graph.edges() {
        let pa = points
            .position_of(a)
            .ok_or_else(|| GraphError::MissingCoordinates { station: a.clone() })?;
        let pb = points
            .position_of(b)
            .ok_or_else(|| GraphError::MissingCoordinates { station: b.clone() })?;
        candidates.push(Candidate {
            a: slots[a],
            b: slots[b],
            weight: (pa - pb).norm(),
        });
    }
    // stable: equal weights keep the canonical order
    candidates.sort_by(|x, y| x.weight.total_cmp(&y.weight));
    Ok(kruskal(nodes, candidates))
}

/// Dispatch on `cfg.weighting`. `points` is only read for Euclidean weights.
pub fn spanning_forest_with(
    graph: &AdjacencyGraph,
    cfg: MstCfg,
    points: &PointSet,
) -> GraphResult<SpanningForest> {
    match cfg.weighting {
        EdgeWeighting::Uniform => Ok(minimum_spanning_forest(graph)),
        EdgeWeighting::Euclidean => weighted_spanning_forest(graph, points),
    }
}

fn slot_map(nodes: &[StationId]) -> BTreeMap<&StationId, usize> {
    nodes.iter().enumerate().map(|(k, id)| (id, k)).collect()
}

fn kruskal(nodes: Vec<StationId>, candidates: Vec<Candidate>) -> SpanningForest {
    let mut dsu = DisjointSet::new(nodes.len());
    let target = nodes.len().saturating_sub(1);
    let mut edges = Vec::with_capacity(target);
    let mut total_weight = 0.0;
    for c in candidates {
        if edges.len() == target {
            break;
        }
        if dsu.union(c.a, c.b) {
            edges.push((nodes[c.a].clone(), nodes[c.b].clone()));
            total_weight += c.weight;
        }
    }
    let forest = SpanningForest {
        components: dsu.sets(),
        edges,
        total_weight,
        nodes,
    };
    debug!(
        nodes = forest.nodes.len(),
        edges = forest.edges.len(),
        components = forest.components,
        "spanning forest built"
    );
    if let Some(w) = forest.disconnected() {
        warn!(components = w.components, nodes = w.nodes, "{w}");
    }
    forest
}
