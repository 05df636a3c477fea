//! Adjacency graph from Delaunay triangles.

use serde::Serialize;
use spade::Triangulation;

use super::delaunay::{triangulate, Coincident};
use super::graph::AdjacencyGraph;
use crate::error::GraphResult;
use crate::station::{PointSet, StationId};

/// Delaunay-derived graph plus the triangles it came from.
#[derive(Clone, Debug, Serialize)]
pub struct DelaunayGraph {
    pub graph: AdjacencyGraph,
    /// Each triangle as a sorted id triple; the list itself is sorted.
    pub triangles: Vec<[StationId; 3]>,
    /// Stations merged into an earlier station at the same position.
    pub coincident: Vec<Coincident>,
}

/// Build the planar adjacency graph of a point set.
///
/// Every triangle contributes its three edges, inserted undirected and
/// deduplicated, so a station's degree is its number of distinct Delaunay
/// neighbors (not its triangle incidences).
pub fn build_delaunay_graph(points: &PointSet) -> GraphResult<DelaunayGraph> {
    let triangulated = triangulate(points)?;
    let stations = points.stations();
    let mut graph = AdjacencyGraph::default();
    for v in triangulated.tri.vertices() {
        graph.insert_node(stations[v.data().slot].id.clone());
    }
    let mut triangles = Vec::with_capacity(triangulated.tri.num_inner_faces());
    for face in triangulated.tri.inner_faces() {
        let [a, b, c] = face.vertices().map(|v| stations[v.data().slot].id.clone());
        graph.insert_edge(a.clone(), b.clone());
        graph.insert_edge(b.clone(), c.clone());
        graph.insert_edge(c.clone(), a.clone());
        let mut tri = [a, b, c];
        tri.sort();
        triangles.push(tri);
    }
    triangles.sort();
    Ok(DelaunayGraph {
        graph,
        triangles,
        coincident: triangulated.coincident,
    })
}
