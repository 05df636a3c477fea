//! One-call pipeline over a station snapshot.
//!
//! Stage order: `PointSet` → graph (Delaunay, or a precomputed adjacency
//! snapshot) → {distribution index, spanning forest}; `PointSet` → Voronoi,
//! independently. A graph failure aborts the dependent stages and is returned;
//! a Voronoi failure is kept in `Analysis::voronoi` so the other artifacts
//! survive it.

use tracing::{info, warn};

use crate::error::GraphResult;
use crate::index::{distribution_index, CapacityTable, DistributionIndex, IndexCfg};
use crate::spanning::{spanning_forest_with, MstCfg, SpanningForest};
use crate::station::{AdjacencySnapshot, PointSet, StationSnapshot};
use crate::triangulation::{build_delaunay_graph, AdjacencyGraph, DelaunayGraph};
use crate::voronoi::{voronoi_partition, VoronoiPartition};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalysisCfg {
    pub index: IndexCfg,
    pub mst: MstCfg,
    /// Skip the Voronoi stage entirely when false.
    pub voronoi: bool,
}

impl Default for AnalysisCfg {
    fn default() -> Self {
        Self {
            index: IndexCfg::default(),
            mst: MstCfg::default(),
            voronoi: true,
        }
    }
}

/// All artifacts of one snapshot.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub points: PointSet,
    /// `None` when the graph came from a precomputed adjacency snapshot.
    pub delaunay: Option<DelaunayGraph>,
    pub graph: AdjacencyGraph,
    pub capacities: CapacityTable,
    pub index: DistributionIndex,
    pub forest: SpanningForest,
    /// `None` when disabled in the config.
    pub voronoi: Option<GraphResult<VoronoiPartition>>,
}

/// Run every stage on `snapshot`.
///
/// With `adjacency`, the Delaunay stage is bypassed and the graph is read from
/// the snapshot; capacities and the median still come from `snapshot`.
pub fn analyze(
    snapshot: &StationSnapshot,
    adjacency: Option<&AdjacencySnapshot>,
    cfg: &AnalysisCfg,
) -> GraphResult<Analysis> {
    cfg.index.validate()?;
    let points = PointSet::from_stations(&snapshot.stations);
    let capacities = CapacityTable::from_stations(&snapshot.stations);
    info!(
        stations = snapshot.len(),
        usable = points.len(),
        rejected = points.rejected().len(),
        "point set ready"
    );

    let (delaunay, graph) = match adjacency {
        Some(lists) => (None, AdjacencyGraph::from_snapshot(lists)),
        None => {
            let dg = build_delaunay_graph(&points)?;
            let graph = dg.graph.clone();
            (Some(dg), graph)
        }
    };
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        precomputed = adjacency.is_some(),
        "adjacency graph ready"
    );

    let index = distribution_index(&graph, &capacities, cfg.index)?;
    let forest = spanning_forest_with(&graph, cfg.mst, &points)?;

    let voronoi = cfg.voronoi.then(|| {
        let result = voronoi_partition(&points);
        if let Err(err) = &result {
            warn!(%err, "voronoi stage failed");
        }
        result
    });

    Ok(Analysis {
        points,
        delaunay,
        graph,
        capacities,
        index,
        forest,
        voronoi,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spanning::EdgeWeighting;
    use crate::station::{Station, StationId};
    use crate::GraphError;

    fn unit_square() -> StationSnapshot {
        StationSnapshot::new(vec![
            Station::new(1u64, 0.0, 0.0, 10),
            Station::new(2u64, 1.0, 0.0, 20),
            Station::new(3u64, 1.0, 1.0, 30),
            Station::new(4u64, 0.0, 1.0, 5),
        ])
    }

    #[test]
    fn unit_square_end_to_end() {
        let a = analyze(&unit_square(), None, &AnalysisCfg::default()).unwrap();
        let dg = a.delaunay.as_ref().unwrap();
        assert_eq!(dg.triangles.len(), 2);
        assert_eq!(a.graph.edge_count(), 5);
        assert_eq!(a.forest.edges.len(), 3);
        assert!(a.forest.is_tree());
        assert_eq!(a.capacities.median(), 15.0);
        assert_eq!(a.index.len(), 4);
        assert!(a.index.iter().all(|(_, s)| s.is_finite()));
        let vor = a.voronoi.unwrap().unwrap();
        assert_eq!(vor.unbounded_count(), 4);
    }

    #[test]
    fn precomputed_adjacency_bypasses_triangulation() {
        // only two stations with coordinates: triangulation would fail
        let mut snap = unit_square();
        snap.stations[2].lat = None;
        snap.stations[3].lon = None;
        let adj = AdjacencySnapshot::from_json_str(r#"{"1": [2, 3], "2": [3], "4": []}"#).unwrap();
        let cfg = AnalysisCfg {
            voronoi: true,
            ..AnalysisCfg::default()
        };
        let a = analyze(&snap, Some(&adj), &cfg).unwrap();
        assert!(a.delaunay.is_none());
        assert_eq!(a.graph.node_count(), 4);
        assert_eq!(a.forest.components, 2);
        assert!(a.forest.disconnected().is_some());
        assert_eq!(a.points.missing_attribute_count(), 2);
        // voronoi failed on its own, the rest survived
        assert!(matches!(
            a.voronoi,
            Some(Err(GraphError::InsufficientData { found: 2, .. }))
        ));
        // isolated station 4: Nv = 0, capacity 5 < median 15
        let expected = 0.5 * -1.0 + 0.5 * (10.0 / 15.0);
        assert!((a.index.get(&StationId::Num(4)) - expected).abs() < 1e-12);
    }

    #[test]
    fn graph_errors_abort_the_pipeline() {
        let snap = StationSnapshot::new(vec![Station::new(1u64, 0.0, 0.0, 1)]);
        let err = analyze(&snap, None, &AnalysisCfg::default()).unwrap_err();
        assert_eq!(
            err,
            GraphError::InsufficientData {
                found: 1,
                required: 3
            }
        );
        let bad_alpha = AnalysisCfg {
            index: IndexCfg { alpha: 2.0 },
            ..AnalysisCfg::default()
        };
        assert!(analyze(&unit_square(), None, &bad_alpha).is_err());
    }

    #[test]
    fn euclidean_forest_through_pipeline() {
        let cfg = AnalysisCfg {
            mst: MstCfg {
                weighting: EdgeWeighting::Euclidean,
            },
            voronoi: false,
            ..AnalysisCfg::default()
        };
        let a = analyze(&unit_square(), None, &cfg).unwrap();
        assert!(a.voronoi.is_none());
        assert_eq!(a.forest.edges.len(), 3);
        // three unit sides, never the diagonal
        assert!((a.forest.total_weight - 3.0).abs() < 1e-12);
    }
}
