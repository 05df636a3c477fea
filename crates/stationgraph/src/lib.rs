//! Geometric-graph analysis of a bike-share station network.
//!
//! Purpose
//! - Turn a static station snapshot into plain structured artifacts: a planar
//!   neighbor graph (Delaunay), a per-station distribution index, a spanning
//!   backbone (Kruskal), and a Voronoi service-area partition.
//!
//! Why this design
//! - Every stage is a pure function of explicit inputs (no loaded-once tables),
//!   so synthetic inputs exercise exactly the code a real snapshot runs.
//! - Ordering is deterministic everywhere (`BTreeMap`/`BTreeSet` keyed by
//!   `StationId`), which makes the unweighted spanning tree reproducible.
//! - Presentation (maps, colors) stays outside: outputs are serde values.
//!
//! Code cross-refs: `station::PointSet`, `triangulation::build_delaunay_graph`,
//! `index::distribution_index`, `spanning::spanning_forest_with`,
//! `voronoi::voronoi_partition`, `analysis::analyze`.

pub mod analysis;
pub mod error;
pub mod index;
pub mod spanning;
pub mod station;
pub mod triangulation;
pub mod voronoi;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{GraphError, GraphResult, SnapshotError};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::analysis::{analyze, Analysis, AnalysisCfg};
    pub use crate::index::{distribution_index, CapacityTable, DistributionIndex, IndexCfg};
    pub use crate::spanning::{
        minimum_spanning_forest, spanning_forest_with, DisconnectedGraph, EdgeWeighting, MstCfg,
        SpanningForest,
    };
    pub use crate::station::{AdjacencySnapshot, PointSet, Station, StationId, StationSnapshot};
    pub use crate::triangulation::{build_delaunay_graph, AdjacencyGraph, DelaunayGraph};
    pub use crate::voronoi::{voronoi_partition, VoronoiCell, VoronoiPartition};
    pub use crate::{GraphError, GraphResult};
}
