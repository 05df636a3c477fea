//! Shared Delaunay triangulation over a `PointSet` (spade).
//!
//! Both the adjacency builder and the Voronoi mapper start here, so they agree
//! on which station owns which vertex when coordinates coincide.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::Serialize;
use spade::{DelaunayTriangulation, HasPosition, Point2, Triangulation};
use tracing::{debug, warn};

use crate::error::{GraphError, GraphResult, MIN_POINTS};
use crate::station::{PointSet, StationId};

/// Triangulation vertex: a position plus the slot of its station in the point set.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Site {
    pub position: Point2<f64>,
    pub slot: usize,
}

impl HasPosition for Site {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        self.position
    }
}

/// A station whose coordinates coincide with an earlier station's.
///
/// The earlier station owns the triangulation vertex; this one gets no graph
/// node and no Voronoi cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Coincident {
    pub station: StationId,
    pub merged_into: StationId,
}

pub(crate) struct Triangulated {
    pub tri: DelaunayTriangulation<Site>,
    pub coincident: Vec<Coincident>,
}

/// Position key for exact-duplicate detection; `-0.0` and `0.0` collide.
fn position_key(x: f64, y: f64) -> (u64, u64) {
    ((x + 0.0).to_bits(), (y + 0.0).to_bits())
}

/// Deduplicate positions (first station wins), then bulk-load the rest.
///
/// Errors:
/// - `InsufficientData` for fewer than 3 points.
/// - `DegenerateGeometry` when fewer than 3 distinct positions remain, when all
///   points are collinear (no triangle), or when spade rejects a coordinate.
pub(crate) fn triangulate(points: &PointSet) -> GraphResult<Triangulated> {
    points.require_triangulable()?;
    let stations = points.stations();
    let mut owners: HashMap<(u64, u64), usize> = HashMap::with_capacity(points.len());
    let mut sites = Vec::with_capacity(points.len());
    let mut coincident = Vec::new();
    for (slot, p) in points.positions().iter().enumerate() {
        match owners.entry(position_key(p.x, p.y)) {
            Entry::Occupied(owner) => coincident.push(Coincident {
                station: stations[slot].id.clone(),
                merged_into: stations[*owner.get()].id.clone(),
            }),
            Entry::Vacant(free) => {
                free.insert(slot);
                sites.push(Site {
                    position: Point2::new(p.x, p.y),
                    slot,
                });
            }
        }
    }
    if !coincident.is_empty() {
        warn!(
            coincident = coincident.len(),
            "stations share coordinates with an earlier station"
        );
    }
    let distinct = sites.len();
    if distinct < MIN_POINTS {
        return Err(GraphError::degenerate(
            points.len(),
            distinct,
            "fewer than 3 distinct positions",
        ));
    }
    let tri = DelaunayTriangulation::<Site>::bulk_load_stable(sites).map_err(|err| {
        GraphError::degenerate(
            points.len(),
            distinct,
            format!("triangulation rejected the input: {err:?}"),
        )
    })?;
    if tri.num_inner_faces() == 0 {
        return Err(GraphError::degenerate(
            points.len(),
            distinct,
            "all positions are collinear; no triangle exists",
        ));
    }
    debug!(
        points = points.len(),
        vertices = tri.num_vertices(),
        triangles = tri.num_inner_faces(),
        "delaunay triangulation built"
    );
    Ok(Triangulated { tri, coincident })
}
