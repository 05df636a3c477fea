//! Cells from the Delaunay dual: circumcenters of the triangles around each site.

use std::collections::BTreeMap;

use nalgebra::Vector2;
use spade::handles::VertexHandle;
use spade::Triangulation;
use tracing::debug;

use super::types::{VoronoiCell, VoronoiPartition};
use crate::error::{GraphError, GraphResult};
use crate::station::PointSet;
use crate::triangulation::delaunay::{triangulate, Site};

/// Relative tolerance for merging coincident circumcenters (cocircular sites).
const MERGE_EPS: f64 = 1e-12;

/// Voronoi partition of a point set, one cell per distinct position.
///
/// Errors match `build_delaunay_graph`: `InsufficientData` below 3 points,
/// `DegenerateGeometry` for collinear/coincident-only inputs, or a sliver whose
/// circumcenter overflows `f64`.
pub fn voronoi_partition(points: &PointSet) -> GraphResult<VoronoiPartition> {
    let triangulated = triangulate(points)?;
    let stations = points.stations();
    let mut cells = BTreeMap::new();
    for v in triangulated.tri.vertices() {
        let cell = cell_of(v).ok_or_else(|| {
            GraphError::degenerate(
                points.len(),
                triangulated.tri.num_vertices(),
                format!(
                    "circumcenter overflows around station {}",
                    stations[v.data().slot].id
                ),
            )
        })?;
        cells.insert(stations[v.data().slot].id.clone(), cell);
    }
    let partition = VoronoiPartition {
        cells,
        coincident: triangulated.coincident,
    };
    debug!(
        cells = partition.len(),
        unbounded = partition.unbounded_count(),
        "voronoi partition built"
    );
    Ok(partition)
}

fn to_vec(p: spade::Point2<f64>) -> Vector2<f64> {
    Vector2::new(p.x, p.y)
}

/// Walk the faces around `v` in CCW order; the face left of each outgoing edge
/// lies between that edge and the next one.
fn cell_of(v: VertexHandle<'_, Site>) -> Option<VoronoiCell> {
    let center = to_vec(v.position());
    let mut out: Vec<_> = v
        .out_edges()
        .map(|e| {
            let d = to_vec(e.to().position()) - center;
            (d.y.atan2(d.x), d, e)
        })
        .collect();
    out.sort_by(|a, b| a.0.total_cmp(&b.0));
    let n = out.len();
    let outer = out.iter().position(|(_, _, e)| e.face().is_outer());
    // start right after the outer face so hull cells form one finite chain
    let start = outer.map_or(0, |j| (j + 1) % n);
    let mut vertices: Vec<Vector2<f64>> = Vec::with_capacity(n);
    for k in 0..n {
        let (_, _, e) = &out[(start + k) % n];
        let Some(face) = e.face().as_inner() else {
            continue;
        };
        let cc = to_vec(face.circumcenter());
        if !(cc.x.is_finite() && cc.y.is_finite()) {
            return None;
        }
        push_distinct(&mut vertices, cc);
    }
    let Some(j) = outer else {
        if vertices.len() > 1 && near(vertices[0], vertices[vertices.len() - 1]) {
            vertices.pop();
        }
        return Some(VoronoiCell {
            vertices,
            unbounded: false,
            rays: None,
        });
    };
    // First chain vertex belongs to the face left of out[j + 1]: its infinite
    // edge runs to the right of that hull edge. The last one belongs to the
    // face right of out[j]: its infinite edge runs to the left of out[j].
    let d_first = out[(j + 1) % n].1;
    let d_last = out[j].1;
    let first = Vector2::new(d_first.y, -d_first.x).normalize();
    let last = Vector2::new(-d_last.y, d_last.x).normalize();
    Some(VoronoiCell {
        vertices,
        unbounded: true,
        rays: Some([first, last]),
    })
}

fn near(p: Vector2<f64>, q: Vector2<f64>) -> bool {
    (p - q).norm() <= MERGE_EPS * (1.0 + p.norm().max(q.norm()))
}

fn push_distinct(ring: &mut Vec<Vector2<f64>>, p: Vector2<f64>) {
    if ring.last().is_some_and(|&q| near(p, q)) {
        return;
    }
    ring.push(p);
}
