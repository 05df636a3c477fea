//! Voronoi cell and partition types.

use std::collections::BTreeMap;

use nalgebra::Vector2;
use serde::Serialize;

use crate::station::StationId;
use crate::triangulation::Coincident;

/// Service region of one station.
///
/// Invariants:
/// - Bounded cells: `vertices` is the closed ring in CCW order (first vertex
///   not repeated), `rays` is `None`.
/// - Unbounded cells (station on the convex hull): `vertices` is the finite
///   chain of the boundary in CCW order, and `rays = [first, last]` holds unit
///   directions of the two infinite edges, leaving `vertices[0]` and
///   `vertices[last]` respectively. No clipping is applied.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VoronoiCell {
    pub vertices: Vec<Vector2<f64>>,
    pub unbounded: bool,
    pub rays: Option<[Vector2<f64>; 2]>,
}

impl VoronoiCell {
    /// Shoelace area of a bounded cell; `None` for unbounded cells.
    pub fn area(&self) -> Option<f64> {
        if self.unbounded {
            return None;
        }
        let n = self.vertices.len();
        let twice: f64 = (0..n)
            .map(|k| {
                let p = self.vertices[k];
                let q = self.vertices[(k + 1) % n];
                p.x * q.y - p.y * q.x
            })
            .sum();
        Some(twice / 2.0)
    }
}

/// Station id → cell, for every station that owns a triangulation vertex.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VoronoiPartition {
    pub cells: BTreeMap<StationId, VoronoiCell>,
    /// Stations sharing a position with an earlier one; they have no cell.
    pub coincident: Vec<Coincident>,
}

impl VoronoiPartition {
    #[inline]
    pub fn get(&self, id: &StationId) -> Option<&VoronoiCell> {
        self.cells.get(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn unbounded_count(&self) -> usize {
        self.cells.values().filter(|c| c.unbounded).count()
    }
}
