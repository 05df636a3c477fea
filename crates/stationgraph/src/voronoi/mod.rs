//! Voronoi service-area partition (dual of the Delaunay triangulation).
//!
//! Purpose
//! - Give each station the region of points closer to it than to any other
//!   station, as plain vertex data for an external renderer.
//!
//! Conventions
//! - Cell vertices are circumcenters of the Delaunay triangles around a
//!   station, in CCW order; coincident circumcenters (cocircular stations)
//!   are merged.
//! - Hull stations have unbounded cells. They are flagged and carry their two
//!   ray directions instead of being clipped or dropped.
//! - Same triangulation as `triangulation::build_delaunay_graph`, hence the
//!   same failure modes and the same coincident-station handling.

mod build;
mod types;

pub use build::voronoi_partition;
pub use types::{VoronoiCell, VoronoiPartition};

#[cfg(test)]
mod tests;
