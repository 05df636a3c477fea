//! Stations, snapshots, and the validated point set.
//!
//! Purpose
//! - Replace loosely-typed station dictionaries with an explicit `Station`
//!   (required id, optional coordinates/capacity/name declared up front).
//! - Provide one filtering step (`PointSet::from_stations`) that decides which
//!   stations take part in geometry and records why the others do not.
//!
//! Layout: `types.rs` (ids and stations), `snapshot.rs` (serde input formats),
//! `point_set.rs` (validated coordinates).

mod point_set;
mod snapshot;
mod types;

pub use point_set::{PointSet, StationRejection};
pub use snapshot::{AdjacencySnapshot, StationSnapshot};
pub use types::{capacity_from_f64, Station, StationId, UNKNOWN_NAME};
