//! Planar neighbor graph via Delaunay triangulation.
//!
//! Purpose
//! - Derive an `AdjacencyGraph` from station coordinates: two stations are
//!   neighbors iff they share a Delaunay edge.
//! - Offer the alternate input path (`AdjacencyGraph::from_adjacency_lists`)
//!   for precomputed adjacency snapshots.
//!
//! Assumptions and conventions
//! - Triangulation is spade's incremental Delaunay with exact predicates;
//!   coincident stations are merged (first one wins), collinear sets fail with
//!   `GraphError::DegenerateGeometry`.
//! - Coordinates are planar `(lat, lon)`; no projection.

mod build;
pub(crate) mod delaunay;
mod graph;

pub use build::{build_delaunay_graph, DelaunayGraph};
pub use delaunay::Coincident;
pub use graph::{AdjacencyGraph, AdjacencyLists};
