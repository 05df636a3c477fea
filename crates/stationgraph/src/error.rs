//! Error taxonomy shared by the geometry and graph stages.
//!
//! Geometry errors abort only the computation that raised them; callers decide
//! whether to skip, relax filters, or retry. Non-fatal conditions (rejected
//! stations, disconnected forests) are values, not errors: see
//! `station::StationRejection` and `spanning::DisconnectedGraph`.

use thiserror::Error;

use crate::station::StationId;

/// Minimum number of distinct points for any triangulation-based computation.
pub const MIN_POINTS: usize = 3;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("insufficient data: need at least {required} usable points, found {found}")]
    InsufficientData { found: usize, required: usize },

    #[error("degenerate geometry over {points} points ({distinct} distinct positions): {reason}")]
    DegenerateGeometry {
        points: usize,
        distinct: usize,
        reason: String,
    },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("station {station} has no coordinates; cannot weight its edges")]
    MissingCoordinates { station: StationId },
}

pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    pub(crate) fn insufficient(found: usize) -> Self {
        Self::InsufficientData {
            found,
            required: MIN_POINTS,
        }
    }

    pub(crate) fn degenerate(points: usize, distinct: usize, reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            points,
            distinct,
            reason: reason.into(),
        }
    }
}

/// Malformed station or adjacency snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("reading snapshot: {0}")]
    Io(#[from] std::io::Error),
}
