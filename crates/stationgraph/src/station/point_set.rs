//! Validated planar point set.
//!
//! Coordinates are used as planar `(x, y) = (lat, lon)` without projection.
//! The filter keeps the first record per id and drops stations without both
//! finite coordinates; every drop is recorded as a `StationRejection`.

use std::collections::{BTreeMap, BTreeSet};

use nalgebra::Vector2;
use thiserror::Error;
use tracing::warn;

use super::types::{Station, StationId};
use crate::error::{GraphError, GraphResult, MIN_POINTS};

/// Why a station was left out of the point set. Non-fatal; counted and reported.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StationRejection {
    #[error("station {station} is missing its {attribute}")]
    MissingAttribute {
        station: StationId,
        attribute: &'static str,
    },

    #[error("station {station} has a non-finite {attribute}")]
    NonFiniteAttribute {
        station: StationId,
        attribute: &'static str,
    },

    #[error("station {station} appears more than once; later record ignored")]
    DuplicateId { station: StationId },
}

/// Ordered stations with usable coordinates.
///
/// Invariants:
/// - `stations[k]` sits at `positions[k]`; ids are unique.
/// - Input order is preserved (it fixes triangulation insertion order).
#[derive(Clone, Debug, Default)]
pub struct PointSet {
    stations: Vec<Station>,
    positions: Vec<Vector2<f64>>,
    slots: BTreeMap<StationId, usize>,
    rejected: Vec<StationRejection>,
}

impl PointSet {
    /// Filter stations into a point set (the single validation step).
    pub fn from_stations<'a, I>(stations: I) -> Self
    where
        I: IntoIterator<Item = &'a Station>,
    {
        let mut out = PointSet::default();
        let mut seen: BTreeSet<&StationId> = BTreeSet::new();
        for station in stations {
            if !seen.insert(&station.id) {
                out.rejected.push(StationRejection::DuplicateId {
                    station: station.id.clone(),
                });
                continue;
            }
            match checked_position(station) {
                Ok(p) => {
                    out.slots.insert(station.id.clone(), out.stations.len());
                    out.stations.push(station.clone());
                    out.positions.push(p);
                }
                Err(rejection) => out.rejected.push(rejection),
            }
        }
        if !out.rejected.is_empty() {
            warn!(
                accepted = out.stations.len(),
                rejected = out.rejected.len(),
                "stations filtered out of the point set"
            );
        }
        out
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    #[inline]
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    #[inline]
    pub fn positions(&self) -> &[Vector2<f64>] {
        &self.positions
    }

    /// Station and position pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&Station, Vector2<f64>)> + '_ {
        self.stations.iter().zip(self.positions.iter().copied())
    }

    pub fn position_of(&self, id: &StationId) -> Option<Vector2<f64>> {
        self.slots.get(id).map(|&k| self.positions[k])
    }

    #[inline]
    pub fn rejected(&self) -> &[StationRejection] {
        &self.rejected
    }

    /// Number of stations dropped for missing or non-finite coordinates.
    pub fn missing_attribute_count(&self) -> usize {
        self.rejected
            .iter()
            .filter(|r| !matches!(r, StationRejection::DuplicateId { .. }))
            .count()
    }

    /// Precondition for triangulation-based stages.
    pub fn require_triangulable(&self) -> GraphResult<()> {
        if self.len() < MIN_POINTS {
            return Err(GraphError::insufficient(self.len()));
        }
        Ok(())
    }
}

fn checked_position(station: &Station) -> Result<Vector2<f64>, StationRejection> {
    let lat = checked_coordinate(station, station.lat, "latitude")?;
    let lon = checked_coordinate(station, station.lon, "longitude")?;
    Ok(Vector2::new(lat, lon))
}

fn checked_coordinate(
    station: &Station,
    value: Option<f64>,
    attribute: &'static str,
) -> Result<f64, StationRejection> {
    match value {
        None => Err(StationRejection::MissingAttribute {
            station: station.id.clone(),
            attribute,
        }),
        Some(v) if !v.is_finite() => Err(StationRejection::NonFiniteAttribute {
            station: station.id.clone(),
            attribute,
        }),
        Some(v) => Ok(v),
    }
}
