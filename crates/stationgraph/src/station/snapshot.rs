//! Serde input formats: station snapshots and precomputed adjacency lists.

use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

use super::types::{Station, StationId};
use crate::error::SnapshotError;

/// Accepted station document shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum StationDoc {
    /// GBFS `station_information` feed.
    Gbfs { data: StationList },
    Flat(StationList),
    Bare(Vec<Station>),
}

#[derive(Deserialize)]
struct StationList {
    stations: Vec<Station>,
}

/// Static list of stations as delivered by the data source.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StationSnapshot {
    pub stations: Vec<Station>,
}

impl StationSnapshot {
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    /// Parse a GBFS envelope (`{"data": {"stations": [..]}}`), a flat
    /// `{"stations": [..]}` object, or a bare array of station records.
    pub fn from_json_str(raw: &str) -> Result<Self, SnapshotError> {
        let doc: StationDoc = serde_json::from_str(raw)?;
        Ok(Self::from_doc(doc))
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, SnapshotError> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        Self::from_json_str(&raw)
    }

    fn from_doc(doc: StationDoc) -> Self {
        let stations = match doc {
            StationDoc::Gbfs { data } => data.stations,
            StationDoc::Flat(list) => list.stations,
            StationDoc::Bare(stations) => stations,
        };
        Self { stations }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// Precomputed adjacency: station id → neighbor ids, as written by
/// `AdjacencyGraph::to_adjacency_lists`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdjacencySnapshot {
    pub lists: BTreeMap<StationId, Vec<StationId>>,
}

impl AdjacencySnapshot {
    pub fn from_json_str(raw: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_reader(reader)?)
    }
}
