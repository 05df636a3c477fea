//! Per-station distribution index (Ir).
//!
//! Purpose
//! - Score each graph node by how far its connectivity deviates from the
//!   6-neighbor baseline of a triangular lattice, blended with its capacity
//!   deficit relative to the network median.
//!
//! Formula (per station, `Nv` = degree, `C` = capacity, `C_med` = median):
//! - `Nv == 6` → `Ir = 0` exactly.
//! - otherwise `Ir = alpha * (Nv - 6) / 6 + (1 - alpha) * C_norm`, with
//!   `C_norm = max(C_med - C, 0) / C_med` when `C_med > 0`, else `0`.
//!
//! Conventions
//! - Asymmetric: surplus capacity never lowers the score. Unbounded above.
//! - The median is taken once per call over every station with a *known*
//!   capacity; even counts average the two middle values.
//! - Only graph nodes get an entry; `DistributionIndex::get` returns 0 for
//!   anything else. Graph nodes missing from the capacity table use `C = 0`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::station::{Station, StationId};
use crate::triangulation::AdjacencyGraph;

/// Reference degree of a perfect triangular lattice.
pub const REFERENCE_DEGREE: usize = 6;

/// Index configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndexCfg {
    /// Blend between the degree term (`alpha`) and the capacity term (`1 - alpha`).
    pub alpha: f64,
}

impl Default for IndexCfg {
    fn default() -> Self {
        Self { alpha: 0.5 }
    }
}

impl IndexCfg {
    pub fn validate(&self) -> GraphResult<()> {
        if !self.alpha.is_finite() || !(0.0..=1.0).contains(&self.alpha) {
            return Err(GraphError::InvalidParameter {
                name: "alpha",
                reason: format!("must lie in [0, 1], got {}", self.alpha),
            });
        }
        Ok(())
    }
}

/// Capacity lookup plus the population used for the median.
#[derive(Clone, Debug, Default)]
pub struct CapacityTable {
    by_id: BTreeMap<StationId, u32>,
    known: Vec<u32>,
}

impl CapacityTable {
    /// First record per id wins; only present capacities enter the median.
    pub fn from_stations<'a, I>(stations: I) -> Self
    where
        I: IntoIterator<Item = &'a Station>,
    {
        let mut table = CapacityTable::default();
        for s in stations {
            if table.by_id.contains_key(&s.id) {
                continue;
            }
            table.by_id.insert(s.id.clone(), s.capacity());
            if let Some(c) = s.capacity {
                table.known.push(c);
            }
        }
        table
    }

    /// Capacity with the default of 0 for unknown stations.
    #[inline]
    pub fn get(&self, id: &StationId) -> u32 {
        self.by_id.get(id).copied().unwrap_or(0)
    }

    pub fn median(&self) -> f64 {
        median(&self.known)
    }
}

/// Median of a capacity population (0 for an empty one).
pub fn median(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut v = values.to_vec();
    v.sort_unstable();
    let mid = v.len() / 2;
    if v.len() % 2 == 1 {
        f64::from(v[mid])
    } else {
        (f64::from(v[mid - 1]) + f64::from(v[mid])) / 2.0
    }
}

/// Score one station. `c_med <= 0` disables the capacity term.
pub fn distribution_score(neighbors: usize, capacity: u32, c_med: f64, alpha: f64) -> f64 {
    if neighbors == REFERENCE_DEGREE {
        return 0.0;
    }
    let reference = REFERENCE_DEGREE as f64;
    let nv_norm = (neighbors as f64 - reference) / reference;
    let c_norm = if c_med > 0.0 {
        (c_med - f64::from(capacity)).max(0.0) / c_med
    } else {
        0.0
    };
    alpha * nv_norm + (1.0 - alpha) * c_norm
}

/// Station id → Ir, one entry per graph node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistributionIndex {
    scores: BTreeMap<StationId, f64>,
}

impl DistributionIndex {
    /// Score of `id`, 0 for stations without an entry.
    #[inline]
    pub fn get(&self, id: &StationId) -> f64 {
        self.scores.get(id).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn contains(&self, id: &StationId) -> bool {
        self.scores.contains_key(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StationId, f64)> + '_ {
        self.scores.iter().map(|(id, &s)| (id, s))
    }

    pub fn summary(&self) -> IndexSummary {
        let mut summary = IndexSummary {
            count: self.scores.len(),
            ..IndexSummary::default()
        };
        if self.scores.is_empty() {
            return summary;
        }
        summary.min = f64::INFINITY;
        summary.max = f64::NEG_INFINITY;
        let mut total = 0.0;
        for &s in self.scores.values() {
            summary.min = summary.min.min(s);
            summary.max = summary.max.max(s);
            total += s;
            if s > 0.0 {
                summary.positive += 1;
            } else if s < 0.0 {
                summary.negative += 1;
            } else {
                summary.zero += 1;
            }
        }
        summary.mean = total / self.scores.len() as f64;
        summary
    }
}

/// Aggregate view for reports. Min/max/mean are 0 for an empty index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct IndexSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Over-connected or capacity-deficient stations.
    pub positive: usize,
    /// Under-connected stations.
    pub negative: usize,
    pub zero: usize,
}

/// Compute Ir for every node of `graph`.
pub fn distribution_index(
    graph: &AdjacencyGraph,
    capacities: &CapacityTable,
    cfg: IndexCfg,
) -> GraphResult<DistributionIndex> {
    cfg.validate()?;
    let c_med = capacities.median();
    let scores = graph
        .degrees()
        .map(|(id, nv)| {
            let score = distribution_score(nv, capacities.get(id), c_med, cfg.alpha);
            (id.clone(), score)
        })
        .collect();
    Ok(DistributionIndex { scores })
}
