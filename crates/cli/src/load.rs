//! Snapshot loading: JSON through the library, CSV/Parquet through polars.

use anyhow::{anyhow, Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use stationgraph::prelude::{AdjacencySnapshot, Station, StationId, StationSnapshot};
use stationgraph::station::{capacity_from_f64, UNKNOWN_NAME};

/// Load a station snapshot, picking the reader by file extension.
pub fn load_stations(path: &Path) -> Result<StationSnapshot> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let snapshot = match ext.as_deref() {
        Some("csv") => {
            let df = LazyCsvReader::new(path)
                .with_infer_schema_length(Some(100))
                .finish()?
                .collect()
                .with_context(|| format!("reading csv {}", path.display()))?;
            StationSnapshot::new(stations_from_frame(&df)?)
        }
        Some("parquet") => {
            let df = LazyFrame::scan_parquet(path, ScanArgsParquet::default())?
                .collect()
                .with_context(|| format!("reading parquet {}", path.display()))?;
            StationSnapshot::new(stations_from_frame(&df)?)
        }
        _ => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            StationSnapshot::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing station snapshot {}", path.display()))?
        }
    };
    tracing::info!(
        path = %path.display(),
        stations = snapshot.len(),
        "station snapshot loaded"
    );
    Ok(snapshot)
}

pub fn load_adjacency(path: &Path) -> Result<AdjacencySnapshot> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let snapshot = AdjacencySnapshot::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing adjacency snapshot {}", path.display()))?;
    tracing::info!(path = %path.display(), stations = snapshot.lists.len(), "adjacency loaded");
    Ok(snapshot)
}

/// Columns: `station_id`, `lat`, `lon`; `capacity` and `name` are optional.
/// Null cells map to missing attributes, which the point set later rejects.
/// Negative or fractional capacities become unknown, like in JSON snapshots.
fn stations_from_frame(df: &DataFrame) -> Result<Vec<Station>> {
    let ids = df.column("station_id")?.cast(&DataType::String)?;
    let lat = df.column("lat")?.cast(&DataType::Float64)?;
    let lon = df.column("lon")?.cast(&DataType::Float64)?;
    let capacity = match df.column("capacity") {
        Ok(col) => Some(col.cast(&DataType::Float64)?),
        Err(_) => None,
    };
    let names = match df.column("name") {
        Ok(col) => Some(col.cast(&DataType::String)?),
        Err(_) => None,
    };

    let ids = ids.str()?;
    let lat = lat.f64()?;
    let lon = lon.f64()?;
    let capacity = capacity.as_ref().map(|c| c.f64()).transpose()?;
    let names = names.as_ref().map(|c| c.str()).transpose()?;

    let mut stations = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let id = ids
            .get(row)
            .ok_or_else(|| anyhow!("row {row}: station_id is null"))?;
        let capacity = capacity.and_then(|c| c.get(row)).and_then(|raw| {
            let cap = capacity_from_f64(raw);
            if cap.is_none() {
                tracing::warn!(row, capacity = raw, "unusable capacity treated as unknown");
            }
            cap
        });
        stations.push(Station {
            id: StationId::parse(id),
            name: names
                .and_then(|n| n.get(row))
                .unwrap_or(UNKNOWN_NAME)
                .to_string(),
            lat: lat.get(row),
            lon: lon.get(row),
            capacity,
        });
    }
    Ok(stations)
}
