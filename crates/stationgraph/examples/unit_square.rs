//! Run the whole pipeline on four stations at the corners of a unit square
//! and print every artifact as JSON.
//!
//! Usage:
//!   cargo run -p stationgraph --example unit_square
//!   cargo run -p stationgraph --example unit_square -- euclidean

use stationgraph::prelude::*;

fn main() {
    let weighting = match std::env::args().nth(1).as_deref() {
        Some("euclidean") => EdgeWeighting::Euclidean,
        _ => EdgeWeighting::Uniform,
    };
    let snapshot = StationSnapshot::new(vec![
        Station::new(1u64, 0.0, 0.0, 10),
        Station::new(2u64, 1.0, 0.0, 20),
        Station::new(3u64, 1.0, 1.0, 30),
        Station::new(4u64, 0.0, 1.0, 5),
    ]);
    let cfg = AnalysisCfg {
        mst: MstCfg { weighting },
        ..AnalysisCfg::default()
    };
    let analysis = match analyze(&snapshot, None, &cfg) {
        Ok(a) => a,
        Err(err) => {
            eprintln!("analysis failed: {err}");
            return;
        }
    };
    let show = |label: &str, value: serde_json::Result<String>| match value {
        Ok(s) => println!("{label}: {s}"),
        Err(err) => eprintln!("{label}: {err}"),
    };
    show("adjacency", serde_json::to_string(&analysis.graph));
    show("index", serde_json::to_string(&analysis.index));
    show("summary", serde_json::to_string(&analysis.index.summary()));
    show("forest", serde_json::to_string(&analysis.forest));
    if let Some(Ok(vor)) = &analysis.voronoi {
        show("voronoi", serde_json::to_string(&vor.cells));
    }
}
