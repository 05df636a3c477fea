use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use stationgraph::prelude::*;
use tracing_subscriber::fmt::SubscriberBuilder;

mod artifacts;
mod load;
mod provenance;

use artifacts::write_artifact;
use provenance::Payload;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Station network analysis runner")]
struct Cmd {
    /// Optional run tag; propagated to logs and provenance sidecars
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Run the full pipeline and write every artifact under --out-dir
    Analyze(AnalyzeArgs),
    /// Write only the Delaunay adjacency lists of a station snapshot
    Adjacency {
        #[arg(long)]
        stations: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block, with an index summary if --stations is set
    Report {
        #[arg(long)]
        stations: Option<PathBuf>,
        #[arg(long, default_value_t = 0.5)]
        alpha: f64,
    },
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Station snapshot (.json, .csv or .parquet)
    #[arg(long)]
    stations: PathBuf,
    /// Precomputed adjacency lists; skips the triangulation
    #[arg(long)]
    adjacency: Option<PathBuf>,
    #[arg(long)]
    out_dir: PathBuf,
    /// Weight of the connectivity term in the distribution index
    #[arg(long, default_value_t = 0.5)]
    alpha: f64,
    #[arg(long, value_enum, default_value_t = Weighting::Uniform)]
    weighting: Weighting,
    #[arg(long)]
    skip_voronoi: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Weighting {
    Uniform,
    Euclidean,
}

impl From<Weighting> for EdgeWeighting {
    fn from(w: Weighting) -> Self {
        match w {
            Weighting::Uniform => EdgeWeighting::Uniform,
            Weighting::Euclidean => EdgeWeighting::Euclidean,
        }
    }
}

impl AnalyzeArgs {
    fn cfg(&self) -> AnalysisCfg {
        AnalysisCfg {
            index: IndexCfg { alpha: self.alpha },
            mst: MstCfg {
                weighting: self.weighting.into(),
            },
            voronoi: !self.skip_voronoi,
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let tag = cmd.tag.as_deref();
    match cmd.action {
        Action::Analyze(args) => run_analyze(&args, tag).map(|_| ()),
        Action::Adjacency { stations, out } => run_adjacency(&stations, &out, tag),
        Action::Report { stations, alpha } => report(stations.as_deref(), alpha, tag),
    }
}

/// Returns the paths of the artifacts written, in write order.
fn run_analyze(args: &AnalyzeArgs, tag: Option<&str>) -> Result<Vec<PathBuf>> {
    tracing::info!(
        stations = %args.stations.display(),
        out_dir = %args.out_dir.display(),
        tag = ?tag,
        "analyze"
    );
    let snapshot = load::load_stations(&args.stations)?;
    let adjacency = args
        .adjacency
        .as_deref()
        .map(load::load_adjacency)
        .transpose()?;
    let cfg = args.cfg();
    let analysis = analyze(&snapshot, adjacency.as_ref(), &cfg)
        .with_context(|| format!("analyzing {}", args.stations.display()))?;

    if let Some(split) = analysis.forest.disconnected() {
        tracing::warn!(%split, "spanning forest instead of a tree");
    }
    let voronoi_error = match &analysis.voronoi {
        Some(Err(err)) => Some(err.to_string()),
        _ => None,
    };
    let params = json!({
        "alpha": args.alpha,
        "weighting": format!("{:?}", args.weighting).to_lowercase(),
        "voronoi": cfg.voronoi,
        "stations": snapshot.len(),
        "usable": analysis.points.len(),
        "rejected": analysis.points.rejected().len(),
        "voronoi_error": voronoi_error,
    });
    let payload = || {
        let mut p = Payload::new(params.clone())
            .tagged(tag)
            .with_input(&args.stations);
        if let Some(adj) = &args.adjacency {
            p = p.with_input(adj);
        }
        p
    };

    let out = &args.out_dir;
    let mut written = Vec::new();
    let path = out.join("adjacency.json");
    write_artifact(&path, &analysis.graph.to_adjacency_lists(), payload())?;
    written.push(path);
    let path = out.join("distribution_index.json");
    write_artifact(&path, &analysis.index, payload())?;
    written.push(path);
    let path = out.join("spanning_forest.json");
    write_artifact(&path, &analysis.forest, payload())?;
    written.push(path);
    if let Some(dg) = &analysis.delaunay {
        let path = out.join("triangles.json");
        write_artifact(&path, &dg.triangles, payload())?;
        written.push(path);
    }
    if let Some(Ok(partition)) = &analysis.voronoi {
        let path = out.join("voronoi.json");
        write_artifact(&path, &partition.cells, payload())?;
        written.push(path);
    }

    let summary = analysis.index.summary();
    tracing::info!(
        nodes = analysis.graph.node_count(),
        edges = analysis.graph.edge_count(),
        forest_edges = analysis.forest.edges.len(),
        positive = summary.positive,
        negative = summary.negative,
        artifacts = written.len(),
        "analysis done"
    );
    Ok(written)
}

fn run_adjacency(stations: &Path, out: &Path, tag: Option<&str>) -> Result<()> {
    tracing::info!(stations = %stations.display(), out = %out.display(), "adjacency");
    let snapshot = load::load_stations(stations)?;
    let points = PointSet::from_stations(&snapshot.stations);
    let dg = build_delaunay_graph(&points)
        .with_context(|| format!("triangulating {}", stations.display()))?;
    let payload = Payload::new(json!({
        "usable": points.len(),
        "coincident": dg.coincident.len(),
    }))
    .tagged(tag)
    .with_input(stations);
    write_artifact(out, &dg.graph.to_adjacency_lists(), payload)?;
    Ok(())
}

fn report(stations: Option<&Path>, alpha: f64, tag: Option<&str>) -> Result<()> {
    let summary = match stations {
        Some(path) => Some(index_summary(path, alpha)?),
        None => None,
    };
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "stationgraph": stationgraph::VERSION,
        "tag": tag,
        "params": { "alpha": alpha },
        "index": summary,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn index_summary(stations: &Path, alpha: f64) -> Result<Value> {
    let snapshot = load::load_stations(stations)?;
    let cfg = AnalysisCfg {
        index: IndexCfg { alpha },
        voronoi: false,
        ..AnalysisCfg::default()
    };
    let analysis = analyze(&snapshot, None, &cfg)?;
    Ok(json!({
        "summary": analysis.index.summary(),
        "median_capacity": analysis.capacities.median(),
        "components": analysis.forest.components,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SQUARE: &str = r#"{"data": {"stations": [
        {"station_id": 1, "name": "A", "lat": 0.0, "lon": 0.0, "capacity": 10},
        {"station_id": 2, "name": "B", "lat": 1.0, "lon": 0.0, "capacity": 20},
        {"station_id": 3, "name": "C", "lat": 1.0, "lon": 1.0, "capacity": 30},
        {"station_id": 4, "name": "D", "lat": 0.0, "lon": 1.0, "capacity": 5}
    ]}}"#;

    fn args(stations: PathBuf, out_dir: PathBuf) -> AnalyzeArgs {
        AnalyzeArgs {
            stations,
            adjacency: None,
            out_dir,
            alpha: 0.5,
            weighting: Weighting::Uniform,
            skip_voronoi: false,
        }
    }

    #[test]
    fn analyze_writes_every_artifact_with_sidecars() {
        let dir = tempdir().unwrap();
        let stations = dir.path().join("stations.json");
        fs::write(&stations, SQUARE).unwrap();
        let out = dir.path().join("out");
        let written = run_analyze(&args(stations, out.clone()), Some("t1")).unwrap();
        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            [
                "adjacency.json",
                "distribution_index.json",
                "spanning_forest.json",
                "triangles.json",
                "voronoi.json"
            ]
        );
        for name in ["adjacency", "distribution_index", "spanning_forest", "triangles", "voronoi"] {
            assert!(out.join(format!("{name}.provenance.json")).exists());
        }
        let forest: Value =
            serde_json::from_slice(&fs::read(out.join("spanning_forest.json")).unwrap()).unwrap();
        assert_eq!(forest["components"], 1);
        assert_eq!(forest["edges"].as_array().unwrap().len(), 3);
        let adjacency: Value =
            serde_json::from_slice(&fs::read(out.join("adjacency.json")).unwrap()).unwrap();
        assert_eq!(adjacency.as_object().unwrap().len(), 4);
        let voronoi: Value =
            serde_json::from_slice(&fs::read(out.join("voronoi.json")).unwrap()).unwrap();
        assert_eq!(voronoi["1"]["unbounded"], true);
    }

    #[test]
    fn precomputed_adjacency_skips_triangles() {
        let dir = tempdir().unwrap();
        let stations = dir.path().join("stations.json");
        fs::write(&stations, SQUARE).unwrap();
        let adjacency = dir.path().join("adj.json");
        fs::write(&adjacency, r#"{"1": [2], "3": [4]}"#).unwrap();
        let out = dir.path().join("out");
        let mut a = args(stations, out.clone());
        a.adjacency = Some(adjacency);
        a.skip_voronoi = true;
        let written = run_analyze(&a, None).unwrap();
        assert_eq!(written.len(), 3);
        assert!(!out.join("triangles.json").exists());
        let forest: Value =
            serde_json::from_slice(&fs::read(out.join("spanning_forest.json")).unwrap()).unwrap();
        assert_eq!(forest["components"], 2);
        let prov: Value = serde_json::from_slice(
            &fs::read(out.join("spanning_forest.provenance.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(prov["inputs"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn invalid_alpha_is_an_error() {
        let dir = tempdir().unwrap();
        let stations = dir.path().join("stations.json");
        fs::write(&stations, SQUARE).unwrap();
        let mut a = args(stations, dir.path().join("out"));
        a.alpha = -0.1;
        assert!(run_analyze(&a, None).is_err());
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn adjacency_subcommand_writes_lists() {
        let dir = tempdir().unwrap();
        let stations = dir.path().join("stations.json");
        fs::write(&stations, SQUARE).unwrap();
        let out = dir.path().join("adj").join("adjacency.json");
        run_adjacency(&stations, &out, None).unwrap();
        let snap = load::load_adjacency(&out).unwrap();
        let graph = AdjacencyGraph::from_snapshot(&snap);
        assert_eq!(graph.edge_count(), 5);
    }
}
