use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use rte_estimate::{BatchSummary, Estimator, ResultSink, RouteResult};
use rte_io::{CsvResultWriter, ResultWriter, Units, WriterSink};
use tracing::info;

use crate::inputs::{ConfigArgs, load_points, load_roads};

#[derive(Args)]
pub struct EstimateArgs {
    /// Road segments (CSV or GeoJSON)
    #[arg(short, long)]
    roads: PathBuf,

    /// Response stations, the route origins (CSV or GeoJSON)
    #[arg(short, long)]
    stations: PathBuf,

    /// Incident points, the route destinations (CSV or GeoJSON)
    #[arg(short, long)]
    incidents: PathBuf,

    /// Write results here: `.csv`, or `.db`/`.sqlite` with the `sqlite`
    /// feature.  Without it, a table is printed to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Evaluate pairs on all cores
    #[arg(short, long)]
    parallel: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

pub fn run(args: EstimateArgs) -> anyhow::Result<()> {
    let config = args.config.resolve()?;
    let units = Units::from_config(&config);

    let segments = load_roads(&args.roads)?;
    let stations = load_points(&args.stations)?;
    let incidents = load_points(&args.incidents)?;
    info!(
        segments = segments.len(),
        stations = stations.len(),
        incidents = incidents.len(),
        "inputs loaded"
    );

    let started = Instant::now();
    let estimator = Estimator::new(&segments, config)?;
    info!(
        nodes = estimator.graph().node_count(),
        edges = estimator.graph().edge_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "road graph built"
    );

    let summary = match &args.output {
        Some(path) if is_sqlite(path) => {
            let writer = open_sqlite(path, units)?;
            drive(&estimator, &stations, &incidents, args.parallel, writer)?
        }
        Some(path) => {
            let writer = CsvResultWriter::new(path, units)?;
            drive(&estimator, &stations, &incidents, args.parallel, writer)?
        }
        None => {
            let mut results = Vec::new();
            let summary = batch(&estimator, &stations, &incidents, args.parallel, &mut results);
            print_table(&results, units);
            summary
        }
    };

    info!(
        pairs = summary.pairs,
        routed = summary.routed,
        failed = summary.failed(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "done"
    );
    Ok(())
}

fn drive<W: ResultWriter>(
    estimator: &Estimator,
    stations:  &[rte_core::Point],
    incidents: &[rte_core::Point],
    parallel:  bool,
    writer:    W,
) -> anyhow::Result<BatchSummary> {
    let mut sink = WriterSink::new(writer);
    let summary = batch(estimator, stations, incidents, parallel, &mut sink);
    if let Some(e) = sink.take_error() {
        return Err(e.into());
    }
    Ok(summary)
}

fn batch<S: ResultSink>(
    estimator: &Estimator,
    stations:  &[rte_core::Point],
    incidents: &[rte_core::Point],
    parallel:  bool,
    sink:      &mut S,
) -> BatchSummary {
    if !parallel {
        return estimator.run_batch_into(stations, incidents, sink);
    }
    let mut summary = BatchSummary::default();
    for result in estimator.run_batch_parallel(stations, incidents) {
        summary.record(&result);
        sink.on_result(result);
    }
    sink.on_batch_end(&summary);
    summary
}

fn is_sqlite(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e, "db" | "sqlite" | "sqlite3"))
        .unwrap_or(false)
}

#[cfg(feature = "sqlite")]
fn open_sqlite(path: &Path, units: Units) -> anyhow::Result<rte_io::SqliteResultWriter> {
    Ok(rte_io::SqliteResultWriter::new(path, units)?)
}

#[cfg(not(feature = "sqlite"))]
fn open_sqlite(path: &Path, _units: Units) -> anyhow::Result<CsvResultWriter> {
    anyhow::bail!("{} looks like a SQLite database; rebuild with `--features sqlite`", path.display())
}

fn fmt_cell(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_owned())
}

fn print_table(results: &[RouteResult], units: Units) {
    let (d, t) = (units.distance.as_str(), units.time.as_str());
    println!(
        "{:<16} {:<16} {:>14} {:>14}  {}",
        "origin",
        "destination",
        format!("distance ({d})"),
        format!("time ({t})"),
        "note"
    );
    for r in results {
        println!(
            "{:<16} {:<16} {:>14} {:>14}  {}",
            r.origin,
            r.destination,
            fmt_cell(r.shortest_distance()),
            fmt_cell(r.fastest_time()),
            r.failure().map(ToString::to_string).unwrap_or_default(),
        );
    }
}
