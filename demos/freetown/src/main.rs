//! freetown — fire stations × disaster points over a synthetic Freetown
//! road network.
//!
//! Three fire stations are routed to five incident locations.  One incident
//! sits on Banana Island, which has no road link to the mainland, so its
//! row is reported as unreachable.  Swap in real road and point files with
//! the `rte` CLI for production runs.

mod network;

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use rte_core::EstimatorConfig;
use rte_estimate::{BatchSummary, Estimator, ResultSink, RouteResult};
use rte_io::{load_points_reader, CsvResultWriter, ResultWriter, Units, WriterSink};

// ── Embedded inputs ───────────────────────────────────────────────────────────

const STATIONS_CSV: &str = "\
id,lat,lon\n\
fs-central,8.4845,-13.2335\n\
fs-kissy,8.4795,-13.1880\n\
fs-wilberforce,8.4710,-13.2495\n\
";

// dp-hill is a few hundred metres off the nearest junction; dp-banana is on
// the disconnected island road.
const INCIDENTS_CSV: &str = "\
id,lat,lon\n\
dp-cline-town,8.4900,-13.2130\n\
dp-lumley,8.4530,-13.2760\n\
dp-hill,8.4600,-13.2440\n\
dp-regent,8.4380,-13.2170\n\
dp-banana,8.1230,-13.2130\n\
";

const OUTPUT_DIR: &str = "output/freetown";

// ── Sink wrapper keeping rows for the summary table ──────────────────────────

struct TableSink<W: ResultWriter> {
    inner: WriterSink<W>,
    rows:  Vec<RouteResult>,
}

impl<W: ResultWriter> ResultSink for TableSink<W> {
    fn on_result(&mut self, result: RouteResult) {
        self.rows.push(result.clone());
        self.inner.on_result(result);
    }

    fn on_batch_end(&mut self, summary: &BatchSummary) {
        self.inner.on_batch_end(summary);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== freetown — response-time estimator ===");
    println!();

    // 1. Road graph.
    let config = EstimatorConfig::default();
    let units = Units::from_config(&config);
    let estimator = Estimator::new(&network::segments(), config)?;
    let components = estimator.graph().components();
    println!(
        "Road network: {} vertices, {} edges, {} components",
        estimator.graph().node_count(),
        estimator.graph().edge_count(),
        components.count,
    );

    // 2. Stations and incidents from the embedded CSVs.
    let stations = load_points_reader(Cursor::new(STATIONS_CSV))?;
    let incidents = load_points_reader(Cursor::new(INCIDENTS_CSV))?;
    println!("Stations: {}  |  Incidents: {}", stations.len(), incidents.len());
    println!();

    // 3. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvResultWriter::new(&Path::new(OUTPUT_DIR).join("results.csv"), units)?;
    let mut sink = TableSink { inner: WriterSink::new(writer), rows: Vec::new() };

    // 4. Run.
    let t0 = Instant::now();
    let summary = estimator.run_batch_into(&stations, &incidents, &mut sink);
    let elapsed = t0.elapsed();

    if let Some(e) = sink.inner.take_error() {
        eprintln!("output error: {e}");
    }

    println!("Batch complete in {:.3} ms", elapsed.as_secs_f64() * 1_000.0);
    println!(
        "  {OUTPUT_DIR}/results.csv : {} rows ({} routed, {} failed)",
        summary.pairs,
        summary.routed,
        summary.failed()
    );
    println!();

    // 5. Results table.
    let d = units.distance.as_str();
    let t = units.time.as_str();
    println!(
        "{:<16} {:<14} {:>10} {:>10} {:>10} {:>10}",
        "Station",
        "Incident",
        format!("dist {d}"),
        format!("time {t}"),
        format!("(@ {t})"),
        format!("(@ {d})"),
    );
    println!("{}", "-".repeat(75));
    for r in &sink.rows {
        match r.costs() {
            Some(c) => println!(
                "{:<16} {:<14} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
                r.origin,
                r.destination,
                c.shortest_distance,
                c.fastest_time,
                c.shortest_path_time,
                c.fastest_path_distance,
            ),
            None => println!(
                "{:<16} {:<14} {:>10} {:>10}   {}",
                r.origin,
                r.destination,
                "-",
                "-",
                r.failure().map(ToString::to_string).unwrap_or_default(),
            ),
        }
    }

    Ok(())
}
