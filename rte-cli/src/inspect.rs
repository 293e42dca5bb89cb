use std::path::PathBuf;

use clap::Args;
use rte_network::RoadGraph;
use tracing::info;

use crate::inputs::{ConfigArgs, load_roads};

#[derive(Args)]
pub struct InspectArgs {
    /// Road segments (CSV or GeoJSON)
    #[arg(short, long)]
    roads: PathBuf,

    /// Number of largest components to list
    #[arg(long, default_value_t = 5)]
    top: usize,

    #[command(flatten)]
    config: ConfigArgs,
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let config = args.config.resolve()?;
    let segments = load_roads(&args.roads)?;
    info!(segments = segments.len(), "roads loaded");

    let graph = RoadGraph::from_segments(&segments, &config)?;
    let components = graph.components();
    let mut sizes = components.sizes();
    sizes.sort_unstable_by(|a, b| b.cmp(a));

    let oneway = graph.edge_oneway.iter().filter(|&&o| o).count();
    println!("vertices      {}", graph.node_count());
    println!("edges         {} ({oneway} one-way)", graph.edge_count());
    println!("arcs          {}", graph.arc_count());
    println!("total length  {:.3} km", graph.total_length_m() / 1_000.0);
    println!("components    {}", components.count);
    for (i, size) in sizes.iter().take(args.top).enumerate() {
        println!("  #{:<3} {size} vertices", i + 1);
    }
    if components.count > 1 {
        println!("pairs in different components will be reported as unreachable");
    }
    Ok(())
}
