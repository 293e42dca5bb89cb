use clap::{Parser, Subcommand};

use crate::{estimate::EstimateArgs, inspect::InspectArgs};

mod estimate;
mod inputs;
mod inspect;

#[derive(Parser)]
#[clap(author, version, about = "Shortest-distance and fastest-time estimates between stations and incidents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at DEBUG level (one line per pair)
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Route every station to every incident
    #[command(visible_alias = "e")]
    Estimate {
        #[command(flatten)]
        args: EstimateArgs,
    },
    /// Print road graph statistics
    #[command(visible_alias = "i")]
    Inspect {
        #[command(flatten)]
        args: InspectArgs,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Estimate { args } => estimate::run(args)?,
        Commands::Inspect { args } => inspect::run(args)?,
    }

    Ok(())
}
