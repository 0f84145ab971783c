mod commands;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use transitpath_cli::output::OutputFormat;
use transitpath_cli::terminal::ColorPalette;
use transitpath_lib::{load_station_graph, resolve_station_table, StationGraph};

use commands::route::{handle_route_command, RouteCommandArgs};
use commands::session::{handle_session_command, SessionCommandArgs};
use commands::stations::handle_stations_command;

#[derive(Parser, Debug)]
#[command(author, version, about = "Shortest paths through a transit network")]
struct Cli {
    /// Station table (CSV file, or a directory holding stations.csv).
    #[arg(long, global = true)]
    stations: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable ANSI colors (also honours NO_COLOR).
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every station with its neighbours.
    Stations,
    /// Compute the shortest path between two stations.
    Route(RouteCommandArgs),
    /// Run an interactive selection session from stdin or a script.
    Session(SessionCommandArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let graph = load_graph(cli.stations.as_deref())?;

    match &cli.command {
        Command::Stations => handle_stations_command(&graph, cli.format),
        Command::Route(args) => handle_route_command(&graph, args, cli.format),
        Command::Session(args) => handle_session_command(
            Arc::new(graph),
            args,
            cli.format,
            ColorPalette::for_flag(cli.no_color),
        ),
    }
}

fn load_graph(target: Option<&Path>) -> Result<StationGraph> {
    let path = resolve_station_table(target).context("failed to locate the station table")?;
    load_station_graph(&path)
        .with_context(|| format!("failed to load station table from {}", path.display()))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
