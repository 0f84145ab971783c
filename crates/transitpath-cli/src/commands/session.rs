//! Session command handler: an interactive selection session on the terminal.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use transitpath_cli::output::OutputFormat;
use transitpath_cli::plot::GeoJsonPlotter;
use transitpath_cli::session::{run_session, TerminalPresenter};
use transitpath_cli::terminal::ColorPalette;
use transitpath_lib::{InteractionController, PathAlgorithm, StationGraph};

use crate::commands::route::parse_algorithm;

/// Arguments for the session command.
#[derive(Args, Debug, Clone)]
pub struct SessionCommandArgs {
    /// Read session commands from this file instead of stdin.
    #[arg(long)]
    pub script: Option<PathBuf>,
    /// Write plotted maps (GeoJSON) to this file instead of stdout.
    #[arg(long = "map-out")]
    pub map_out: Option<PathBuf>,
    /// Search strategy used by `go`.
    #[arg(long, default_value = "exhaustive", value_parser = parse_algorithm)]
    pub algorithm: PathAlgorithm,
}

/// Handle the session subcommand.
pub fn handle_session_command(
    graph: Arc<StationGraph>,
    args: &SessionCommandArgs,
    format: OutputFormat,
    palette: ColorPalette,
) -> Result<()> {
    let presenter = TerminalPresenter::new(io::stdout(), format, palette);
    let plotter = GeoJsonPlotter::for_output(args.map_out.clone());
    let mut controller =
        InteractionController::new(graph, presenter, plotter).with_algorithm(args.algorithm);

    let report = match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open session script {}", path.display()))?;
            run_session(BufReader::new(file), &mut controller)?
        }
        None => run_session(io::stdin().lock(), &mut controller)?,
    };

    info!(
        lines = report.lines,
        applied = report.applied,
        ignored = report.ignored,
        rejected = report.rejected,
        "session finished"
    );
    Ok(())
}
