//! Stations command handler for listing the loaded network.

use std::io;

use anyhow::Result;

use transitpath_cli::output::{write_stations, OutputFormat};
use transitpath_lib::StationGraph;

/// Handle the stations subcommand.
pub fn handle_stations_command(graph: &StationGraph, format: OutputFormat) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_stations(&mut stdout, graph, format)
}
