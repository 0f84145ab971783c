//! Output formatting for path plans, station listings and session snapshots.

use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use transitpath_lib::{
    ActionAvailability, PathPlan, PathRenderMode, PathSummary, Snapshot, StationGraph,
    StationMark,
};

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// One line per result.
    Compact,
    /// Pretty-printed JSON.
    Json,
}

/// Station row as listed by the `stations` subcommand.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StationListing<'a> {
    pub name: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub x: i32,
    pub y: i32,
    pub neighbours: Vec<&'a str>,
}

/// Collect the listing for every station, in table order.
pub fn station_listings(graph: &StationGraph) -> Result<Vec<StationListing<'_>>> {
    graph
        .stations()
        .map(|station| {
            let neighbours = graph
                .neighbours(&station.name)
                .with_context(|| format!("failed to read neighbours of {}", station.name))?;
            Ok(StationListing {
                name: &station.name,
                latitude: station.location.latitude,
                longitude: station.location.longitude,
                x: station.display_position.x,
                y: station.display_position.y,
                neighbours,
            })
        })
        .collect()
}

/// Write the station listing in the requested format.
pub fn write_stations<W: Write>(
    out: &mut W,
    graph: &StationGraph,
    format: OutputFormat,
) -> Result<()> {
    let listings = station_listings(graph)?;
    match format {
        OutputFormat::Json => write_json(out, &listings)?,
        OutputFormat::Compact => {
            for listing in &listings {
                writeln!(out, "{}", listing.name)?;
            }
        }
        OutputFormat::Text => {
            writeln!(
                out,
                "{} stations, {} links:",
                graph.len(),
                graph.edge_count()
            )?;
            for listing in &listings {
                writeln!(
                    out,
                    "{} ({:.4}, {:.4}): {}",
                    listing.name,
                    listing.latitude,
                    listing.longitude,
                    listing.neighbours.join(", ")
                )?;
            }
        }
    }
    Ok(())
}

/// Write a planned path, or the "no path" notice when the plan is empty.
pub fn write_plan<W: Write>(
    out: &mut W,
    graph: &StationGraph,
    plan: &PathPlan,
    format: OutputFormat,
) -> Result<()> {
    if plan.is_empty() {
        return match format {
            OutputFormat::Json => write_json(out, plan),
            OutputFormat::Text | OutputFormat::Compact => {
                if plan.outcome.is_aborted() {
                    writeln!(
                        out,
                        "No path found from {} to {} (search stopped: {}).",
                        plan.source,
                        plan.target,
                        outcome_label(plan)
                    )?;
                } else {
                    writeln!(out, "No path found from {} to {}.", plan.source, plan.target)?;
                }
                Ok(())
            }
        };
    }

    let summary = PathSummary::from_plan(graph, plan).context("failed to summarise path")?;
    match format {
        OutputFormat::Json => write_json(out, &summary)?,
        OutputFormat::Text => write!(out, "{}", summary.render(PathRenderMode::PlainText))?,
        OutputFormat::Compact => write!(out, "{}", summary.render(PathRenderMode::Compact))?,
    }
    Ok(())
}

fn outcome_label(plan: &PathPlan) -> String {
    serde_json::to_value(plan.outcome)
        .ok()
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("{:?}", plan.outcome))
}

/// Write a session snapshot.
///
/// JSON snapshots are written one per line so a session transcript can be
/// consumed as JSON Lines.
pub fn write_snapshot<W: Write>(
    out: &mut W,
    snapshot: &Snapshot,
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<()> {
    if format == OutputFormat::Json {
        let line = serde_json::to_string(snapshot).context("failed to serialise snapshot")?;
        writeln!(out, "{line}")?;
        return Ok(());
    }

    let p = palette;
    let selected = paint_all(palette, StationMark::Selected, &snapshot.selected);
    let forbidden = paint_all(palette, StationMark::Forbidden, &snapshot.forbidden);
    writeln!(
        out,
        "{}[{}]{} selected: {} | avoiding: {} | actions: {}",
        p.heading,
        snapshot.state,
        p.reset,
        none_if_empty(&selected.join(", ")),
        none_if_empty(&forbidden.join(", ")),
        none_if_empty(&action_names(&snapshot.actions).join(", "))
    )?;

    if !snapshot.path.is_empty() {
        let last = snapshot.path.len() - 1;
        let steps: Vec<String> = snapshot
            .path
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let mark = if index == 0 || index == last {
                    StationMark::Selected
                } else {
                    StationMark::OnPath
                };
                palette.paint(mark, name)
            })
            .collect();
        writeln!(out, "  path ({} hops): {}", last, steps.join(" -> "))?;
    }
    Ok(())
}

/// Names of the enabled action buttons, as typed in a session.
pub fn action_names(actions: &ActionAvailability) -> Vec<&'static str> {
    let mut names = Vec::new();
    if actions.compute_path {
        names.push("go");
    }
    if actions.view_on_map {
        names.push("map");
    }
    if actions.reset {
        names.push("reset");
    }
    names
}

fn paint_all(palette: &ColorPalette, mark: StationMark, names: &[String]) -> Vec<String> {
    names.iter().map(|name| palette.paint(mark, name)).collect()
}

fn none_if_empty(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to serialise output")?;
    out.write_all(b"\n")?;
    Ok(())
}
