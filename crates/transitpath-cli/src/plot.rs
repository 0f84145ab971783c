//! GeoJSON map plotter.
//!
//! Stands in for an interactive map: every view-on-map request produces a
//! `FeatureCollection` holding one `LineString` along the path and one
//! `Point` per station. GeoJSON positions are `[longitude, latitude]`.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::{error, info};

use transitpath_lib::{GeoLocation, MapPlotter};

/// Where plotted routes are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlotTarget {
    Stdout,
    /// Overwritten on every plot so the file always holds the latest route.
    File(PathBuf),
    /// Keep plots in memory only.
    Memory,
}

/// [`MapPlotter`] that renders routes as GeoJSON.
#[derive(Debug)]
pub struct GeoJsonPlotter {
    target: PlotTarget,
    plots: Vec<Value>,
}

impl GeoJsonPlotter {
    pub fn new(target: PlotTarget) -> Self {
        Self {
            target,
            plots: Vec::new(),
        }
    }

    /// Plotter writing to `path`, or stdout when no path is given.
    pub fn for_output(path: Option<PathBuf>) -> Self {
        Self::new(path.map_or(PlotTarget::Stdout, PlotTarget::File))
    }

    /// Every collection plotted so far, oldest first.
    pub fn plots(&self) -> &[Value] {
        &self.plots
    }

    fn write(&self, collection: &Value) -> Result<()> {
        match &self.target {
            PlotTarget::Memory => Ok(()),
            PlotTarget::Stdout => {
                let mut stdout = io::stdout().lock();
                serde_json::to_writer_pretty(&mut stdout, collection)?;
                stdout.write_all(b"\n")?;
                Ok(())
            }
            PlotTarget::File(path) => {
                let body = serde_json::to_string_pretty(collection)?;
                fs::write(path, body)
                    .with_context(|| format!("failed to write map to {}", path.display()))?;
                info!(path = %path.display(), "map written");
                Ok(())
            }
        }
    }
}

impl MapPlotter for GeoJsonPlotter {
    fn plot_route(&mut self, path: &[String], locations: &HashMap<String, GeoLocation>) {
        let collection = route_feature_collection(path, locations);
        if let Err(err) = self.write(&collection) {
            error!("{err:#}");
        }
        self.plots.push(collection);
    }
}

/// Build the GeoJSON `FeatureCollection` for a path.
///
/// Stations missing from `locations` are left out of both the line and the
/// points.
pub fn route_feature_collection(
    path: &[String],
    locations: &HashMap<String, GeoLocation>,
) -> Value {
    let located: Vec<(usize, &String, &GeoLocation)> = path
        .iter()
        .enumerate()
        .filter_map(|(index, name)| locations.get(name).map(|location| (index, name, location)))
        .collect();

    let line: Vec<[f64; 2]> = located
        .iter()
        .map(|(_, _, location)| [location.longitude, location.latitude])
        .collect();

    let mut features = vec![json!({
        "type": "Feature",
        "geometry": { "type": "LineString", "coordinates": line },
        "properties": {
            "kind": "route",
            "source": path.first(),
            "target": path.last(),
            "hops": path.len().saturating_sub(1),
        }
    })];

    let last = path.len().saturating_sub(1);
    features.extend(located.iter().map(|(index, name, location)| {
        let role = if *index == 0 {
            "source"
        } else if *index == last {
            "target"
        } else {
            "via"
        };
        json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [location.longitude, location.latitude],
            },
            "properties": { "kind": "station", "name": name, "index": index, "role": role }
        })
    }));

    json!({ "type": "FeatureCollection", "features": features })
}
