//! Station table loading.
//!
//! The station table is a CSV file with a header row followed by one row per
//! station: `name,latitude,longitude,x,y,neighbours`, where `neighbours` is a
//! single (quoted) field holding a comma-separated list of station names.
//! Graph construction is tolerant: neighbour names that never appear as a
//! station are dropped with a warning instead of failing the load.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::graph::{DisplayPosition, EdgeInsert, GeoLocation, StationGraph};

/// Columns every row must carry; the trailing `neighbours` column is optional.
const REQUIRED_COLUMNS: usize = 5;

/// One station row as supplied by a graph loader.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub name: String,
    pub location: GeoLocation,
    pub display_position: DisplayPosition,
    pub neighbours: Vec<String>,
}

/// Source of station records used to populate a [`StationGraph`].
pub trait StationSource {
    /// Produce every station record of the network.
    fn records(&mut self) -> Result<Vec<StationRecord>>;
}

impl StationSource for Vec<StationRecord> {
    fn records(&mut self) -> Result<Vec<StationRecord>> {
        Ok(std::mem::take(self))
    }
}

/// Station records read from a CSV table.
pub struct CsvStationSource<R: Read> {
    reader: R,
    source: Option<PathBuf>,
}

impl CsvStationSource<fs::File> {
    /// Open a station table on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::DatasetNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = fs::File::open(path)?;
        Ok(Self {
            reader: file,
            source: Some(path.to_path_buf()),
        })
    }
}

impl<R: Read> CsvStationSource<R> {
    /// Read a station table from any reader (file, in-memory buffer, ...).
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            source: None,
        }
    }

    /// Path the table was opened from, when known.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl<R: Read> StationSource for CsvStationSource<R> {
    fn records(&mut self) -> Result<Vec<StationRecord>> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(&mut self.reader);

        let mut records = Vec::new();
        let mut row_num: u64 = 1; // header is line 1
        for result in csv_reader.records() {
            row_num += 1;
            let record = result?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            records.push(parse_record(&record, row_num)?);
        }
        Ok(records)
    }
}

fn parse_record(record: &StringRecord, row: u64) -> Result<StationRecord> {
    if record.len() < REQUIRED_COLUMNS {
        return Err(Error::StationData {
            row,
            message: format!(
                "expected at least {} columns (name,latitude,longitude,x,y[,neighbours]), found {}",
                REQUIRED_COLUMNS,
                record.len()
            ),
        });
    }

    let name = record.get(0).unwrap_or_default().to_string();
    if name.is_empty() {
        return Err(Error::StationData {
            row,
            message: "station name is empty".to_string(),
        });
    }

    let latitude = parse_field::<f64>(record, 1, "latitude", &name, row)?;
    let longitude = parse_field::<f64>(record, 2, "longitude", &name, row)?;
    let x = parse_field::<i32>(record, 3, "x", &name, row)?;
    let y = parse_field::<i32>(record, 4, "y", &name, row)?;

    let neighbours = record
        .get(5)
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|neighbour| !neighbour.is_empty())
        .map(str::to_string)
        .collect();

    Ok(StationRecord {
        name,
        location: GeoLocation::new(latitude, longitude),
        display_position: DisplayPosition { x, y },
        neighbours,
    })
}

fn parse_field<T>(
    record: &StringRecord,
    index: usize,
    field: &str,
    name: &str,
    row: u64,
) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = record.get(index).unwrap_or_default();
    raw.parse::<T>().map_err(|err| Error::StationData {
        row,
        message: format!("invalid {field} '{raw}' for station '{name}': {err}"),
    })
}

/// Summary of a graph build, including the input that had to be skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub stations: usize,
    pub edges: usize,
    /// Station rows whose name had already been seen.
    pub duplicate_stations: Vec<String>,
    /// `(station, neighbour)` pairs whose neighbour is not a station.
    pub dropped_edges: Vec<(String, String)>,
}

/// Build a graph from station records, returning what was skipped.
///
/// All stations are added before any edge so rows may reference stations
/// defined further down the table.
pub fn build_graph_with_report(records: &[StationRecord]) -> (StationGraph, LoadReport) {
    let mut graph = StationGraph::new();
    let mut report = LoadReport::default();

    for record in records {
        if graph.contains(&record.name) {
            warn!(station = %record.name, "duplicate station row; keeping first location");
            report.duplicate_stations.push(record.name.clone());
            continue;
        }
        graph.add_station(
            record.name.clone(),
            record.location,
            record.display_position,
        );
    }

    for record in records {
        for neighbour in &record.neighbours {
            match graph.add_edge(&record.name, neighbour) {
                EdgeInsert::Added | EdgeInsert::AlreadyPresent => {}
                EdgeInsert::MissingEndpoint => {
                    warn!(
                        station = %record.name,
                        neighbour = %neighbour,
                        "dropping edge to unknown station"
                    );
                    report
                        .dropped_edges
                        .push((record.name.clone(), neighbour.clone()));
                }
                EdgeInsert::SelfLoop => {
                    report
                        .dropped_edges
                        .push((record.name.clone(), neighbour.clone()));
                }
            }
        }
    }

    report.stations = graph.len();
    report.edges = graph.edge_count();
    (graph, report)
}

/// Build a graph from station records.
pub fn build_graph(records: &[StationRecord]) -> StationGraph {
    build_graph_with_report(records).0
}

/// Populate a graph from any [`StationSource`].
pub fn load_from_source<S: StationSource + ?Sized>(source: &mut S) -> Result<StationGraph> {
    let records = source.records()?;
    let (graph, report) = build_graph_with_report(&records);
    info!(
        stations = report.stations,
        edges = report.edges,
        dropped_edges = report.dropped_edges.len(),
        "station graph loaded"
    );
    Ok(graph)
}

/// Load the station table at `path` into a graph.
pub fn load_station_graph(path: &Path) -> Result<StationGraph> {
    let mut source = CsvStationSource::from_path(path)?;
    load_from_source(&mut source)
}
