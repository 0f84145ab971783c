//! Transitpath library entry points.
//!
//! This crate models a transit network as an undirected station graph, finds
//! shortest paths that avoid a set of stations, and drives the interactive
//! selection protocol (pick endpoints, avoid stations, compute, view, reset).
//! Front ends (the CLI, or any other presentation layer) should only depend on
//! the items exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod controller;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod loader;
pub mod output;
pub mod path;
pub mod routing;
pub mod selection;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use controller::{
    ActionButton, InputEvent, InteractionController, InteractionState, MapPlotter, NullPlotter,
    NullPresenter, Presenter, Snapshot, Transition,
};
pub use dataset::{default_station_table_path, resolve_station_table, STATIONS_ENV};
pub use error::{Error, Result};
pub use graph::{DisplayPosition, EdgeInsert, GeoLocation, Station, StationGraph, StationId};
pub use loader::{
    build_graph, build_graph_with_report, load_from_source, load_station_graph, CsvStationSource,
    LoadReport, StationRecord, StationSource,
};
pub use output::{PathRenderMode, PathStep, PathSummary};
pub use path::{
    enumerate_simple_paths, find_shortest_path, find_shortest_path_bfs, CancellationToken,
    PathConstraints, SearchLimits, SearchOutcome, SearchResult, SearchStats,
};
pub use routing::{plan_path, PathAlgorithm, PathPlan, PathRequest};
pub use selection::{ActionAvailability, SelectionState, StationMark, MAX_ENDPOINTS};
