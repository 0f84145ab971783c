use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Minimum Jaro-Winkler similarity for a station to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Stable arena index of a station inside a [`StationGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StationId(usize);

impl StationId {
    /// Position of the station in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Geographic coordinates of a station.
///
/// Only consumed by the map plotter; path finding never looks at them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Screen position of a station on the schematic network diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DisplayPosition {
    pub x: i32,
    pub y: i32,
}

/// A named node of the transit network.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub location: GeoLocation,
    pub display_position: DisplayPosition,
}

/// Result of an [`StationGraph::add_edge`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInsert {
    /// Both stations were linked.
    Added,
    /// The stations were already neighbours.
    AlreadyPresent,
    /// At least one endpoint is not part of the graph; nothing changed.
    MissingEndpoint,
    /// Both names refer to the same station; nothing changed.
    SelfLoop,
}

/// Undirected station graph with symmetric adjacency.
///
/// Stations live in an arena addressed by [`StationId`]; edges are stored as
/// id sets so neighbour lookups never hold references between stations.
#[derive(Debug, Clone, Default)]
pub struct StationGraph {
    stations: Vec<Station>,
    name_to_id: HashMap<String, StationId>,
    adjacency: Vec<BTreeSet<StationId>>,
}

impl StationGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a station, returning its identifier.
    ///
    /// If a station with the same name already exists the graph is left
    /// untouched and the existing identifier is returned.
    pub fn add_station(
        &mut self,
        name: impl Into<String>,
        location: GeoLocation,
        display_position: DisplayPosition,
    ) -> StationId {
        let name = name.into();
        if let Some(&existing) = self.name_to_id.get(&name) {
            debug!(station = %name, "station already present; keeping first definition");
            return existing;
        }

        let id = StationId(self.stations.len());
        self.name_to_id.insert(name.clone(), id);
        self.stations.push(Station {
            id,
            name,
            location,
            display_position,
        });
        self.adjacency.push(BTreeSet::new());
        id
    }

    /// Link two stations as mutual neighbours.
    ///
    /// Missing endpoints and self-loops are ignored; re-adding an existing
    /// edge changes nothing.
    pub fn add_edge(&mut self, name1: &str, name2: &str) -> EdgeInsert {
        if name1 == name2 {
            warn!(station = name1, "ignoring self-loop edge");
            return EdgeInsert::SelfLoop;
        }

        let (Some(a), Some(b)) = (self.station_id(name1), self.station_id(name2)) else {
            return EdgeInsert::MissingEndpoint;
        };

        let inserted = self.adjacency[a.0].insert(b);
        self.adjacency[b.0].insert(a);
        if inserted {
            EdgeInsert::Added
        } else {
            EdgeInsert::AlreadyPresent
        }
    }

    /// Whether a station with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.name_to_id.contains_key(name)
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Iterate stations in insertion order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.0)
    }

    pub fn station_by_name(&self, name: &str) -> Option<&Station> {
        self.station_id(name).and_then(|id| self.station(id))
    }

    /// Lookup a station identifier by its case-sensitive name.
    pub fn station_id(&self, name: &str) -> Option<StationId> {
        self.name_to_id.get(name).copied()
    }

    /// Name of the station with the given identifier.
    pub fn station_name(&self, id: StationId) -> Option<&str> {
        self.station(id).map(|station| station.name.as_str())
    }

    /// Resolve a station name, failing with suggestions when it is unknown.
    pub fn resolve(&self, name: &str) -> Result<StationId> {
        self.station_id(name).ok_or_else(|| Error::UnknownStation {
            name: name.to_string(),
            suggestions: self.fuzzy_matches(name, 3),
        })
    }

    /// Neighbour identifiers of a station, in ascending id order.
    pub fn neighbour_ids(&self, id: StationId) -> impl Iterator<Item = StationId> + '_ {
        self.adjacency.get(id.0).into_iter().flatten().copied()
    }

    /// Names of the neighbours of a station, sorted by name.
    pub fn neighbours(&self, name: &str) -> Result<Vec<&str>> {
        let id = self.resolve(name)?;
        let mut names: Vec<&str> = self
            .neighbour_ids(id)
            .filter_map(|neighbour| self.station_name(neighbour))
            .collect();
        names.sort_unstable();
        Ok(names)
    }

    /// Whether two stations are directly linked.
    pub fn are_adjacent(&self, name1: &str, name2: &str) -> bool {
        match (self.station_id(name1), self.station_id(name2)) {
            (Some(a), Some(b)) => self.adjacency[a.0].contains(&b),
            _ => false,
        }
    }

    /// Map each requested station name to its geographic location.
    pub fn locations_of<S: AsRef<str>>(&self, names: &[S]) -> Result<HashMap<String, GeoLocation>> {
        let mut locations = HashMap::with_capacity(names.len());
        for name in names {
            let id = self.resolve(name.as_ref())?;
            locations.insert(name.as_ref().to_string(), self.stations[id.0].location);
        }
        Ok(locations)
    }

    /// Station names most similar to `name`, best match first.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .stations
            .iter()
            .map(|station| {
                let score = strsim::jaro_winkler(&needle, &station.name.to_lowercase());
                (score, station.name.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}
