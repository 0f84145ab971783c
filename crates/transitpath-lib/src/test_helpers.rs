// Test-only helpers for `transitpath-lib` unit tests
#![allow(dead_code)]
use crate::graph::{DisplayPosition, GeoLocation, StationGraph};

/// Builder to create small `StationGraph` fixtures in tests.
///
/// Stations are created on first mention with a location derived from their
/// insertion order, so every fixture station has distinct coordinates.
pub struct GraphBuilder {
    graph: StationGraph,
}

impl GraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: StationGraph::new(),
        }
    }

    pub fn station(mut self, name: &str) -> Self {
        self.ensure(name);
        self
    }

    /// Add stations connected one after another.
    pub fn line(mut self, names: &[&str]) -> Self {
        for name in names {
            self.ensure(name);
        }
        for pair in names.windows(2) {
            self.graph.add_edge(pair[0], pair[1]);
        }
        self
    }

    pub fn edges(mut self, edges: &[(&str, &str)]) -> Self {
        for (a, b) in edges {
            self.ensure(a);
            self.ensure(b);
            self.graph.add_edge(a, b);
        }
        self
    }

    /// Connect every pair of the given stations.
    pub fn complete(mut self, names: &[&str]) -> Self {
        for name in names {
            self.ensure(name);
        }
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                self.graph.add_edge(a, b);
            }
        }
        self
    }

    pub fn build(self) -> StationGraph {
        self.graph
    }

    fn ensure(&mut self, name: &str) {
        if !self.graph.contains(name) {
            let offset = self.graph.len() as f64 * 0.01;
            self.graph.add_station(
                name,
                GeoLocation::new(49.28 + offset, -123.12 + offset),
                DisplayPosition {
                    x: self.graph.len() as i32 * 10,
                    y: 0,
                },
            );
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
