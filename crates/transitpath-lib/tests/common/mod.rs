//! Common test utilities and fixture helpers.
//!
//! Integration tests load the checked-in Vancouver SkyTrain station table or
//! build small graphs by hand.

use std::path::PathBuf;

use transitpath_lib::{load_station_graph, DisplayPosition, GeoLocation, StationGraph};

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the Vancouver station table fixture.
#[allow(dead_code)]
pub fn fixture_path() -> PathBuf {
    fixtures_dir().join("vancouver_subway.csv")
}

/// Load the Vancouver station table fixture.
#[allow(dead_code)]
pub fn vancouver() -> StationGraph {
    load_station_graph(&fixture_path()).expect("fixture station table loads")
}

/// Build a graph from an edge list; stations are created on first mention.
#[allow(dead_code)]
pub fn graph_from_edges(edges: &[(&str, &str)]) -> StationGraph {
    let mut graph = StationGraph::new();
    for (a, b) in edges {
        for name in [a, b] {
            if !graph.contains(name) {
                let n = graph.len() as f64;
                graph.add_station(
                    *name,
                    GeoLocation::new(49.0 + n * 0.01, -123.0 - n * 0.01),
                    DisplayPosition::default(),
                );
            }
        }
        graph.add_edge(a, b);
    }
    graph
}

/// Check that `path` is a simple path from `source` to `target` along graph
/// edges that avoids every forbidden station.
#[allow(dead_code)]
pub fn assert_valid_path(
    graph: &StationGraph,
    path: &[String],
    source: &str,
    target: &str,
    forbidden: &[&str],
) {
    assert_eq!(path.first().map(String::as_str), Some(source), "path starts at source");
    assert_eq!(path.last().map(String::as_str), Some(target), "path ends at target");
    for pair in path.windows(2) {
        assert!(
            graph.are_adjacent(&pair[0], &pair[1]),
            "{} and {} are not adjacent",
            pair[0],
            pair[1]
        );
    }
    let mut seen = std::collections::HashSet::new();
    for step in path {
        assert!(seen.insert(step), "{step} repeated in path");
        assert!(!forbidden.contains(&step.as_str()), "{step} is forbidden");
    }
}
