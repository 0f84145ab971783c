//! Path properties checked over small generated networks.

mod common;

use std::collections::HashSet;
use std::ops::Range;

use proptest::collection::vec;
use proptest::prelude::*;

use transitpath_lib::{
    enumerate_simple_paths, find_shortest_path, find_shortest_path_bfs, DisplayPosition,
    GeoLocation, SearchLimits, StationGraph,
};

use common::{assert_valid_path, graph_from_edges};

/// Station count plus one flag per unordered station pair.
#[derive(Debug, Clone)]
struct Network {
    size: usize,
    links: Vec<bool>,
}

impl Network {
    /// Every station appears in the graph even when isolated.
    fn graph(&self) -> StationGraph {
        let names: Vec<String> = (0..self.size).map(station).collect();
        let pairs: Vec<(usize, usize)> = (0..self.size)
            .flat_map(|a| ((a + 1)..self.size).map(move |b| (a, b)))
            .collect();
        let edges: Vec<(&str, &str)> = pairs
            .iter()
            .zip(&self.links)
            .filter(|(_, linked)| **linked)
            .map(|(&(a, b), _)| (names[a].as_str(), names[b].as_str()))
            .collect();

        let mut graph = graph_from_edges(&edges);
        for name in &names {
            if !graph.contains(name) {
                graph.add_station(
                    name.clone(),
                    GeoLocation::new(0.0, 0.0),
                    DisplayPosition::default(),
                );
            }
        }
        graph
    }
}

#[derive(Debug, Clone)]
struct RouteCase {
    network: Network,
    source: String,
    target: String,
    forbidden: Vec<String>,
}

impl RouteCase {
    fn forbidden_refs(&self) -> Vec<&str> {
        self.forbidden.iter().map(String::as_str).collect()
    }
}

fn station(index: usize) -> String {
    format!("S{index}")
}

fn network(sizes: Range<usize>, density: f64) -> impl Strategy<Value = Network> {
    sizes.prop_flat_map(move |size| {
        vec(prop::bool::weighted(density), size * (size - 1) / 2)
            .prop_map(move |links| Network { size, links })
    })
}

/// Endpoints are drawn freely; the forbidden subset never contains them.
fn route_case(sizes: Range<usize>, density: f64) -> impl Strategy<Value = RouteCase> {
    network(sizes, density)
        .prop_flat_map(|network| {
            let size = network.size;
            (
                Just(network),
                0..size,
                0..size,
                vec(prop::bool::weighted(0.2), size),
            )
        })
        .prop_map(|(network, source, target, avoid)| {
            let forbidden = avoid
                .iter()
                .enumerate()
                .filter(|&(index, avoided)| *avoided && index != source && index != target)
                .map(|(index, _)| station(index))
                .collect();
            RouteCase {
                network,
                source: station(source),
                target: station(target),
                forbidden,
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn shortest_path_is_valid_and_minimal(case in route_case(4..9, 0.35)) {
        let graph = case.network.graph();
        let (source, target) = (&case.source, &case.target);

        let path = find_shortest_path(&graph, source, target, &case.forbidden)
            .expect("endpoints exist");
        let every = enumerate_simple_paths(
            &graph,
            source,
            target,
            &case.forbidden,
            &SearchLimits::unbounded(),
        )
        .expect("endpoints exist");

        match every.iter().map(Vec::len).min() {
            Some(shortest) => {
                prop_assert_eq!(path.len(), shortest, "{} -> {}", source, target);
                assert_valid_path(&graph, &path, source, target, &case.forbidden_refs());
            }
            None => prop_assert!(path.is_empty(), "{} -> {} should be unreachable", source, target),
        }
    }

    #[test]
    fn breadth_first_matches_exhaustive_length(case in route_case(5..9, 0.3)) {
        let graph = case.network.graph();
        let (source, target) = (&case.source, &case.target);

        let exhaustive = find_shortest_path(&graph, source, target, &case.forbidden)
            .expect("endpoints exist");
        let bfs = find_shortest_path_bfs(&graph, source, target, &case.forbidden)
            .expect("endpoints exist");

        prop_assert_eq!(exhaustive.len(), bfs.len(), "{} -> {}", source, target);
        if !bfs.is_empty() {
            assert_valid_path(&graph, &bfs, source, target, &case.forbidden_refs());
        }
    }

    #[test]
    fn forbidding_off_path_stations_keeps_length(network in network(6..7, 0.45)) {
        let graph = network.graph();
        let (source, target) = (station(0), station(network.size - 1));

        let path = find_shortest_path(&graph, &source, &target, Vec::<String>::new())
            .expect("endpoints exist");
        if path.is_empty() {
            return Ok(());
        }
        let off_path: Vec<String> = (0..network.size)
            .map(station)
            .filter(|name| !path.contains(name))
            .collect();
        let avoided = find_shortest_path(&graph, &source, &target, &off_path)
            .expect("endpoints exist");

        prop_assert_eq!(avoided.len(), path.len());
    }

    #[test]
    fn enumerated_paths_are_distinct_and_simple(network in network(6..7, 0.6)) {
        let graph = network.graph();
        let every =
            enumerate_simple_paths(&graph, "S0", "S5", ["S2"], &SearchLimits::unbounded())
                .expect("endpoints exist");

        let mut seen = HashSet::new();
        for path in &every {
            prop_assert!(seen.insert(path.clone()), "duplicate path {:?}", path);
            assert_valid_path(&graph, path, "S0", "S5", &["S2"]);
        }
    }
}
