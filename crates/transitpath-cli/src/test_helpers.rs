// Test utilities used across `transitpath-cli` tests.
// Kept under `#[cfg(test)]` so it is not part of the public crate API.
use transitpath_lib::{DisplayPosition, GeoLocation, StationGraph};

/// Four stations: a triangle `Alpha`/`Beta`/`Gamma` with `Delta` hanging off
/// `Gamma`. Station `i` sits at `(49.0 + i/100, -123.0 - i/100)`.
pub fn triangle() -> StationGraph {
    let mut graph = StationGraph::new();
    for (i, name) in ["Alpha", "Beta", "Gamma", "Delta"].iter().enumerate() {
        let offset = i as f64 / 100.0;
        graph.add_station(
            *name,
            GeoLocation::new(49.0 + offset, -123.0 - offset),
            DisplayPosition {
                x: i as i32 * 10,
                y: 0,
            },
        );
    }
    graph.add_edge("Alpha", "Beta");
    graph.add_edge("Alpha", "Gamma");
    graph.add_edge("Beta", "Gamma");
    graph.add_edge("Gamma", "Delta");
    graph
}
