//! Path planning strategies.
//!
//! This module provides the `PathPlanner` trait and one implementation per
//! search algorithm. `plan_path` picks a planner through [`select_planner`]
//! so new strategies can be added without touching the orchestration.

use crate::graph::{StationGraph, StationId};
use crate::path::{find_path_bfs, find_path_exhaustive, PathConstraints, SearchResult};

use super::PathAlgorithm;

/// Trait for path planning strategies.
pub trait PathPlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> PathAlgorithm;

    /// Search for a shortest path from `start` to `goal`.
    fn find_path(
        &self,
        graph: &StationGraph,
        start: StationId,
        goal: StationId,
        constraints: &PathConstraints,
    ) -> SearchResult;

    /// Whether running time may grow exponentially with the network size.
    fn is_exponential(&self) -> bool {
        false
    }
}

/// Exhaustive simple-path enumeration reduced to a shortest candidate.
#[derive(Debug, Clone, Default)]
pub struct ExhaustivePlanner;

impl PathPlanner for ExhaustivePlanner {
    fn algorithm(&self) -> PathAlgorithm {
        PathAlgorithm::Exhaustive
    }

    fn find_path(
        &self,
        graph: &StationGraph,
        start: StationId,
        goal: StationId,
        constraints: &PathConstraints,
    ) -> SearchResult {
        find_path_exhaustive(graph, start, goal, constraints)
    }

    fn is_exponential(&self) -> bool {
        true
    }
}

/// Breadth-first search planner.
///
/// Every edge has unit cost, so the first path reaching the goal has the
/// fewest stations.
#[derive(Debug, Clone, Default)]
pub struct BfsPlanner;

impl PathPlanner for BfsPlanner {
    fn algorithm(&self) -> PathAlgorithm {
        PathAlgorithm::Bfs
    }

    fn find_path(
        &self,
        graph: &StationGraph,
        start: StationId,
        goal: StationId,
        constraints: &PathConstraints,
    ) -> SearchResult {
        find_path_bfs(graph, start, goal, constraints)
    }
}

/// Select the planner implementing `algorithm`.
pub fn select_planner(algorithm: PathAlgorithm) -> Box<dyn PathPlanner> {
    match algorithm {
        PathAlgorithm::Exhaustive => Box::new(ExhaustivePlanner),
        PathAlgorithm::Bfs => Box::new(BfsPlanner),
    }
}
