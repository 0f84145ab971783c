//! Path planning facade.
//!
//! This module provides:
//! - [`PathAlgorithm`] - Supported search strategies (exhaustive DFS, BFS)
//! - [`PathRequest`] - High-level request by station name
//! - [`PathPlan`] - Planned path result with search statistics
//! - [`plan_path`] - Main entry point for computing paths
//!
//! # Example
//!
//! ```ignore
//! use transitpath_lib::{load_station_graph, plan_path, PathRequest};
//!
//! let graph = load_station_graph("docs/fixtures/vancouver_subway.csv".as_ref())?;
//! let request = PathRequest::new("Waterfront", "Commercial-Broadway")
//!     .avoiding(["Main Street-Science World"]);
//! let plan = plan_path(&graph, &request)?;
//! println!("{} hops", plan.hop_count());
//! ```

mod planner;

pub use planner::{select_planner, BfsPlanner, ExhaustivePlanner, PathPlanner};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::graph::StationGraph;
use crate::path::{
    names_of, resolve_forbidden, PathConstraints, SearchLimits, SearchOutcome, SearchStats,
};

/// Supported path search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PathAlgorithm {
    /// Enumerate every simple path and keep a shortest one.
    #[default]
    Exhaustive,
    /// Breadth-first search (unit edge cost).
    Bfs,
}

impl fmt::Display for PathAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            PathAlgorithm::Exhaustive => "exhaustive",
            PathAlgorithm::Bfs => "bfs",
        };
        f.write_str(value)
    }
}

impl FromStr for PathAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exhaustive" | "dfs" => Ok(PathAlgorithm::Exhaustive),
            "bfs" => Ok(PathAlgorithm::Bfs),
            other => Err(format!("unknown path algorithm '{other}'")),
        }
    }
}

/// High-level path planning request.
#[derive(Debug, Clone)]
pub struct PathRequest {
    pub source: String,
    pub target: String,
    /// Stations the path must not pass through.
    pub forbidden: Vec<String>,
    pub algorithm: PathAlgorithm,
    pub limits: SearchLimits,
}

impl PathRequest {
    /// Exhaustive search without forbidden stations or limits.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            forbidden: Vec::new(),
            algorithm: PathAlgorithm::default(),
            limits: SearchLimits::default(),
        }
    }

    pub fn avoiding<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.forbidden.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_algorithm(mut self, algorithm: PathAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Planned path returned by the library.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PathPlan {
    pub algorithm: PathAlgorithm,
    pub source: String,
    pub target: String,
    /// Station names from source to target; empty when no path was found.
    pub steps: Vec<String>,
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

impl PathPlan {
    /// Number of hops in the path.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Compute a path for `request`.
///
/// Unknown endpoints are errors; unknown forbidden names are ignored. A
/// search that exhausts its limits or is cancelled yields an empty plan with
/// the corresponding [`SearchOutcome`].
pub fn plan_path(graph: &StationGraph, request: &PathRequest) -> Result<PathPlan> {
    let start = graph.resolve(&request.source)?;
    let goal = graph.resolve(&request.target)?;
    let constraints = PathConstraints::new(
        resolve_forbidden(graph, &request.forbidden),
        request.limits.clone(),
    );

    let planner = select_planner(request.algorithm);
    if planner.is_exponential()
        && request.limits.max_expansions.is_none()
        && request.limits.timeout.is_none()
    {
        debug!(stations = graph.len(), "running unbounded exhaustive search");
    }

    let result = planner.find_path(graph, start, goal, &constraints);
    if result.outcome.is_aborted() {
        warn!(
            source = %request.source,
            target = %request.target,
            outcome = ?result.outcome,
            expansions = result.stats.expansions,
            "path search stopped before completing"
        );
    }

    Ok(PathPlan {
        algorithm: planner.algorithm(),
        source: request.source.clone(),
        target: request.target.clone(),
        steps: names_of(graph, &result.steps),
        outcome: result.outcome,
        stats: result.stats,
    })
}
