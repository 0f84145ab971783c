//! Path search over a [`StationGraph`].
//!
//! Two strategies share one contract: return a path with the fewest stations
//! that avoids every forbidden station, or an empty path when none exists.
//!
//! * [`find_path_exhaustive`] enumerates every simple path with a depth-first
//!   walk and keeps a shortest one. This is worst-case exponential in the size
//!   of the network; it is fine for a single metro system (tens of stations)
//!   and is bounded by [`SearchLimits`] for anything larger.
//! * [`find_path_bfs`] is the breadth-first alternative with the same
//!   minimum-hop result.
//!
//! Among several paths of minimal length either strategy may return any one.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::graph::{StationGraph, StationId};

/// How often (in expansions) the wall-clock deadline is consulted.
const DEADLINE_CHECK_INTERVAL: usize = 64;

/// Cooperative cancellation flag shared between a search and its owner.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; running searches stop at their next branch.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Bounds applied to a single search.
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    /// Maximum number of node expansions before giving up.
    pub max_expansions: Option<usize>,
    /// Wall-clock budget for the search.
    pub timeout: Option<Duration>,
    /// Token checked between branches.
    pub cancellation: Option<CancellationToken>,
}

impl SearchLimits {
    /// No limits at all.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = Some(max);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Constraints applied during path search.
#[derive(Debug, Clone, Default)]
pub struct PathConstraints {
    /// Stations that must not appear in the resulting path.
    pub forbidden: HashSet<StationId>,
    pub limits: SearchLimits,
}

impl PathConstraints {
    pub fn new(forbidden: HashSet<StationId>, limits: SearchLimits) -> Self {
        Self { forbidden, limits }
    }

    fn allows(&self, station: StationId) -> bool {
        !self.forbidden.contains(&station)
    }
}

/// How a search terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    /// A path was found.
    Found,
    /// The endpoints are disconnected once forbidden stations are removed.
    NoPath,
    /// The expansion or time budget ran out before the search completed.
    BudgetExhausted,
    /// The search was cancelled through its [`CancellationToken`].
    Cancelled,
}

impl SearchOutcome {
    /// Whether the search stopped before exploring everything.
    pub fn is_aborted(self) -> bool {
        matches!(self, SearchOutcome::BudgetExhausted | SearchOutcome::Cancelled)
    }
}

/// Counters gathered while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes taken off the stack or queue.
    pub expansions: usize,
    /// Complete source-to-target paths seen.
    pub candidates: usize,
}

/// Path found by a search together with how the search ended.
///
/// An aborted search never reports a partial best path: `steps` is empty
/// unless `outcome` is [`SearchOutcome::Found`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub steps: Vec<StationId>,
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

impl SearchResult {
    fn found(steps: Vec<StationId>, stats: SearchStats) -> Self {
        Self {
            steps,
            outcome: SearchOutcome::Found,
            stats,
        }
    }

    fn empty(outcome: SearchOutcome, stats: SearchStats) -> Self {
        Self {
            steps: Vec::new(),
            outcome,
            stats,
        }
    }
}

/// Tracks the search budget and cancellation.
struct Budget<'a> {
    limits: &'a SearchLimits,
    deadline: Option<Instant>,
    stats: SearchStats,
}

impl<'a> Budget<'a> {
    fn new(limits: &'a SearchLimits) -> Self {
        Self {
            limits,
            deadline: limits.timeout.map(|timeout| Instant::now() + timeout),
            stats: SearchStats::default(),
        }
    }

    /// Count one expansion, returning the reason to stop if the budget is spent.
    fn expand(&mut self) -> Option<SearchOutcome> {
        self.stats.expansions += 1;

        if let Some(token) = &self.limits.cancellation {
            if token.is_cancelled() {
                return Some(SearchOutcome::Cancelled);
            }
        }
        if let Some(max) = self.limits.max_expansions {
            if self.stats.expansions > max {
                return Some(SearchOutcome::BudgetExhausted);
            }
        }
        if let Some(deadline) = self.deadline {
            if self.stats.expansions % DEADLINE_CHECK_INTERVAL == 0 && Instant::now() >= deadline
            {
                return Some(SearchOutcome::BudgetExhausted);
            }
        }
        None
    }
}

/// Pending branch of the depth-first walk. Each frame owns its own copy of
/// the path so far and of the visited set, so siblings never observe each
/// other's choices beyond the shared prefix.
struct Frame {
    station: StationId,
    path: Vec<StationId>,
    visited: HashSet<StationId>,
}

/// Walk every simple path from `start` to `goal`, handing each to `on_path`.
///
/// Returns the abort reason when the budget ran out.
fn walk_simple_paths<F>(
    graph: &StationGraph,
    start: StationId,
    goal: StationId,
    constraints: &PathConstraints,
    budget: &mut Budget<'_>,
    mut on_path: F,
) -> Option<SearchOutcome>
where
    F: FnMut(&[StationId]),
{
    if !constraints.allows(start) || !constraints.allows(goal) {
        debug!(%start, %goal, "endpoint is forbidden; skipping search");
        return None;
    }

    let mut visited = constraints.forbidden.clone();
    visited.insert(start);
    let mut stack = vec![Frame {
        station: start,
        path: vec![start],
        visited,
    }];

    while let Some(frame) = stack.pop() {
        if let Some(reason) = budget.expand() {
            return Some(reason);
        }

        if frame.station == goal {
            budget.stats.candidates += 1;
            on_path(&frame.path);
            continue;
        }

        let branches: Vec<StationId> = graph
            .neighbour_ids(frame.station)
            .filter(|next| !frame.visited.contains(next))
            .collect();

        // Reverse so neighbours are explored in ascending order.
        for next in branches.into_iter().rev() {
            let mut visited = frame.visited.clone();
            visited.insert(next);
            let mut path = frame.path.clone();
            path.push(next);
            stack.push(Frame {
                station: next,
                path,
                visited,
            });
        }
    }

    None
}

/// Enumerate every simple path from `start` to `goal` avoiding forbidden
/// stations, then keep one of minimal length.
pub fn find_path_exhaustive(
    graph: &StationGraph,
    start: StationId,
    goal: StationId,
    constraints: &PathConstraints,
) -> SearchResult {
    let mut budget = Budget::new(&constraints.limits);
    let mut shortest: Option<Vec<StationId>> = None;

    let aborted = walk_simple_paths(graph, start, goal, constraints, &mut budget, |path| {
        if shortest.as_ref().map_or(true, |best| path.len() < best.len()) {
            shortest = Some(path.to_vec());
        }
    });

    let stats = budget.stats;
    debug!(
        expansions = stats.expansions,
        candidates = stats.candidates,
        "exhaustive search finished"
    );

    match (aborted, shortest) {
        (Some(reason), _) => SearchResult::empty(reason, stats),
        (None, Some(path)) => SearchResult::found(path, stats),
        (None, None) => SearchResult::empty(SearchOutcome::NoPath, stats),
    }
}

/// Collect every simple path from `start` to `goal` avoiding forbidden
/// stations. Returns the abort reason alongside whatever was gathered.
pub fn enumerate_paths(
    graph: &StationGraph,
    start: StationId,
    goal: StationId,
    constraints: &PathConstraints,
) -> (Vec<Vec<StationId>>, Option<SearchOutcome>) {
    let mut budget = Budget::new(&constraints.limits);
    let mut paths = Vec::new();
    let aborted = walk_simple_paths(graph, start, goal, constraints, &mut budget, |path| {
        paths.push(path.to_vec());
    });
    (paths, aborted)
}

/// Run breadth-first search; the first path reaching `goal` has the fewest hops.
pub fn find_path_bfs(
    graph: &StationGraph,
    start: StationId,
    goal: StationId,
    constraints: &PathConstraints,
) -> SearchResult {
    let mut budget = Budget::new(&constraints.limits);

    if !constraints.allows(start) || !constraints.allows(goal) {
        debug!(%start, %goal, "endpoint is forbidden; skipping search");
        return SearchResult::empty(SearchOutcome::NoPath, budget.stats);
    }
    if start == goal {
        budget.stats.candidates = 1;
        return SearchResult::found(vec![start], budget.stats);
    }

    let mut parents: HashMap<StationId, Option<StationId>> = HashMap::new();
    let mut queue = VecDeque::new();
    parents.insert(start, None);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if let Some(reason) = budget.expand() {
            return SearchResult::empty(reason, budget.stats);
        }

        for next in graph.neighbour_ids(current) {
            if parents.contains_key(&next) || !constraints.allows(next) {
                continue;
            }

            parents.insert(next, Some(current));
            if next == goal {
                budget.stats.candidates = 1;
                return SearchResult::found(reconstruct_path(&parents, start, goal), budget.stats);
            }
            queue.push_back(next);
        }
    }

    SearchResult::empty(SearchOutcome::NoPath, budget.stats)
}

fn reconstruct_path(
    parents: &HashMap<StationId, Option<StationId>>,
    start: StationId,
    goal: StationId,
) -> Vec<StationId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}

/// Resolve forbidden station names, ignoring names that are not stations.
pub(crate) fn resolve_forbidden<I>(graph: &StationGraph, forbidden: I) -> HashSet<StationId>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    forbidden
        .into_iter()
        .filter_map(|name| {
            let name = name.as_ref();
            let id = graph.station_id(name);
            if id.is_none() {
                debug!(station = name, "ignoring unknown forbidden station");
            }
            id
        })
        .collect()
}

pub(crate) fn names_of(graph: &StationGraph, steps: &[StationId]) -> Vec<String> {
    steps
        .iter()
        .filter_map(|id| graph.station_name(*id))
        .map(str::to_string)
        .collect()
}

/// Return a shortest path between `source` and `target` that never visits a
/// forbidden station, using exhaustive enumeration.
///
/// The result is empty when no such path exists. Fails with
/// [`Error::UnknownStation`](crate::Error::UnknownStation) when either
/// endpoint is not in the graph.
pub fn find_shortest_path<I>(
    graph: &StationGraph,
    source: &str,
    target: &str,
    forbidden: I,
) -> Result<Vec<String>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let start = graph.resolve(source)?;
    let goal = graph.resolve(target)?;
    let constraints =
        PathConstraints::new(resolve_forbidden(graph, forbidden), SearchLimits::default());
    let result = find_path_exhaustive(graph, start, goal, &constraints);
    Ok(names_of(graph, &result.steps))
}

/// Breadth-first counterpart of [`find_shortest_path`].
pub fn find_shortest_path_bfs<I>(
    graph: &StationGraph,
    source: &str,
    target: &str,
    forbidden: I,
) -> Result<Vec<String>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let start = graph.resolve(source)?;
    let goal = graph.resolve(target)?;
    let constraints =
        PathConstraints::new(resolve_forbidden(graph, forbidden), SearchLimits::default());
    let result = find_path_bfs(graph, start, goal, &constraints);
    Ok(names_of(graph, &result.steps))
}

/// Every simple path between `source` and `target` avoiding `forbidden`,
/// by station name.
pub fn enumerate_simple_paths<I>(
    graph: &StationGraph,
    source: &str,
    target: &str,
    forbidden: I,
    limits: &SearchLimits,
) -> Result<Vec<Vec<String>>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let start = graph.resolve(source)?;
    let goal = graph.resolve(target)?;
    let constraints = PathConstraints::new(resolve_forbidden(graph, forbidden), limits.clone());
    let (paths, aborted) = enumerate_paths(graph, start, goal, &constraints);
    if let Some(reason) = aborted {
        debug!(?reason, collected = paths.len(), "path enumeration stopped early");
    }
    Ok(paths.iter().map(|path| names_of(graph, path)).collect())
}
