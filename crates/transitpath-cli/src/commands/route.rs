//! Route command handler for one-shot path queries.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use transitpath_cli::output::{write_plan, OutputFormat};
use transitpath_lib::{plan_path, PathAlgorithm, PathRequest, SearchLimits, StationGraph};

/// Arguments for the route command.
#[derive(Args, Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting station name.
    #[arg(long = "from")]
    pub from: String,
    /// Destination station name.
    #[arg(long = "to")]
    pub to: String,
    /// Station the path must not pass through (repeatable).
    #[arg(long = "avoid")]
    pub avoid: Vec<String>,
    /// Search strategy.
    #[arg(long, default_value = "exhaustive", value_parser = parse_algorithm)]
    pub algorithm: PathAlgorithm,
    /// Stop the search after this many node expansions.
    #[arg(long)]
    pub max_expansions: Option<usize>,
    /// Stop the search after this many milliseconds.
    #[arg(long = "timeout-ms")]
    pub timeout_ms: Option<u64>,
}

impl RouteCommandArgs {
    /// Search limits requested on the command line.
    pub fn limits(&self) -> SearchLimits {
        let mut limits = SearchLimits::default();
        if let Some(max) = self.max_expansions {
            limits = limits.with_max_expansions(max);
        }
        if let Some(ms) = self.timeout_ms {
            limits = limits.with_timeout(Duration::from_millis(ms));
        }
        limits
    }

    /// Convert CLI args to a library [`PathRequest`].
    pub fn to_request(&self) -> PathRequest {
        PathRequest::new(self.from.as_str(), self.to.as_str())
            .avoiding(self.avoid.iter().cloned())
            .with_algorithm(self.algorithm)
            .with_limits(self.limits())
    }
}

pub(crate) fn parse_algorithm(value: &str) -> Result<PathAlgorithm, String> {
    value.parse()
}

/// Handle the route subcommand.
///
/// An empty result is not an error: the "no path" notice is printed and the
/// command succeeds. Unknown endpoints fail.
pub fn handle_route_command(
    graph: &StationGraph,
    args: &RouteCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    let request = args.to_request();
    let plan = plan_path(graph, &request)
        .with_context(|| format!("failed to plan a path from {} to {}", args.from, args.to))?;
    debug!(
        expansions = plan.stats.expansions,
        candidates = plan.stats.candidates,
        "route planned"
    );

    let mut stdout = io::stdout().lock();
    write_plan(&mut stdout, graph, &plan, format)
}
