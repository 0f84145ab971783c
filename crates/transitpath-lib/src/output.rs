use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::StationGraph;
use crate::path::SearchOutcome;
use crate::routing::{PathAlgorithm, PathPlan};

/// Presentation style for turning a [`PathSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRenderMode {
    PlainText,
    Compact,
}

/// Station visited along a planned path.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PathStep {
    pub index: usize,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Structured representation of a planned path that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PathSummary {
    pub algorithm: PathAlgorithm,
    pub outcome: SearchOutcome,
    pub hops: usize,
    pub source: String,
    pub target: String,
    pub steps: Vec<PathStep>,
}

impl PathSummary {
    /// Convert a [`PathPlan`] into a summary with resolved station locations.
    pub fn from_plan(graph: &StationGraph, plan: &PathPlan) -> Result<Self> {
        if plan.steps.is_empty() {
            return Err(Error::EmptyPath);
        }

        let locations = graph.locations_of(&plan.steps)?;
        let steps = plan
            .steps
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let location = locations[name];
                PathStep {
                    index,
                    name: name.clone(),
                    latitude: location.latitude,
                    longitude: location.longitude,
                }
            })
            .collect();

        Ok(Self {
            algorithm: plan.algorithm,
            outcome: plan.outcome,
            hops: plan.hop_count(),
            source: plan.source.clone(),
            target: plan.target.clone(),
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: PathRenderMode) -> String {
        match mode {
            PathRenderMode::PlainText => self.render_plain(),
            PathRenderMode::Compact => self.render_compact(),
        }
    }

    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Path from {} to {} ({} hops; algorithm: {}):",
            self.source, self.target, self.hops, self.algorithm
        );
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "{:>3}: {} ({:.4}, {:.4})",
                step.index, step.name, step.latitude, step.longitude
            );
        }
        buffer
    }

    fn render_compact(&self) -> String {
        let joined = self
            .steps
            .iter()
            .map(|step| step.name.as_str())
            .collect::<Vec<_>>()
            .join(" -> ");
        format!("{joined}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{plan_path, PathRequest};
    use crate::test_helpers::GraphBuilder;

    #[test]
    fn summary_resolves_locations() {
        let graph = GraphBuilder::new().line(&["A", "B", "C"]).build();
        let plan = plan_path(&graph, &PathRequest::new("A", "C")).unwrap();
        let summary = PathSummary::from_plan(&graph, &plan).unwrap();

        assert_eq!(summary.hops, 2);
        assert_eq!(summary.steps.len(), 3);
        assert_eq!(summary.steps[1].name, "B");
        let b = graph.station_by_name("B").unwrap().location;
        assert_eq!(summary.steps[1].latitude, b.latitude);

        let text = summary.render(PathRenderMode::PlainText);
        assert!(text.starts_with("Path from A to C (2 hops; algorithm: exhaustive):"));
        assert_eq!(summary.render(PathRenderMode::Compact), "A -> B -> C\n");
    }

    #[test]
    fn empty_plan_is_rejected() {
        let graph = GraphBuilder::new().line(&["A", "B", "C"]).build();
        let plan = plan_path(&graph, &PathRequest::new("A", "C").avoiding(["B"])).unwrap();
        assert!(matches!(
            PathSummary::from_plan(&graph, &plan),
            Err(Error::EmptyPath)
        ));
    }

    #[test]
    fn summary_serialises_to_json() {
        let graph = GraphBuilder::new().line(&["A", "B"]).build();
        let plan = plan_path(&graph, &PathRequest::new("A", "B")).unwrap();
        let summary = PathSummary::from_plan(&graph, &plan).unwrap();
        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(value["algorithm"], "exhaustive");
        assert_eq!(value["outcome"], "found");
        assert_eq!(value["steps"][0]["name"], "A");
    }
}
