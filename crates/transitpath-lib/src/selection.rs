//! Selection state shared between the interaction controller and the
//! presentation layer.
//!
//! The state holds the chosen endpoints, the stations to avoid and the most
//! recently computed path. Mutators are crate-private: only the
//! [`InteractionController`](crate::controller::InteractionController)
//! changes a selection, everything else reads it.

use std::collections::BTreeSet;

use serde::Serialize;

/// Maximum number of endpoints a selection can hold.
pub const MAX_ENDPOINTS: usize = 2;

/// Which actions the user may trigger right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ActionAvailability {
    pub compute_path: bool,
    pub view_on_map: bool,
    pub reset: bool,
}

/// How a station should be highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StationMark {
    Idle,
    Selected,
    Forbidden,
    OnPath,
}

/// Chosen endpoints, avoided stations and the last computed path.
///
/// `selected` and `forbidden` are always disjoint and `selected` never holds
/// more than [`MAX_ENDPOINTS`] names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    selected: Vec<String>,
    forbidden: BTreeSet<String>,
    path: Vec<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Endpoints in the order they were picked.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn forbidden(&self) -> &BTreeSet<String> {
        &self.forbidden
    }

    /// Most recently computed path; empty if none was computed or none exists.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|selected| selected == name)
    }

    pub fn is_forbidden(&self, name: &str) -> bool {
        self.forbidden.contains(name)
    }

    /// Whether nothing is selected or forbidden.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.forbidden.is_empty()
    }

    /// Both endpoints, once two have been picked.
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        match self.selected.as_slice() {
            [source, target] => Some((source.as_str(), target.as_str())),
            _ => None,
        }
    }

    /// Actions derived from the current selection.
    pub fn actions(&self) -> ActionAvailability {
        ActionAvailability {
            compute_path: self.selected.len() == MAX_ENDPOINTS,
            view_on_map: !self.path.is_empty(),
            reset: !self.is_empty(),
        }
    }

    pub fn mark_of(&self, name: &str) -> StationMark {
        if self.is_forbidden(name) {
            StationMark::Forbidden
        } else if self.is_selected(name) {
            StationMark::Selected
        } else if self.path.iter().any(|step| step == name) {
            StationMark::OnPath
        } else {
            StationMark::Idle
        }
    }

    /// Append an endpoint, taking it out of the forbidden set.
    ///
    /// Returns `false` when the station is already selected or both endpoints
    /// are taken.
    pub(crate) fn push_endpoint(&mut self, name: &str) -> bool {
        if self.is_selected(name) || self.selected.len() >= MAX_ENDPOINTS {
            return false;
        }
        self.forbidden.remove(name);
        self.selected.push(name.to_string());
        true
    }

    /// Add a station to the forbidden set, dropping it from the endpoints.
    ///
    /// Returns `false` when nothing changed.
    pub(crate) fn forbid(&mut self, name: &str) -> bool {
        let before = self.selected.len();
        self.selected.retain(|selected| selected != name);
        let inserted = self.forbidden.insert(name.to_string());
        inserted || before != self.selected.len()
    }

    pub(crate) fn set_path(&mut self, path: Vec<String>) {
        self.path = path;
    }

    pub(crate) fn clear(&mut self) {
        self.selected.clear();
        self.forbidden.clear();
        self.path.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disjoint(state: &SelectionState) -> bool {
        state.selected().iter().all(|name| !state.is_forbidden(name))
    }

    #[test]
    fn reselecting_is_a_no_op() {
        let mut state = SelectionState::new();
        assert!(state.push_endpoint("A"));
        assert!(!state.push_endpoint("A"));
        assert_eq!(state.selected(), ["A"]);
    }

    #[test]
    fn third_endpoint_is_rejected() {
        let mut state = SelectionState::new();
        state.push_endpoint("A");
        state.push_endpoint("B");
        assert!(!state.push_endpoint("C"));
        assert_eq!(state.endpoints(), Some(("A", "B")));
        assert!(state.actions().compute_path);
    }

    #[test]
    fn selecting_overrides_forbidding() {
        let mut state = SelectionState::new();
        state.forbid("A");
        state.push_endpoint("A");
        assert!(state.forbidden().is_empty());
        assert_eq!(state.selected(), ["A"]);
    }

    #[test]
    fn forbidding_overrides_selecting() {
        let mut state = SelectionState::new();
        state.push_endpoint("A");
        state.push_endpoint("B");
        assert!(state.forbid("A"));
        assert_eq!(state.selected(), ["B"]);
        assert!(state.is_forbidden("A"));
        assert!(!state.actions().compute_path);
        assert!(!state.forbid("A"));
    }

    #[test]
    fn invariants_hold_over_mixed_sequence() {
        let mut state = SelectionState::new();
        let ops: [(&str, bool); 8] = [
            ("A", true),
            ("B", false),
            ("B", true),
            ("C", true),
            ("A", false),
            ("C", false),
            ("D", true),
            ("B", true),
        ];
        for (name, select) in ops {
            if select {
                state.push_endpoint(name);
            } else {
                state.forbid(name);
            }
            assert!(disjoint(&state));
            assert!(state.selected().len() <= MAX_ENDPOINTS);
        }
    }

    #[test]
    fn actions_follow_state() {
        let mut state = SelectionState::new();
        assert_eq!(state.actions(), ActionAvailability::default());

        state.forbid("X");
        assert!(state.actions().reset);

        state.push_endpoint("A");
        state.push_endpoint("B");
        state.set_path(vec!["A".into(), "B".into()]);
        let actions = state.actions();
        assert!(actions.compute_path && actions.view_on_map && actions.reset);

        state.clear();
        assert_eq!(state, SelectionState::default());
    }

    #[test]
    fn marks_prioritise_forbidden_then_selected() {
        let mut state = SelectionState::new();
        state.push_endpoint("A");
        state.push_endpoint("C");
        state.forbid("D");
        state.set_path(vec!["A".into(), "B".into(), "C".into()]);

        assert_eq!(state.mark_of("A"), StationMark::Selected);
        assert_eq!(state.mark_of("B"), StationMark::OnPath);
        assert_eq!(state.mark_of("D"), StationMark::Forbidden);
        assert_eq!(state.mark_of("E"), StationMark::Idle);
    }
}
