//! Interaction controller: the state machine between user input and the
//! path finder.
//!
//! ```text
//! Idle --select--> Selecting --select--> Ready --compute--> Computed --view--> Viewing
//!   ^                 ^   |                |                    |                 |
//!   |                 +---+-- forbid ------+                    |                 |
//!   +---------------------------- reset ------------------------+-----------------+
//! ```
//!
//! The controller is the only writer of [`SelectionState`]. After every
//! accepted mutation it pushes a [`Snapshot`] to its [`Presenter`]; on
//! view-on-map it hands the path and station locations to its [`MapPlotter`].
//!
//! Two entry points exist. The action methods ([`select_endpoint`],
//! [`compute_path`], ...) reject illegal actions with
//! [`Error::InvalidAction`]. [`handle_event`] is the UI adapter: it turns
//! those rejections into [`Transition::Ignored`], the way a disabled button
//! ignores clicks. Unknown stations are reported by both.
//!
//! The controller is single-writer and not shared between threads; callers
//! with several input sources should funnel events through one queue.
//!
//! [`select_endpoint`]: InteractionController::select_endpoint
//! [`compute_path`]: InteractionController::compute_path
//! [`handle_event`]: InteractionController::handle_event

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::{GeoLocation, StationGraph};
use crate::path::{SearchLimits, SearchOutcome};
use crate::routing::{plan_path, PathAlgorithm, PathRequest};
use crate::selection::{ActionAvailability, SelectionState, MAX_ENDPOINTS};

/// Logical state of an interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionState {
    /// Nothing selected or forbidden.
    Idle,
    /// Fewer than two endpoints chosen.
    Selecting,
    /// Two endpoints chosen, path not yet computed.
    Ready,
    /// A path was computed (possibly empty).
    Computed,
    /// The computed path was handed to the map plotter.
    Viewing,
}

impl fmt::Display for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            InteractionState::Idle => "idle",
            InteractionState::Selecting => "selecting",
            InteractionState::Ready => "ready",
            InteractionState::Computed => "computed",
            InteractionState::Viewing => "viewing",
        };
        f.write_str(value)
    }
}

/// Buttons the user can press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionButton {
    ComputePath,
    Reset,
    ViewOnMap,
}

impl ActionButton {
    pub fn name(self) -> &'static str {
        match self {
            ActionButton::ComputePath => "compute-path",
            ActionButton::Reset => "reset",
            ActionButton::ViewOnMap => "view-on-map",
        }
    }
}

/// Input already resolved to an intent by the input source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    SelectStation(String),
    ForbidStation(String),
    Press(ActionButton),
}

/// Effect of one input on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The input was accepted and changed the session.
    Applied {
        from: InteractionState,
        to: InteractionState,
    },
    /// The input was legal but had nothing to change.
    Unchanged,
    /// The input was not permitted in the current state and was dropped.
    Ignored,
}

/// Everything the presentation layer needs to redraw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub state: InteractionState,
    pub selected: Vec<String>,
    pub forbidden: Vec<String>,
    pub path: Vec<String>,
    pub actions: ActionAvailability,
    /// Whether compute-path has fired since the last reset.
    pub path_requested: bool,
    /// Whether the "no path found" notice is showing.
    pub no_path_found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<SearchOutcome>,
}

/// Receives session updates to drive highlighting and button states.
pub trait Presenter {
    /// Called after every accepted mutation.
    fn present(&mut self, snapshot: &Snapshot);

    /// Called once when compute-path produced an empty path.
    fn no_path_found(&mut self, _snapshot: &Snapshot) {}
}

/// Renders a path on an external map.
pub trait MapPlotter {
    fn plot_route(&mut self, path: &[String], locations: &HashMap<String, GeoLocation>);
}

/// Presenter that discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _snapshot: &Snapshot) {}
}

/// Plotter that discards every route.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPlotter;

impl MapPlotter for NullPlotter {
    fn plot_route(&mut self, _path: &[String], _locations: &HashMap<String, GeoLocation>) {}
}

/// Sole mutator of a [`SelectionState`], enforcing the legal transitions.
pub struct InteractionController<P = NullPresenter, M = NullPlotter> {
    graph: Arc<StationGraph>,
    selection: SelectionState,
    path_requested: bool,
    viewing: bool,
    last_outcome: Option<SearchOutcome>,
    algorithm: PathAlgorithm,
    limits: SearchLimits,
    presenter: P,
    plotter: M,
}

impl InteractionController<NullPresenter, NullPlotter> {
    /// Controller without presentation or map collaborators.
    pub fn headless(graph: Arc<StationGraph>) -> Self {
        Self::new(graph, NullPresenter, NullPlotter)
    }
}

impl<P: Presenter, M: MapPlotter> InteractionController<P, M> {
    pub fn new(graph: Arc<StationGraph>, presenter: P, plotter: M) -> Self {
        Self {
            graph,
            selection: SelectionState::new(),
            path_requested: false,
            viewing: false,
            last_outcome: None,
            algorithm: PathAlgorithm::default(),
            limits: SearchLimits::default(),
            presenter,
            plotter,
        }
    }

    /// Search strategy used by compute-path.
    pub fn with_algorithm(mut self, algorithm: PathAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Bounds applied to every compute-path search.
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn graph(&self) -> &StationGraph {
        &self.graph
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Mutable access for front ends that also write through the presenter.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn plotter(&self) -> &M {
        &self.plotter
    }

    pub fn path_requested(&self) -> bool {
        self.path_requested
    }

    /// Whether compute-path ran and found nothing.
    pub fn no_path_found(&self) -> bool {
        self.path_requested && self.selection.path().is_empty()
    }

    pub fn state(&self) -> InteractionState {
        if self.path_requested {
            if self.viewing {
                InteractionState::Viewing
            } else {
                InteractionState::Computed
            }
        } else if self.selection.selected().len() == MAX_ENDPOINTS {
            InteractionState::Ready
        } else if self.selection.is_empty() {
            InteractionState::Idle
        } else {
            InteractionState::Selecting
        }
    }

    /// Actions the user may trigger now.
    ///
    /// Compute-path additionally requires that no path has been requested
    /// since the last reset.
    pub fn actions(&self) -> ActionAvailability {
        let mut actions = self.selection.actions();
        actions.compute_path &= !self.path_requested;
        actions
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state(),
            selected: self.selection.selected().to_vec(),
            forbidden: self.selection.forbidden().iter().cloned().collect(),
            path: self.selection.path().to_vec(),
            actions: self.actions(),
            path_requested: self.path_requested,
            no_path_found: self.no_path_found(),
            outcome: self.last_outcome,
        }
    }

    /// Feed one input event, ignoring it if the current state forbids it.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<Transition> {
        let result = match &event {
            InputEvent::SelectStation(name) => self.select_endpoint(name),
            InputEvent::ForbidStation(name) => self.forbid_station(name),
            InputEvent::Press(button) => self.press(*button),
        };

        match result {
            Err(err) if err.is_invalid_action() => {
                debug!(?event, reason = %err, "ignoring input");
                Ok(Transition::Ignored)
            }
            other => other,
        }
    }

    /// Dispatch a button press.
    pub fn press(&mut self, button: ActionButton) -> Result<Transition> {
        match button {
            ActionButton::ComputePath => self.compute_path(),
            ActionButton::Reset => self.reset(),
            ActionButton::ViewOnMap => self.view_on_map(),
        }
    }

    /// Choose `name` as the next endpoint.
    ///
    /// Re-selecting an endpoint is a no-op. Selecting a forbidden station
    /// removes it from the forbidden set.
    pub fn select_endpoint(&mut self, name: &str) -> Result<Transition> {
        self.graph.resolve(name)?;

        if self.selection.is_selected(name) {
            return Ok(Transition::Unchanged);
        }
        if self.path_requested || self.selection.selected().len() >= MAX_ENDPOINTS {
            return Err(self.rejected("select-endpoint"));
        }

        let from = self.state();
        self.selection.push_endpoint(name);
        Ok(self.applied(from))
    }

    /// Mark `name` as a station to avoid, dropping it from the endpoints.
    ///
    /// Not permitted once a path has been requested: either the path or the
    /// "no path found" notice is on display until reset.
    pub fn forbid_station(&mut self, name: &str) -> Result<Transition> {
        self.graph.resolve(name)?;

        if self.path_requested {
            return Err(self.rejected("forbid-station"));
        }

        let from = self.state();
        if !self.selection.forbid(name) {
            return Ok(Transition::Unchanged);
        }
        Ok(self.applied(from))
    }

    /// Search for a path between the two endpoints avoiding forbidden stations.
    pub fn compute_path(&mut self) -> Result<Transition> {
        if self.state() != InteractionState::Ready {
            return Err(self.rejected(ActionButton::ComputePath.name()));
        }
        let Some((source, target)) = self.selection.endpoints() else {
            return Err(self.rejected(ActionButton::ComputePath.name()));
        };

        let request = PathRequest::new(source, target)
            .avoiding(self.selection.forbidden().iter().cloned())
            .with_algorithm(self.algorithm)
            .with_limits(self.limits.clone());
        let plan = plan_path(&self.graph, &request)?;

        info!(
            source = %plan.source,
            target = %plan.target,
            hops = plan.hop_count(),
            outcome = ?plan.outcome,
            "path computed"
        );

        let from = self.state();
        self.last_outcome = Some(plan.outcome);
        self.selection.set_path(plan.steps);
        self.path_requested = true;
        let transition = self.applied(from);

        if self.selection.path().is_empty() {
            let snapshot = self.snapshot();
            self.presenter.no_path_found(&snapshot);
        }
        Ok(transition)
    }

    /// Hand the computed path and its station locations to the map plotter.
    ///
    /// May be invoked repeatedly; the path is never modified.
    pub fn view_on_map(&mut self) -> Result<Transition> {
        if !self.actions().view_on_map || !self.path_requested {
            return Err(self.rejected(ActionButton::ViewOnMap.name()));
        }

        let locations = self.graph.locations_of(self.selection.path())?;
        self.plotter.plot_route(self.selection.path(), &locations);

        let from = self.state();
        self.viewing = true;
        Ok(self.applied(from))
    }

    /// Clear endpoints, forbidden stations and path.
    pub fn reset(&mut self) -> Result<Transition> {
        if !self.actions().reset {
            return Err(self.rejected(ActionButton::Reset.name()));
        }

        let from = self.state();
        self.selection.clear();
        self.path_requested = false;
        self.viewing = false;
        self.last_outcome = None;
        Ok(self.applied(from))
    }

    fn applied(&mut self, from: InteractionState) -> Transition {
        let to = self.state();
        debug!(%from, %to, "interaction transition");
        let snapshot = self.snapshot();
        self.presenter.present(&snapshot);
        Transition::Applied { from, to }
    }

    fn rejected(&self, action: &'static str) -> Error {
        Error::InvalidAction {
            action,
            state: self.state().to_string(),
        }
    }
}
