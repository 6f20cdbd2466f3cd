//! Presentation-layer planning state.
//!
//! A client (map UI, CLI) holds one `SessionState`, feeds its chosen start
//! and end into `RouteGenerator::generate`, and stores the result back with
//! `with_route`. The HTTP handlers stay stateless and never hold one.

use crate::models::{Coordinates, Marker, Route, RouteSnapshot};
use time::OffsetDateTime;

/// Which endpoint the next map selection fills in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionTarget {
    #[default]
    None,
    Start,
    End,
}

/// Planning state of one user session.
///
/// Transitions consume the state and return the next one, so a route and its
/// markers are always replaced together.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub start: Option<Coordinates>,
    pub end: Option<Coordinates>,
    pub selection: SelectionTarget,
    pub route: Option<Route>,
    pub markers: Vec<Marker>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(self, target: SelectionTarget) -> Self {
        SessionState {
            selection: target,
            ..self
        }
    }

    /// Assign the picked coordinate to the active endpoint and clear the target.
    /// Without an active target the pick is ignored.
    pub fn apply_map_selection(self, at: Coordinates) -> Self {
        match self.selection {
            SelectionTarget::Start => SessionState {
                start: Some(at),
                selection: SelectionTarget::None,
                ..self
            },
            SelectionTarget::End => SessionState {
                end: Some(at),
                selection: SelectionTarget::None,
                ..self
            },
            SelectionTarget::None => self,
        }
    }

    pub fn with_route(self, route: Route, markers: Vec<Marker>) -> Self {
        SessionState {
            route: Some(route),
            markers,
            ..self
        }
    }

    pub fn reset(self) -> Self {
        Self::default()
    }

    /// Export the current route, `None` until one has been generated
    pub fn snapshot(
        &self,
        label: &str,
        now: OffsetDateTime,
    ) -> Option<Result<RouteSnapshot, time::error::Format>> {
        self.route
            .as_ref()
            .map(|route| RouteSnapshot::at(route.clone(), label, now))
    }
}
