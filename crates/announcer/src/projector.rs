//! Next-stops projection: remaining stops with countdowns from a live position.

use std::sync::Arc;

use tracing::debug;

use crate::estimator::estimate_elapsed;
use crate::locator::locate;
use crate::models::route::Route;
use crate::models::types::*;

/// Remaining stops of `route` with their countdowns relative to `position`.
///
/// The result is the suffix of the route's stops starting at the next stop of
/// the matched segment, in route order. Each stop's time becomes
/// `scheduled offset - estimated elapsed`, which is negative for a stop the
/// vehicle is judged to be past.
pub fn project(route: &Route, position: Coordinates) -> Result<Vec<Stop>> {
    let stops = route.stops();
    let segment = locate(stops, position)?;
    let elapsed = estimate_elapsed(segment.previous, segment.next, position);

    debug!(
        route = %route.number(),
        %position,
        previous = %segment.previous.name,
        next = %segment.next.name,
        elapsed_ms = elapsed.num_milliseconds(),
        "matched position to segment"
    );

    Ok(stops[segment.next_index()..]
        .iter()
        .map(|stop| stop.with_time(stop.time - elapsed))
        .collect())
}

impl Route {
    /// See [`project`]
    pub fn next_stops(&self, position: Coordinates) -> Result<Vec<Stop>> {
        project(self, position)
    }
}

/// Shared handle for projecting positions against one route.
///
/// Cheap to clone; clones can be moved to other threads.
#[derive(Clone, Debug)]
pub struct NextStopsFinder {
    route: Arc<Route>,
}

impl NextStopsFinder {
    pub fn new(route: impl Into<Arc<Route>>) -> Self {
        Self {
            route: route.into(),
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn next_stops(&self, position: Coordinates) -> Result<Vec<Stop>> {
        project(&self.route, position)
    }
}
