//! Schedule repository interface.
//!
//! The core only needs an ordered stop list for a route. How it is looked up
//! (in memory, from CSV tables, from a remote feed) is up to the implementation.

use chrono::TimeDelta;
use std::sync::Arc;

use crate::identifiers::*;
use crate::models::route::Route;
use crate::models::types::*;

/// Provider of routes and stops
pub trait ScheduleProvider: Send + Sync {
    /// All headsigns served by a route, in first-seen order
    fn headsigns(&self, route: &RouteNumber) -> Result<Vec<Arc<str>>>;

    /// Direction of the trips on `route` that show `headsign`
    fn direction_for(&self, route: &RouteNumber, headsign: &str) -> Result<DirectionId>;

    /// Ordered stops of one trip of `route` in `direction`.
    ///
    /// `reference` is the time of day (since service day start) the caller is
    /// interested in. When given with `position`, the trip due next at the
    /// stop ahead of that position is chosen.
    fn get_stops(
        &self,
        route: &RouteNumber,
        direction: DirectionId,
        reference: Option<TimeDelta>,
        position: Option<Coordinates>,
    ) -> Result<Route>;

    /// The `n` stops closest to a position, nearest first.
    /// `time` of the returned stops is zero.
    fn nearest_stops(&self, position: Coordinates, n: usize) -> Vec<Stop>;
}
