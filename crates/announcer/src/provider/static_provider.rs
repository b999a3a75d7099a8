//! In-memory schedule provider backed by GTFS-style tables.
//!
//! Holds routes, trips, stops and stop times in lookup maps plus an R-tree
//! over stops for nearest-stop queries.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::TimeDelta;
use rstar::RTree;
use tracing::debug;

use crate::identifiers::*;
use crate::locator::locate;
use crate::models::{route::Route, traits::*, types::*};
use crate::spatial::index::{to_point, StopNode};

// ============================================================================
// Table Rows
// ============================================================================

#[derive(Clone, Debug)]
pub struct RouteRecord {
    pub route_id: RouteIdentifier,
    pub number: RouteNumber,
}

#[derive(Clone, Debug)]
pub struct TripRecord {
    pub trip_id: TripIdentifier,
    pub route_id: RouteIdentifier,
    pub headsign: Arc<str>,
    pub direction: DirectionId,
}

#[derive(Clone, Debug)]
pub struct StopRecord {
    pub stop_id: StopIdentifier,
    pub name: Arc<str>,
    pub coordinates: Coordinates,
}

/// Arrival of a trip at a stop.
///
/// `arrival` is measured from the start of the service day and may exceed
/// 24 hours for trips past midnight.
#[derive(Clone, Debug)]
pub struct StopTimeRecord {
    pub trip_id: TripIdentifier,
    pub stop_id: StopIdentifier,
    pub arrival: TimeDelta,
    pub stop_sequence: u32,
}

// ============================================================================
// Static Provider
// ============================================================================

/// In-memory schedule provider with spatial indexing
///
/// This type is cheap to clone since all data is stored in `Arc`s.
#[derive(Clone)]
pub struct StaticScheduleProvider {
    trips: Vec<Arc<TripRecord>>,

    // Lookup maps
    routes_by_number: HashMap<RouteNumber, Vec<RouteIdentifier>>,
    trips_by_route: HashMap<RouteIdentifier, Vec<usize>>,
    stop_map: HashMap<StopIdentifier, Arc<StopRecord>>,
    stop_times: Arc<HashMap<TripIdentifier, Vec<StopTimeRecord>>>,

    // Spatial index
    stop_tree: Arc<RTree<StopNode>>,
}

impl StaticScheduleProvider {
    /// Build provider from raw table rows.
    ///
    /// Stop times are ordered by `stop_sequence` per trip. Trips keep their
    /// table order, which decides the representative trip of a route.
    pub fn from_data(
        routes: Vec<RouteRecord>,
        trips: Vec<TripRecord>,
        stops: Vec<StopRecord>,
        stop_times: Vec<StopTimeRecord>,
    ) -> Self {
        let mut routes_by_number: HashMap<RouteNumber, Vec<RouteIdentifier>> = HashMap::new();
        for route in routes {
            routes_by_number.entry(route.number).or_default().push(route.route_id);
        }

        let trips: Vec<Arc<TripRecord>> = trips.into_iter().map(Arc::new).collect();
        let mut trips_by_route: HashMap<RouteIdentifier, Vec<usize>> = HashMap::new();
        for (idx, trip) in trips.iter().enumerate() {
            trips_by_route.entry(trip.route_id.clone()).or_default().push(idx);
        }

        let stop_map: HashMap<_, _> = stops
            .into_iter()
            .map(|s| (s.stop_id.clone(), Arc::new(s)))
            .collect();

        let mut stop_times_by_trip: HashMap<TripIdentifier, Vec<StopTimeRecord>> = HashMap::new();
        for stop_time in stop_times {
            stop_times_by_trip
                .entry(stop_time.trip_id.clone())
                .or_default()
                .push(stop_time);
        }
        for times in stop_times_by_trip.values_mut() {
            times.sort_by_key(|t| t.stop_sequence);
        }

        let stop_tree = RTree::bulk_load(
            stop_map
                .values()
                .map(|s| {
                    let stop = Stop::new(s.name.clone(), s.coordinates, TimeDelta::zero())
                        .with_id(s.stop_id.clone());
                    StopNode::new(Arc::new(stop))
                })
                .collect(),
        );

        Self {
            trips,
            routes_by_number,
            trips_by_route,
            stop_map,
            stop_times: Arc::new(stop_times_by_trip),
            stop_tree: Arc::new(stop_tree),
        }
    }

    /// Trips of every route carrying `number`, in table order
    fn trips_of(&self, number: &RouteNumber) -> Result<Vec<&TripRecord>> {
        let route_ids = self
            .routes_by_number
            .get(number)
            .ok_or_else(|| AnnouncerError::RouteNotFound(number.clone()))?;

        let mut indices: Vec<usize> = route_ids
            .iter()
            .filter_map(|id| self.trips_by_route.get(id))
            .flatten()
            .copied()
            .collect();
        indices.sort_unstable();

        Ok(indices.into_iter().map(|i| self.trips[i].as_ref()).collect())
    }

    fn stop_times_of(&self, trip: &TripRecord) -> &[StopTimeRecord] {
        self.stop_times
            .get(&trip.trip_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Route of a single trip with offsets from its first arrival
    pub fn route_for_trip(&self, number: &RouteNumber, trip: &TripRecord) -> Result<Route> {
        let times = self.stop_times_of(trip);
        if times.len() < 2 {
            return Err(AnnouncerError::InsufficientStops { found: times.len() });
        }

        let start = times[0].arrival;
        let stops = times
            .iter()
            .map(|t| {
                let stop = self
                    .stop_map
                    .get(&t.stop_id)
                    .ok_or_else(|| AnnouncerError::StopNotFound(t.stop_id.clone()))?;
                Ok(Stop::new(stop.name.clone(), stop.coordinates, t.arrival - start)
                    .with_id(stop.stop_id.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Route::new(number.clone(), trip.direction, stops)?
            .with_headsign(trip.headsign.clone())
            .with_trip_id(trip.trip_id.clone()))
    }

    /// Trip due next at the stop ahead of `position`.
    ///
    /// A representative trip (the first one) decides which stop is next; every
    /// trip is then compared by its arrival at that stop.
    fn trip_due_at<'a>(
        &self,
        number: &RouteNumber,
        trips: &[&'a TripRecord],
        reference: TimeDelta,
        position: Coordinates,
    ) -> Result<Option<&'a TripRecord>> {
        let representative = self.route_for_trip(number, trips[0])?;
        let segment = locate(representative.stops(), position)?;
        let Some(next_stop) = segment.next.stop_id.clone() else {
            return Ok(None);
        };

        debug!(route = %number, stop = %next_stop, "choosing trip by arrival at next stop");

        Ok(trips
            .iter()
            .filter_map(|trip| {
                self.stop_times_of(trip)
                    .iter()
                    .filter(|t| t.stop_id == next_stop && t.arrival >= reference)
                    .map(|t| t.arrival)
                    .min()
                    .map(|arrival| (arrival, *trip))
            })
            .min_by_key(|(arrival, _)| *arrival)
            .map(|(_, trip)| trip))
    }

    /// Trip whose first departure is the earliest at or after `reference`
    fn trip_departing_after<'a>(&self, trips: &[&'a TripRecord], reference: TimeDelta) -> Option<&'a TripRecord> {
        trips
            .iter()
            .filter_map(|trip| {
                self.stop_times_of(trip)
                    .first()
                    .filter(|t| t.arrival >= reference)
                    .map(|t| (t.arrival, *trip))
            })
            .min_by_key(|(arrival, _)| *arrival)
            .map(|(_, trip)| trip)
    }

    pub fn stop_count(&self) -> usize {
        self.stop_map.len()
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }
}

impl ScheduleProvider for StaticScheduleProvider {
    fn headsigns(&self, route: &RouteNumber) -> Result<Vec<Arc<str>>> {
        let mut headsigns: Vec<Arc<str>> = Vec::new();
        for trip in self.trips_of(route)? {
            if !headsigns.contains(&trip.headsign) {
                headsigns.push(trip.headsign.clone());
            }
        }
        Ok(headsigns)
    }

    fn direction_for(&self, route: &RouteNumber, headsign: &str) -> Result<DirectionId> {
        self.trips_of(route)?
            .into_iter()
            .find(|trip| &*trip.headsign == headsign)
            .map(|trip| trip.direction)
            .ok_or_else(|| AnnouncerError::HeadsignNotFound {
                route: route.clone(),
                headsign: headsign.to_string(),
            })
    }

    fn get_stops(
        &self,
        route: &RouteNumber,
        direction: DirectionId,
        reference: Option<TimeDelta>,
        position: Option<Coordinates>,
    ) -> Result<Route> {
        let trips: Vec<&TripRecord> = self
            .trips_of(route)?
            .into_iter()
            .filter(|trip| trip.direction == direction)
            .collect();

        if trips.is_empty() {
            return Err(AnnouncerError::NoTrips {
                route: route.clone(),
                direction,
            });
        }

        let trip = match (reference, position) {
            (None, _) => Some(trips[0]),
            (Some(reference), Some(position)) => self.trip_due_at(route, &trips, reference, position)?,
            (Some(reference), None) => self.trip_departing_after(&trips, reference),
        };

        let trip = trip.ok_or_else(|| AnnouncerError::NoTripAfter {
            route: route.clone(),
            direction,
            after: reference.unwrap_or_default(),
        })?;

        debug!(route = %route, %direction, trip = %trip.trip_id, "selected trip");
        self.route_for_trip(route, trip)
    }

    fn nearest_stops(&self, position: Coordinates, n: usize) -> Vec<Stop> {
        self.stop_tree
            .nearest_neighbor_iter(&to_point(position))
            .take(n)
            .map(|node| node.stop.as_ref().clone())
            .collect()
    }
}
