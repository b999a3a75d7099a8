//! A single scheduled run of a vehicle.

use std::sync::Arc;

use crate::identifiers::*;
use crate::models::types::*;

/// Ordered stops of one trip with scheduled offsets from its start.
///
/// The stop order is taken as given and never re-sorted. Offsets must be
/// non-decreasing along that order; co-located stops may share an offset.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    number: RouteNumber,
    direction: DirectionId,
    stops: Vec<Stop>,
    headsign: Option<Arc<str>>,
    trip_id: Option<TripIdentifier>,
}

impl Route {
    /// Build a route, rejecting stop sequences whose offsets go backwards.
    ///
    /// Routes with fewer than two stops are accepted here; the locator refuses
    /// them when a position is projected.
    pub fn new(number: RouteNumber, direction: DirectionId, stops: Vec<Stop>) -> Result<Self> {
        if let Some(pair) = stops.windows(2).find(|pair| pair[1].time < pair[0].time) {
            return Err(AnnouncerError::InvalidData(format!(
                "Route {}: offset of '{}' ({}) is before offset of '{}' ({})",
                number, pair[1].name, pair[1].time, pair[0].name, pair[0].time
            )));
        }

        Ok(Self {
            number,
            direction,
            stops,
            headsign: None,
            trip_id: None,
        })
    }

    pub fn with_headsign(mut self, headsign: impl Into<Arc<str>>) -> Self {
        self.headsign = Some(headsign.into());
        self
    }

    pub fn with_trip_id(mut self, trip_id: TripIdentifier) -> Self {
        self.trip_id = Some(trip_id);
        self
    }

    pub fn number(&self) -> &RouteNumber {
        &self.number
    }

    pub fn direction(&self) -> DirectionId {
        self.direction
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Display name (e.g., "City", "Toowong")
    pub fn headsign(&self) -> Option<&str> {
        self.headsign.as_deref()
    }

    pub fn trip_id(&self) -> Option<&TripIdentifier> {
        self.trip_id.as_ref()
    }

    /// A route needs two stops to form a segment
    pub fn is_degenerate(&self) -> bool {
        self.stops.len() < 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn stop(name: &str, minutes: i64) -> Stop {
        Stop::new(name, Coordinates::new(0.0, minutes as f64), TimeDelta::minutes(minutes))
    }

    #[test]
    fn test_route_keeps_order() {
        let route = Route::new(
            RouteNumber::new("200"),
            DirectionId::Outbound,
            vec![stop("A", 0), stop("B", 5), stop("B2", 5), stop("C", 9)],
        )
        .unwrap();

        let names: Vec<&str> = route.stops().iter().map(|s| &*s.name).collect();
        assert_eq!(names, ["A", "B", "B2", "C"]);
        assert!(!route.is_degenerate());
    }

    #[test]
    fn test_route_rejects_decreasing_offsets() {
        let result = Route::new(
            RouteNumber::new("200"),
            DirectionId::Outbound,
            vec![stop("A", 0), stop("C", 9), stop("B", 5)],
        );

        assert!(matches!(result, Err(AnnouncerError::InvalidData(_))));
    }

    #[test]
    fn test_short_routes_are_degenerate() {
        let empty = Route::new(RouteNumber::new("1"), DirectionId::Inbound, vec![]).unwrap();
        let single = Route::new(RouteNumber::new("1"), DirectionId::Inbound, vec![stop("A", 0)]).unwrap();

        assert!(empty.is_degenerate());
        assert!(single.is_degenerate());
    }

    #[test]
    fn test_route_metadata() {
        let route = Route::new(RouteNumber::new("66"), DirectionId::Inbound, vec![stop("A", 0), stop("B", 3)])
            .unwrap()
            .with_headsign("UQ Lakes")
            .with_trip_id(TripIdentifier::new("t1"));

        assert_eq!(route.number().as_str(), "66");
        assert_eq!(route.direction(), DirectionId::Inbound);
        assert_eq!(route.headsign(), Some("UQ Lakes"));
        assert_eq!(route.trip_id().map(|t| t.as_str()), Some("t1"));
    }
}
