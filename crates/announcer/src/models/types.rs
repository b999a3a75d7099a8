//! Core data types and enums for schedule data.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::TimeDelta;

use crate::identifiers::*;

// ============================================================================
// Enums
// ============================================================================

/// Trip direction (0 = outbound, 1 = inbound per GTFS)
///
/// Only used to select a stop sequence from the schedule; the geometry never
/// looks at it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DirectionId {
    Outbound = 0,
    Inbound = 1,
}

impl DirectionId {
    pub fn from_gtfs(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Outbound),
            1 => Some(Self::Inbound),
            _ => None,
        }
    }
}

impl fmt::Display for DirectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outbound => f.write_str("outbound"),
            Self::Inbound => f.write_str("inbound"),
        }
    }
}

impl FromStr for DirectionId {
    type Err = AnnouncerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "outbound" => Ok(Self::Outbound),
            "1" | "inbound" => Ok(Self::Inbound),
            other => Err(AnnouncerError::InvalidData(format!(
                "Unknown direction '{}', expected outbound/inbound or 0/1",
                other
            ))),
        }
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// A latitude/longitude pair on a locally planar approximation of the map.
///
/// Distances between coordinates are plain Euclidean distances in degrees,
/// which is only meaningful over the extent of a single route.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Coordinates> for geo::Point {
    fn from(c: Coordinates) -> Self {
        geo::Point::new(c.longitude, c.latitude)
    }
}

impl From<geo::Point> for Coordinates {
    fn from(p: geo::Point) -> Self {
        Self::new(p.y(), p.x())
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Parses `"latitude,longitude"`, whitespace around either value is allowed.
impl FromStr for Coordinates {
    type Err = AnnouncerError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || AnnouncerError::InvalidData(format!("Invalid coordinates '{}'", s));

        let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let longitude: f64 = lon.trim().parse().map_err(|_| invalid())?;

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(invalid());
        }

        Ok(Self::new(latitude, longitude))
    }
}

/// A named stop with a time value.
///
/// Inside a [`Route`](crate::models::route::Route) `time` is the scheduled
/// offset from the start of the trip. In a projection result it is the
/// countdown from now and may be negative.
#[derive(Clone, Debug, PartialEq)]
pub struct Stop {
    pub name: Arc<str>,
    pub coordinates: Coordinates,
    pub time: TimeDelta,
    pub stop_id: Option<StopIdentifier>,
}

impl Stop {
    pub fn new(name: impl Into<Arc<str>>, coordinates: Coordinates, time: TimeDelta) -> Self {
        Self {
            name: name.into(),
            coordinates,
            time,
            stop_id: None,
        }
    }

    pub fn with_id(mut self, stop_id: StopIdentifier) -> Self {
        self.stop_id = Some(stop_id);
        self
    }

    /// Same stop, different time value
    pub fn with_time(&self, time: TimeDelta) -> Self {
        Self {
            time,
            ..self.clone()
        }
    }
}

/// Parse a time of the service day, `H:MM` or `H:MM:SS`.
///
/// Hours may exceed 23 for trips running past midnight (e.g. `25:30:00`).
pub fn parse_service_time(s: &str) -> Result<TimeDelta> {
    let invalid = || AnnouncerError::InvalidData(format!("Invalid time '{}'", s));
    let field = |part: &str, max: i64| -> Result<i64> {
        match part.parse::<i64>() {
            Ok(value) if (0..=max).contains(&value) => Ok(value),
            _ => Err(invalid()),
        }
    };

    let parts: Vec<&str> = s.trim().split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m] => (field(*h, 9999)?, field(*m, 59)?, 0),
        [h, m, sec] => (field(*h, 9999)?, field(*m, 59)?, field(*sec, 59)?),
        _ => return Err(invalid()),
    };

    Ok(TimeDelta::seconds(hours * 3600 + minutes * 60 + seconds))
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AnnouncerError {
    #[error("Route needs at least two stops, found {found}")]
    InsufficientStops { found: usize },

    #[error("Route not found: {0}")]
    RouteNotFound(RouteNumber),

    #[error("Route {route} has no trip with headsign '{headsign}'")]
    HeadsignNotFound { route: RouteNumber, headsign: String },

    #[error("Route {route} has no {direction} trips")]
    NoTrips {
        route: RouteNumber,
        direction: DirectionId,
    },

    #[error("Route {route} ({direction}) has no trip after {after}")]
    NoTripAfter {
        route: RouteNumber,
        direction: DirectionId,
        after: TimeDelta,
    },

    #[error("Stop not found: {0}")]
    StopNotFound(StopIdentifier),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "loader")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, AnnouncerError>;
