//! # trip-announcer
//!
//! Next-stop countdowns for a vehicle running a scheduled route.
//!
//! ## Features
//!
//! - **Segment matching**: find the pair of consecutive stops a live position lies between
//! - **Schedule interpolation**: turn that match into a revised countdown to every stop ahead
//! - **Schedule repository**: in-memory provider with nearest-stop queries
//! - **CSV tables**: load trimmed GTFS tables from disk (feature `loader`)
//!
//! The matcher treats latitude/longitude as a flat plane, which is close enough
//! over the extent of one route.
//!
//! ## Example
//!
//! ```
//! use trip_announcer::prelude::*;
//! use chrono::TimeDelta;
//!
//! let route = Route::new(
//!     RouteNumber::new("200"),
//!     DirectionId::Outbound,
//!     vec![
//!         Stop::new("Brisbane Street", Coordinates::new(45.6, 123.4), TimeDelta::minutes(0)),
//!         Stop::new("Marble Mountains", Coordinates::new(45.8, 124.0), TimeDelta::minutes(10)),
//!         Stop::new("World's Best Banh Mi Shop", Coordinates::new(46.3, 123.4), TimeDelta::minutes(20)),
//!     ],
//! )
//! .unwrap();
//!
//! // Halfway between the first two stops
//! let next = project(&route, Coordinates::new(45.7, 123.7)).unwrap();
//! assert_eq!(next.len(), 2);
//! assert_eq!(next[0].time, TimeDelta::minutes(5));
//! assert_eq!(next[1].time, TimeDelta::minutes(15));
//! ```

pub mod estimator;
pub mod identifiers;
pub mod locator;
pub mod models;
pub mod projector;
pub mod provider;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::estimator::{estimate_elapsed, proportion_travelled};
    pub use crate::identifiers::*;
    pub use crate::locator::{locate, Segment};
    pub use crate::models::{route::Route, traits::*, types::*};
    pub use crate::projector::{project, NextStopsFinder};
    pub use crate::provider::static_provider::StaticScheduleProvider;
    pub use crate::spatial::geometry::{distance, perpendicular_distance};
}

pub use prelude::*;
