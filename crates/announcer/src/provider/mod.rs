//! Schedule data providers.

#[cfg(feature = "loader")]
pub mod loader;
pub mod static_provider;

pub use static_provider::{RouteRecord, StaticScheduleProvider, StopRecord, StopTimeRecord, TripRecord};
