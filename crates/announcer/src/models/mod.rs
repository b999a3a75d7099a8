//! Schedule data models, types, and traits.

pub mod route;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use route::Route;
pub use traits::ScheduleProvider;
pub use types::{parse_service_time, AnnouncerError, Coordinates, DirectionId, Result, Stop};
