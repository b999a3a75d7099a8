//! Progress along a matched segment, expressed on the schedule's time axis.

use chrono::TimeDelta;

use crate::models::types::{Coordinates, Stop};
use crate::spatial::geometry::distance;

/// How far through the segment `position` is, by relative distance to its ends.
///
/// `d1 / (d1 + d2)` where `d1` is the distance to `previous` and `d2` the
/// distance to `next`. This is a ratio of distances rather than a projection
/// onto the segment, so the result stays in `[0, 1]` even when the position
/// is off to the side. Returns `0.0` when both distances are zero.
pub fn proportion_travelled(previous: &Stop, next: &Stop, position: Coordinates) -> f64 {
    let from_previous = distance(position, previous.coordinates);
    let to_next = distance(position, next.coordinates);

    let total = from_previous + to_next;
    if total == 0.0 {
        return 0.0;
    }

    from_previous / total
}

/// Scheduled offset from the start of the trip that corresponds to `position`.
///
/// Linear interpolation between the offsets of `previous` and `next`, rounded
/// to the millisecond.
pub fn estimate_elapsed(previous: &Stop, next: &Stop, position: Coordinates) -> TimeDelta {
    let proportion = proportion_travelled(previous, next, position);
    let between = next.time - previous.time;

    let since_previous = (proportion * between.num_milliseconds() as f64).round() as i64;
    previous.time + TimeDelta::milliseconds(since_previous)
}
