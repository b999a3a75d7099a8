//! Segment matching: which pair of consecutive stops a position lies between.

use tracing::trace;

use crate::models::types::*;
use crate::spatial::geometry::{is_degenerate, perpendicular_distance};

/// Two consecutive stops of a route, borrowed from its stop list
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment<'a> {
    /// Index of `previous` in the stop list. `next` sits at `index + 1`.
    pub index: usize,
    pub previous: &'a Stop,
    pub next: &'a Stop,
}

impl Segment<'_> {
    pub fn next_index(&self) -> usize {
        self.index + 1
    }
}

/// Find the consecutive pair of stops whose line passes closest to `position`.
///
/// Every pair is measured by perpendicular distance to the infinite line
/// through it and the global minimum wins. Ties go to the first pair in stop
/// order. A position far outside the route still gets matched; past the last
/// stop that is usually the final pair.
pub fn locate(stops: &[Stop], position: Coordinates) -> Result<Segment<'_>> {
    if stops.len() < 2 {
        return Err(AnnouncerError::InsufficientStops { found: stops.len() });
    }

    let mut best_index = 0;
    let mut best_distance = f64::INFINITY;

    for (index, pair) in stops.windows(2).enumerate() {
        if is_degenerate(pair[0].coordinates, pair[1].coordinates) {
            trace!(index, stop = %pair[0].name, "degenerate segment");
        }

        let distance = perpendicular_distance(pair[0].coordinates, pair[1].coordinates, position);
        if distance < best_distance {
            best_index = index;
            best_distance = distance;
        }
    }

    Ok(Segment {
        index: best_index,
        previous: &stops[best_index],
        next: &stops[best_index + 1],
    })
}
