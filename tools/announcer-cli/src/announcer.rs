use anyhow::Result;
use trip_announcer::{Coordinates, NextStopsFinder, Route, Stop};

use crate::input::PositionSource;
use crate::viewer::TripViewer;

/// Keeps the latest next-stops list for one trip.
///
/// [`update`](Self::update) must be called with every new fix.
pub struct TripAnnouncer {
    finder: NextStopsFinder,
    next_stops: Vec<Stop>,
}

impl TripAnnouncer {
    pub fn new(route: Route) -> Self {
        Self {
            finder: NextStopsFinder::new(route),
            next_stops: Vec::new(),
        }
    }

    pub fn route(&self) -> &Route {
        self.finder.route()
    }

    pub fn next_stops(&self) -> &[Stop] {
        &self.next_stops
    }

    /// Recompute the next stops. On error the previous list is kept.
    pub fn update(&mut self, position: Coordinates) -> trip_announcer::Result<&[Stop]> {
        self.next_stops = self.finder.next_stops(position)?;
        Ok(&self.next_stops)
    }
}

/// Feed fixes from `source` into `announcer` until the source runs dry,
/// showing each fresh list on `viewer`. Returns the number of shown updates.
pub fn run_session(
    announcer: &mut TripAnnouncer,
    source: &mut dyn PositionSource,
    viewer: &mut dyn TripViewer,
) -> Result<usize> {
    let mut shown = 0;

    while let Some(position) = source.next_position()? {
        log::debug!("Position fix {}", position);

        match announcer.update(position).map(|_| ()) {
            Ok(()) => {
                viewer.show_next_stops(announcer.route(), announcer.next_stops())?;
                shown += 1;
            }
            Err(e) => log::warn!("Skipping update at {}: {}", position, e),
        }
    }

    Ok(shown)
}
