use std::io::Write;

use anyhow::Result;
use chrono::TimeDelta;
use trip_announcer::{Route, Stop};

/// Somewhere the next stops are shown
pub trait TripViewer {
    fn show_next_stops(&mut self, route: &Route, stops: &[Stop]) -> Result<()>;
}

/// Countdown as `"7min"` or `"1hr 5min"`, seconds are dropped.
pub fn format_countdown(countdown: TimeDelta) -> String {
    let minutes = countdown.num_minutes();
    let sign = if countdown < TimeDelta::zero() { "-" } else { "" };
    let (hours, minutes) = (minutes.abs() / 60, minutes.abs() % 60);

    if hours == 0 {
        format!("{}{}min", sign, minutes)
    } else {
        format!("{}{}hr {}min", sign, hours, minutes)
    }
}

/// Plain text table:
///
/// ```text
/// -------Route 200-------
/// Marble Mountains | 5min
/// ```
pub struct ConsoleViewer<W> {
    writer: W,
    limit: Option<usize>,
}

impl<W: Write> ConsoleViewer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, limit: None }
    }

    /// Show at most `limit` stops per update
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl<W: Write> TripViewer for ConsoleViewer<W> {
    fn show_next_stops(&mut self, route: &Route, stops: &[Stop]) -> Result<()> {
        let shown = &stops[..self.limit.map_or(stops.len(), |limit| limit.min(stops.len()))];
        let lines: Vec<String> = shown
            .iter()
            .map(|stop| format!("{} | {}", stop.name, format_countdown(stop.time)))
            .collect();

        let title = match route.headsign() {
            Some(headsign) => format!("Route {} {}", route.number(), headsign),
            None => format!("Route {}", route.number()),
        };
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        writeln!(self.writer)?;
        writeln!(self.writer, "{:-^width$}", title, width = width)?;
        if lines.is_empty() {
            writeln!(self.writer, "No more stops")?;
        }
        for line in &lines {
            writeln!(self.writer, "{}", line)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}
