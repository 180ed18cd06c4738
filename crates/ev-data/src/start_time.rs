//! Departure-time distributions.
//!
//! For each `(from, to)` route label pair (the commute uses `home -> work`
//! and `work -> home`) the table holds an ordered list of time windows with a
//! **cumulative** percentage.  Sampling draws `v ∈ [0, 100)`, picks the first
//! window whose percentage is at least `v`, and then a uniform time inside
//! that window.

use std::collections::HashMap;

use ev_core::AgentRng;

use crate::{DataError, DataResult};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StartTimeWindow {
    /// Window start, hour of day.
    pub start_h: f64,
    /// Window end, hour of day.
    pub end_h: f64,
    /// Cumulative percentage up to and including this window.
    pub cumulative_pct: f64,
}

#[derive(Clone, Debug, Default)]
pub struct StartTimeTable {
    routes: HashMap<(String, String), Vec<StartTimeWindow>>,
}

impl StartTimeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a window to the route's distribution (order is significant).
    pub fn push(&mut self, from: impl Into<String>, to: impl Into<String>, window: StartTimeWindow) {
        self.routes
            .entry((from.into(), to.into()))
            .or_default()
            .push(window);
    }

    pub fn windows(&self, from: &str, to: &str) -> Option<&[StartTimeWindow]> {
        self.routes
            .get(&(from.to_owned(), to.to_owned()))
            .map(Vec::as_slice)
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Sample a departure time of day (h) for `from -> to`.
    pub fn sample(&self, from: &str, to: &str, rng: &mut AgentRng) -> DataResult<f64> {
        let windows = self
            .windows(from, to)
            .ok_or_else(|| DataError::UnknownStartTimeRoute {
                from: from.to_owned(),
                to:   to.to_owned(),
            })?;
        let draw = rng.unit() * 100.0;
        let window = windows
            .iter()
            .find(|w| w.cumulative_pct >= draw)
            .ok_or_else(|| DataError::InvalidStartTimeDistribution {
                from: from.to_owned(),
                to:   to.to_owned(),
                draw,
            })?;
        Ok(window.start_h + (window.end_h - window.start_h) * rng.unit())
    }
}
