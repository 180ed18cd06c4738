//! Simulation time model.
//!
//! # Design
//!
//! The global clock is a monotonically increasing `Tick` counter mapped to
//! wall-clock time by `SimClock`:
//!
//!   wall_time = start_unix_secs + tick * step_secs
//!
//! Agents, however, account for time in floating-point **seconds**: a state
//! may finish part-way through a step (a drive arriving after 734.2 s) and
//! the remainder is handed to the next state.  Each agent therefore carries
//! its own `f64` timestamp which, after every tick, equals the clock's
//! `current_unix_secs()` up to float rounding.
//!
//! Schedule decisions use the time of day in hours, computed by the pure
//! function [`time_of_day`].

use std::fmt;
use std::str::FromStr;

use crate::EvError;

pub const SECS_PER_MINUTE: f64 = 60.0;
pub const SECS_PER_HOUR: f64 = 3_600.0;
const SECS_PER_DAY: i64 = 86_400;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TimeUnit ──────────────────────────────────────────────────────────────────

/// Unit of a duration argument.  Durations are stored in seconds everywhere;
/// this type only converts at API boundaries.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeUnit {
    #[default]
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnit {
    #[inline]
    fn secs_per_unit(self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => SECS_PER_MINUTE,
            TimeUnit::Hours   => SECS_PER_HOUR,
        }
    }

    /// Convert `value` expressed in `self` to seconds.
    #[inline]
    pub fn to_secs(self, value: f64) -> f64 {
        value * self.secs_per_unit()
    }

    /// Convert `secs` seconds to a value expressed in `self`.
    #[inline]
    pub fn from_secs(self, secs: f64) -> f64 {
        secs / self.secs_per_unit()
    }

    /// Convert `value` from unit `from` to unit `to`.
    #[inline]
    pub fn convert(value: f64, from: TimeUnit, to: TimeUnit) -> f64 {
        to.from_secs(from.to_secs(value))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "m",
            TimeUnit::Hours   => "h",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = EvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "s" => Ok(TimeUnit::Seconds),
            "m" => Ok(TimeUnit::Minutes),
            "h" => Ok(TimeUnit::Hours),
            other => Err(EvError::InvalidUnit(other.to_owned())),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Time of day ───────────────────────────────────────────────────────────────

/// Time of day in hours (`0.0 ..< 24.0`) for a unix timestamp, at minute
/// resolution: `hour + minute / 60`.
///
/// `utc_offset_h` shifts UTC to the local time zone the commute schedule is
/// expressed in.  The timestamp is rounded to the nearest second first, so
/// rounding drift in agent timestamps cannot move a schedule boundary.
pub fn time_of_day(timestamp_secs: f64, utc_offset_h: f64) -> f64 {
    let local = timestamp_secs.round() as i64 + (utc_offset_h * SECS_PER_HOUR).round() as i64;
    let secs_of_day = local.rem_euclid(SECS_PER_DAY);
    let hours = secs_of_day / 3_600;
    let minutes = (secs_of_day % 3_600) / 60;
    hours as f64 + minutes as f64 / 60.0
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and Unix wall-clock seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp (seconds since epoch) of tick 0.
    pub start_unix_secs: i64,
    /// How many seconds one step advances every agent.
    pub step_secs: u32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(start_unix_secs: i64, step_secs: u32) -> Self {
        Self {
            start_unix_secs,
            step_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.offset(1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> i64 {
        self.current_tick.0 as i64 * self.step_secs as i64
    }

    /// Current Unix timestamp corresponding to `current_tick`.
    #[inline]
    pub fn current_unix_secs(&self) -> i64 {
        self.start_unix_secs + self.elapsed_secs()
    }

    /// Unix timestamp at the *end* of `tick`, i.e. when every agent has been
    /// stepped through it.
    #[inline]
    pub fn unix_secs_after(&self, tick: Tick) -> i64 {
        self.start_unix_secs + (tick.0 as i64 + 1) * self.step_secs as i64
    }

    /// Break elapsed time into (day, hour, minute) components from sim start.
    pub fn elapsed_dhm(&self) -> (u64, u32, u32) {
        let total_secs = self.elapsed_secs().max(0) as u64;
        let days = total_secs / 86_400;
        let hours = ((total_secs % 86_400) / 3_600) as u32;
        let minutes = ((total_secs % 3_600) / 60) as u32;
        (days, hours, minutes)
    }

    /// Number of steps needed to cover `secs` (rounds up).
    #[inline]
    pub fn steps_for_secs(&self, secs: f64) -> u64 {
        (secs / self.step_secs as f64).ceil().max(0.0) as u64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "{} (day {} {:02}:{:02})", self.current_tick, d, h, m)
    }
}
