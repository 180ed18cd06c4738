//! Average driving speed.
//!
//! Drives resolve their speed once, at construction, through the
//! [`SpeedModel`] trait so route- or time-dependent models can replace the
//! default [`FixedSpeed`] without touching the agent state machine.

use ev_core::LocationId;

/// Pluggable speed estimate for a trip.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one model can be shared by every
/// agent when ticks run on a Rayon pool.
pub trait SpeedModel: Send + Sync {
    /// Average speed (km/h) for a trip `from -> to` starting at
    /// `time_of_day_h`.  Must be positive.
    fn speed_kmh(&self, from: LocationId, to: LocationId, time_of_day_h: f64) -> f64;
}

/// The same speed for every trip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedSpeed(pub f64);

impl SpeedModel for FixedSpeed {
    #[inline]
    fn speed_kmh(&self, _from: LocationId, _to: LocationId, _time_of_day_h: f64) -> f64 {
        self.0
    }
}
