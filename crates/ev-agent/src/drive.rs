//! Driving between home and work.
//!
//! Distance and speed are resolved when the drive is planned; the state only
//! tracks how much of the trip is left.  Energy use is linear in distance:
//! a full battery covers `full_range_km`.

use ev_core::SECS_PER_HOUR;

use crate::state::StateEnv;
use crate::{AgentError, AgentResult, Location, Place};

#[derive(Clone, Debug, PartialEq)]
pub struct Drive {
    from:         Place,
    to:           Place,
    speed_kmh:    f64,
    distance_km:  f64,
    remaining_km: f64,
    /// Set once a run found the battery empty.
    stranded:     bool,
}

impl Drive {
    /// A trip from the start of the `from -> to` corridor.
    pub fn new(from: Place, to: Place, distance_km: f64, speed_kmh: f64) -> AgentResult<Self> {
        Self::resume(from, to, distance_km, speed_kmh, distance_km)
    }

    /// A trip that begins `remaining_km` before `to`, e.g. an agent turning
    /// around part-way along the corridor.
    pub fn resume(
        from:         Place,
        to:           Place,
        distance_km:  f64,
        speed_kmh:    f64,
        remaining_km: f64,
    ) -> AgentResult<Self> {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(AgentError::InvalidDistance(distance_km));
        }
        if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
            return Err(AgentError::InvalidSpeed(speed_kmh));
        }
        if !(0.0..=distance_km).contains(&remaining_km) {
            return Err(AgentError::InvalidRemaining { remaining: remaining_km, distance: distance_km });
        }
        Ok(Self {
            from,
            to,
            speed_kmh,
            distance_km,
            remaining_km,
            stranded: false,
        })
    }

    /// The same corridor in the opposite direction, starting from the
    /// current position.
    pub fn turn_back(&self) -> Self {
        Self {
            from:         self.to,
            to:           self.from,
            speed_kmh:    self.speed_kmh,
            distance_km:  self.distance_km,
            remaining_km: self.distance_km - self.remaining_km,
            stranded:     false,
        }
    }

    pub fn from(&self) -> Place {
        self.from
    }

    pub fn to(&self) -> Place {
        self.to
    }

    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn remaining_km(&self) -> f64 {
        self.remaining_km
    }

    pub fn travelled_km(&self) -> f64 {
        self.distance_km - self.remaining_km
    }

    pub fn is_arrived(&self) -> bool {
        self.remaining_km <= 0.0
    }

    /// The battery ran out before the destination.
    pub fn is_stranded(&self) -> bool {
        self.stranded && !self.is_arrived()
    }

    /// Position along the corridor.
    pub fn location(&self) -> Location {
        if self.remaining_km <= 0.0 {
            Location::at(self.to)
        } else if self.remaining_km >= self.distance_km {
            Location::at(self.from)
        } else {
            Location::EnRoute {
                from:          self.from,
                to:            self.to,
                pct_remaining: (self.remaining_km / self.distance_km * 100.0).round() as u8,
            }
        }
    }

    pub(crate) fn on_run(&mut self, env: &mut StateEnv<'_>, secs: f64) -> AgentResult<f64> {
        let charge = env.car().charge();
        let full_range = env.car().full_range_km();
        if charge == 0.0 || full_range <= 0.0 {
            self.stranded = true;
            return Ok(secs);
        }

        let speed_kms = self.speed_kmh / SECS_PER_HOUR;
        let mut travelled = speed_kms * secs;
        let mut drained = false;

        let max_km = charge / 100.0 * full_range;
        if travelled > max_km {
            travelled = max_km;
            drained = true;
        }
        if travelled >= self.remaining_km {
            travelled = self.remaining_km;
            drained = false;
        }

        let new_charge = if drained {
            0.0
        } else {
            (charge - travelled / full_range * 100.0).max(0.0)
        };
        env.car_mut().set_charge(new_charge)?;

        self.remaining_km -= travelled;
        env.set_location(self.location());

        Ok(travelled / speed_kms)
    }

    pub fn log(&self) -> DriveLog {
        DriveLog {
            from:         self.from,
            to:           self.to,
            speed_kmh:    self.speed_kmh,
            distance_km:  self.distance_km,
            remaining_km: self.remaining_km,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriveLog {
    pub from:         Place,
    pub to:           Place,
    pub speed_kmh:    f64,
    pub distance_km:  f64,
    pub remaining_km: f64,
}
