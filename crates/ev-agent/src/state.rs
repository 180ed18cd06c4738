//! The duration-bounded state machine shared by every activity.
//!
//! # Lifecycle
//!
//! ```text
//! Pending ──start()──▶ Running ──stop()──▶ Stopped
//! ```
//!
//! `run()` starts a pending state on demand and stops it once its optional
//! duration budget is used up.  An activity may also finish on its own (a
//! drive that reaches its destination) and may report less elapsed time than
//! requested; the returned value is always the authoritative one.
//!
//! # Location capability
//!
//! Activities never hold a reference to their agent.  The agent lends each
//! call a [`StateEnv`] with its car and location.  `StateEnv` can only be
//! built inside this crate and only drives write the location, so the
//! location of an agent cannot be changed from outside the state machine.

use std::fmt;

use ev_core::TimeUnit;

use crate::drive::{Drive, DriveLog};
use crate::{AgentError, AgentResult, Car, Location};

// ── Status ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Pending,
    Running,
    Stopped,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Running => "running",
            Status::Stopped => "stopped",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── StateEnv ──────────────────────────────────────────────────────────────────

/// Mutable parts of an agent lent to a state for one call.
pub struct StateEnv<'a> {
    car:      &'a mut Car,
    location: &'a mut Location,
}

impl<'a> StateEnv<'a> {
    pub(crate) fn new(car: &'a mut Car, location: &'a mut Location) -> Self {
        Self { car, location }
    }

    pub fn car(&self) -> &Car {
        &*self.car
    }

    pub fn car_mut(&mut self) -> &mut Car {
        &mut *self.car
    }

    pub fn location(&self) -> Location {
        *self.location
    }

    pub(crate) fn set_location(&mut self, location: Location) {
        *self.location = location;
    }
}

// ── Activity ──────────────────────────────────────────────────────────────────

/// Discriminant of [`Activity`], used for logs and counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    Idle,
    Drive,
    Recharge,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::Idle => "idle",
            ActivityKind::Drive => "drive",
            ActivityKind::Recharge => "recharge",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the agent is doing.
#[derive(Clone, Debug, PartialEq)]
pub enum Activity {
    /// Parked; the battery self-discharges.
    Idle,
    Drive(Drive),
    /// Plugged in; charges linearly until full and then waits.
    Recharge,
}

impl Activity {
    pub fn kind(&self) -> ActivityKind {
        match self {
            Activity::Idle => ActivityKind::Idle,
            Activity::Drive(_) => ActivityKind::Drive,
            Activity::Recharge => ActivityKind::Recharge,
        }
    }

    fn on_start(&mut self, env: &mut StateEnv<'_>) {
        if let Activity::Drive(drive) = self {
            env.set_location(drive.location());
        }
    }

    fn on_run(&mut self, env: &mut StateEnv<'_>, secs: f64) -> AgentResult<f64> {
        match self {
            Activity::Idle => idle(env.car_mut(), secs),
            Activity::Drive(drive) => drive.on_run(env, secs),
            Activity::Recharge => recharge(env.car_mut(), secs),
        }
    }

    /// The activity ended by itself during the last `on_run`.
    fn is_complete(&self) -> bool {
        matches!(self, Activity::Drive(drive) if drive.is_arrived())
    }
}

fn idle(car: &mut Car, secs: f64) -> AgentResult<f64> {
    let charge = car.charge();
    if charge != 0.0 {
        let hours = TimeUnit::Hours.from_secs(secs);
        car.set_charge((charge - car.idle_discharge_pct_h() * hours).max(0.0))?;
    }
    Ok(secs)
}

fn recharge(car: &mut Car, secs: f64) -> AgentResult<f64> {
    let charge = car.charge();
    if charge != 100.0 {
        let full_h = car.full_recharge_h();
        let target = if full_h > 0.0 {
            (charge + TimeUnit::Hours.from_secs(secs) / full_h * 100.0).min(100.0)
        } else {
            100.0
        };
        car.set_charge(target)?;
        car.add_recharged_kwh((target - charge) / 100.0 * car.capacity_kwh());
    }
    Ok(secs)
}

// ── State ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct State {
    status:   Status,
    /// Budget in seconds; `None` runs until stopped from outside.
    duration: Option<f64>,
    /// Seconds spent running so far.
    elapsed:  f64,
    activity: Activity,
}

impl State {
    pub fn new(activity: Activity) -> Self {
        Self {
            status:   Status::Pending,
            duration: None,
            elapsed:  0.0,
            activity,
        }
    }

    pub fn idle() -> Self {
        Self::new(Activity::Idle)
    }

    pub fn recharge() -> Self {
        Self::new(Activity::Recharge)
    }

    pub fn drive(drive: Drive) -> Self {
        Self::new(Activity::Drive(drive))
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    #[inline]
    pub fn kind(&self) -> ActivityKind {
        self.activity.kind()
    }

    pub fn as_drive(&self) -> Option<&Drive> {
        match &self.activity {
            Activity::Drive(drive) => Some(drive),
            _ => None,
        }
    }

    pub fn duration(&self, unit: TimeUnit) -> Option<f64> {
        self.duration.map(|secs| unit.from_secs(secs))
    }

    pub fn elapsed(&self, unit: TimeUnit) -> f64 {
        unit.from_secs(self.elapsed)
    }

    /// Set the duration budget.  It may not be negative or shorter than the
    /// time already elapsed.
    pub fn set_duration(&mut self, duration: f64, unit: TimeUnit) -> AgentResult<()> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(AgentError::InvalidDuration(duration));
        }
        let secs = unit.to_secs(duration);
        if secs < self.elapsed {
            return Err(AgentError::DurationBelowElapsed { duration: secs, elapsed: self.elapsed });
        }
        self.duration = Some(secs);
        Ok(())
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    pub fn start(&mut self, env: &mut StateEnv<'_>) -> AgentResult<()> {
        if self.status != Status::Pending {
            return Err(AgentError::AlreadyStarted(self.status));
        }
        self.activity.on_start(env);
        self.status = Status::Running;
        self.elapsed = 0.0;
        Ok(())
    }

    pub fn stop(&mut self, _env: &mut StateEnv<'_>) -> AgentResult<()> {
        if self.status != Status::Running {
            return Err(AgentError::NotRunning(self.status));
        }
        self.status = Status::Stopped;
        Ok(())
    }

    /// Run for up to `secs` seconds and return the time actually spent.
    pub fn run(&mut self, env: &mut StateEnv<'_>, secs: f64) -> AgentResult<f64> {
        if self.status == Status::Stopped {
            return Err(AgentError::Stopped);
        }
        if self.status == Status::Pending {
            self.start(env)?;
        }
        if secs == 0.0 {
            return Ok(0.0);
        }
        if !secs.is_finite() || secs < 0.0 {
            return Err(AgentError::InvalidDuration(secs));
        }

        let left = self.duration.map(|budget| budget - self.elapsed);
        let (elapsed, exhausted) = match left {
            Some(left) if secs >= left => (self.activity.on_run(env, left)?, true),
            _ => (self.activity.on_run(env, secs)?, false),
        };
        if (exhausted || self.activity.is_complete()) && self.status == Status::Running {
            self.stop(env)?;
        }
        self.elapsed += elapsed;
        Ok(elapsed)
    }

    /// [`run`](Self::run) with a duration in any unit; returns seconds.
    pub fn run_for(&mut self, env: &mut StateEnv<'_>, duration: f64, unit: TimeUnit) -> AgentResult<f64> {
        self.run(env, unit.to_secs(duration))
    }

    pub fn log(&self) -> StateLog {
        StateLog {
            status:        self.status,
            elapsed_secs:  self.elapsed,
            duration_secs: self.duration,
            drive:         self.as_drive().map(Drive::log),
        }
    }
}

/// Snapshot of a state's bookkeeping.
#[derive(Clone, Debug, PartialEq)]
pub struct StateLog {
    pub status:        Status,
    pub elapsed_secs:  f64,
    pub duration_secs: Option<f64>,
    /// Present for drives only.
    pub drive:         Option<DriveLog>,
}
