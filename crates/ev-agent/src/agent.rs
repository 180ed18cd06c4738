//! `Agent`: one commuter, its car and its current activity.
//!
//! The tick loop calls [`Agent::run`] once per step.  The current state
//! consumes as much of the step as it can; whenever it stops, the transition
//! policy (see `policy.rs`) picks the next state and the remainder of the
//! step is handed to it.  After the whole step is applied the schedule check
//! (see `schedule.rs`) forces a departure if a commute boundary was crossed.

mod policy;
mod schedule;

use tracing::{debug, warn};

use ev_core::{AgentId, AgentRng, LocationId, TimeUnit};

use crate::{
    ActivityKind, AgentError, AgentResult, Car, Drive, History, Location, Place, SimContext, State,
    StateEnv, StateLog, Status,
};

/// Leftover step time below this is treated as fully consumed.
const TIME_EPSILON_SECS: f64 = 1e-9;

/// Everything needed to create an agent apart from the shared context.
#[derive(Clone, Debug)]
pub struct AgentParams {
    pub id:                AgentId,
    pub home:              LocationId,
    pub work:              LocationId,
    pub car:               Car,
    pub recharge_behavior: String,
}

/// Snapshot written to an agent's log history.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentLog {
    /// Unix seconds.
    pub timestamp: f64,
    pub kind:      ActivityKind,
    pub location:  Location,
    pub charge:    f64,
    pub state:     StateLog,
}

#[derive(Clone, Debug)]
pub struct Agent {
    id:                AgentId,
    home:              LocationId,
    work:              LocationId,
    /// Hour of day the agent leaves home for work.
    depart_home_h:     f64,
    /// Hour of day the agent leaves work for home.
    depart_work_h:     f64,
    location:          Location,
    car:               Car,
    recharge_behavior: String,
    state:             State,
    rng:               AgentRng,
    /// Unix seconds simulated so far by this agent.
    timestamp:         f64,
    logs:              History<AgentLog>,
    states:            History<State>,
}

impl Agent {
    /// Create an agent, sampling both departure times from the start-time
    /// distributions, and place it consistently with the start timestamp.
    pub fn new(ctx: &SimContext<'_>, params: AgentParams, mut rng: AgentRng) -> AgentResult<Self> {
        let depart_home_h = ctx.data.travel_start_time("home", "work", &mut rng)?;
        let depart_work_h = ctx.data.travel_start_time("work", "home", &mut rng)?;
        Self::with_schedule(ctx, params, rng, depart_home_h, depart_work_h)
    }

    /// Like [`new`](Self::new) with fixed departure hours.
    pub fn with_schedule(
        ctx:           &SimContext<'_>,
        params:        AgentParams,
        rng:           AgentRng,
        depart_home_h: f64,
        depart_work_h: f64,
    ) -> AgentResult<Self> {
        for hour in [depart_home_h, depart_work_h] {
            if !(0.0..=24.0).contains(&hour) {
                return Err(AgentError::InvalidDepartureHour(hour));
            }
        }
        ctx.data.behaviors.get(&params.recharge_behavior)?;

        let mut agent = Self {
            id: params.id,
            home: params.home,
            work: params.work,
            depart_home_h,
            depart_work_h,
            location: Location::Home,
            car: params.car,
            recharge_behavior: params.recharge_behavior,
            state: State::idle(),
            rng,
            timestamp: ctx.options.start_unix_secs as f64,
            logs: History::new(ctx.options.max_agent_logs),
            states: History::new(ctx.options.max_agent_states),
        };
        agent.set_initial_state(ctx)?;
        Ok(agent)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn home(&self) -> LocationId {
        self.home
    }

    pub fn work(&self) -> LocationId {
        self.work
    }

    pub fn depart_home_h(&self) -> f64 {
        self.depart_home_h
    }

    pub fn depart_work_h(&self) -> f64 {
        self.depart_work_h
    }

    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    /// Location id of the place the agent is at, `None` while en route.
    pub fn location_id(&self) -> Option<LocationId> {
        self.location.place().map(|p| self.place_id(p))
    }

    pub fn place_id(&self, place: Place) -> LocationId {
        match place {
            Place::Home => self.home,
            Place::Work => self.work,
        }
    }

    #[inline]
    pub fn car(&self) -> &Car {
        &self.car
    }

    pub fn recharge_behavior(&self) -> &str {
        &self.recharge_behavior
    }

    #[inline]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Unix seconds up to which this agent has been simulated.
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// Driving with an empty battery, short of the destination.
    pub fn is_stranded(&self) -> bool {
        self.state.as_drive().is_some_and(Drive::is_stranded)
    }

    /// Current snapshot.
    pub fn log(&self) -> AgentLog {
        AgentLog {
            timestamp: self.timestamp,
            kind:      self.state.kind(),
            location:  self.location,
            charge:    self.car.charge(),
            state:     self.state.log(),
        }
    }

    /// Snapshots taken at every state change, oldest first.
    pub fn logs(&self) -> &History<AgentLog> {
        &self.logs
    }

    /// Finished states, oldest first.
    pub fn states(&self) -> &History<State> {
        &self.states
    }

    // ── Simulation ────────────────────────────────────────────────────────

    /// Advance the agent by `duration`, then correct its schedule.
    pub fn run(&mut self, ctx: &SimContext<'_>, duration: f64, unit: TimeUnit) -> AgentResult<()> {
        if duration == 0.0 {
            return Ok(());
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(AgentError::InvalidDuration(duration));
        }
        let was_stranded = self.is_stranded();

        let mut remaining = unit.to_secs(duration);
        while remaining > TIME_EPSILON_SECS {
            let elapsed = {
                let mut env = StateEnv::new(&mut self.car, &mut self.location);
                self.state.run(&mut env, remaining)?
            };
            self.timestamp += elapsed;
            remaining -= elapsed;

            if self.state.status() == Status::Stopped {
                let next = self.next_state(ctx)?;
                self.change_state(next)?;
            }
        }

        if !was_stranded && self.is_stranded() {
            warn!(
                agent = %self.id,
                location = %self.location,
                "battery empty before reaching the destination"
            );
        }
        self.check_state(ctx)
    }

    /// Log, archive the current state and start `next` in its place.
    fn change_state(&mut self, next: State) -> AgentResult<()> {
        self.push_log();
        debug!(
            agent = %self.id,
            from = %self.state.kind(),
            to = %next.kind(),
            location = %self.location,
            charge = self.car.charge(),
            "state change"
        );
        let finished = std::mem::replace(&mut self.state, next);
        self.states.push(finished);
        let mut env = StateEnv::new(&mut self.car, &mut self.location);
        self.state.start(&mut env)
    }

    fn push_log(&mut self) {
        let entry = self.log();
        self.logs.push(entry);
    }

    /// Plan a drive between the agent's places, resolving distance and speed.
    fn plan_drive(&self, ctx: &SimContext<'_>, from: Place, to: Place) -> AgentResult<Drive> {
        let (from_id, to_id) = (self.place_id(from), self.place_id(to));
        let distance = ctx.data.distance(from_id, to_id)?;
        let speed = ctx.speed.speed_kmh(from_id, to_id, self.time_of_day(ctx));
        Drive::new(from, to, distance, speed)
    }

    /// Hours needed for `from -> to` when leaving at `time_of_day_h`.
    pub fn travel_duration(
        &self,
        ctx:           &SimContext<'_>,
        from:          Place,
        to:            Place,
        time_of_day_h: f64,
    ) -> AgentResult<f64> {
        let (from_id, to_id) = (self.place_id(from), self.place_id(to));
        let distance = ctx.data.distance(from_id, to_id)?;
        let speed = ctx.speed.speed_kmh(from_id, to_id, time_of_day_h);
        if !speed.is_finite() || speed <= 0.0 {
            return Err(AgentError::InvalidSpeed(speed));
        }
        Ok(distance / speed)
    }
}
