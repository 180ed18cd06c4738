//! Keeping an agent in step with its commute schedule.

use tracing::debug;

use ev_core::{TimeUnit, time_of_day};

use super::Agent;
use crate::{AgentResult, Location, Place, SimContext, State, StateEnv, Status};

impl Agent {
    /// Local hour of day at the agent's timestamp.
    pub fn time_of_day(&self, ctx: &SimContext<'_>) -> f64 {
        time_of_day(self.timestamp, ctx.options.utc_offset_h)
    }

    /// Where the schedule says the agent should be (or be heading) now.
    fn scheduled_place(&self, tod: f64) -> Place {
        if tod < self.depart_home_h || tod > self.depart_work_h {
            Place::Home
        } else {
            Place::Work
        }
    }

    /// Force a departure when a fixed-size step carried the agent across a
    /// commute boundary.
    pub(crate) fn check_state(&mut self, ctx: &SimContext<'_>) -> AgentResult<()> {
        let tod = self.time_of_day(ctx);
        let target = self.scheduled_place(tod);

        if self.location.is_at(target) {
            return Ok(());
        }
        let current = self.state.as_drive();
        if current.is_some_and(|d| d.to() == target) {
            return Ok(());
        }

        let drive = match (self.location, current) {
            (Location::EnRoute { .. }, Some(current)) => current.turn_back(),
            _ => {
                let from = self.location.place().unwrap_or(target.other());
                self.plan_drive(ctx, from, target)?
            }
        };
        debug!(
            agent = %self.id,
            time_of_day = tod,
            location = %self.location,
            to = %target,
            "schedule boundary crossed, departing"
        );

        let mut env = StateEnv::new(&mut self.car, &mut self.location);
        self.state.stop(&mut env)?;
        self.change_state(State::drive(drive))
    }

    /// Place the agent as if it had followed its schedule up to the start
    /// timestamp.  Partly elapsed states are fast-forwarded with the normal
    /// run protocol.
    pub(crate) fn set_initial_state(&mut self, ctx: &SimContext<'_>) -> AgentResult<()> {
        let tod = self.time_of_day(ctx);

        if tod < self.depart_home_h {
            self.location = Location::Home;
            self.state = State::idle();
        } else {
            let to_work = self.travel_duration(ctx, Place::Home, Place::Work, self.depart_home_h)?;
            if tod < self.depart_home_h + to_work {
                self.state = State::drive(self.plan_drive(ctx, Place::Home, Place::Work)?);
                self.fast_forward(ctx, tod - self.depart_home_h)?;
            } else if tod < self.depart_work_h {
                self.location = Location::Work;
                self.state = State::idle();
                self.fast_forward(ctx, tod - self.depart_home_h - to_work)?;
            } else {
                let to_home =
                    self.travel_duration(ctx, Place::Work, Place::Home, self.depart_work_h)?;
                if tod < self.depart_work_h + to_home {
                    self.location = Location::Work;
                    self.state = State::drive(self.plan_drive(ctx, Place::Work, Place::Home)?);
                    self.fast_forward(ctx, tod - self.depart_work_h)?;
                } else {
                    self.location = Location::Home;
                    self.state = State::idle();
                    self.fast_forward(ctx, tod - self.depart_work_h - to_home)?;
                }
            }
        }

        self.push_log();
        Ok(())
    }

    fn fast_forward(&mut self, ctx: &SimContext<'_>, hours: f64) -> AgentResult<()> {
        let secs = TimeUnit::Hours.to_secs(hours.max(0.0));
        {
            let mut env = StateEnv::new(&mut self.car, &mut self.location);
            self.state.run(&mut env, secs)?;
        }
        if self.state.status() == Status::Stopped {
            let next = self.next_state(ctx)?;
            self.change_state(next)?;
        }
        Ok(())
    }
}
