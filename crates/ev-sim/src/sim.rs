//! The `Sim` struct and its tick loop.

use tracing::{debug, info};

use ev_agent::{Agent, SimContext};
use ev_core::{AgentId, SimClock, Tick, TimeUnit};
use ev_data::{ModelOptions, ReferenceData, SpeedModel};

use crate::{SimError, SimObserver, SimResult, TickSummary};

// ── RunLimit ──────────────────────────────────────────────────────────────────

/// When [`Sim::run`] stops.  With both limits set, whichever is reached
/// first wins.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RunLimit {
    /// Maximum number of ticks.
    pub steps:         Option<u64>,
    /// Simulated seconds; the last tick may overshoot it by less than a step.
    pub duration_secs: Option<f64>,
}

impl RunLimit {
    pub fn steps(n: u64) -> Self {
        Self { steps: Some(n), duration_secs: None }
    }

    pub fn duration(value: f64, unit: TimeUnit) -> Self {
        Self { steps: None, duration_secs: Some(unit.to_secs(value)) }
    }

    pub fn and_steps(self, n: u64) -> Self {
        Self { steps: Some(n), ..self }
    }

    fn validate(&self) -> SimResult<()> {
        match (self.steps, self.duration_secs) {
            (None, None) => Err(SimError::Config(
                "run limit needs a step count or a duration".into(),
            )),
            (_, Some(d)) if !d.is_finite() || d < 0.0 => Err(SimError::Config(format!(
                "run duration {d} s must be a non-negative number"
            ))),
            _ => Ok(()),
        }
    }

    /// The limit is reached after `steps_done` ticks of `step_secs` each.
    fn reached(&self, steps_done: u64, step_secs: u32) -> bool {
        if self.steps.is_some_and(|max| steps_done >= max) {
            return true;
        }
        self.duration_secs
            .is_some_and(|d| steps_done as f64 * step_secs as f64 >= d)
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Every tick each agent is advanced by `options.step_secs`.  Agents only
/// read the shared reference data, so the order in which they run does not
/// change the result.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Model options the population was built with.
    pub options: ModelOptions,

    /// Simulation clock: tracks the current tick and maps to wall time.
    pub clock: SimClock,

    /// Read-only tables shared by every agent.
    pub data: ReferenceData,

    /// Average speed for every planned drive.
    pub speed: Box<dyn SpeedModel>,

    /// Agents indexed by `AgentId`.
    pub agents: Vec<Agent>,
}

impl Sim {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn context(&self) -> SimContext<'_> {
        SimContext::new(&self.data, self.speed.as_ref(), &self.options)
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick until `limit` is reached, counting from
    /// the tick the call started at.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, limit: RunLimit, observer: &mut O) -> SimResult<()> {
        limit.validate()?;
        let first = self.clock.current_tick;
        info!(agents = self.agents.len(), clock = %self.clock, ?limit, "run started");

        while !limit.reached(self.clock.current_tick.0 - first.0, self.clock.step_secs) {
            self.step(observer)?;
        }

        observer.on_sim_end(self.clock.current_tick);
        info!(clock = %self.clock, "run finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position.
    ///
    /// Useful for tests and incremental stepping; `on_sim_end` is not called.
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Run a single tick with all observer hooks and advance the clock.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickSummary> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let summary = self.process_tick(now)?;
        observer.on_tick_end(&summary);

        let interval = self.options.output_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, summary.unix_secs, &self.agents, &self.data);
        }

        self.clock.advance();
        Ok(summary)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> SimResult<TickSummary> {
        let step_secs = f64::from(self.clock.step_secs);
        // Explicit field borrows so the borrow checker sees disjoint access.
        let ctx = SimContext::new(&self.data, self.speed.as_ref(), &self.options);

        #[cfg(not(feature = "parallel"))]
        let energy_kwh = self
            .agents
            .iter_mut()
            .map(|agent| step_agent(agent, &ctx, step_secs))
            .sum::<SimResult<f64>>()?;

        // Results are collected in agent order, so the reported error is the
        // one of the lowest failing id.
        #[cfg(feature = "parallel")]
        let energy_kwh = {
            use rayon::prelude::*;

            self.agents
                .par_iter_mut()
                .map(|agent| step_agent(agent, &ctx, step_secs))
                .collect::<Vec<_>>()
                .into_iter()
                .sum::<SimResult<f64>>()?
        };

        let summary = TickSummary::collect(
            now,
            self.clock.unix_secs_after(now),
            &self.agents,
            energy_kwh,
        );
        debug!(
            tick = %now,
            idle = summary.idle,
            driving = summary.driving,
            recharging = summary.recharging,
            stranded = summary.stranded,
            energy_kwh = summary.energy_kwh,
            power_kw = summary.charging_power_kw,
            "tick done"
        );
        Ok(summary)
    }
}

/// Advance one agent by a step; returns the energy it recharged (kWh).
fn step_agent(agent: &mut Agent, ctx: &SimContext<'_>, step_secs: f64) -> SimResult<f64> {
    let before = agent.car().recharged_kwh();
    agent
        .run(ctx, step_secs, TimeUnit::Seconds)
        .map_err(|source| SimError::Agent { agent: agent.id(), source })?;
    Ok(agent.car().recharged_kwh() - before)
}
