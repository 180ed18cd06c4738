//! Plain data row types written by output backends.

use ev_agent::Agent;
use ev_core::Tick;
use ev_data::ReferenceData;
use ev_sim::TickSummary;

/// One agent at the end of a snapshot tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSnapshotRow {
    pub tick:           u64,
    pub unix_time_secs: i64,
    pub agent_id:       u32,
    /// `idle`, `drive` or `recharge`.
    pub activity:       &'static str,
    pub status:         &'static str,
    /// `home`, `work`, or `from|to=NNN` while driving.
    pub location:       String,
    /// Name of the place the agent is at; empty while en route.
    pub place:          String,
    pub charge_pct:     f64,
    /// Energy recharged since the start of the run.
    pub recharged_kwh:  f64,
}

impl AgentSnapshotRow {
    pub fn new(tick: Tick, unix_time_secs: i64, agent: &Agent, data: &ReferenceData) -> Self {
        let place = agent
            .location_id()
            .and_then(|id| data.location_name(id).ok())
            .unwrap_or_default()
            .to_owned();
        Self {
            tick: tick.0,
            unix_time_secs,
            agent_id: agent.id().0,
            activity: agent.state().kind().as_str(),
            status: agent.state().status().as_str(),
            location: agent.location().to_string(),
            place,
            charge_pct: agent.car().charge(),
            recharged_kwh: agent.car().recharged_kwh(),
        }
    }
}

/// Population totals for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:              u64,
    pub unix_time_secs:    i64,
    pub idle:              u64,
    pub driving:           u64,
    pub recharging:        u64,
    pub stranded:          u64,
    pub energy_kwh:        f64,
    pub charging_power_kw: f64,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:              s.tick.0,
            unix_time_secs:    s.unix_secs,
            idle:              s.idle as u64,
            driving:           s.driving as u64,
            recharging:        s.recharging as u64,
            stranded:          s.stranded as u64,
            energy_kwh:        s.energy_kwh,
            charging_power_kw: s.charging_power_kw,
        }
    }
}
