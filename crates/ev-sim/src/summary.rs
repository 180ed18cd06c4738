//! Per-tick aggregate of the population.

use ev_agent::{ActivityKind, Agent};
use ev_core::Tick;

/// Population state at the end of one tick.
///
/// Every agent is counted in exactly one of `idle`, `driving`, `recharging`
/// or `stranded`; stranded drivers are not counted as driving.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickSummary {
    pub tick:              Tick,
    /// Unix seconds at the end of the tick.
    pub unix_secs:         i64,
    pub idle:              usize,
    pub driving:           usize,
    pub recharging:        usize,
    pub stranded:          usize,
    /// Energy put into batteries during the tick (kWh).
    pub energy_kwh:        f64,
    /// Grid draw of every plugged-in car that is not yet full (kW).
    pub charging_power_kw: f64,
}

impl TickSummary {
    pub fn collect(tick: Tick, unix_secs: i64, agents: &[Agent], energy_kwh: f64) -> Self {
        let mut summary = Self { tick, unix_secs, energy_kwh, ..Self::default() };
        for agent in agents {
            match agent.state().kind() {
                ActivityKind::Idle => summary.idle += 1,
                ActivityKind::Drive if agent.is_stranded() => summary.stranded += 1,
                ActivityKind::Drive => summary.driving += 1,
                ActivityKind::Recharge => {
                    summary.recharging += 1;
                    if agent.car().charge() < 100.0 {
                        summary.charging_power_kw += agent.car().spec().charging_power_kw();
                    }
                }
            }
        }
        summary
    }

    /// Number of agents counted.
    pub fn agents(&self) -> usize {
        self.idle + self.driving + self.recharging + self.stranded
    }
}
