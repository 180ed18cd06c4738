//! Global model options.
//!
//! Typically loaded from a TOML file by the application and passed to the
//! simulation builder.  Every field has a default, so an empty document is a
//! valid configuration:
//!
//! ```toml
//! step_secs         = 360
//! default_speed_kmh = 40.0
//!
//! [recharge_rule]
//! kind           = "threshold"
//! min_desire_pct = 50.0
//! ```

use serde::Deserialize;

use ev_core::AgentRng;

use crate::{DataError, DataResult};

/// How each agent's starting charge is assigned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialChargeMethod {
    /// Every car starts at `initial_charge`.
    #[default]
    Fixed,
    /// Uniform in `[min_initial_charge, 100]`, drawn from the agent's RNG.
    Random,
}

/// Decision rule turning a recharge desire (%) into a yes/no.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RechargeRule {
    /// Recharge iff `desire ≥ min_desire_pct`.
    Threshold { min_desire_pct: f64 },
    /// Recharge with probability `desire / 100`.
    Probabilistic,
}

impl Default for RechargeRule {
    fn default() -> Self {
        RechargeRule::Threshold { min_desire_pct: 50.0 }
    }
}

impl RechargeRule {
    pub fn wants_recharge(&self, desire_pct: f64, rng: &mut AgentRng) -> bool {
        match *self {
            RechargeRule::Threshold { min_desire_pct } => desire_pct >= min_desire_pct,
            RechargeRule::Probabilistic => rng.unit() < desire_pct / 100.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModelOptions {
    /// Unix timestamp at which the run starts.
    pub start_unix_secs: i64,

    /// Seconds per simulation step.  Default: 360 (6 minutes).
    pub step_secs: u32,

    /// Average driving speed used by `FixedSpeed` (km/h).
    pub default_speed_kmh: f64,

    /// Multiplier applied to every cell of the distance matrix on load.
    pub distance_factor: f64,

    /// Log snapshots kept per agent.  0 keeps all of them.
    pub max_agent_logs: usize,

    /// Finished states kept per agent.  0 keeps all of them.
    pub max_agent_states: usize,

    /// Starting charge (%) for `InitialChargeMethod::Fixed`.
    pub initial_charge: f64,

    pub initial_charge_method: InitialChargeMethod,

    /// Lower bound (%) for `InitialChargeMethod::Random`.
    pub min_initial_charge: f64,

    /// Car model code; `None` uses the first model in the catalog.
    pub default_car: Option<String>,

    /// Recharge behavior code; `None` uses the first curve loaded.
    pub default_recharge_behavior: Option<String>,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    pub recharge_rule: RechargeRule,

    /// Offset from UTC of the time zone the commute schedule is written in.
    pub utc_offset_h: f64,

    /// Snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            start_unix_secs:           0,
            step_secs:                 6 * 60,
            default_speed_kmh:         40.0,
            distance_factor:           1.0,
            max_agent_logs:            50,
            max_agent_states:          5,
            initial_charge:            100.0,
            initial_charge_method:     InitialChargeMethod::Fixed,
            min_initial_charge:        50.0,
            default_car:               None,
            default_recharge_behavior: None,
            seed:                      42,
            recharge_rule:             RechargeRule::default(),
            utc_offset_h:              0.0,
            output_interval_ticks:     1,
        }
    }
}

impl ModelOptions {
    /// Reject option combinations the engine cannot run with.
    pub fn validate(&self) -> DataResult<()> {
        if self.step_secs == 0 {
            return Err(DataError::Config("step_secs must be > 0".into()));
        }
        if !(self.default_speed_kmh.is_finite() && self.default_speed_kmh > 0.0) {
            return Err(DataError::Config(format!(
                "default_speed_kmh = {} must be a positive number",
                self.default_speed_kmh
            )));
        }
        if !(self.distance_factor.is_finite() && self.distance_factor >= 0.0) {
            return Err(DataError::Config(format!(
                "distance_factor = {} must be a non-negative number",
                self.distance_factor
            )));
        }
        match self.initial_charge_method {
            InitialChargeMethod::Fixed if !(0.0..=100.0).contains(&self.initial_charge) => {
                return Err(DataError::Config(format!(
                    "initial_charge = {} must be within [0, 100]",
                    self.initial_charge
                )));
            }
            InitialChargeMethod::Random if !(0.0..100.0).contains(&self.min_initial_charge) => {
                return Err(DataError::Config(format!(
                    "min_initial_charge = {} must be within [0, 100)",
                    self.min_initial_charge
                )));
            }
            _ => {}
        }
        if let RechargeRule::Threshold { min_desire_pct } = self.recharge_rule {
            if !(0.0..=100.0).contains(&min_desire_pct) {
                return Err(DataError::Config(format!(
                    "recharge_rule.min_desire_pct = {min_desire_pct} must be within [0, 100]"
                )));
            }
        }
        if !(-24.0..=24.0).contains(&self.utc_offset_h) {
            return Err(DataError::Config(format!(
                "utc_offset_h = {} must be within [-24, 24]",
                self.utc_offset_h
            )));
        }
        Ok(())
    }
}
