//! A single agent's vehicle: an immutable `CarSpec` plus the mutable charge.

use ev_data::CarSpec;

use crate::{AgentError, AgentResult};

#[derive(Clone, Debug, PartialEq)]
pub struct Car {
    spec:          CarSpec,
    /// State of charge (%), always within `[0, 100]`.
    charge:        f64,
    /// Energy delivered by recharging since creation (kWh).
    recharged_kwh: f64,
}

impl Car {
    /// A fully charged car built from `spec`.
    pub fn new(spec: CarSpec) -> AgentResult<Self> {
        spec.validate()?;
        Ok(Self { spec, charge: 100.0, recharged_kwh: 0.0 })
    }

    pub fn with_charge(spec: CarSpec, charge: f64) -> AgentResult<Self> {
        let mut car = Self::new(spec)?;
        car.set_charge(charge)?;
        Ok(car)
    }

    #[inline]
    pub fn spec(&self) -> &CarSpec {
        &self.spec
    }

    #[inline]
    pub fn charge(&self) -> f64 {
        self.charge
    }

    pub fn set_charge(&mut self, charge: f64) -> AgentResult<()> {
        if !(0.0..=100.0).contains(&charge) {
            return Err(AgentError::InvalidCharge(charge));
        }
        self.charge = charge;
        Ok(())
    }

    pub fn set_charge_by_delta(&mut self, delta: f64) -> AgentResult<()> {
        self.set_charge(self.charge + delta)
            .map_err(|_| AgentError::InvalidChargeDelta { charge: self.charge, delta })
    }

    /// Energy currently stored (kWh).
    pub fn energy_kwh(&self) -> f64 {
        self.charge / 100.0 * self.spec.capacity_kwh
    }

    #[inline]
    pub fn recharged_kwh(&self) -> f64 {
        self.recharged_kwh
    }

    pub(crate) fn add_recharged_kwh(&mut self, kwh: f64) {
        self.recharged_kwh += kwh;
    }

    // ── Spec shortcuts ────────────────────────────────────────────────────

    pub fn brand(&self) -> &str {
        &self.spec.brand
    }

    pub fn model(&self) -> &str {
        &self.spec.model
    }

    pub fn capacity_kwh(&self) -> f64 {
        self.spec.capacity_kwh
    }

    pub fn full_range_km(&self) -> f64 {
        self.spec.full_range_km
    }

    pub fn full_recharge_h(&self) -> f64 {
        self.spec.full_recharge_h
    }

    pub fn idle_discharge_pct_h(&self) -> f64 {
        self.spec.idle_discharge_pct_h
    }
}
