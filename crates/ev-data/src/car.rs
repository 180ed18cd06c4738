//! Car model templates.

use std::collections::HashMap;

use crate::{DataError, DataResult};

/// Immutable specification of a car model.  Agents clone it into their own
/// `ev_agent::Car`, which adds the mutable charge.
#[derive(Clone, Debug, PartialEq)]
pub struct CarSpec {
    pub brand: String,
    pub model: String,
    /// Battery capacity (kWh).
    pub capacity_kwh: f64,
    /// Range on a full battery (km).
    pub full_range_km: f64,
    /// Time to recharge from 0 % to 100 % (h).
    pub full_recharge_h: f64,
    /// Charge lost per hour while idle (%/h).
    pub idle_discharge_pct_h: f64,
}

impl CarSpec {
    /// Validate and build a spec.  All numeric fields must be finite and
    /// non-negative.
    pub fn new(
        brand:                impl Into<String>,
        model:                impl Into<String>,
        capacity_kwh:         f64,
        full_range_km:        f64,
        full_recharge_h:      f64,
        idle_discharge_pct_h: f64,
    ) -> DataResult<Self> {
        let spec = Self {
            brand: brand.into(),
            model: model.into(),
            capacity_kwh,
            full_range_km,
            full_recharge_h,
            idle_discharge_pct_h,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check the numeric fields of a spec built by hand.
    pub fn validate(&self) -> DataResult<()> {
        for (field, value) in [
            ("capacity", self.capacity_kwh),
            ("full range", self.full_range_km),
            ("full recharge time", self.full_recharge_h),
            ("idle discharge rate", self.idle_discharge_pct_h),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DataError::InvalidCarSpec { field, value });
            }
        }
        Ok(())
    }

    /// Charging power while recharging below 100 % (kW).  Zero for a car that
    /// recharges instantly.
    pub fn charging_power_kw(&self) -> f64 {
        if self.full_recharge_h > 0.0 {
            self.capacity_kwh / self.full_recharge_h
        } else {
            0.0
        }
    }
}

/// Car specs keyed by model code, remembering load order so the first code
/// can serve as the default.
#[derive(Clone, Debug, Default)]
pub struct CarCatalog {
    specs: HashMap<String, CarSpec>,
    order: Vec<String>,
}

impl CarCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a spec.  Returns `false` (and keeps the existing entry) if the
    /// code is already present.
    pub fn insert(&mut self, code: impl Into<String>, spec: CarSpec) -> bool {
        let code = code.into();
        if self.specs.contains_key(&code) {
            return false;
        }
        self.order.push(code.clone());
        self.specs.insert(code, spec);
        true
    }

    pub fn get(&self, code: &str) -> DataResult<&CarSpec> {
        self.specs
            .get(code)
            .ok_or_else(|| DataError::UnknownCar(code.to_owned()))
    }

    /// Code of the first spec loaded.
    pub fn first_code(&self) -> Option<&str> {
        self.order.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
