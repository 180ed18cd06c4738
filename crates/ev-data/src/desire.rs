//! Recharge-desire curves.
//!
//! A behavior code maps battery charge (%) to the desire (%) to plug in.
//! Curves are piecewise linear between the defined breakpoints.  Missing
//! 0 % and 100 % breakpoints are filled in with a desire of 0 so every charge
//! in `[0, 100]` falls inside the curve.

use std::collections::HashMap;

use crate::{DataError, DataResult};

#[derive(Clone, Debug, PartialEq)]
pub struct RechargeCurve {
    /// `(charge %, desire %)`, sorted by charge, unique charges, first at 0
    /// and last at 100.
    points: Vec<(f64, f64)>,
}

impl RechargeCurve {
    /// Build a curve from arbitrary-order breakpoints.  A later breakpoint
    /// with the same charge replaces an earlier one.
    pub fn new(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut sorted: Vec<(f64, f64)> = Vec::new();
        for (charge, desire) in points {
            match sorted.iter_mut().find(|(c, _)| *c == charge) {
                Some(existing) => existing.1 = desire,
                None => sorted.push((charge, desire)),
            }
        }
        if !sorted.iter().any(|(c, _)| *c == 0.0) {
            sorted.push((0.0, 0.0));
        }
        if !sorted.iter().any(|(c, _)| *c == 100.0) {
            sorted.push((100.0, 0.0));
        }
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { points: sorted }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Desire (%) at `charge` (%).
    pub fn desire(&self, charge: f64) -> DataResult<f64> {
        if !(0.0..=100.0).contains(&charge) {
            return Err(DataError::InvalidCharge(charge));
        }
        // First breakpoint strictly above `charge`; the anchors guarantee
        // 1 ≤ idx ≤ len whenever charge is in range.
        let idx = self.points.partition_point(|(c, _)| *c <= charge);
        let (lo_c, lo_d) = self.points[idx - 1];
        if lo_c == charge || idx == self.points.len() {
            return Ok(lo_d);
        }
        let (hi_c, hi_d) = self.points[idx];
        Ok(((hi_c - charge) * lo_d + (charge - lo_c) * hi_d) / (hi_c - lo_c))
    }
}

/// All curves keyed by behavior code, in load order.
#[derive(Clone, Debug, Default)]
pub struct RechargeCurves {
    curves: HashMap<String, RechargeCurve>,
    order:  Vec<String>,
}

impl RechargeCurves {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the curve for `code`.
    pub fn insert(&mut self, code: impl Into<String>, curve: RechargeCurve) {
        let code = code.into();
        if !self.curves.contains_key(&code) {
            self.order.push(code.clone());
        }
        self.curves.insert(code, curve);
    }

    pub fn get(&self, code: &str) -> DataResult<&RechargeCurve> {
        self.curves
            .get(code)
            .ok_or_else(|| DataError::UnknownBehavior(code.to_owned()))
    }

    /// Desire (%) for behavior `code` at `charge` (%).
    pub fn desire(&self, code: &str, charge: f64) -> DataResult<f64> {
        self.get(code)?.desire(charge)
    }

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
