//! `ReferenceData`: every read-only table an agent consults, behind one
//! borrow.

use std::fs::File;
use std::path::Path;

use tracing::info;

use ev_core::{AgentRng, LocationId};

use crate::loader::{
    CARS_FILE, DISTANCES_FILE, RECHARGE_BEHAVIORS_FILE, START_TIMES_FILE, load_cars_reader,
    load_distances_reader, load_recharge_behaviors_reader, load_start_times_reader,
};
use crate::{
    CarCatalog, CarSpec, DataError, DataResult, DistanceMatrix, ModelOptions, RechargeCurves,
    StartTimeTable,
};

#[derive(Clone, Debug)]
pub struct ReferenceData {
    pub distances:   DistanceMatrix,
    pub cars:        CarCatalog,
    pub behaviors:   RechargeCurves,
    pub start_times: StartTimeTable,
}

impl ReferenceData {
    /// Bundle loaded tables.  At least one car model and one recharge
    /// behavior are required so defaults always resolve.
    pub fn new(
        distances:   DistanceMatrix,
        cars:        CarCatalog,
        behaviors:   RechargeCurves,
        start_times: StartTimeTable,
    ) -> DataResult<Self> {
        if cars.is_empty() {
            return Err(DataError::Empty(CARS_FILE));
        }
        if behaviors.is_empty() {
            return Err(DataError::Empty(RECHARGE_BEHAVIORS_FILE));
        }
        Ok(Self { distances, cars, behaviors, start_times })
    }

    /// Load the four tables from `dir` using their standard file names.
    pub fn load_dir(dir: &Path, options: &ModelOptions) -> DataResult<Self> {
        info!(dir = %dir.display(), "loading reference data");
        let distances =
            load_distances_reader(File::open(dir.join(DISTANCES_FILE))?, options.distance_factor)?;
        let behaviors = load_recharge_behaviors_reader(File::open(dir.join(RECHARGE_BEHAVIORS_FILE))?)?;
        let cars = load_cars_reader(File::open(dir.join(CARS_FILE))?)?;
        let start_times = load_start_times_reader(File::open(dir.join(START_TIMES_FILE))?)?;
        Self::new(distances, cars, behaviors, start_times)
    }

    // ── Locations ─────────────────────────────────────────────────────────

    pub fn location_id(&self, name: &str) -> DataResult<LocationId> {
        self.distances
            .location_id(name)
            .ok_or_else(|| DataError::UnknownLocation(name.to_owned()))
    }

    pub fn location_name(&self, id: LocationId) -> DataResult<&str> {
        self.distances
            .name(id)
            .ok_or_else(|| DataError::UnknownLocation(id.to_string()))
    }

    /// Road distance (km), symmetric fallback.
    pub fn distance(&self, from: LocationId, to: LocationId) -> DataResult<f64> {
        self.distances.distance(from, to)
    }

    // ── Behavior ──────────────────────────────────────────────────────────

    /// Sample a departure hour of day for the `from -> to` route label pair.
    pub fn travel_start_time(&self, from: &str, to: &str, rng: &mut AgentRng) -> DataResult<f64> {
        self.start_times.sample(from, to, rng)
    }

    pub fn recharge_desire(&self, code: &str, charge: f64) -> DataResult<f64> {
        self.behaviors.desire(code, charge)
    }

    pub fn car_spec(&self, code: &str) -> DataResult<&CarSpec> {
        self.cars.get(code)
    }

    // ── Defaults ──────────────────────────────────────────────────────────

    /// Configured default car code, else the first one loaded.  The code is
    /// checked against the catalog.
    pub fn default_car_code<'a>(&'a self, options: &'a ModelOptions) -> DataResult<&'a str> {
        let code = match options.default_car.as_deref() {
            Some(code) => code,
            None => self.cars.first_code().ok_or(DataError::Empty(CARS_FILE))?,
        };
        self.cars.get(code)?;
        Ok(code)
    }

    /// Configured default recharge behavior, else the first one loaded.
    pub fn default_behavior_code<'a>(&'a self, options: &'a ModelOptions) -> DataResult<&'a str> {
        let code = match options.default_recharge_behavior.as_deref() {
            Some(code) => code,
            None => self
                .behaviors
                .first_code()
                .ok_or(DataError::Empty(RECHARGE_BEHAVIORS_FILE))?,
        };
        self.behaviors.get(code)?;
        Ok(code)
    }
}
