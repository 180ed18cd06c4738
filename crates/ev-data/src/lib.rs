//! `ev-data`: the read-only reference model every agent consults.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`distance`]    | `DistanceMatrix`: interned locations, symmetric lookup     |
//! | [`car`]         | `CarSpec`, `CarCatalog`                                    |
//! | [`desire`]      | `RechargeCurve`, `RechargeCurves` (piecewise-linear)       |
//! | [`start_time`]  | `StartTimeTable`: cumulative departure-time distributions  |
//! | [`speed`]       | `SpeedModel` trait, `FixedSpeed`                           |
//! | [`options`]     | `ModelOptions`, `InitialChargeMethod`, `RechargeRule`      |
//! | [`loader`]      | CSV readers for all tables plus the agent-count matrix     |
//! | [`reference`]   | `ReferenceData`: the bundle of all tables                  |
//! | [`error`]       | `DataError`, `DataResult<T>`                               |
//!
//! Everything here is immutable once loaded, so a single `&ReferenceData`
//! can be shared by every agent (and every Rayon worker) of a run.

pub mod car;
pub mod desire;
pub mod distance;
pub mod error;
pub mod loader;
pub mod options;
pub mod reference;
pub mod speed;
pub mod start_time;


pub use car::{CarCatalog, CarSpec};
pub use desire::{RechargeCurve, RechargeCurves};
pub use distance::DistanceMatrix;
pub use error::{DataError, DataResult};
pub use loader::{
    AgentMatrix, load_agent_matrix_csv, load_agent_matrix_reader, load_cars_reader,
    load_distances_reader, load_recharge_behaviors_reader, load_start_times_reader,
};
pub use options::{InitialChargeMethod, ModelOptions, RechargeRule};
pub use reference::ReferenceData;
pub use speed::{FixedSpeed, SpeedModel};
pub use start_time::{StartTimeTable, StartTimeWindow};
