//! `ev-agent`: commuting EV agents and their activity state machine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`car`]       | `Car`: spec plus mutable charge and recharged-energy meter    |
//! | [`location`]  | `Place`, `Location` (`home`, `work`, `from|to=NNN`)           |
//! | [`state`]     | `State` run protocol, `Activity`, `Status`, `StateEnv`        |
//! | [`drive`]     | `Drive`: distance/charge accounting for one trip              |
//! | [`history`]   | `History<T>` bounded ring buffer                              |
//! | [`context`]   | `SimContext`: shared read-only inputs                         |
//! | [`agent`]     | `Agent`: run loop, transition policy, schedule correction     |
//! | [`error`]     | `AgentError`, `AgentResult<T>`                                |
//!
//! # Energy model
//!
//! | Activity  | Charge change per run of `t` hours                                |
//! |-----------|--------------------------------------------------------------|
//! | Idle      | `− idle_discharge × t`, floored at 0                          |
//! | Drive     | `− km / full_range × 100`; km limited by speed, charge, trip |
//! | Recharge  | `+ t / full_recharge × 100`, capped at 100                    |

pub mod agent;
pub mod car;
pub mod context;
pub mod drive;
pub mod error;
pub mod history;
pub mod location;
pub mod state;

#[cfg(test)]
mod tests;

pub use agent::{Agent, AgentLog, AgentParams};
pub use car::Car;
pub use context::SimContext;
pub use drive::{Drive, DriveLog};
pub use error::{AgentError, AgentResult};
pub use history::History;
pub use location::{Location, Place};
pub use state::{Activity, ActivityKind, State, StateEnv, StateLog, Status};
