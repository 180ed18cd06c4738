//! `ev-core`: foundational types for the EV commuter charging-demand
//! simulator.
//!
//! This crate is a dependency of every other `ev-*` crate.  It has no `ev-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                   |
//! |-----------|------------------------------------------------------------|
//! | [`ids`]   | `AgentId`, `LocationId`                                    |
//! | [`time`]  | `Tick`, `SimClock`, `TimeUnit`, `time_of_day`              |
//! | [`rng`]   | `AgentRng` (per-agent, seedable)                           |
//! | [`error`] | `EvError`, `EvResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, ticks, time units.  |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{EvError, EvResult};
pub use ids::{AgentId, LocationId};
pub use rng::AgentRng;
pub use time::{SECS_PER_HOUR, SimClock, Tick, TimeUnit, time_of_day};
