//! `ev-sim`: drives a population of commuting EV agents on a fixed step.
//!
//! # Tick loop
//!
//! ```text
//! until the run limit (step count and/or simulated duration) is reached:
//!   ① on_tick_start(tick)
//!   ② every agent runs for step_secs (in parallel with `parallel`);
//!      each agent swaps states as they stop and corrects its schedule
//!   ③ TickSummary: activity counts, energy recharged, charging power
//!   ④ on_tick_end(summary); on_snapshot every output_interval_ticks
//!   ⑤ clock.advance()
//! on_sim_end(final tick)
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                              |
//! |------------|-----------------------------------------------------|
//! | `parallel` | Steps the agents of a tick on Rayon's thread pool.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ev_core::TimeUnit;
//! use ev_data::{ModelOptions, ReferenceData, load_agent_matrix_csv};
//! use ev_sim::{NoopObserver, RunLimit, SimBuilder};
//!
//! let options = ModelOptions::default();
//! let data = ReferenceData::load_dir(dir, &options)?;
//! let mut sim = SimBuilder::new(options, data)
//!     .agent_matrix(load_agent_matrix_csv(&dir.join("agents.csv"))?)
//!     .build()?;
//! sim.run(RunLimit::duration(1.0, TimeUnit::Hours), &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod summary;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{RunLimit, Sim};
pub use summary::TickSummary;
