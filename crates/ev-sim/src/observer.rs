//! Simulation observer trait for progress reporting and data collection.

use ev_agent::Agent;
use ev_core::Tick;
use ev_data::ReferenceData;

use crate::TickSummary;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: charging-power printer
///
/// ```rust,ignore
/// struct PowerPrinter;
///
/// impl SimObserver for PowerPrinter {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         println!("{}: {:.1} kW", summary.tick, summary.charging_power_kw);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any agent runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once every agent has been stepped through the tick.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `options.output_interval_ticks`
    /// ticks), after `on_tick_end`.
    ///
    /// `unix_secs` is the wall-clock time at the end of the tick.  `data` is
    /// passed so writers can resolve location ids to names.
    fn on_snapshot(
        &mut self,
        _tick:      Tick,
        _unix_secs: i64,
        _agents:    &[Agent],
        _data:      &ReferenceData,
    ) {}

    /// Called once after the final tick of [`Sim::run`][crate::Sim::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
