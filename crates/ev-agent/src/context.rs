//! `SimContext`: read-only view of shared data passed to every agent call.

use ev_data::{ModelOptions, ReferenceData, SpeedModel};

/// Shared, immutable inputs for one simulation run.
///
/// `Copy` so the tick loop can hand the same context to every agent; all
/// fields are shared borrows, so the context is `Sync` and can be used from
/// Rayon workers.
#[derive(Clone, Copy)]
pub struct SimContext<'a> {
    pub data:    &'a ReferenceData,
    pub speed:   &'a dyn SpeedModel,
    pub options: &'a ModelOptions,
}

impl<'a> SimContext<'a> {
    pub fn new(
        data:    &'a ReferenceData,
        speed:   &'a dyn SpeedModel,
        options: &'a ModelOptions,
    ) -> Self {
        Self { data, speed, options }
    }
}
