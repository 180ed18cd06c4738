//! Fluent builder for constructing a [`Sim`].

use tracing::{info, warn};

use ev_agent::{Agent, AgentParams, AgentResult, Car, SimContext};
use ev_core::{AgentId, AgentRng, LocationId, SimClock};
use ev_data::{
    AgentMatrix, CarSpec, FixedSpeed, InitialChargeMethod, ModelOptions, ReferenceData, SpeedModel,
};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`ModelOptions`]: step, seed, defaults, …
/// - [`ReferenceData`]: distances, cars, recharge curves, departure times
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                  |
/// |------------------------|------------------------------------------|
/// | `.speed_model(m)`      | `FixedSpeed(options.default_speed_kmh)`  |
/// | `.agent_matrix(m)`     | no agents                                |
/// | `.commuters(h, w, n)`  | no agents                                |
///
/// Agents are numbered in the order their `(home, work)` pairs were added.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(options, data)
///     .agent_matrix(matrix)
///     .build()?;
/// sim.run(RunLimit::steps(240), &mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    options:   ModelOptions,
    data:      ReferenceData,
    speed:     Option<Box<dyn SpeedModel>>,
    commuters: Vec<(String, String, u32)>,
}

impl SimBuilder {
    pub fn new(options: ModelOptions, data: ReferenceData) -> Self {
        Self {
            options,
            data,
            speed:     None,
            commuters: Vec::new(),
        }
    }

    /// Replace the fixed default speed with a custom model.
    pub fn speed_model(mut self, model: impl SpeedModel + 'static) -> Self {
        self.speed = Some(Box::new(model));
        self
    }

    /// Add every `(home, work, count)` entry of a loaded agent matrix.
    pub fn agent_matrix(mut self, matrix: AgentMatrix) -> Self {
        self.commuters.extend(matrix.entries);
        self
    }

    /// Add `count` agents living at `home` and working at `work`.
    pub fn commuters(mut self, home: impl Into<String>, work: impl Into<String>, count: u32) -> Self {
        self.commuters.push((home.into(), work.into(), count));
        self
    }

    /// Validate the options, resolve the default car and recharge behavior,
    /// and create every agent placed according to the start timestamp.
    pub fn build(self) -> SimResult<Sim> {
        self.options.validate()?;

        let speed: Box<dyn SpeedModel> = match self.speed {
            Some(model) => model,
            None => Box::new(FixedSpeed(self.options.default_speed_kmh)),
        };
        let car_code = self.data.default_car_code(&self.options)?.to_owned();
        let behavior = self.data.default_behavior_code(&self.options)?.to_owned();
        let spec = self.data.car_spec(&car_code)?.clone();

        let ctx = SimContext::new(&self.data, speed.as_ref(), &self.options);
        let mut agents = Vec::new();

        for (home, work, count) in &self.commuters {
            let home = self.data.location_id(home)?;
            let work = self.data.location_id(work)?;
            for _ in 0..*count {
                let id = AgentId::try_from(agents.len()).map_err(|_| {
                    SimError::Config(format!("population exceeds {} agents", u32::MAX))
                })?;
                let agent = spawn(&ctx, &spec, &behavior, id, home, work)
                    .map_err(|source| SimError::Agent { agent: id, source })?;
                agents.push(agent);
            }
        }

        if agents.is_empty() {
            warn!("simulation built without agents");
        }
        info!(agents = agents.len(), car = %car_code, behavior = %behavior, "population built");

        Ok(Sim {
            clock:   SimClock::new(self.options.start_unix_secs, self.options.step_secs),
            options: self.options,
            data:    self.data,
            speed,
            agents,
        })
    }
}

/// Create one agent with its own RNG stream and initial charge.
fn spawn(
    ctx:      &SimContext<'_>,
    spec:     &CarSpec,
    behavior: &str,
    id:       AgentId,
    home:     LocationId,
    work:     LocationId,
) -> AgentResult<Agent> {
    let mut rng = AgentRng::new(ctx.options.seed, id);
    let charge = match ctx.options.initial_charge_method {
        InitialChargeMethod::Fixed => ctx.options.initial_charge,
        InitialChargeMethod::Random => rng.gen_range(ctx.options.min_initial_charge..=100.0),
    };
    let params = AgentParams {
        id,
        home,
        work,
        car: Car::with_charge(spec.clone(), charge)?,
        recharge_behavior: behavior.to_owned(),
    };
    Agent::new(ctx, params, rng)
}
