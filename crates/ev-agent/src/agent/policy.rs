//! Which state follows a finished one.
//!
//! | Finished          | Condition                                  | Next              |
//! |-------------------|--------------------------------------------|-------------------|
//! | Drive             | wants to recharge and is at home or work   | Recharge          |
//! | Drive             | otherwise                                  | Idle              |
//! | Idle / Recharge   | at home                                    | Drive home → work |
//! | Idle / Recharge   | anywhere else                              | Drive work → home |

use super::Agent;
use crate::{ActivityKind, AgentResult, Place, SimContext, State};

impl Agent {
    /// The state that follows the current one.
    pub fn next_state(&mut self, ctx: &SimContext<'_>) -> AgentResult<State> {
        match self.state.kind() {
            ActivityKind::Drive => {
                if self.wants_recharge(ctx)? && self.can_recharge() {
                    Ok(State::recharge())
                } else {
                    Ok(State::idle())
                }
            }
            ActivityKind::Idle | ActivityKind::Recharge => {
                let from = if self.location.is_at(Place::Home) { Place::Home } else { Place::Work };
                Ok(State::drive(self.plan_drive(ctx, from, from.other())?))
            }
        }
    }

    /// Desire at the current charge, run through the configured rule.
    pub fn wants_recharge(&mut self, ctx: &SimContext<'_>) -> AgentResult<bool> {
        let desire = ctx
            .data
            .recharge_desire(&self.recharge_behavior, self.car.charge())?;
        Ok(ctx.options.recharge_rule.wants_recharge(desire, &mut self.rng))
    }

    pub fn can_recharge(&self) -> bool {
        self.location.can_recharge()
    }
}
