use ev_core::EvError;
use ev_data::DataError;
use thiserror::Error;

use crate::Status;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid duration {0}: must be a non-negative number")]
    InvalidDuration(f64),

    #[error("duration {duration} s is shorter than the {elapsed} s already elapsed")]
    DurationBelowElapsed { duration: f64, elapsed: f64 },

    #[error("cannot start a state that is {0}: it must be pending")]
    AlreadyStarted(Status),

    #[error("cannot stop a state that is {0}: it must be running")]
    NotRunning(Status),

    #[error("cannot run a stopped state")]
    Stopped,

    #[error("invalid charge percentage {0}: must be within [0, 100]")]
    InvalidCharge(f64),

    #[error("invalid charge delta {delta}: charge {charge} would leave [0, 100]")]
    InvalidChargeDelta { charge: f64, delta: f64 },

    #[error("invalid speed {0} km/h: must be a positive number")]
    InvalidSpeed(f64),

    #[error("invalid trip distance {0} km: must be a non-negative number")]
    InvalidDistance(f64),

    #[error("remaining distance {remaining} km is outside [0, {distance}]")]
    InvalidRemaining { remaining: f64, distance: f64 },

    #[error("invalid departure hour {0}: must be within [0, 24]")]
    InvalidDepartureHour(f64),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Core(#[from] EvError),
}

pub type AgentResult<T> = Result<T, AgentError>;
