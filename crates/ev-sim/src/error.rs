use ev_agent::AgentError;
use ev_core::AgentId;
use ev_data::DataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("agent {agent} failed: {source}")]
    Agent {
        agent:  AgentId,
        #[source]
        source: AgentError,
    },

    #[error(transparent)]
    Data(#[from] DataError),
}

pub type SimResult<T> = Result<T, SimError>;
