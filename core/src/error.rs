use crate::types::{Interest, SimTime};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Roster has no agents")]
    EmptyRoster,

    #[error("Agent '{agent_id}' is invalid: {reason}")]
    InvalidAgentRecord { agent_id: String, reason: String },

    #[error("Interest {interest} out of range: roster scores {categories} categories")]
    InterestOutOfRange { interest: Interest, categories: usize },

    #[error("Interest {interest} has no price")]
    UnpricedInterest { interest: Interest },

    #[error("Arrival out of order: {arrival} is before previous arrival {previous}")]
    ArrivalOutOfOrder { arrival: SimTime, previous: SimTime },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
