//! End-of-run summary — per-agent counters in roster order.
//!
//! This is what presentation layers read. It carries counters only;
//! summary statistics over waits are computed by the reader.

use crate::{
    agent::Agent,
    config::PayoutConfig,
    types::{AgentId, Minutes, RunId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSummary {
    pub agent_id:   AgentId,
    pub closes:     u32,
    pub revenue:    u64,
    pub bonuses:    u32,
    pub commission: u64,
    pub bonus_pay:  u64,
}

impl AgentSummary {
    pub fn from_agent(agent: &Agent, payouts: &PayoutConfig) -> Self {
        Self {
            agent_id:   agent.id().to_string(),
            closes:     agent.closes(),
            revenue:    agent.revenue(),
            bonuses:    agent.bonus_count(),
            commission: agent.closes() as u64 * payouts.commission_per_close,
            bonus_pay:  agent.bonus_count() as u64 * payouts.bonus_amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub run_id:           RunId,
    pub customers_served: u64,
    pub waits:            Vec<Minutes>,
    pub agents:           Vec<AgentSummary>,
}

impl RunSnapshot {
    pub fn total_closes(&self) -> u64 {
        self.agents.iter().map(|a| a.closes as u64).sum()
    }

    pub fn total_revenue(&self) -> u64 {
        self.agents.iter().map(|a| a.revenue).sum()
    }
}
