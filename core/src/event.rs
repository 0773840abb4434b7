//! The run's event log.
//!
//! RULE: Every state change made by the engine is recorded here, in the
//! order it happened. Two runs over the same input must produce
//! identical logs.

use crate::types::{AgentId, Interest, Minutes, RunId, SimTime};
use serde::{Deserialize, Serialize};

/// Every event emitted during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    RunInitialized {
        run_id: RunId,
        start:  SimTime,
        agents: usize,
    },
    CustomerAssigned {
        seq:          u64,
        arrival_time: SimTime,
        interest:     Interest,
        agent_id:     AgentId,
        wait_minutes: Minutes,
    },
    DealClosed {
        seq:      u64,
        time:     SimTime,
        agent_id: AgentId,
        price:    u64,
    },
    BonusAwarded {
        seq:         u64,
        time:        SimTime,
        agent_id:    AgentId,
        bonus_count: u32,
    },
}

impl SimEvent {
    /// Stable string name of the variant.
    pub fn event_type(&self) -> &'static str {
        match self {
            SimEvent::RunInitialized { .. }   => "run_initialized",
            SimEvent::CustomerAssigned { .. } => "customer_assigned",
            SimEvent::DealClosed { .. }       => "deal_closed",
            SimEvent::BonusAwarded { .. }     => "bonus_awarded",
        }
    }
}
