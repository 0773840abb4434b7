//! Agent roster and customer assignment.
//!
//! RULES:
//!   - The roster is built once per run and never resized.
//!   - Roster order is the tie-break key: among equal scores the agent
//!     listed first wins. Selection never depends on float-sort stability
//!     or on an iterator adaptor's tie behaviour.
//!   - A failed assign leaves every agent untouched.

use crate::{
    agent::{Agent, AgentRecord},
    bonus::CloseOutcome,
    config::PriceTable,
    customer::CustomerRecord,
    error::{SimError, SimResult},
    types::{minutes_between, Interest, Minutes, SimTime},
};
use serde::Serialize;

/// Result of routing one customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    /// Roster index of the chosen agent.
    pub agent:         usize,
    pub wait_minutes:  Minutes,
    pub sale_closed:   bool,
    /// Set when the sale closed.
    pub close_outcome: Option<CloseOutcome>,
}

#[derive(Debug, Clone)]
pub struct Roster {
    agents: Vec<Agent>,
}

impl Roster {
    /// Build every agent from its record. `start` opens each agent's first
    /// bonus window.
    pub fn init(records: &[AgentRecord], start: SimTime) -> SimResult<Self> {
        if records.is_empty() {
            return Err(SimError::EmptyRoster);
        }
        let agents = records
            .iter()
            .map(|r| Agent::from_record(r, start))
            .collect::<SimResult<Vec<_>>>()?;
        Ok(Self { agents })
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, index: usize) -> Option<&Agent> {
        self.agents.get(index)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Categories every agent is scored on.
    pub fn categories(&self) -> usize {
        self.agents.iter().map(Agent::categories).min().unwrap_or(0)
    }

    /// Route `customer` to the best eligible agent.
    ///
    /// Free agents are preferred and the customer waits zero minutes. When
    /// everyone is busy the customer goes to whichever agent frees up first,
    /// and the wait is the gap until then.
    pub fn assign(
        &mut self,
        customer: &CustomerRecord,
        prices: &PriceTable,
    ) -> SimResult<Assignment> {
        let interest = customer.interest;
        let arrival = customer.arrival_time;

        let categories = self.categories();
        if interest >= categories {
            return Err(SimError::InterestOutOfRange { interest, categories });
        }
        let price = prices.price(interest)?;

        let (index, wait_minutes) = match self.best_available(arrival, interest) {
            Some(index) => (index, 0.0),
            None => {
                let (index, free_at) = self.soonest_free(interest).ok_or(SimError::EmptyRoster)?;
                let wait = minutes_between(arrival, free_at);
                debug_assert!(wait > 0.0, "busy path must yield a positive wait");
                (index, wait)
            }
        };

        let agent = &mut self.agents[index];
        agent.engage(arrival);

        let close_outcome = if customer.sale_closed {
            agent.credit_sale(price);
            Some(agent.bonus_mut().record_close(arrival))
        } else {
            None
        };

        log::debug!(
            "assign: arrival={arrival} interest={interest} agent={} wait={wait_minutes:.1}m closed={}",
            agent.id(),
            customer.sale_closed
        );

        Ok(Assignment {
            agent: index,
            wait_minutes,
            sale_closed: customer.sale_closed,
            close_outcome,
        })
    }

    /// Highest-scoring agent free at `time`.
    fn best_available(&self, time: SimTime, interest: Interest) -> Option<usize> {
        best_by_score(
            self.agents.iter().enumerate().filter(|(_, a)| a.is_available(time)),
            interest,
        )
    }

    /// Highest-scoring agent among those freeing up soonest, with that instant.
    /// Only meaningful when nobody is free, i.e. every agent is engaged.
    fn soonest_free(&self, interest: Interest) -> Option<(usize, SimTime)> {
        let soonest = self.agents.iter().filter_map(Agent::available_at).min()?;
        let index = best_by_score(
            self.agents
                .iter()
                .enumerate()
                .filter(|(_, a)| a.available_at() == Some(soonest)),
            interest,
        )?;
        Some((index, soonest))
    }
}

/// Stable max: a later candidate replaces the current best only with a
/// strictly greater score.
fn best_by_score<'a>(
    candidates: impl Iterator<Item = (usize, &'a Agent)>,
    interest: Interest,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, agent) in candidates {
        let score = agent.score(interest);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((index, score)),
        }
    }
    best.map(|(index, _)| index)
}
