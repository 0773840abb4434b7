//! The sales engine — drives one simulation run.
//!
//! RULES:
//!   - Customers are processed one at a time, in arrival order.
//!   - An arrival earlier than the previous one is rejected before any
//!     state changes.
//!   - All state changes are recorded in the event log.
//!   - The engine owns its roster. Nothing is shared between runs.

use crate::{
    agent::AgentRecord,
    bonus::CloseOutcome,
    config::{DealerConfig, PayoutConfig, PriceTable},
    customer::CustomerRecord,
    error::{SimError, SimResult},
    event::SimEvent,
    roster::{Assignment, Roster},
    snapshot::{AgentSummary, RunSnapshot},
    types::{Minutes, RunId, SimTime},
};

pub struct SalesEngine {
    pub run_id:   RunId,
    roster:       Roster,
    prices:       PriceTable,
    payouts:      PayoutConfig,
    waits:        Vec<Minutes>,
    log:          Vec<SimEvent>,
    last_arrival: Option<SimTime>,
}

impl SalesEngine {
    pub fn new(
        run_id: RunId,
        config: &DealerConfig,
        agents: &[AgentRecord],
        start: SimTime,
    ) -> SimResult<Self> {
        config.validate()?;
        let roster = Roster::init(agents, start)?;
        if roster.categories() > config.categories() {
            log::warn!(
                "agents are scored on {} categories but only {} are priced",
                roster.categories(),
                config.categories()
            );
        }

        log::info!("run {run_id}: {} agents, start {start}", roster.len());
        let init = SimEvent::RunInitialized {
            run_id: run_id.clone(),
            start,
            agents: roster.len(),
        };

        Ok(Self {
            run_id,
            roster,
            prices: config.price_table(),
            payouts: config.payouts.clone(),
            waits: Vec::new(),
            log: vec![init],
            last_arrival: None,
        })
    }

    /// Route one customer and record the outcome.
    pub fn process(&mut self, customer: &CustomerRecord) -> SimResult<Assignment> {
        if let Some(previous) = self.last_arrival {
            if customer.arrival_time < previous {
                return Err(SimError::ArrivalOutOfOrder {
                    arrival: customer.arrival_time,
                    previous,
                });
            }
        }

        let assignment = self.roster.assign(customer, &self.prices)?;
        self.last_arrival = Some(customer.arrival_time);
        self.waits.push(assignment.wait_minutes);

        let seq = self.waits.len() as u64;
        let agent = &self.roster.agents()[assignment.agent];
        let agent_id = agent.id().to_string();

        self.log.push(SimEvent::CustomerAssigned {
            seq,
            arrival_time: customer.arrival_time,
            interest:     customer.interest,
            agent_id:     agent_id.clone(),
            wait_minutes: assignment.wait_minutes,
        });

        if assignment.sale_closed {
            self.log.push(SimEvent::DealClosed {
                seq,
                time:     customer.arrival_time,
                agent_id: agent_id.clone(),
                price:    self.prices.price(customer.interest)?,
            });
        }

        match assignment.close_outcome {
            Some(CloseOutcome::BonusAwarded) => {
                log::info!(
                    "agent {agent_id} earned bonus #{} at {}",
                    agent.bonus_count(),
                    customer.arrival_time
                );
                self.log.push(SimEvent::BonusAwarded {
                    seq,
                    time: customer.arrival_time,
                    bonus_count: agent.bonus_count(),
                    agent_id,
                });
            }
            Some(CloseOutcome::BeforeWindow) => {
                log::debug!(
                    "agent {agent_id}: close at {} precedes bonus window {}; not counted",
                    customer.arrival_time,
                    agent.bonus().window_start()
                );
            }
            _ => {}
        }

        Ok(assignment)
    }

    /// Process customers in order, stopping at the first error.
    pub fn run<'a, I>(&mut self, customers: I) -> SimResult<()>
    where
        I: IntoIterator<Item = &'a CustomerRecord>,
    {
        for customer in customers {
            self.process(customer)?;
        }
        log::debug!("run {}: {} customers served", self.run_id, self.customers_served());
        Ok(())
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    /// Wait times, one per processed customer, in arrival order.
    pub fn waits(&self) -> &[Minutes] {
        &self.waits
    }

    pub fn log(&self) -> &[SimEvent] {
        &self.log
    }

    pub fn customers_served(&self) -> u64 {
        self.waits.len() as u64
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            run_id:           self.run_id.clone(),
            customers_served: self.customers_served(),
            waits:            self.waits.clone(),
            agents: self
                .roster
                .agents()
                .iter()
                .map(|a| AgentSummary::from_agent(a, &self.payouts))
                .collect(),
        }
    }

    /// Serialise the event log, one JSON object per line.
    pub fn log_ndjson(&self) -> SimResult<String> {
        let mut out = String::new();
        for event in &self.log {
            out.push_str(&serde_json::to_string(event)?);
            out.push('\n');
        }
        Ok(out)
    }
}
