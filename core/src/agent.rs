use crate::{
    bonus::BonusTracker,
    error::{SimError, SimResult},
    types::{AgentId, Interest, SimDuration, SimTime},
};
use serde::{Deserialize, Serialize};

/// Agent as supplied by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub agent_id:     AgentId,
    /// One expertise level per car category.
    pub expertise:    Vec<u32>,
    /// Hours needed per deal.
    pub service_time: f64,
    pub rating:       f64,
}

/// A car sales agent and its running counters.
#[derive(Debug, Clone)]
pub struct Agent {
    id:           AgentId,
    service_time: SimDuration,
    /// `10 * expertise[k] + rating`, fixed at creation.
    score:        Vec<f64>,
    available_at: Option<SimTime>,
    closes:       u32,
    revenue:      u64,
    bonus:        BonusTracker,
}

impl Agent {
    pub fn from_record(record: &AgentRecord, start: SimTime) -> SimResult<Self> {
        let invalid = |reason: &str| SimError::InvalidAgentRecord {
            agent_id: record.agent_id.clone(),
            reason:   reason.to_string(),
        };

        if record.expertise.is_empty() {
            return Err(invalid("no expertise categories"));
        }
        if !record.rating.is_finite() {
            return Err(invalid("rating is not a finite number"));
        }
        if !record.service_time.is_finite() || record.service_time <= 0.0 {
            return Err(invalid("service time must be a positive number of hours"));
        }

        let seconds = (record.service_time * 3600.0).round() as i64;
        let service_time = SimDuration::try_seconds(seconds)
            .filter(|d| *d > SimDuration::zero())
            .ok_or_else(|| invalid("service time out of range"))?;

        Ok(Self {
            id: record.agent_id.clone(),
            service_time,
            score: record
                .expertise
                .iter()
                .map(|&e| 10.0 * e as f64 + record.rating)
                .collect(),
            available_at: None,
            closes: 0,
            revenue: 0,
            bonus: BonusTracker::new(start),
        })
    }

    pub fn id(&self) -> &str                     { &self.id }
    pub fn service_time(&self) -> SimDuration    { self.service_time }
    pub fn available_at(&self) -> Option<SimTime> { self.available_at }
    pub fn closes(&self) -> u32                  { self.closes }
    pub fn revenue(&self) -> u64                 { self.revenue }
    pub fn bonus(&self) -> &BonusTracker         { &self.bonus }
    pub fn bonus_count(&self) -> u32             { self.bonus.bonus_count() }

    /// Number of categories this agent is scored on.
    pub fn categories(&self) -> usize {
        self.score.len()
    }

    /// Panics if `interest` is outside the score vector; the roster checks
    /// bounds before ranking.
    pub fn score(&self, interest: Interest) -> f64 {
        self.score[interest]
    }

    /// Free to start a new engagement at `time`.
    pub fn is_available(&self, time: SimTime) -> bool {
        self.available_at.map_or(true, |t| t <= time)
    }

    /// Take a customer arriving at `arrival`. Starts now when free, otherwise
    /// right after the current engagement ends.
    pub(crate) fn engage(&mut self, arrival: SimTime) {
        self.available_at = Some(match self.available_at {
            Some(busy_until) if busy_until > arrival => busy_until + self.service_time,
            _ => arrival + self.service_time,
        });
    }

    pub(crate) fn credit_sale(&mut self, price: u64) {
        self.closes += 1;
        self.revenue += price;
    }

    pub(crate) fn bonus_mut(&mut self) -> &mut BonusTracker {
        &mut self.bonus
    }
}
