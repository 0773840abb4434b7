//! Synthetic agents and customers.
//!
//! The core never generates its own input. This module stands in for the
//! upstream data source when the runner is used without input files.

use crate::rng::SimRng;
use chrono::{Duration, NaiveDate, NaiveTime};
use dealer_core::{
    agent::AgentRecord, config::DealerConfig, customer::CustomerRecord, types::SimTime,
};
use std::collections::HashSet;

/// Distinct six-digit agent ids.
pub const AGENT_ID_SPACE: usize = 900_000;

pub fn generate_agents(
    rng: &mut SimRng,
    n: usize,
    config: &DealerConfig,
) -> anyhow::Result<Vec<AgentRecord>> {
    if n > AGENT_ID_SPACE {
        anyhow::bail!("cannot generate {n} agents: only {AGENT_ID_SPACE} six-digit ids exist");
    }
    let g = &config.generation;
    let mut seen = HashSet::with_capacity(n);
    let mut agents = Vec::with_capacity(n);

    while agents.len() < n {
        let agent_id = format!("{:06}", 100_000 + rng.next_u64_below(AGENT_ID_SPACE as u64));
        if !seen.insert(agent_id.clone()) {
            continue;
        }
        let expertise = (0..config.categories())
            .map(|_| rng.range_inclusive(0, g.max_expertise))
            .collect();
        let service_time = rng.range_inclusive(g.min_service_hours, g.max_service_hours) as f64;
        let rating = (rng.next_f64() * 10.0).round() / 10.0;

        agents.push(AgentRecord { agent_id, expertise, service_time, rating });
    }
    log::debug!("generated {} agents", agents.len());
    Ok(agents)
}

/// Customers in non-decreasing arrival order, all inside business hours.
/// Arrivals that would land after closing move to the next day's opening.
pub fn generate_customers(
    rng: &mut SimRng,
    n: usize,
    start: SimTime,
    config: &DealerConfig,
) -> Vec<CustomerRecord> {
    let g = &config.generation;
    let categories = config.categories() as u64;
    let mut time = start;
    let mut day = start.date();
    let mut closing = closing_time(day, config);
    let mut customers = Vec::with_capacity(n);

    for _ in 0..n {
        let gap = rng.exponential(g.mean_interarrival_minutes).round() as i64;
        time += Duration::minutes(gap);
        if time >= closing {
            day = day.succ_opt().unwrap_or(day);
            time = opening_time(day, config);
            closing = closing_time(day, config);
        }
        customers.push(CustomerRecord {
            arrival_time: time,
            interest:     rng.next_u64_below(categories) as usize,
            sale_closed:  rng.chance(g.close_probability),
        });
    }
    log::debug!("generated {} customers", customers.len());
    customers
}

fn opening_time(day: NaiveDate, config: &DealerConfig) -> SimTime {
    day.and_time(NaiveTime::MIN) + Duration::hours(config.hours.open as i64)
}

fn closing_time(day: NaiveDate, config: &DealerConfig) -> SimTime {
    day.and_time(NaiveTime::MIN) + Duration::hours(config.hours.close as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Stream;
    use chrono::Timelike;

    fn start(config: &DealerConfig) -> SimTime {
        config
            .opening_time(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
            .unwrap()
    }

    #[test]
    fn agents_have_unique_ids_and_full_expertise() {
        let config = DealerConfig::default_test();
        let mut rng = SimRng::for_stream(42, Stream::Agents);
        let agents = generate_agents(&mut rng, 50, &config).unwrap();

        let ids: HashSet<_> = agents.iter().map(|a| a.agent_id.clone()).collect();
        assert_eq!(ids.len(), 50);
        for a in &agents {
            assert_eq!(a.agent_id.len(), 6);
            assert_eq!(a.expertise.len(), config.categories());
            assert!(a.expertise.iter().all(|&e| e <= config.generation.max_expertise));
            assert!((1.0..=6.0).contains(&a.service_time));
            assert!((0.0..=1.0).contains(&a.rating));
        }
    }

    #[test]
    fn more_agents_than_ids_rejected() {
        let config = DealerConfig::default_test();
        let mut rng = SimRng::for_stream(42, Stream::Agents);
        assert!(generate_agents(&mut rng, AGENT_ID_SPACE + 1, &config).is_err());
    }

    #[test]
    fn customers_are_sorted_and_inside_business_hours() {
        let config = DealerConfig::default_test();
        let mut rng = SimRng::for_stream(42, Stream::Customers);
        let customers = generate_customers(&mut rng, 1_000, start(&config), &config);

        assert_eq!(customers.len(), 1_000);
        for pair in customers.windows(2) {
            assert!(pair[0].arrival_time <= pair[1].arrival_time);
        }
        for c in &customers {
            let hour = c.arrival_time.hour();
            assert!(hour >= config.hours.open && hour < config.hours.close, "{}", c.arrival_time);
            assert!(c.interest < config.categories());
        }
        // Enough traffic to spill over several days.
        assert!(customers.last().unwrap().arrival_time.date() > start(&config).date());
    }

    #[test]
    fn generation_is_deterministic() {
        let config = DealerConfig::default_test();
        let a = generate_customers(&mut SimRng::for_stream(9, Stream::Customers), 200, start(&config), &config);
        let b = generate_customers(&mut SimRng::for_stream(9, Stream::Customers), 200, start(&config), &config);
        assert_eq!(a, b);
    }
}
