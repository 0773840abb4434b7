use crate::{
    error::{SimError, SimResult},
    types::{Interest, SimTime},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One car category. Its position in the catalogue is the interest index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarConfig {
    pub car_id: String,
    pub label:  String,
    pub price:  u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BusinessHours {
    /// Hour of day the floor opens; simulations start at this hour.
    pub open:  u32,
    /// Hour of day after which no new calls arrive.
    pub close: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutConfig {
    pub commission_per_close: u64,
    pub bonus_amount:         u64,
}

/// Parameters for the synthetic agent/customer generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub agents:                    usize,
    pub customers:                 usize,
    pub max_expertise:             u32,
    pub min_service_hours:         u32,
    pub max_service_hours:         u32,
    pub mean_interarrival_minutes: f64,
    pub close_probability:         f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealerConfig {
    pub cars:       Vec<CarConfig>,
    pub hours:      BusinessHours,
    pub payouts:    PayoutConfig,
    pub generation: GenerationConfig,
}

impl DealerConfig {
    /// Load from the data/ directory.
    /// In tests, use DealerConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/dealer.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: DealerConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        log::debug!("Loaded dealer config from {path}: {} car categories", config.cars.len());
        Ok(config)
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            cars: vec![
                CarConfig { car_id: "sedan".into(),  label: "Sedan".into(),        price: 24_000 },
                CarConfig { car_id: "suv".into(),    label: "SUV".into(),          price: 36_000 },
                CarConfig { car_id: "truck".into(),  label: "Pickup Truck".into(), price: 42_000 },
                CarConfig { car_id: "sports".into(), label: "Sports Car".into(),   price: 65_000 },
            ],
            hours: BusinessHours { open: 9, close: 17 },
            payouts: PayoutConfig {
                commission_per_close: 10_000,
                bonus_amount:         100_000,
            },
            generation: GenerationConfig {
                agents:                    5,
                customers:                 100,
                max_expertise:             3,
                min_service_hours:         1,
                max_service_hours:         6,
                mean_interarrival_minutes: 45.0,
                close_probability:         0.4,
            },
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.cars.is_empty() {
            return Err(SimError::InvalidConfig("catalogue has no car categories".into()));
        }
        if self.hours.open >= self.hours.close || self.hours.close > 24 {
            return Err(SimError::InvalidConfig(format!(
                "business hours {}..{} are not a valid span of the day",
                self.hours.open, self.hours.close
            )));
        }
        let g = &self.generation;
        if g.min_service_hours == 0 || g.min_service_hours > g.max_service_hours {
            return Err(SimError::InvalidConfig(format!(
                "service hours {}..={} must be a non-empty positive range",
                g.min_service_hours, g.max_service_hours
            )));
        }
        if !(0.0..=1.0).contains(&g.close_probability) {
            return Err(SimError::InvalidConfig(format!(
                "close probability {} outside [0, 1]",
                g.close_probability
            )));
        }
        if !(g.mean_interarrival_minutes.is_finite() && g.mean_interarrival_minutes > 0.0) {
            return Err(SimError::InvalidConfig(
                "mean inter-arrival time must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn categories(&self) -> usize {
        self.cars.len()
    }

    pub fn price_table(&self) -> PriceTable {
        PriceTable::new(self.cars.iter().map(|c| c.price).collect())
    }

    /// Opening time on `date`: the simulation start instant.
    pub fn opening_time(&self, date: NaiveDate) -> SimResult<SimTime> {
        date.and_hms_opt(self.hours.open, 0, 0).ok_or_else(|| {
            SimError::InvalidConfig(format!("opening hour {} is not a valid time", self.hours.open))
        })
    }
}

/// Price per interest category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTable {
    prices: Vec<u64>,
}

impl PriceTable {
    pub fn new(prices: Vec<u64>) -> Self {
        Self { prices }
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn price(&self, interest: Interest) -> SimResult<u64> {
        self.prices
            .get(interest)
            .copied()
            .ok_or(SimError::UnpricedInterest { interest })
    }
}
