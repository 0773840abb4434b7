//! sales-runner: headless runner for the car-sales call center simulation.
//!
//! Usage:
//!   sales-runner report  --seed 0 --agents 5 --customers 100 --data-dir ./data
//!   sales-runner report  --json
//!   sales-runner display --seed 0          (JSON feed on stdin/stdout)
//!
//! Input records are generated from the seed unless --agents-file /
//! --customers-file point at JSON arrays of records.

mod display;
mod generator;
mod report;
mod rng;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use dealer_core::{
    agent::AgentRecord, config::DealerConfig, customer::CustomerRecord, engine::SalesEngine,
};
use rng::{SimRng, Stream};
use serde::de::DeserializeOwned;
use std::env;
use std::io;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    // With no mode given we print the report. The display mode is a stdin
    // feed and would sit waiting for commands.
    let mode = args
        .get(1)
        .filter(|a| !a.starts_with("--"))
        .map(String::as_str)
        .unwrap_or("report");
    let data_dir = flag_value(&args, "--data-dir").unwrap_or("./data");
    let config = DealerConfig::load(data_dir)?;

    let seed = parse_arg(&args, "--seed", 0u64);
    let n_agents = parse_arg(&args, "--agents", config.generation.agents);
    let n_customers = parse_arg(&args, "--customers", config.generation.customers);
    let as_json = args.iter().any(|a| a == "--json");

    let date = match flag_value(&args, "--start") {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("--start expects YYYY-MM-DD, got {s}"))?,
        None => chrono::Local::now().date_naive(),
    };
    let start = config.opening_time(date)?;

    let agents: Vec<AgentRecord> = match flag_value(&args, "--agents-file") {
        Some(path) => read_json(path)?,
        None => generator::generate_agents(
            &mut SimRng::for_stream(seed, Stream::Agents),
            n_agents,
            &config,
        )?,
    };
    let customers: Vec<CustomerRecord> = match flag_value(&args, "--customers-file") {
        Some(path) => read_json(path)?,
        None => generator::generate_customers(
            &mut SimRng::for_stream(seed, Stream::Customers),
            n_customers,
            start,
            &config,
        ),
    };

    let run_id = format!("run-{seed}-{date}");
    let mut engine = SalesEngine::new(run_id, &config, &agents, start)?;

    match mode {
        "display" => {
            let stdin = io::stdin();
            display::run_feed(&mut engine, &customers, stdin.lock(), io::stdout())?;
        }
        "report" => {
            engine.run(&customers)?;
            let snapshot = engine.snapshot();
            if as_json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", report::render(&snapshot));
            }
        }
        other => anyhow::bail!("unknown mode '{other}' (expected 'report' or 'display')"),
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Cannot read {path}"))?;
    serde_json::from_str(&content).with_context(|| format!("Cannot parse {path}"))
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
