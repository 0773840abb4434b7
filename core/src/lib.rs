//! Car-sales call center simulation core.
//!
//! Routes customer calls to agents, tracks each agent's sales and weekly
//! bonus, and records every change in an event log. Input data comes from
//! the caller; the core performs no I/O beyond loading its config file.

pub mod agent;
pub mod bonus;
pub mod config;
pub mod customer;
pub mod engine;
pub mod error;
pub mod event;
pub mod roster;
pub mod snapshot;
pub mod types;
