//! Shared primitive types used across the entire simulation.

use chrono::NaiveDateTime;

/// An instant on the simulation calendar.
pub type SimTime = NaiveDateTime;

/// A span between two instants.
pub type SimDuration = chrono::Duration;

/// Index of a car category. Also indexes agent scores and the price table.
pub type Interest = usize;

/// Customer wait time, in minutes.
pub type Minutes = f64;

/// Opaque agent identifier, supplied by the caller.
pub type AgentId = String;

/// The canonical run identifier.
pub type RunId = String;

/// Minutes between `from` and `to`, at second resolution.
pub fn minutes_between(from: SimTime, to: SimTime) -> Minutes {
    (to - from).num_seconds() as f64 / 60.0
}
