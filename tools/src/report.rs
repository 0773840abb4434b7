//! Plain-text run report.

use dealer_core::{snapshot::RunSnapshot, types::Minutes};
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaitStats {
    pub mean:    f64,
    pub median:  f64,
    /// Sample standard deviation; `None` with fewer than two waits.
    pub std_dev: Option<f64>,
}

impl WaitStats {
    pub fn from_waits(waits: &[Minutes]) -> Option<Self> {
        if waits.is_empty() {
            return None;
        }
        let n = waits.len() as f64;
        let mean = waits.iter().sum::<f64>() / n;

        let mut sorted = waits.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        let std_dev = (waits.len() > 1).then(|| {
            let ss: f64 = waits.iter().map(|w| (w - mean).powi(2)).sum();
            (ss / (n - 1.0)).sqrt()
        });

        Some(Self { mean, median, std_dev })
    }
}

/// `$1,234,567.00`.
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}.00")
}

/// Four significant digits, fixed notation, trailing zeros dropped but at
/// least one digit after the point: `52.5`, `123.5`, `0.01234`.
pub fn sig4(x: f64) -> String {
    if x == 0.0 || !x.is_finite() {
        return format!("{x:.1}");
    }
    let magnitude = x.abs().log10().floor() as i32;
    let decimals = (3 - magnitude).max(1) as usize;
    let mut s = format!("{x:.decimals$}");
    while s.ends_with('0') && !s.ends_with(".0") {
        s.pop();
    }
    s
}

pub fn render(snapshot: &RunSnapshot) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{:<9}{:<9}{:<9}", "MEAN", "MED", "SD");
    match WaitStats::from_waits(&snapshot.waits) {
        Some(stats) => {
            let sd = stats
                .std_dev
                .map(sig4)
                .unwrap_or_else(|| "-".into());
            let _ = writeln!(
                out,
                "{:<9}{:<9}{:<9}",
                sig4(stats.mean),
                sig4(stats.median),
                sd
            );
        }
        None => {
            let _ = writeln!(out, "{:<9}{:<9}{:<9}", "-", "-", "-");
        }
    }

    let _ = writeln!(
        out,
        "\n{:<9}{:>6}{:>18}{:>18}{:>18}",
        "ID", "DEALS", "REVENUE", "COMMISSION", "BONUS"
    );
    for a in &snapshot.agents {
        let _ = writeln!(
            out,
            "{:<9}{:>6}{:>18}{:>18}{:>18}",
            a.agent_id,
            a.closes,
            format_currency(a.revenue),
            format_currency(a.commission),
            format_currency(a.bonus_pay),
        );
    }
    out
}
