//! Line-oriented JSON feed for an external display panel.
//!
//! One command per input line, one state object per output line:
//!   {"type":"get_state"}
//!   {"type":"step","count":10}
//!   {"type":"quit"}

use crate::report::WaitStats;
use anyhow::Result;
use dealer_core::{customer::CustomerRecord, engine::SalesEngine, snapshot::AgentSummary};
use std::io::{BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum FeedCommand {
    GetState,
    Step { count: usize },
    Quit,
}

#[derive(serde::Serialize)]
struct PanelState {
    run_id:    String,
    served:    u64,
    remaining: usize,
    last_wait: Option<f64>,
    waits:     Option<WaitStats>,
    agents:    Vec<AgentSummary>,
}

/// Serve the feed until `quit` or EOF. Customers are released to the
/// engine as `step` commands ask for them. A customer the engine rejects
/// is reported as an error line and skipped; the step carries on.
pub fn run_feed<R: BufRead, W: Write>(
    engine: &mut SalesEngine,
    customers: &[CustomerRecord],
    mut input: R,
    mut output: W,
) -> Result<()> {
    let mut cursor: usize = 0;
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = input.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: FeedCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(output, "{}", err_json)?;
                output.flush()?;
                continue;
            }
        };

        match cmd {
            FeedCommand::Quit => break,
            FeedCommand::GetState => {}
            FeedCommand::Step { count } => {
                let end = cursor.saturating_add(count).min(customers.len());
                while cursor < end {
                    let customer = &customers[cursor];
                    cursor += 1;
                    if let Err(e) = engine.process(customer) {
                        log::warn!("feed: skipping customer {cursor}: {e}");
                        let err_json = serde_json::json!({
                            "error":    e.to_string(),
                            "customer": cursor,
                        });
                        writeln!(output, "{}", err_json)?;
                    }
                }
            }
        }

        let state = panel_state(engine, customers.len() - cursor);
        writeln!(output, "{}", serde_json::to_string(&state)?)?;
        output.flush()?;
    }
    Ok(())
}

fn panel_state(engine: &SalesEngine, remaining: usize) -> PanelState {
    let snapshot = engine.snapshot();
    PanelState {
        run_id: snapshot.run_id,
        served: snapshot.customers_served,
        remaining,
        last_wait: snapshot.waits.last().copied(),
        waits: WaitStats::from_waits(&snapshot.waits),
        agents: snapshot.agents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use dealer_core::{agent::AgentRecord, config::DealerConfig};

    fn fixture() -> (SalesEngine, Vec<CustomerRecord>) {
        let start = NaiveDate::from_ymd_opt(2024, 3, 4)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap();
        let agents = vec![AgentRecord {
            agent_id: "345232".into(),
            expertise: vec![1, 2, 3, 0],
            service_time: 4.0,
            rating: 0.4,
        }];
        let customers = (0..5)
            .map(|i| CustomerRecord {
                arrival_time: start + Duration::hours(i),
                interest: 0,
                sale_closed: true,
            })
            .collect();
        let engine =
            SalesEngine::new("feed-test".into(), &DealerConfig::default_test(), &agents, start)
                .unwrap();
        (engine, customers)
    }

    fn lines(out: Vec<u8>) -> Vec<serde_json::Value> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn step_advances_and_reports_state() {
        let (mut engine, customers) = fixture();
        let input = "{\"type\":\"get_state\"}\n{\"type\":\"step\",\"count\":3}\n{\"type\":\"quit\"}\n";
        let mut out = Vec::new();
        run_feed(&mut engine, &customers, input.as_bytes(), &mut out).unwrap();

        let states = lines(out);
        assert_eq!(states.len(), 2);
        assert_eq!(states[0]["served"], 0);
        assert_eq!(states[1]["served"], 3);
        assert_eq!(states[1]["remaining"], 2);
        assert_eq!(states[1]["agents"][0]["closes"], 3);
    }

    #[test]
    fn step_past_end_is_clamped() {
        let (mut engine, customers) = fixture();
        let input = "{\"type\":\"step\",\"count\":50}\n";
        let mut out = Vec::new();
        run_feed(&mut engine, &customers, input.as_bytes(), &mut out).unwrap();
        assert_eq!(lines(out)[0]["remaining"], 0);
        assert_eq!(engine.customers_served(), 5);
    }

    #[test]
    fn huge_step_after_progress_is_clamped() {
        let (mut engine, customers) = fixture();
        let input = format!(
            "{{\"type\":\"step\",\"count\":1}}\n{{\"type\":\"step\",\"count\":{}}}\n",
            usize::MAX
        );
        let mut out = Vec::new();
        run_feed(&mut engine, &customers, input.as_bytes(), &mut out).unwrap();

        let states = lines(out);
        assert_eq!(states.len(), 2);
        assert_eq!(states[0]["served"], 1);
        assert_eq!(states[1]["served"], 5);
        assert_eq!(states[1]["remaining"], 0);
    }

    #[test]
    fn rejected_customer_is_skipped_and_feed_keeps_serving() {
        let (mut engine, mut customers) = fixture();
        customers[1].interest = 9;
        let input = "{\"type\":\"step\",\"count\":3}\n{\"type\":\"step\",\"count\":1}\n{\"type\":\"get_state\"}\n";
        let mut out = Vec::new();
        run_feed(&mut engine, &customers, input.as_bytes(), &mut out).unwrap();

        let states = lines(out);
        assert_eq!(states.len(), 4);
        assert!(states[0]["error"].as_str().unwrap().contains("Interest 9"));
        assert_eq!(states[0]["customer"], 2);
        assert_eq!(states[1]["served"], 2);
        assert_eq!(states[1]["remaining"], 2);
        // The next step resumes after the skipped customer.
        assert_eq!(states[2]["served"], 3);
        assert_eq!(states[3]["remaining"], 1);
        assert_eq!(engine.customers_served(), 3);
    }

    #[test]
    fn malformed_line_reports_error_and_continues() {
        let (mut engine, customers) = fixture();
        let input = "not json\n{\"type\":\"get_state\"}\n";
        let mut out = Vec::new();
        run_feed(&mut engine, &customers, input.as_bytes(), &mut out).unwrap();

        let states = lines(out);
        assert_eq!(states.len(), 2);
        assert!(states[0]["error"].is_string());
        assert_eq!(states[1]["served"], 0);
    }
}
