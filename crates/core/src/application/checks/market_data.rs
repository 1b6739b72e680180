// market_data_stream - the only check with real concurrency

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::pipeline::{Check, CheckEnv, CheckOutcome};
use crate::application::probe::{ProbeHarness, ProbeSession};
use crate::error::Result;

/// Probes the live stream for the configured window and counts events
pub struct MarketDataCheck;

#[async_trait]
impl Check for MarketDataCheck {
    async fn run(&self, env: &CheckEnv) -> Result<CheckOutcome> {
        let context = env.context()?;
        let timeout = env.settings().probe_timeout;

        let harness = ProbeHarness::new(Arc::clone(context.backend()));
        let outcome = harness
            .probe(ProbeSession::new(context.symbols.clone(), timeout))
            .await;

        let window = format!("{}ms", outcome.elapsed.as_millis());
        let result = if outcome.observed == 0 {
            let mut detail = format!("no data observed within {}", window);
            if let Some(fault) = &outcome.stream_fault {
                detail.push_str(&format!(" (stream fault: {})", fault));
            }
            CheckOutcome::fail(detail)
        } else {
            CheckOutcome::pass(format!(
                "{} event(s) in {} ({:.1}/s)",
                outcome.observed,
                window,
                outcome.events_per_sec()
            ))
        };

        Ok(result
            .with_metric("events", outcome.observed as f64)
            .with_metric("events_per_sec", outcome.events_per_sec()))
    }
}
