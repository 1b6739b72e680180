// signal_generation - deterministic tick sweep through the signal engine

use async_trait::async_trait;

use crate::application::constants::{
    SIGNAL_SWEEP_BASE_PRICE, SIGNAL_SWEEP_OFFSETS, SIGNAL_SWEEP_VOLUME,
};
use crate::application::pipeline::{Check, CheckEnv, CheckOutcome};
use crate::domain::Tick;
use crate::error::Result;

pub struct SignalCheck;

/// Synthetic ticks: every symbol at every sweep offset
fn sweep(symbols: &[String]) -> Vec<Tick> {
    symbols
        .iter()
        .flat_map(|symbol| {
            SIGNAL_SWEEP_OFFSETS
                .iter()
                .enumerate()
                .map(move |(i, offset)| {
                    Tick::new(
                        symbol.clone(),
                        SIGNAL_SWEEP_BASE_PRICE * (1.0 + offset),
                        SIGNAL_SWEEP_VOLUME,
                        i as i64,
                    )
                })
        })
        .collect()
}

#[async_trait]
impl Check for SignalCheck {
    async fn run(&self, env: &CheckEnv) -> Result<CheckOutcome> {
        let context = env.context()?;
        let backend = context.backend();
        let ticks = sweep(&context.symbols);

        let mut signals = 0usize;
        for tick in &ticks {
            let Some(signal) = backend.process_tick(tick).await? else {
                continue;
            };
            if signal.symbol != tick.symbol || !(0.0..=1.0).contains(&signal.strength) {
                return Ok(CheckOutcome::fail(format!(
                    "malformed signal for {} @ {:.2}: {:?}",
                    tick.symbol, tick.price, signal
                )));
            }
            signals += 1;
        }

        Ok(CheckOutcome::pass(format!(
            "processed {} tick(s), {} signal(s)",
            ticks.len(),
            signals
        ))
        .with_metric("ticks", ticks.len() as f64)
        .with_metric("signals", signals as f64))
    }
}
