// system_initialization - establishes the RunContext

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::pipeline::{Check, CheckEnv, CheckOutcome, RunContext};
use crate::error::Result;

/// Calls `initialize()` and snapshots balance and risk limits
pub struct InitializationCheck;

#[async_trait]
impl Check for InitializationCheck {
    async fn run(&self, env: &CheckEnv) -> Result<CheckOutcome> {
        let backend = env.backend();
        let balance = backend.initialize().await?;

        if !balance.is_finite() || balance < 0.0 {
            return Ok(CheckOutcome::fail(format!(
                "initialize() returned invalid balance {}",
                balance
            )));
        }

        let context = RunContext::new(
            Arc::clone(backend),
            balance,
            env.settings().symbols.clone(),
            backend.max_positions(),
            backend.max_daily_loss(),
        );

        Ok(CheckOutcome::pass(format!("initialized, balance {:.2}", balance))
            .with_metric("balance", balance)
            .with_context(context))
    }
}
