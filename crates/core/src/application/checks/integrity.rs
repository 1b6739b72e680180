// state_integrity - nothing earlier in the run disturbed the backend

use async_trait::async_trait;

use crate::application::constants::BALANCE_EPSILON;
use crate::application::pipeline::{Check, CheckEnv, CheckOutcome};
use crate::error::Result;

/// Balance drift is only observable when the backend's balance accessor
/// reads live state rather than a snapshot cached at initialization.
pub struct IntegrityCheck;

#[async_trait]
impl Check for IntegrityCheck {
    async fn run(&self, env: &CheckEnv) -> Result<CheckOutcome> {
        let context = env.context()?;
        let backend = context.backend();

        let balance = backend.current_balance();
        if (balance - context.balance).abs() > BALANCE_EPSILON {
            return Ok(CheckOutcome::fail(format!(
                "balance drifted during run: {:.2} -> {:.2}",
                context.balance, balance
            )));
        }
        if !backend.test_connection().await {
            return Ok(CheckOutcome::fail("endpoint unreachable after run"));
        }

        Ok(CheckOutcome::pass(format!(
            "balance unchanged at {:.2}, endpoint reachable",
            balance
        )))
    }
}
