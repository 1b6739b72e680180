// risk_management - the risk gate predicate says yes and no where it should

use async_trait::async_trait;

use crate::application::constants::{BALANCE_EPSILON, RISK_OVERSIZE_FACTOR, RISK_PROBE_FRACTION};
use crate::application::pipeline::{Check, CheckEnv, CheckOutcome};
use crate::error::Result;

pub struct RiskCheck;

#[async_trait]
impl Check for RiskCheck {
    async fn run(&self, env: &CheckEnv) -> Result<CheckOutcome> {
        let context = env.context()?;
        let backend = context.backend();

        if context.balance <= 0.0 {
            return Ok(CheckOutcome::fail("zero balance, risk gate cannot be exercised"));
        }

        let small = context.balance * RISK_PROBE_FRACTION;
        let oversized = context.balance * RISK_OVERSIZE_FACTOR;
        let before = backend.current_balance();

        if !backend.can_open_position(small, 0).await? {
            return Ok(CheckOutcome::fail(format!(
                "rejected {:.2} with no open positions",
                small
            )));
        }
        if backend
            .can_open_position(small, context.max_positions)
            .await?
        {
            return Ok(CheckOutcome::fail(format!(
                "allowed a position beyond the {} position limit",
                context.max_positions
            )));
        }
        if backend.can_open_position(oversized, 0).await? {
            return Ok(CheckOutcome::fail(format!(
                "allowed {:.2}, more than the balance",
                oversized
            )));
        }

        let after = backend.current_balance();
        if (after - before).abs() > BALANCE_EPSILON {
            return Ok(CheckOutcome::fail(format!(
                "risk predicate mutated balance: {:.2} -> {:.2}",
                before, after
            )));
        }

        Ok(CheckOutcome::pass(format!(
            "gate accepts {:.2}, rejects position #{} and {:.2}",
            small,
            context.max_positions.saturating_add(1),
            oversized
        )))
    }
}
