// risk_limits - configured limits are internally consistent

use async_trait::async_trait;

use crate::application::pipeline::{Check, CheckEnv, CheckOutcome};
use crate::error::Result;

pub struct RiskLimitsCheck;

#[async_trait]
impl Check for RiskLimitsCheck {
    async fn run(&self, env: &CheckEnv) -> Result<CheckOutcome> {
        let context = env.context()?;

        if context.max_positions == 0 {
            return Ok(CheckOutcome::fail("max positions is 0"));
        }
        if context.max_daily_loss.is_nan() || context.max_daily_loss <= 0.0 {
            return Ok(CheckOutcome::fail(format!(
                "max daily loss must be positive, got {}",
                context.max_daily_loss
            )));
        }
        if context.max_daily_loss > context.balance {
            return Ok(CheckOutcome::fail(format!(
                "max daily loss {:.2} exceeds balance {:.2}",
                context.max_daily_loss, context.balance
            )));
        }

        Ok(CheckOutcome::pass(format!(
            "max {} position(s), daily loss cap {:.2}",
            context.max_positions, context.max_daily_loss
        ))
        .with_metric("max_positions", context.max_positions as f64)
        .with_metric("max_daily_loss", context.max_daily_loss))
    }
}
