// exchange_connection - lightweight reachability

use async_trait::async_trait;

use crate::application::pipeline::{Check, CheckEnv, CheckOutcome};
use crate::error::Result;

pub struct ConnectivityCheck;

#[async_trait]
impl Check for ConnectivityCheck {
    async fn run(&self, env: &CheckEnv) -> Result<CheckOutcome> {
        if env.backend().test_connection().await {
            Ok(CheckOutcome::pass("endpoint reachable"))
        } else {
            Ok(CheckOutcome::fail("endpoint unreachable"))
        }
    }
}
