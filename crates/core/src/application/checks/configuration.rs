// configuration - settings sanity before anything touches the backend

use async_trait::async_trait;

use crate::application::pipeline::{Check, CheckEnv, CheckOutcome};
use crate::error::Result;

/// Symbols present and well-formed, probe window non-zero
pub struct ConfigurationCheck;

#[async_trait]
impl Check for ConfigurationCheck {
    async fn run(&self, env: &CheckEnv) -> Result<CheckOutcome> {
        let settings = env.settings();
        settings.validate()?;

        Ok(CheckOutcome::pass(format!(
            "{} symbol(s) [{}], probe window {}ms",
            settings.symbols.len(),
            settings.symbols.join(", "),
            settings.probe_timeout.as_millis()
        ))
        .with_metric("symbols", settings.symbols.len() as f64))
    }
}
