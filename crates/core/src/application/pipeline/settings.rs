// Pipeline settings - the slice of configuration checks are allowed to see

use std::time::Duration;

use crate::application::constants::DEFAULT_PROBE_TIMEOUT;
use crate::domain::error::{DomainError, Result};

/// Built once at startup and shared read-only with every check
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub symbols: Vec<String>,
    pub probe_timeout: Duration,
}

impl PipelineSettings {
    pub fn new(symbols: Vec<String>, probe_timeout: Duration) -> Self {
        Self {
            symbols,
            probe_timeout,
        }
    }

    /// Check the settings are usable for a run
    ///
    /// # Errors
    /// `DomainError::ValidationError` naming the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.symbols.is_empty() {
            return Err(DomainError::ValidationError(
                "no symbols configured".to_string(),
            ));
        }
        for symbol in &self.symbols {
            if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(DomainError::ValidationError(format!(
                    "invalid symbol {:?}: expected ASCII alphanumeric",
                    symbol
                )));
            }
        }
        if self.probe_timeout.is_zero() {
            return Err(DomainError::ValidationError(
                "probe timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            symbols: vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()],
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}
