// Check Result Domain Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named numeric observations attached to a result (e.g. `events`).
///
/// BTreeMap keeps serialization order stable across runs.
pub type CheckMetrics = BTreeMap<String, f64>;

/// Status of a single check in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    Pass,
    Fail,
    /// Never produced by a check; synthesized by the executor after a gating failure
    Skipped,
}

impl CheckStatus {
    pub fn is_pass(self) -> bool {
        self == CheckStatus::Pass
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "PASS"),
            CheckStatus::Fail => write!(f, "FAIL"),
            CheckStatus::Skipped => write!(f, "SKIPPED"),
        }
    }
}

/// Result of one registered check. Exactly one per check per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    /// 1-based registration position
    pub ordinal: usize,
    pub gating: bool,
    pub status: CheckStatus,
    pub detail: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metrics: CheckMetrics,
    pub elapsed_ms: u64,
}

impl CheckResult {
    pub fn pass(name: impl Into<String>, ordinal: usize, detail: impl Into<String>) -> Self {
        Self::new(name, ordinal, CheckStatus::Pass, detail)
    }

    pub fn fail(name: impl Into<String>, ordinal: usize, detail: impl Into<String>) -> Self {
        Self::new(name, ordinal, CheckStatus::Fail, detail)
    }

    /// Placeholder for a check that never ran because `gate` failed first
    pub fn skipped(name: impl Into<String>, ordinal: usize, gate: &str) -> Self {
        Self::new(
            name,
            ordinal,
            CheckStatus::Skipped,
            format!("skipped: gating check '{}' failed", gate),
        )
    }

    fn new(
        name: impl Into<String>,
        ordinal: usize,
        status: CheckStatus,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ordinal,
            gating: false,
            status,
            detail: detail.into(),
            metrics: CheckMetrics::new(),
            elapsed_ms: 0,
        }
    }

    pub fn with_gating(mut self, gating: bool) -> Self {
        self.gating = gating;
        self
    }

    pub fn with_metrics(mut self, metrics: CheckMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_elapsed_ms(mut self, elapsed_ms: u64) -> Self {
        self.elapsed_ms = elapsed_ms;
        self
    }

    pub fn metric(&self, key: &str) -> Option<f64> {
        self.metrics.get(key).copied()
    }
}
