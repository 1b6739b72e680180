// Grader - pass ratio and three-tier verdict

use super::check::CheckResult;
use serde::{Deserialize, Serialize};

/// Ratio at or above which a non-perfect run is still usable
pub const DEGRADED_THRESHOLD: f64 = 0.75;

/// Overall verdict of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Healthy,
    Degraded,
    Critical,
}

impl Verdict {
    /// Thresholds are evaluated top-down: 1.0, then >= 0.75, then everything else.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 1.0 {
            Verdict::Healthy
        } else if ratio >= DEGRADED_THRESHOLD {
            Verdict::Degraded
        } else {
            Verdict::Critical
        }
    }

    /// Process exit code used as the deployment gate signal
    pub fn exit_code(self) -> u8 {
        match self {
            Verdict::Healthy => 0,
            Verdict::Degraded => 1,
            Verdict::Critical => 2,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Healthy => write!(f, "HEALTHY"),
            Verdict::Degraded => write!(f, "DEGRADED"),
            Verdict::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Summary numbers derived from a result list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub passed: usize,
    pub total: usize,
    pub ratio: f64,
    pub verdict: Verdict,
}

/// Grade a completed run.
///
/// SKIPPED counts as not passed but stays in the denominator.
/// An empty run has verified nothing and grades CRITICAL.
pub fn grade(results: &[CheckResult]) -> Grade {
    let total = results.len();
    let passed = results.iter().filter(|r| r.status.is_pass()).count();
    let ratio = if total == 0 {
        0.0
    } else {
        passed as f64 / total as f64
    };

    Grade {
        passed,
        total,
        ratio,
        verdict: Verdict::from_ratio(ratio),
    }
}
