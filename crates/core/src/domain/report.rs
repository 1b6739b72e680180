// Health Report Domain Model

use super::check::{CheckResult, CheckStatus};
use super::error::{DomainError, Result};
use super::grade::{grade, Verdict};
use super::mode::BackendMode;
use serde::Serialize;

/// Executor state machine
///
/// `NotStarted -> Running(i) -> {Running(i+1) | Aborted | Completed}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    /// Index (0-based) of the check currently executing
    Running(usize),
    Aborted { gate: String },
    Completed,
}

impl RunState {
    /// Move to the next check
    pub fn advance(&mut self) -> Result<()> {
        *self = match self {
            RunState::NotStarted => RunState::Running(0),
            RunState::Running(i) => RunState::Running(*i + 1),
            _ => return Err(self.invalid("RUNNING")),
        };
        Ok(())
    }

    /// A gating check failed
    pub fn abort(&mut self, gate: impl Into<String>) -> Result<()> {
        match self {
            RunState::Running(_) => {
                *self = RunState::Aborted { gate: gate.into() };
                Ok(())
            }
            _ => Err(self.invalid("ABORTED")),
        }
    }

    /// Every check executed. An empty plan completes without running.
    pub fn complete(&mut self) -> Result<()> {
        match self {
            RunState::NotStarted | RunState::Running(_) => {
                *self = RunState::Completed;
                Ok(())
            }
            _ => Err(self.invalid("COMPLETED")),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, RunState::Aborted { .. } | RunState::Completed)
    }

    fn invalid(&self, to: &str) -> DomainError {
        DomainError::InvalidStateTransition {
            from: self.to_string(),
            to: to.to_string(),
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::NotStarted => write!(f, "NOT_STARTED"),
            RunState::Running(i) => write!(f, "RUNNING({})", i),
            RunState::Aborted { .. } => write!(f, "ABORTED"),
            RunState::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// How a finished run ended. Both variants carry a full report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunOutcome {
    Completed,
    Aborted { gate: String },
}

/// Graded, immutable result of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    run_id: String,
    backend: BackendMode,
    started_at: i64,  // epoch ms
    finished_at: i64, // epoch ms
    outcome: RunOutcome,
    results: Vec<CheckResult>,
    passed: usize,
    total: usize,
    ratio: f64,
    verdict: Verdict,
}

impl HealthReport {
    /// Build the report; ratio and verdict are derived here and nowhere else
    pub fn new(
        run_id: impl Into<String>,
        backend: BackendMode,
        started_at: i64,
        finished_at: i64,
        outcome: RunOutcome,
        results: Vec<CheckResult>,
    ) -> Self {
        let g = grade(&results);
        Self {
            run_id: run_id.into(),
            backend,
            started_at,
            finished_at,
            outcome,
            results,
            passed: g.passed,
            total: g.total,
            ratio: g.ratio,
            verdict: g.verdict,
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn backend(&self) -> BackendMode {
        self.backend
    }

    pub fn started_at(&self) -> i64 {
        self.started_at
    }

    pub fn finished_at(&self) -> i64 {
        self.finished_at
    }

    pub fn outcome(&self) -> &RunOutcome {
        &self.outcome
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn result(&self, name: &str) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.name == name)
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn exit_code(&self) -> u8 {
        self.verdict.exit_code()
    }

    pub fn count(&self, status: CheckStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}
