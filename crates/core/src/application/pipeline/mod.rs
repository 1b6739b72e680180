// Pipeline Executor - sequential, fault-isolated check runner

mod isolation;
mod plan;
mod settings;

pub use isolation::{panic_message, run_isolated, Isolated};
pub use plan::{check_fn, Check, CheckDefinition, CheckEnv, CheckOutcome, CheckPlan, RunContext};
pub use settings::PipelineSettings;

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::domain::{BackendMode, CheckResult, CheckStatus, HealthReport, RunOutcome, RunState};
use crate::port::{IdProvider, TimeProvider, TradingBackend};

/// Runs a [`CheckPlan`] against one backend and grades the result
///
/// Checks run strictly one after another in registration order. A gating
/// FAIL stops the run and every remaining check is reported as SKIPPED, so
/// the report always has one entry per registered check.
pub struct PipelineExecutor {
    mode: BackendMode,
    backend: Arc<dyn TradingBackend>,
    settings: Arc<PipelineSettings>,
    time_provider: Arc<dyn TimeProvider>,
    id_provider: Arc<dyn IdProvider>,
}

impl PipelineExecutor {
    /// Create an executor bound to the backend chosen by the mode switch
    pub fn new(
        mode: BackendMode,
        backend: Arc<dyn TradingBackend>,
        settings: PipelineSettings,
        time_provider: Arc<dyn TimeProvider>,
        id_provider: Arc<dyn IdProvider>,
    ) -> Self {
        Self {
            mode,
            backend,
            settings: Arc::new(settings),
            time_provider,
            id_provider,
        }
    }

    pub fn mode(&self) -> BackendMode {
        self.mode
    }

    /// Execute every check in `plan` and produce the graded report
    ///
    /// Never fails: check errors and panics become FAIL results, and an
    /// aborted run is still a finished report.
    pub async fn run(&self, plan: &CheckPlan) -> HealthReport {
        let run_id = self.id_provider.generate_id();
        let started_at = self.time_provider.now_millis();
        let checks = plan.checks();

        info!(
            run_id = %run_id,
            backend = %self.mode,
            checks = checks.len(),
            "Pipeline run started"
        );

        let mut state = RunState::NotStarted;
        let mut context: Option<Arc<RunContext>> = None;
        let mut results = Vec::with_capacity(checks.len());

        for (index, definition) in checks.iter().enumerate() {
            self.transition(&mut state, RunState::advance);
            debug!(state = %state, check = %definition.name(), "Executing check");

            let env = CheckEnv::new(
                Arc::clone(&self.backend),
                Arc::clone(&self.settings),
                context.clone(),
            );
            let (result, established) = self.execute_check(definition, env).await;

            if let Some(established) = established {
                if context.is_none() {
                    info!(check = %definition.name(), "Run context established");
                    context = Some(Arc::new(established));
                }
            }

            let gate_failed = definition.gating() && result.status == CheckStatus::Fail;
            results.push(result);

            if gate_failed {
                let gate = definition.name().to_string();
                self.transition(&mut state, |s| s.abort(gate.clone()));
                warn!(
                    gate = %gate,
                    skipped = checks.len() - index - 1,
                    "Gating check failed, skipping remaining checks"
                );
                results.extend(checks[index + 1..].iter().map(|rest| {
                    CheckResult::skipped(rest.name(), rest.ordinal(), &gate)
                        .with_gating(rest.gating())
                }));
                break;
            }
        }

        if !state.is_finished() {
            self.transition(&mut state, RunState::complete);
        }

        let outcome = match state {
            RunState::Aborted { gate } => RunOutcome::Aborted { gate },
            _ => RunOutcome::Completed,
        };
        let finished_at = self.time_provider.now_millis();
        let report = HealthReport::new(
            run_id,
            self.mode,
            started_at,
            finished_at,
            outcome,
            results,
        );

        info!(
            run_id = %report.run_id(),
            passed = report.passed(),
            total = report.total(),
            ratio = report.ratio(),
            verdict = %report.verdict(),
            "Pipeline run finished"
        );
        report
    }

    /// Run a single check inside its error boundary
    ///
    /// Returns the result plus the RunContext the check offered, if it passed.
    async fn execute_check(
        &self,
        definition: &CheckDefinition,
        env: CheckEnv,
    ) -> (CheckResult, Option<RunContext>) {
        let name = definition.name();
        let ordinal = definition.ordinal();
        let unit = Arc::clone(definition.unit());
        let start = Instant::now();

        let isolated = run_isolated(async move { unit.run(&env).await }).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let (result, established) = match isolated {
            Isolated::Completed(Ok(outcome)) => {
                let status = if outcome.passed {
                    CheckStatus::Pass
                } else {
                    CheckStatus::Fail
                };
                let established = if outcome.passed {
                    outcome.context
                } else {
                    None
                };
                let result = match status {
                    CheckStatus::Pass => CheckResult::pass(name, ordinal, outcome.detail),
                    _ => CheckResult::fail(name, ordinal, outcome.detail),
                }
                .with_metrics(outcome.metrics);
                (result, established)
            }
            Isolated::Completed(Err(e)) => (CheckResult::fail(name, ordinal, e.to_string()), None),
            Isolated::Panicked(msg) => (
                CheckResult::fail(name, ordinal, format!("check panicked: {}", msg)),
                None,
            ),
            Isolated::Cancelled => (
                CheckResult::fail(name, ordinal, "check task was cancelled"),
                None,
            ),
        };
        let result = result
            .with_gating(definition.gating())
            .with_elapsed_ms(elapsed_ms);

        match result.status {
            CheckStatus::Pass => info!(
                check = %name,
                ordinal = ordinal,
                gating = definition.gating(),
                elapsed_ms = elapsed_ms,
                "PASS: {}", result.detail
            ),
            _ => warn!(
                check = %name,
                ordinal = ordinal,
                gating = definition.gating(),
                elapsed_ms = elapsed_ms,
                "FAIL: {}", result.detail
            ),
        }

        (result, established)
    }

    fn transition<F>(&self, state: &mut RunState, step: F)
    where
        F: FnOnce(&mut RunState) -> crate::domain::error::Result<()>,
    {
        if let Err(e) = step(state) {
            error!(error = %e, "Run state machine rejected transition");
        }
    }
}
