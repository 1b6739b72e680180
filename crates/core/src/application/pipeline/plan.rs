// Check registration: definitions, plan and the per-check environment

use async_trait::async_trait;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use super::settings::PipelineSettings;
use crate::domain::error::{DomainError, Result as DomainResult};
use crate::domain::CheckMetrics;
use crate::error::{AppError, Result};
use crate::port::TradingBackend;

/// Live handle to the backend under test, established by system initialization
///
/// Shared read-only with every later check.
#[derive(Clone)]
pub struct RunContext {
    backend: Arc<dyn TradingBackend>,
    pub balance: f64,
    pub symbols: Vec<String>,
    pub max_positions: u32,
    pub max_daily_loss: f64,
}

impl RunContext {
    pub fn new(
        backend: Arc<dyn TradingBackend>,
        balance: f64,
        symbols: Vec<String>,
        max_positions: u32,
        max_daily_loss: f64,
    ) -> Self {
        Self {
            backend,
            balance,
            symbols,
            max_positions,
            max_daily_loss,
        }
    }

    pub fn backend(&self) -> &Arc<dyn TradingBackend> {
        &self.backend
    }
}

impl std::fmt::Debug for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("balance", &self.balance)
            .field("symbols", &self.symbols)
            .field("max_positions", &self.max_positions)
            .field("max_daily_loss", &self.max_daily_loss)
            .finish_non_exhaustive()
    }
}

/// What a check hands back to the executor on normal completion
#[derive(Debug)]
pub struct CheckOutcome {
    pub(crate) passed: bool,
    pub(crate) detail: String,
    pub(crate) metrics: CheckMetrics,
    pub(crate) context: Option<RunContext>,
}

impl CheckOutcome {
    pub fn pass(detail: impl Into<String>) -> Self {
        Self::new(true, detail)
    }

    /// Semantic failure (e.g. "no data observed"); not an error
    pub fn fail(detail: impl Into<String>) -> Self {
        Self::new(false, detail)
    }

    fn new(passed: bool, detail: impl Into<String>) -> Self {
        Self {
            passed,
            detail: detail.into(),
            metrics: CheckMetrics::new(),
            context: None,
        }
    }

    pub fn with_metric(mut self, key: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(key.into(), value);
        self
    }

    /// Offer a RunContext to the executor; only kept if the check passed
    pub fn with_context(mut self, context: RunContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Everything a check may look at
#[derive(Clone)]
pub struct CheckEnv {
    backend: Arc<dyn TradingBackend>,
    settings: Arc<PipelineSettings>,
    context: Option<Arc<RunContext>>,
}

impl CheckEnv {
    pub fn new(
        backend: Arc<dyn TradingBackend>,
        settings: Arc<PipelineSettings>,
        context: Option<Arc<RunContext>>,
    ) -> Self {
        Self {
            backend,
            settings,
            context,
        }
    }

    pub fn backend(&self) -> &Arc<dyn TradingBackend> {
        &self.backend
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// The established RunContext
    ///
    /// # Errors
    /// `AppError::MissingContext` if system initialization has not passed yet.
    pub fn context(&self) -> Result<&RunContext> {
        self.context.as_deref().ok_or_else(|| {
            AppError::MissingContext("system initialization has not completed".to_string())
        })
    }
}

/// One unit of verification work
#[async_trait]
pub trait Check: Send + Sync {
    async fn run(&self, env: &CheckEnv) -> Result<CheckOutcome>;
}

/// Adapter turning an async closure into a [`Check`]
pub struct FnCheck<F>(F);

/// Build a check from a closure; handy for ad-hoc plans and tests
pub fn check_fn<F, Fut>(f: F) -> FnCheck<F>
where
    F: Fn(CheckEnv) -> Fut + Send + Sync,
    Fut: Future<Output = Result<CheckOutcome>> + Send,
{
    FnCheck(f)
}

#[async_trait]
impl<F, Fut> Check for FnCheck<F>
where
    F: Fn(CheckEnv) -> Fut + Send + Sync,
    Fut: Future<Output = Result<CheckOutcome>> + Send,
{
    async fn run(&self, env: &CheckEnv) -> Result<CheckOutcome> {
        (self.0)(env.clone()).await
    }
}

/// A registered check. Immutable once registered.
#[derive(Clone)]
pub struct CheckDefinition {
    name: String,
    ordinal: usize,
    gating: bool,
    unit: Arc<dyn Check>,
}

impl CheckDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 1-based registration position
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn gating(&self) -> bool {
        self.gating
    }

    pub(crate) fn unit(&self) -> &Arc<dyn Check> {
        &self.unit
    }
}

impl std::fmt::Debug for CheckDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckDefinition")
            .field("name", &self.name)
            .field("ordinal", &self.ordinal)
            .field("gating", &self.gating)
            .finish_non_exhaustive()
    }
}

/// Ordered registry of checks
#[derive(Default, Clone, Debug)]
pub struct CheckPlan {
    checks: Vec<CheckDefinition>,
    names: HashSet<String>,
}

impl CheckPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a check; returns its ordinal
    ///
    /// # Errors
    /// - `DomainError::InvalidCheckName` for an empty or blank name
    /// - `DomainError::DuplicateCheck` if the name is already registered
    pub fn register(
        &mut self,
        name: impl Into<String>,
        gating: bool,
        unit: impl Check + 'static,
    ) -> DomainResult<usize> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::InvalidCheckName(name));
        }
        if !self.names.insert(name.clone()) {
            return Err(DomainError::DuplicateCheck(name));
        }

        let ordinal = self.checks.len() + 1;
        self.checks.push(CheckDefinition {
            name,
            ordinal,
            gating,
            unit: Arc::new(unit),
        });
        Ok(ordinal)
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(
        mut self,
        name: impl Into<String>,
        gating: bool,
        unit: impl Check + 'static,
    ) -> DomainResult<Self> {
        self.register(name, gating, unit)?;
        Ok(self)
    }

    pub fn checks(&self) -> &[CheckDefinition] {
        &self.checks
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
