// Mock TradingBackend
// Deterministic stand-in for the live trading engine: fixed-rate seeded stream,
// pure signal rule, and fault injection for every capability.
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info};

use crate::ticker::TickGenerator;
use preflight_core::domain::{Side, Signal, Tick};
use preflight_core::port::{BackendError, CancelToken, TickCallback, TradingBackend};

/// How the mock event stream behaves
#[derive(Debug, Clone, PartialEq)]
pub enum MockStream {
    /// One tick per interval until cancelled
    Rate(Duration),
    /// Connected but never emits
    Silent,
    /// Fails as soon as it is opened
    Fault(String),
}

/// Everything the mock can be told to do
#[derive(Debug, Clone)]
pub struct MockScenario {
    pub balance: f64,
    pub max_positions: u32,
    pub max_daily_loss: f64,
    pub reachable: bool,
    pub init_fault: Option<String>,
    pub stream: MockStream,
    /// Price the random walk starts from and the signal rule compares to
    pub reference_price: f64,
    /// Relative distance from the reference that triggers a signal
    pub signal_band: f64,
    pub tick_fault: Option<String>,
    pub seed: u64,
}

impl Default for MockScenario {
    fn default() -> Self {
        Self {
            balance: 10_000.0,
            max_positions: 5,
            max_daily_loss: 500.0,
            reachable: true,
            init_fault: None,
            stream: MockStream::Rate(Duration::from_millis(100)),
            reference_price: 100.0,
            signal_band: 0.02,
            tick_fault: None,
            seed: 42,
        }
    }
}

impl MockScenario {
    pub fn with_stream(mut self, stream: MockStream) -> Self {
        self.stream = stream;
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.reachable = false;
        self
    }

    pub fn failing_initialize(mut self, message: impl Into<String>) -> Self {
        self.init_fault = Some(message.into());
        self
    }

    pub fn failing_signals(mut self, message: impl Into<String>) -> Self {
        self.tick_fault = Some(message.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Mock TradingBackend
pub struct MockBackend {
    scenario: MockScenario,
    initialized: AtomicBool,
}

impl MockBackend {
    /// Create a mock backend
    ///
    /// # Example
    /// ```ignore
    /// let backend = MockBackend::new(MockScenario::default().unreachable());
    /// ```
    pub fn new(scenario: MockScenario) -> Self {
        Self {
            scenario,
            initialized: AtomicBool::new(false),
        }
    }

    fn ensure_initialized(&self) -> Result<(), BackendError> {
        if self.initialized.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(BackendError::NotInitialized)
        }
    }

    async fn stream_at_rate(
        &self,
        symbols: Vec<String>,
        interval: Duration,
        on_event: TickCallback,
        mut cancel: CancelToken,
    ) -> Result<(), BackendError> {
        let mut ticks = TickGenerator::new(
            symbols,
            self.scenario.reference_price,
            interval.as_millis() as i64,
            self.scenario.seed,
        );
        let mut emitted = 0u64;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(interval) => {}
            }
            // Re-check after waking: no callback once cancellation fired
            if cancel.is_cancelled() {
                break;
            }
            let Some(tick) = ticks.next_tick() else {
                cancel.cancelled().await;
                break;
            };
            on_event(tick);
            emitted += 1;
        }

        debug!(emitted = emitted, "Mock stream stopped");
        Ok(())
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(MockScenario::default())
    }
}

#[async_trait]
impl TradingBackend for MockBackend {
    async fn initialize(&self) -> Result<f64, BackendError> {
        if let Some(msg) = &self.scenario.init_fault {
            return Err(BackendError::Connection(msg.clone()));
        }
        self.initialized.store(true, Ordering::Release);
        info!(balance = %self.scenario.balance, "Mock backend initialized");
        Ok(self.scenario.balance)
    }

    async fn test_connection(&self) -> bool {
        self.scenario.reachable
    }

    async fn subscribe(
        &self,
        symbols: Vec<String>,
        on_event: TickCallback,
        mut cancel: CancelToken,
    ) -> Result<(), BackendError> {
        debug!(symbols = ?symbols, stream = ?self.scenario.stream, "Mock subscription opened");
        match &self.scenario.stream {
            MockStream::Fault(msg) => Err(BackendError::Connection(msg.clone())),
            MockStream::Silent => {
                cancel.cancelled().await;
                Ok(())
            }
            MockStream::Rate(interval) => {
                self.stream_at_rate(symbols, *interval, on_event, cancel).await
            }
        }
    }

    async fn process_tick(&self, tick: &Tick) -> Result<Option<Signal>, BackendError> {
        if let Some(msg) = &self.scenario.tick_fault {
            return Err(BackendError::Fault(msg.clone()));
        }

        let reference = self.scenario.reference_price;
        let band = self.scenario.signal_band;
        let deviation = (tick.price - reference) / reference;
        let side = if deviation <= -band {
            Side::Buy
        } else if deviation >= band {
            Side::Sell
        } else {
            return Ok(None);
        };

        Ok(Some(Signal {
            symbol: tick.symbol.clone(),
            side,
            price: tick.price,
            strength: (deviation.abs() / (band * 5.0)).min(1.0),
        }))
    }

    async fn can_open_position(
        &self,
        amount: f64,
        open_positions: u32,
    ) -> Result<bool, BackendError> {
        self.ensure_initialized()?;
        Ok(amount > 0.0
            && amount <= self.scenario.balance
            && open_positions < self.scenario.max_positions)
    }

    fn current_balance(&self) -> f64 {
        self.scenario.balance
    }

    fn max_positions(&self) -> u32 {
        self.scenario.max_positions
    }

    fn max_daily_loss(&self) -> f64 {
        self.scenario.max_daily_loss
    }
}
