// Hand-rolled backend for unit tests that need a real stream
// (mockall covers call-expectation tests; this covers timing)

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{Side, Signal, Tick};
use crate::port::{BackendError, CancelToken, TickCallback, TradingBackend};

#[derive(Clone, Debug)]
pub enum StubStream {
    /// One tick every interval until cancelled
    Rate(Duration),
    /// Never emits; waits for cancellation
    Silent,
    /// Fails immediately
    Fault(String),
    /// Ignores the cancel token and keeps calling back
    Rogue(Duration),
}

pub struct StubBackend {
    pub balance: f64,
    pub init_error: Option<BackendError>,
    pub reachable: bool,
    pub stream: StubStream,
    pub max_positions: u32,
    pub max_daily_loss: f64,
    pub tick_error: Option<BackendError>,
    /// Ticks delivered to callbacks, including ones the session ignored
    pub delivered: Arc<AtomicU64>,
}

impl Default for StubBackend {
    fn default() -> Self {
        Self {
            balance: 10_000.0,
            init_error: None,
            reachable: true,
            stream: StubStream::Rate(Duration::from_millis(10)),
            max_positions: 5,
            max_daily_loss: 500.0,
            tick_error: None,
            delivered: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl StubBackend {
    pub fn shared(self) -> Arc<dyn TradingBackend> {
        Arc::new(self)
    }

    fn emit(&self, on_event: &TickCallback, symbols: &[String], seq: u64) {
        let symbol = symbols
            .get(seq as usize % symbols.len().max(1))
            .cloned()
            .unwrap_or_default();
        self.delivered.fetch_add(1, Ordering::SeqCst);
        on_event(Tick::new(symbol, 100.0, 1.0, seq as i64));
    }
}

#[async_trait]
impl TradingBackend for StubBackend {
    async fn initialize(&self) -> Result<f64, BackendError> {
        match &self.init_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.balance),
        }
    }

    async fn test_connection(&self) -> bool {
        self.reachable
    }

    async fn subscribe(
        &self,
        symbols: Vec<String>,
        on_event: TickCallback,
        mut cancel: CancelToken,
    ) -> Result<(), BackendError> {
        match &self.stream {
            StubStream::Fault(msg) => Err(BackendError::Connection(msg.clone())),
            StubStream::Silent => {
                cancel.cancelled().await;
                Ok(())
            }
            StubStream::Rate(interval) => {
                let mut seq = 0;
                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => return Ok(()),
                        _ = tokio::time::sleep(*interval) => {}
                    }
                    if cancel.is_cancelled() {
                        return Ok(());
                    }
                    self.emit(&on_event, &symbols, seq);
                    seq += 1;
                }
            }
            StubStream::Rogue(interval) => {
                let mut seq = 0;
                loop {
                    tokio::time::sleep(*interval).await;
                    self.emit(&on_event, &symbols, seq);
                    seq += 1;
                }
            }
        }
    }

    async fn process_tick(&self, tick: &Tick) -> Result<Option<Signal>, BackendError> {
        if let Some(e) = &self.tick_error {
            return Err(e.clone());
        }
        if tick.price < 98.0 {
            return Ok(Some(Signal {
                symbol: tick.symbol.clone(),
                side: Side::Buy,
                price: tick.price,
                strength: 0.5,
            }));
        }
        Ok(None)
    }

    async fn can_open_position(
        &self,
        amount: f64,
        open_positions: u32,
    ) -> Result<bool, BackendError> {
        Ok(amount > 0.0 && amount <= self.balance && open_positions < self.max_positions)
    }

    fn current_balance(&self) -> f64 {
        self.balance
    }

    fn max_positions(&self) -> u32 {
        self.max_positions
    }

    fn max_daily_loss(&self) -> f64 {
        self.max_daily_loss
    }
}
