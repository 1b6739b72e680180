// Backend Capability Port
// The one contract both the mock and the live trading backend satisfy.
// Checks are written only against this trait; mode never leaks into them.
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use super::cancel::CancelToken;
use crate::domain::{Signal, Tick};

/// Invoked once per received event
pub type TickCallback = Arc<dyn Fn(Tick) + Send + Sync>;

/// Backend faults
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("RPC error ({code}): {message}")]
    Rpc { code: i32, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Stream closed by remote")]
    StreamClosed,

    #[error("Not initialized: call initialize() first")]
    NotInitialized,

    #[error("Backend fault: {0}")]
    Fault(String),
}

/// Trading backend under verification
///
/// Implementations:
/// - MockBackend: deterministic, offline (infra-mock)
/// - LiveBackend: JSON-RPC over WebSocket to the trading engine (infra-rpc)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TradingBackend: Send + Sync {
    /// Establish the account session and return the starting balance
    ///
    /// # Errors
    /// Any error here is a connectivity fault and gates the run.
    async fn initialize(&self) -> Result<f64, BackendError>;

    /// Lightweight reachability probe
    async fn test_connection(&self) -> bool;

    /// Stream events for `symbols` into `on_event` until `cancel` fires
    ///
    /// Runs for the lifetime of the subscription; the caller schedules it as
    /// a task and owns the cancel sender. Implementations check `cancel`
    /// before every callback so no event is delivered after cancellation.
    ///
    /// # Errors
    /// Returns early if the stream cannot be opened or breaks.
    async fn subscribe(
        &self,
        symbols: Vec<String>,
        on_event: TickCallback,
        cancel: CancelToken,
    ) -> Result<(), BackendError>;

    /// Run the signal engine over one tick. `Ok(None)` is a valid result.
    async fn process_tick(&self, tick: &Tick) -> Result<Option<Signal>, BackendError>;

    /// Risk gate predicate. Must not mutate backend state.
    async fn can_open_position(
        &self,
        amount: f64,
        open_positions: u32,
    ) -> Result<bool, BackendError>;

    /// Current account balance snapshot
    fn current_balance(&self) -> f64;

    /// Maximum number of concurrently open positions
    fn max_positions(&self) -> u32;

    /// Maximum tolerated loss per trading day
    fn max_daily_loss(&self) -> f64;
}
