//! Live TradingBackend Implementation

use async_trait::async_trait;
use jsonrpsee::core::client::{ClientT, Subscription, SubscriptionClientT};
use jsonrpsee::rpc_params;
use jsonrpsee::ws_client::{WsClient, WsClientBuilder};
use std::sync::RwLock;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::error::{backend_error, connect_error};
use crate::methods;
use preflight_core::domain::{AccountSnapshot, Signal, Tick};
use preflight_core::port::{BackendError, CancelToken, TickCallback, TradingBackend};
use preflight_core::{AppError, Result};

/// Trading engine reached over a JSON-RPC WebSocket
///
/// The connection is opened on first use and shared by every call after
/// that, including the tick subscription.
pub struct LiveBackend {
    endpoint: String,
    request_timeout: Duration,
    client: OnceCell<WsClient>,
    snapshot: RwLock<Option<AccountSnapshot>>,
}

impl LiveBackend {
    /// Create a live backend for `endpoint`
    ///
    /// # Errors
    /// `AppError::Wiring` if the endpoint is not a `ws://` or `wss://` URL.
    pub fn new(endpoint: impl Into<String>, request_timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.into();
        if !(endpoint.starts_with("ws://") || endpoint.starts_with("wss://")) {
            return Err(AppError::Wiring(format!(
                "endpoint must be a ws:// or wss:// URL, got '{}'",
                endpoint
            )));
        }

        Ok(Self {
            endpoint,
            request_timeout,
            client: OnceCell::new(),
            snapshot: RwLock::new(None),
        })
    }

    async fn client(&self) -> std::result::Result<&WsClient, BackendError> {
        self.client
            .get_or_try_init(|| async {
                debug!(endpoint = %self.endpoint, "Opening WebSocket connection");
                WsClientBuilder::default()
                    .request_timeout(self.request_timeout)
                    .connection_timeout(self.request_timeout)
                    .build(&self.endpoint)
                    .await
                    .map_err(|e| connect_error(&self.endpoint, e))
            })
            .await
    }

    fn cached<T>(&self, read: impl FnOnce(&AccountSnapshot) -> T) -> Option<T> {
        let guard = self.snapshot.read().ok()?;
        guard.as_ref().map(read)
    }
}

#[async_trait]
impl TradingBackend for LiveBackend {
    async fn initialize(&self) -> std::result::Result<f64, BackendError> {
        let client = self.client().await?;
        let snapshot: AccountSnapshot = client
            .request(methods::ACCOUNT_INITIALIZE, rpc_params![])
            .await
            .map_err(backend_error)?;

        info!(
            endpoint = %self.endpoint,
            balance = %snapshot.balance,
            max_positions = snapshot.max_positions,
            "Live backend initialized"
        );

        let balance = snapshot.balance;
        if let Ok(mut slot) = self.snapshot.write() {
            *slot = Some(snapshot);
        }
        Ok(balance)
    }

    async fn test_connection(&self) -> bool {
        let client = match self.client().await {
            Ok(client) => client,
            Err(e) => {
                debug!(error = %e, "Ping skipped: no connection");
                return false;
            }
        };

        match client
            .request::<bool, _>(methods::SYSTEM_PING, rpc_params![])
            .await
        {
            Ok(alive) => alive,
            Err(e) => {
                debug!(error = %e, "Ping failed");
                false
            }
        }
    }

    async fn subscribe(
        &self,
        symbols: Vec<String>,
        on_event: TickCallback,
        mut cancel: CancelToken,
    ) -> std::result::Result<(), BackendError> {
        let client = self.client().await?;
        let mut ticks: Subscription<Tick> = client
            .subscribe(
                methods::SUBSCRIBE_TICKS,
                rpc_params![symbols],
                methods::UNSUBSCRIBE_TICKS,
            )
            .await
            .map_err(backend_error)?;

        debug!("Tick subscription opened");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                next = ticks.next() => match next {
                    Some(Ok(tick)) => {
                        if cancel.is_cancelled() {
                            break;
                        }
                        on_event(tick);
                    }
                    Some(Err(e)) => {
                        return Err(BackendError::Protocol(format!("Malformed tick: {}", e)));
                    }
                    None => return Err(BackendError::StreamClosed),
                },
            }
        }

        if let Err(e) = ticks.unsubscribe().await {
            warn!(error = %e, "Unsubscribe failed");
        }
        Ok(())
    }

    async fn process_tick(&self, tick: &Tick) -> std::result::Result<Option<Signal>, BackendError> {
        let client = self.client().await?;
        client
            .request(methods::PROCESS_TICK, rpc_params![tick])
            .await
            .map_err(backend_error)
    }

    async fn can_open_position(
        &self,
        amount: f64,
        open_positions: u32,
    ) -> std::result::Result<bool, BackendError> {
        let client = self.client().await?;
        client
            .request(
                methods::CAN_OPEN_POSITION,
                rpc_params![amount, open_positions],
            )
            .await
            .map_err(backend_error)
    }

    /// Balance cached by the last `initialize()`
    ///
    /// The engine is not asked again, so balance drift seen by
    /// `risk_management` and `state_integrity` only shows on backends whose
    /// accessor reads live state.
    fn current_balance(&self) -> f64 {
        self.cached(|s| s.balance).unwrap_or(0.0)
    }

    fn max_positions(&self) -> u32 {
        self.cached(|s| s.max_positions).unwrap_or(0)
    }

    fn max_daily_loss(&self) -> f64 {
        self.cached(|s| s.max_daily_loss).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::{EngineBehavior, TestEngine};
    use preflight_core::application::{
        standard_plan, PipelineExecutor, PipelineSettings, ProbeHarness, ProbeSession,
    };
    use preflight_core::domain::{BackendMode, CheckStatus, Side, Verdict};
    use preflight_core::port::id_provider::SequentialIdProvider;
    use preflight_core::port::time_provider::SystemTimeProvider;
    use std::sync::Arc;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_rejects_non_websocket_endpoint() {
        let err = LiveBackend::new("http://127.0.0.1:9944", TIMEOUT).err().unwrap();
        assert!(matches!(err, AppError::Wiring(_)));
        assert!(LiveBackend::new("wss://engine.example:443", TIMEOUT).is_ok());
    }

    #[tokio::test]
    async fn test_initialize_caches_snapshot() {
        let engine = TestEngine::start(EngineBehavior::default()).await;
        let backend = LiveBackend::new(engine.url(), TIMEOUT).unwrap();

        assert_eq!(backend.current_balance(), 0.0);
        let balance = tokio_test::assert_ok!(backend.initialize().await);

        assert_eq!(balance, 10_000.0);
        assert_eq!(backend.current_balance(), 10_000.0);
        assert_eq!(backend.max_positions(), 5);
        assert_eq!(backend.max_daily_loss(), 500.0);
        assert!(backend.test_connection().await);
    }

    #[tokio::test]
    async fn test_rpc_error_is_mapped() {
        let engine = TestEngine::start(EngineBehavior {
            locked_account: true,
            ..Default::default()
        })
        .await;
        let backend = LiveBackend::new(engine.url(), TIMEOUT).unwrap();

        let err = backend.initialize().await.unwrap_err();
        assert!(matches!(err, BackendError::Rpc { code: -32001, .. }), "{err}");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        // Nothing listens on port 1
        let backend = LiveBackend::new("ws://127.0.0.1:1", Duration::from_millis(500)).unwrap();

        assert!(!backend.test_connection().await);
        let err = backend.initialize().await.unwrap_err();
        assert!(matches!(err, BackendError::Connection(_)), "{err}");
    }

    #[tokio::test]
    async fn test_signal_and_risk_requests() {
        let engine = TestEngine::start(EngineBehavior::default()).await;
        let backend = LiveBackend::new(engine.url(), TIMEOUT).unwrap();
        backend.initialize().await.unwrap();

        let signal = backend
            .process_tick(&Tick::new("BTCUSDT", 94.0, 1.0, 0))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(signal.side, Side::Buy);
        assert_eq!(signal.symbol, "BTCUSDT");
        assert_eq!(
            backend
                .process_tick(&Tick::new("BTCUSDT", 100.0, 1.0, 0))
                .await
                .unwrap(),
            None
        );

        assert!(backend.can_open_position(100.0, 0).await.unwrap());
        assert!(!backend.can_open_position(100.0, 5).await.unwrap());
    }

    #[tokio::test]
    async fn test_probe_counts_subscription_ticks() {
        let engine = TestEngine::start(EngineBehavior::default()).await;
        let backend: Arc<dyn TradingBackend> =
            Arc::new(LiveBackend::new(engine.url(), TIMEOUT).unwrap());

        let harness = ProbeHarness::new(backend);
        let session = ProbeSession::new(vec!["BTCUSDT".to_string()], Duration::from_millis(300));
        let outcome = harness.probe(Arc::clone(&session)).await;

        assert!(outcome.observed > 0);
        assert!(outcome.stream_fault.is_none());
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(session.observed(), outcome.observed);
    }

    #[tokio::test]
    async fn test_standard_plan_against_live_engine() {
        let engine = TestEngine::start(EngineBehavior::default()).await;
        let backend: Arc<dyn TradingBackend> =
            Arc::new(LiveBackend::new(engine.url(), TIMEOUT).unwrap());
        let executor = PipelineExecutor::new(
            BackendMode::Live,
            backend,
            PipelineSettings::new(vec!["BTCUSDT".to_string()], Duration::from_millis(300)),
            Arc::new(SystemTimeProvider),
            Arc::new(SequentialIdProvider::default()),
        );

        let report = executor.run(&standard_plan().unwrap()).await;

        for result in report.results() {
            assert_eq!(result.status, CheckStatus::Pass, "{}: {}", result.name, result.detail);
        }
        assert_eq!(report.verdict(), Verdict::Healthy);
    }
}
