// Probe Harness - bounded-time, cancellable live stream probe

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::pipeline::panic_message;
use crate::domain::Tick;
use crate::port::{cancel_channel, BackendError, CancelSender, TickCallback, TradingBackend};

/// Top bit of the state word: set once the session is closed
const CLOSED: u64 = 1 << 63;

/// One probe run: target symbols, timeout, event counter and connection flag
///
/// Counter and flag share one atomic word, so closing the session and
/// reading the final count is a single operation. A callback racing with
/// the close either lands before it (and is counted) or is refused.
#[derive(Debug)]
pub struct ProbeSession {
    symbols: Vec<String>,
    timeout: Duration,
    state: AtomicU64,
}

impl ProbeSession {
    pub fn new(symbols: Vec<String>, timeout: Duration) -> Arc<Self> {
        Arc::new(Self {
            symbols,
            timeout,
            state: AtomicU64::new(0),
        })
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Count one event. Returns false (and counts nothing) once closed.
    pub fn record(&self) -> bool {
        self.state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |s| {
                if s & CLOSED != 0 {
                    None
                } else {
                    Some(s + 1)
                }
            })
            .is_ok()
    }

    /// Flip the connection flag to false and return the final count
    ///
    /// Only the harness calls this. Repeated calls return the same count.
    pub fn close(&self) -> u64 {
        self.state.fetch_or(CLOSED, Ordering::AcqRel) & !CLOSED
    }

    pub fn is_connected(&self) -> bool {
        self.state.load(Ordering::Acquire) & CLOSED == 0
    }

    pub fn observed(&self) -> u64 {
        self.state.load(Ordering::Acquire) & !CLOSED
    }
}

/// What the harness saw
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub observed: u64,
    pub elapsed: Duration,
    /// Set when the subscription task failed on its own before the timeout
    pub stream_fault: Option<String>,
}

impl ProbeOutcome {
    pub fn events_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.observed as f64 / secs
        } else {
            0.0
        }
    }
}

/// Cancellable handle on a running subscription task
struct StreamHandle {
    cancel: CancelSender,
    task: JoinHandle<Result<(), BackendError>>,
}

impl StreamHandle {
    /// Request cancellation and collect a fault if the task already ended
    ///
    /// Best effort: a finished or faulted task is not an error here, and a
    /// task still running is aborted rather than awaited.
    async fn cancel(self) -> Option<String> {
        self.cancel.cancel();

        if !self.task.is_finished() {
            // Drops the stream future (and any connection it holds)
            self.task.abort();
            return None;
        }

        match self.task.await {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(e.to_string()),
            Err(join_err) if join_err.is_panic() => Some(format!(
                "subscription panicked: {}",
                panic_message(join_err.into_panic().as_ref())
            )),
            Err(_) => None,
        }
    }
}

/// Runs a [`ProbeSession`] against the backend's event stream
pub struct ProbeHarness {
    backend: Arc<dyn TradingBackend>,
}

impl ProbeHarness {
    pub fn new(backend: Arc<dyn TradingBackend>) -> Self {
        Self { backend }
    }

    /// Subscribe, wait exactly the session timeout, then close and cancel
    ///
    /// Always returns after the timeout with the final count; zero is a
    /// normal value. No increment is observable after this returns.
    pub async fn probe(&self, session: Arc<ProbeSession>) -> ProbeOutcome {
        let (cancel_tx, cancel_rx) = cancel_channel();

        let counter = Arc::clone(&session);
        let on_event: TickCallback = Arc::new(move |_tick: Tick| {
            counter.record();
        });

        let backend = Arc::clone(&self.backend);
        let symbols = session.symbols().to_vec();

        info!(
            symbols = ?session.symbols(),
            timeout_ms = session.timeout().as_millis() as u64,
            "Starting stream probe"
        );

        let started = Instant::now();
        let task = tokio::spawn(async move { backend.subscribe(symbols, on_event, cancel_rx).await });
        let stream = StreamHandle {
            cancel: cancel_tx,
            task,
        };

        tokio::time::sleep(session.timeout()).await;

        // (a) flag off + final count, atomically
        let observed = session.close();
        // (b) cancel the subscription
        let stream_fault = stream.cancel().await;
        let elapsed = started.elapsed();

        if let Some(fault) = &stream_fault {
            warn!(fault = %fault, "Subscription task ended with a fault");
        }
        debug!(
            events = observed,
            elapsed_ms = elapsed.as_millis() as u64,
            "Stream probe finished"
        );

        ProbeOutcome {
            observed,
            elapsed,
            stream_fault,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubBackend, StubStream};

    fn symbols() -> Vec<String> {
        vec!["BTCUSDT".to_string()]
    }

    #[test]
    fn test_session_refuses_after_close() {
        let session = ProbeSession::new(symbols(), Duration::from_secs(1));
        assert!(session.record());
        assert!(session.record());
        assert!(session.is_connected());

        assert_eq!(session.close(), 2);
        assert!(!session.is_connected());
        assert!(!session.record());
        assert_eq!(session.observed(), 2);
        assert_eq!(session.close(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_count_tracks_rate_times_duration() {
        // 10ms interval over 1s => ~100 events
        let backend = StubBackend {
            stream: StubStream::Rate(Duration::from_millis(10)),
            ..Default::default()
        }
        .shared();
        let harness = ProbeHarness::new(backend);
        let session = ProbeSession::new(symbols(), Duration::from_secs(1));

        let outcome = harness.probe(Arc::clone(&session)).await;

        assert!(
            (98..=100).contains(&outcome.observed),
            "observed {}",
            outcome.observed
        );
        assert_eq!(outcome.elapsed, Duration::from_secs(1));
        assert!(outcome.stream_fault.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_increments_after_return() {
        let delivered = Arc::new(AtomicU64::new(0));
        let backend = StubBackend {
            // Ignores cancellation entirely; the session must still stop counting
            stream: StubStream::Rogue(Duration::from_millis(5)),
            delivered: Arc::clone(&delivered),
            ..Default::default()
        }
        .shared();
        let harness = ProbeHarness::new(backend);
        let session = ProbeSession::new(symbols(), Duration::from_millis(200));

        let outcome = harness.probe(Arc::clone(&session)).await;
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert!(outcome.observed > 0);
        assert_eq!(session.observed(), outcome.observed);
        assert!(delivered.load(Ordering::SeqCst) >= outcome.observed);
        assert!(!session.is_connected());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_before_first_event_yields_zero() {
        let backend = StubBackend {
            stream: StubStream::Rate(Duration::from_secs(5)),
            ..Default::default()
        }
        .shared();
        let harness = ProbeHarness::new(backend);
        let session = ProbeSession::new(symbols(), Duration::from_millis(100));

        let outcome = harness.probe(session).await;

        assert_eq!(outcome.observed, 0);
        assert!(outcome.stream_fault.is_none());
        assert_eq!(outcome.events_per_sec(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_faulted_stream_is_reported_not_raised() {
        let backend = StubBackend {
            stream: StubStream::Fault("handshake refused".to_string()),
            ..Default::default()
        }
        .shared();
        let harness = ProbeHarness::new(backend);
        let session = ProbeSession::new(symbols(), Duration::from_millis(300));

        let outcome = harness.probe(session).await;

        assert_eq!(outcome.observed, 0);
        // Still waited the full window
        assert_eq!(outcome.elapsed, Duration::from_millis(300));
        let fault = outcome.stream_fault.unwrap();
        assert!(fault.contains("handshake refused"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_silent_stream_is_cancelled_cleanly() {
        let backend = StubBackend {
            stream: StubStream::Silent,
            ..Default::default()
        }
        .shared();
        let harness = ProbeHarness::new(backend);
        let session = ProbeSession::new(symbols(), Duration::from_millis(50));

        let outcome = harness.probe(session).await;

        assert_eq!(outcome.observed, 0);
        assert!(outcome.stream_fault.is_none());
    }
}
