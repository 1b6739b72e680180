// Fault isolation for check execution
use std::any::Any;
use std::future::Future;
use tracing::error;

/// Result of an isolated execution
#[derive(Debug)]
pub enum Isolated<T> {
    /// Execution ran to completion
    Completed(T),
    /// Execution panicked
    Panicked(String),
    /// Task was cancelled before finishing
    Cancelled,
}

/// Run a future on its own task so a panic inside it cannot unwind into the caller
///
/// The caller still awaits the task before doing anything else; this is
/// isolation, not parallelism.
///
/// # Example
/// ```text
/// match run_isolated(async { panic!("boom") }).await {
///     Isolated::Panicked(msg) => assert_eq!(msg, "boom"),
///     _ => unreachable!(),
/// }
/// ```
pub async fn run_isolated<F, T>(future: F) -> Isolated<T>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn(future).await {
        Ok(value) => Isolated::Completed(value),
        Err(join_err) if join_err.is_panic() => {
            let panic_msg = panic_message(join_err.into_panic().as_ref());
            error!(panic_msg = %panic_msg, "Isolated task panicked");
            Isolated::Panicked(panic_msg)
        }
        Err(_) => Isolated::Cancelled,
    }
}

/// Extract a readable message from a panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
