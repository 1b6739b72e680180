// Run ID Port
// Every HealthReport carries one; tests swap in a counter.

use std::sync::atomic::{AtomicU64, Ordering};

pub trait IdProvider: Send + Sync {
    /// Fresh identifier for one pipeline run
    fn generate_id(&self) -> String;
}

/// Random UUID v4 per run
pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn generate_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Counter-based provider: run-1, run-2, ...
#[derive(Default)]
pub struct SequentialIdProvider {
    next: AtomicU64,
}

impl IdProvider for SequentialIdProvider {
    fn generate_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format!("run-{}", n)
    }
}
