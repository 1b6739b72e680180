// Port Layer - Interfaces for external dependencies

pub mod backend;
pub mod cancel;
pub mod id_provider; // For deterministic testing
pub mod time_provider;

// Re-exports
pub use backend::{BackendError, TickCallback, TradingBackend};
pub use cancel::{cancel_channel, CancelSender, CancelToken};
pub use id_provider::IdProvider;
pub use time_provider::TimeProvider;
