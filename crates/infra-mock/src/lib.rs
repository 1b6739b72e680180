// Preflight Infrastructure - Mock Backend
// Implements: TradingBackend (deterministic, offline)

pub mod backend;
pub mod ticker;

pub use backend::{MockBackend, MockScenario, MockStream};
pub use ticker::TickGenerator;
