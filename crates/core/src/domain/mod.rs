// Domain Layer - Pure verification entities

pub mod check;
pub mod error;
pub mod grade;
pub mod market;
pub mod mode;
pub mod report;

// Re-exports
pub use check::{CheckMetrics, CheckResult, CheckStatus};
pub use error::DomainError;
pub use grade::{grade, Grade, Verdict};
pub use market::{AccountSnapshot, Side, Signal, Tick};
pub use mode::BackendMode;
pub use report::{HealthReport, RunOutcome, RunState};
