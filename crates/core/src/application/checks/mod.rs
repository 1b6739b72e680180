// Standard Checks - the staged verification plan
//
// Every check is written against the TradingBackend port only, so the same
// plan runs unchanged against the mock and the live backend.

mod configuration;
mod connectivity;
mod initialization;
mod integrity;
mod limits;
mod market_data;
mod risk;
mod signal;

pub use configuration::ConfigurationCheck;
pub use connectivity::ConnectivityCheck;
pub use initialization::InitializationCheck;
pub use integrity::IntegrityCheck;
pub use limits::RiskLimitsCheck;
pub use market_data::MarketDataCheck;
pub use risk::RiskCheck;
pub use signal::SignalCheck;

use crate::application::pipeline::CheckPlan;
use crate::domain::error::Result;

pub const CONFIGURATION: &str = "configuration";
pub const SYSTEM_INITIALIZATION: &str = "system_initialization";
pub const EXCHANGE_CONNECTION: &str = "exchange_connection";
pub const MARKET_DATA_STREAM: &str = "market_data_stream";
pub const SIGNAL_GENERATION: &str = "signal_generation";
pub const RISK_MANAGEMENT: &str = "risk_management";
pub const RISK_LIMITS: &str = "risk_limits";
pub const STATE_INTEGRITY: &str = "state_integrity";

/// The eight-stage plan, in execution order
pub fn standard_plan() -> Result<CheckPlan> {
    CheckPlan::new()
        .with(CONFIGURATION, true, ConfigurationCheck)?
        .with(SYSTEM_INITIALIZATION, true, InitializationCheck)?
        .with(EXCHANGE_CONNECTION, false, ConnectivityCheck)?
        .with(MARKET_DATA_STREAM, false, MarketDataCheck)?
        .with(SIGNAL_GENERATION, false, SignalCheck)?
        .with(RISK_MANAGEMENT, false, RiskCheck)?
        .with(RISK_LIMITS, false, RiskLimitsCheck)?
        .with(STATE_INTEGRITY, false, IntegrityCheck)
}
