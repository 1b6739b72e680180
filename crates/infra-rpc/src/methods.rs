//! Method names exposed by the trading engine

pub const ACCOUNT_INITIALIZE: &str = "account_initialize";
pub const SYSTEM_PING: &str = "system_ping";
pub const SUBSCRIBE_TICKS: &str = "market_subscribeTicks";
pub const UNSUBSCRIBE_TICKS: &str = "market_unsubscribeTicks";
/// Notification method carrying ticks on the subscription
pub const TICK_NOTIFICATION: &str = "market_tick";
pub const PROCESS_TICK: &str = "engine_processTick";
pub const CAN_OPEN_POSITION: &str = "risk_canOpenPosition";
