// Market Domain Model - events and signals exchanged with the backend

use serde::{Deserialize, Serialize};

/// One market data event from the stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub symbol: String,
    pub price: f64,
    pub volume: f64,
    pub timestamp_ms: i64, // epoch ms
}

impl Tick {
    pub fn new(symbol: impl Into<String>, price: f64, volume: f64, timestamp_ms: i64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            volume,
            timestamp_ms,
        }
    }
}

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Trading signal produced by the signal engine for one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub side: Side,
    pub price: f64,
    /// Confidence in [0, 1]
    pub strength: f64,
}

/// Account state established by `initialize()`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub balance: f64,
    pub max_positions: u32,
    pub max_daily_loss: f64,
}
