//! Preflight Live Backend - JSON-RPC client for the running trading engine
//!
//! Speaks JSON-RPC 2.0 over WebSocket. The tick stream is a server-side
//! subscription, everything else is a plain request.
//!
//! # Example
//!
//! ```no_run
//! use preflight_infra_rpc::LiveBackend;
//! use preflight_core::port::TradingBackend;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = LiveBackend::new("ws://127.0.0.1:9944", Duration::from_secs(10))?;
//! let balance = backend.initialize().await?;
//! println!("balance: {}", balance);
//! # Ok(())
//! # }
//! ```

mod backend;
mod error;
pub mod methods;

#[cfg(test)]
mod test_server;

pub use backend::LiveBackend;
