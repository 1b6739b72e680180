// In-process trading engine for exercising LiveBackend over a real socket

use jsonrpsee::core::SubscriptionResult;
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::types::{ErrorObjectOwned, Params};
use jsonrpsee::{PendingSubscriptionSink, RpcModule, SubscriptionMessage};
use std::net::SocketAddr;
use std::time::Duration;

use crate::methods;
use preflight_core::domain::{AccountSnapshot, Side, Signal, Tick};

#[derive(Clone, Debug)]
pub struct EngineBehavior {
    pub snapshot: AccountSnapshot,
    pub tick_interval: Duration,
    pub locked_account: bool,
}

impl Default for EngineBehavior {
    fn default() -> Self {
        Self {
            snapshot: AccountSnapshot {
                balance: 10_000.0,
                max_positions: 5,
                max_daily_loss: 500.0,
            },
            tick_interval: Duration::from_millis(10),
            locked_account: false,
        }
    }
}

pub struct TestEngine {
    addr: SocketAddr,
    _handle: ServerHandle,
}

impl TestEngine {
    pub async fn start(behavior: EngineBehavior) -> Self {
        let server = Server::builder().build("127.0.0.1:0").await.unwrap();
        let addr = server.local_addr().unwrap();
        let handle = server.start(module(behavior));
        Self {
            addr,
            _handle: handle,
        }
    }

    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }
}

fn module(behavior: EngineBehavior) -> RpcModule<EngineBehavior> {
    let mut module = RpcModule::new(behavior);

    module
        .register_method(methods::ACCOUNT_INITIALIZE, |_, engine, _| {
            if engine.locked_account {
                Err(ErrorObjectOwned::owned(-32001, "account locked", None::<()>))
            } else {
                Ok(engine.snapshot.clone())
            }
        })
        .unwrap();

    module
        .register_method(methods::SYSTEM_PING, |_, _, _| Ok::<_, ErrorObjectOwned>(true))
        .unwrap();

    module
        .register_method(methods::PROCESS_TICK, |params, _, _| {
            let tick: Tick = params.one()?;
            Ok::<_, ErrorObjectOwned>(signal_for(&tick))
        })
        .unwrap();

    module
        .register_method(methods::CAN_OPEN_POSITION, |params, engine, _| {
            let (amount, open): (f64, u32) = params.parse()?;
            Ok::<_, ErrorObjectOwned>(
                amount > 0.0
                    && amount <= engine.snapshot.balance
                    && open < engine.snapshot.max_positions,
            )
        })
        .unwrap();

    module
        .register_subscription(
            methods::SUBSCRIBE_TICKS,
            methods::TICK_NOTIFICATION,
            methods::UNSUBSCRIBE_TICKS,
            |params, pending, engine, _| async move {
                stream_ticks(params, pending, engine.tick_interval).await
            },
        )
        .unwrap();

    module
}

fn signal_for(tick: &Tick) -> Option<Signal> {
    let side = if tick.price < 98.0 {
        Side::Buy
    } else if tick.price > 102.0 {
        Side::Sell
    } else {
        return None;
    };
    Some(Signal {
        symbol: tick.symbol.clone(),
        side,
        price: tick.price,
        strength: 0.5,
    })
}

async fn stream_ticks(
    params: Params<'static>,
    pending: PendingSubscriptionSink,
    interval: Duration,
) -> SubscriptionResult {
    let symbols: Vec<String> = params.one()?;
    let sink = pending.accept().await?;

    let mut seq: u64 = 0;
    loop {
        tokio::time::sleep(interval).await;
        let symbol = symbols
            .get(seq as usize % symbols.len().max(1))
            .cloned()
            .unwrap_or_default();
        let tick = Tick::new(symbol, 100.0, 1.0, seq as i64);
        let message = SubscriptionMessage::from_json(&tick)?;
        if sink.send(message).await.is_err() {
            return Ok(());
        }
        seq += 1;
    }
}
