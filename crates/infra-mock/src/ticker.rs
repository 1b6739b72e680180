// Seeded random-walk tick generator
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use preflight_core::domain::Tick;

/// Synthetic clock origin for generated ticks (2024-01-01T00:00:00Z)
const EPOCH_ORIGIN_MS: i64 = 1_704_067_200_000;

/// Maximum relative move per tick
const STEP_VOLATILITY: f64 = 0.002;

/// Produces the same tick sequence for the same seed, symbols and interval
pub struct TickGenerator {
    rng: StdRng,
    symbols: Vec<String>,
    prices: Vec<f64>,
    interval_ms: i64,
    seq: u64,
}

impl TickGenerator {
    pub fn new(symbols: Vec<String>, reference_price: f64, interval_ms: i64, seed: u64) -> Self {
        let prices = vec![reference_price; symbols.len()];
        Self {
            rng: StdRng::seed_from_u64(seed),
            symbols,
            prices,
            interval_ms,
            seq: 0,
        }
    }

    /// Next tick, round-robin over symbols. None if there are no symbols.
    pub fn next_tick(&mut self) -> Option<Tick> {
        if self.symbols.is_empty() {
            return None;
        }
        let idx = (self.seq % self.symbols.len() as u64) as usize;
        let step: f64 = self.rng.gen_range(-STEP_VOLATILITY..=STEP_VOLATILITY);
        self.prices[idx] *= 1.0 + step;
        let volume: f64 = self.rng.gen_range(0.01..10.0);

        let tick = Tick::new(
            self.symbols[idx].clone(),
            self.prices[idx],
            volume,
            EPOCH_ORIGIN_MS + self.seq as i64 * self.interval_ms,
        );
        self.seq += 1;
        Some(tick)
    }
}
