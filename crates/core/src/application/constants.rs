// Pipeline constants (no magic values)
use std::time::Duration;

/// Probe window when none is configured (10s)
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Fraction of the balance used as the "small" position size in the risk gate check
pub const RISK_PROBE_FRACTION: f64 = 0.01;

/// Multiple of the balance that must always be rejected by the risk gate
pub const RISK_OVERSIZE_FACTOR: f64 = 2.0;

/// Nominal price the synthetic signal sweep is centred on
pub const SIGNAL_SWEEP_BASE_PRICE: f64 = 100.0;

/// Relative price offsets fed through the signal engine per symbol
pub const SIGNAL_SWEEP_OFFSETS: [f64; 7] = [-0.06, -0.03, -0.01, 0.0, 0.01, 0.03, 0.06];

/// Volume attached to every synthetic tick
pub const SIGNAL_SWEEP_VOLUME: f64 = 1.0;

/// Tolerance when comparing balances across checks
pub const BALANCE_EPSILON: f64 = 1e-9;
