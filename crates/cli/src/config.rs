//! Process configuration
//!
//! Built once at startup from `PREFLIGHT_*` environment variables over
//! serde defaults, then passed by reference.
//!
//! | Variable | Default |
//! |---|---|
//! | `PREFLIGHT_MOCK` | `false` (live backend) |
//! | `PREFLIGHT_ENDPOINT` | `ws://127.0.0.1:9944` |
//! | `PREFLIGHT_REQUEST_TIMEOUT_SECS` | `10` |
//! | `PREFLIGHT_SYMBOLS` | `BTCUSDT,ETHUSDT` |
//! | `PREFLIGHT_PROBE_TIMEOUT_SECS` | `10` |
//! | `PREFLIGHT_MOCK_TICK_INTERVAL_MS` | `100` |
//! | `PREFLIGHT_MOCK_SEED` | `42` |

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::time::Duration;

use preflight_core::application::PipelineSettings;
use preflight_core::domain::BackendMode;
use preflight_infra_mock::{MockScenario, MockStream};

const ENV_PREFIX: &str = "PREFLIGHT";
const DEFAULT_ENDPOINT: &str = "ws://127.0.0.1:9944";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mode switch toggle
    pub mock: bool,
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub symbols: Vec<String>,
    pub probe_timeout_secs: u64,
    pub mock_tick_interval_ms: u64,
    pub mock_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mock: false,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: 10,
            symbols: vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()],
            probe_timeout_secs: 10,
            mock_tick_interval_ms: 100,
            mock_seed: 42,
        }
    }
}

impl Settings {
    /// Load from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("symbols")
    }

    fn from_environment(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    pub fn mode(&self) -> BackendMode {
        BackendMode::from_toggle(self.mock)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// What the pipeline itself needs; validated by the configuration check
    pub fn pipeline(&self) -> PipelineSettings {
        PipelineSettings::new(
            self.symbols.clone(),
            Duration::from_secs(self.probe_timeout_secs),
        )
    }

    pub fn mock_scenario(&self) -> MockScenario {
        let interval = Duration::from_millis(self.mock_tick_interval_ms.max(1));
        MockScenario::default()
            .with_stream(MockStream::Rate(interval))
            .with_seed(self.mock_seed)
    }
}
