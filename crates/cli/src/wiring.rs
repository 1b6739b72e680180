//! Mode switch: the one place that knows which backend a run talks to

use std::sync::Arc;

use crate::config::Settings;
use preflight_core::domain::BackendMode;
use preflight_core::port::TradingBackend;
use preflight_infra_mock::MockBackend;
use preflight_infra_rpc::LiveBackend;

/// Construct the backend for `mode`
///
/// # Errors
/// `AppError::Wiring` if the live endpoint is unusable. Nothing has run yet
/// at this point, so the caller reports it and exits.
pub fn build_backend(
    mode: BackendMode,
    settings: &Settings,
) -> preflight_core::Result<Arc<dyn TradingBackend>> {
    let backend: Arc<dyn TradingBackend> = match mode {
        BackendMode::Mock => Arc::new(MockBackend::new(settings.mock_scenario())),
        BackendMode::Live => Arc::new(LiveBackend::new(
            settings.endpoint.clone(),
            settings.request_timeout(),
        )?),
    };
    Ok(backend)
}
