//! Client error mapping

use jsonrpsee::core::ClientError;
use preflight_core::port::BackendError;

/// Map a jsonrpsee client error onto the backend port's error type
pub(crate) fn backend_error(e: ClientError) -> BackendError {
    match e {
        ClientError::Call(call_err) => BackendError::Rpc {
            code: call_err.code(),
            message: call_err.message().to_string(),
        },
        ClientError::Transport(e) => BackendError::Transport(e.to_string()),
        ClientError::RestartNeeded(_) => {
            BackendError::Connection("Connection restart needed".to_string())
        }
        ClientError::RequestTimeout => BackendError::Transport("Request timed out".to_string()),
        ClientError::ParseError(e) => BackendError::Protocol(format!("Parse error: {}", e)),
        _ => BackendError::Protocol(e.to_string()),
    }
}

/// Failure to establish the WebSocket connection in the first place
pub(crate) fn connect_error(endpoint: &str, e: ClientError) -> BackendError {
    BackendError::Connection(format!("Failed to connect to {}: {}", endpoint, e))
}
