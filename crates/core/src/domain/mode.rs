// Backend Mode - resolved once at startup

use serde::{Deserialize, Serialize};

/// Which backend implementation a run is wired against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    Mock,
    Live,
}

impl BackendMode {
    /// Absence of the toggle means live
    pub fn from_toggle(mock: bool) -> Self {
        if mock {
            BackendMode::Mock
        } else {
            BackendMode::Live
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendMode::Mock => "mock",
            BackendMode::Live => "live",
        }
    }
}

impl std::fmt::Display for BackendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
