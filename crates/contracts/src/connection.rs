//! ConnectionStatus - transport lifecycle and status severity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of the single logical connection to the telemetry relay.
///
/// `Idle` only exists before construction completes; `Closed` and `Errored`
/// are terminal for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Idle,
    Connecting,
    Open,
    Closed,
    Errored,
}

impl ConnectionStatus {
    /// True for `Closed` and `Errored`
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConnectionStatus::Closed | ConnectionStatus::Errored)
    }

    /// Stable lowercase name (used as a metrics label)
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Idle => "idle",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Open => "open",
            ConnectionStatus::Closed => "closed",
            ConnectionStatus::Errored => "errored",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity class attached to a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Style class name of the status slot
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}
