//! StyleClass - mutually exclusive categorical widget styles

use serde::{Deserialize, Serialize};

/// Known ignition states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnitionState {
    Off,
    On,
    Running,
}

impl IgnitionState {
    /// Parse the literal state text sent by the relay (exact match)
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "Off" => Some(IgnitionState::Off),
            "On" => Some(IgnitionState::On),
            "Running" => Some(IgnitionState::Running),
            _ => None,
        }
    }
}

/// Categorical style a widget can carry.
///
/// A widget carries at most one of these at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleClass {
    Ignition(IgnitionState),
    HasFault,
    NoFault,
}

impl StyleClass {
    /// Class name as used by the page stylesheet
    pub fn css_class(&self) -> &'static str {
        match self {
            StyleClass::Ignition(IgnitionState::Off) => "Off",
            StyleClass::Ignition(IgnitionState::On) => "On",
            StyleClass::Ignition(IgnitionState::Running) => "Running",
            StyleClass::HasFault => "has-dtc",
            StyleClass::NoFault => "no-dtc",
        }
    }
}
