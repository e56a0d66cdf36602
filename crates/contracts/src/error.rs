//! Layered error definitions
//!
//! Categorized by source: config / stream / io. Camera acquisition has its own `CameraError`.

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Stream Errors =====
    /// Inbound frame could not be decoded
    #[error("stream decode error: {message}")]
    StreamDecode {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Inbound frame decoded but is not a JSON object
    #[error("unexpected stream payload: expected a JSON object, got {kind}")]
    UnexpectedPayload { kind: &'static str },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Camera device acquisition errors
///
/// Any of these moves the camera controller into its terminal unavailable state,
/// except `ConstraintUnsupported`, which triggers a retry without the facing preference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    /// The user (or platform policy) denied access
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// No capture device is attached
    #[error("no camera device found")]
    NoDevice,

    /// The requested facing mode is not supported by the device
    #[error("constraint not supported: {0}")]
    ConstraintUnsupported(String),

    /// Any other platform failure
    #[error("{0}")]
    Other(String),
}
