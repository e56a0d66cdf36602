//! Session error types

use contracts::{ConnectionStatus, ContractError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Transport event not valid in the current state
    #[error("'{event}' is not valid while {from}")]
    InvalidTransition {
        from: ConnectionStatus,
        event: &'static str,
    },

    /// Inbound frame could not be decoded
    #[error("failed to decode stream frame: {0}")]
    Decode(#[from] ContractError),
}
