//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown capability: {0}")]
    UnknownCapability(String),

    #[error("Invocation already terminated with status {0}")]
    InvalidTransition(String),
}
