// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid execution state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Unknown execution status: {0}")]
    UnknownStatus(String),

    #[error("Unknown pause action: {0} (expected \"pause\" or \"resume\")")]
    UnknownPauseAction(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
