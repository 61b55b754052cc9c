use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Malformed or unrecognized conveyor command
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Invalid conveyor configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
