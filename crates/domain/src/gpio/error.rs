use thiserror::Error;

use crate::conveyor::PinLevel;

/// Failure configuring or writing hardware output lines
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DriverError {
    #[error("Failed to configure pin {pin} as output: {reason}")]
    Configure { pin: u8, reason: String },

    #[error("Failed to drive pin {pin} {level}: {reason}")]
    Write {
        pin: u8,
        level: PinLevel,
        reason: String,
    },

    #[error("Failed to release GPIO lines: {0}")]
    Release(String),

    #[error("GPIO backend unavailable: {0}")]
    Unavailable(String),
}
