//! Domain layer - Pure conveyor control types with no external dependencies
//!
//! This crate contains:
//! - Value Objects (Command, ConveyorLine, PinLevel, PinMap)
//! - Hardware capability interfaces (GpioController, GpioProvider)
//! - Domain and driver errors
//!
//! Principles:
//! - No I/O, no runtime
//! - Command validation enforced at domain level
//! - Testable in isolation

pub mod conveyor;
pub mod error;
pub mod gpio;

// Re-export commonly used types
pub use conveyor::{Command, ConveyorLine, DEFAULT_HOLD_MS, PinLevel, PinMap};
pub use error::DomainError;
pub use gpio::{DriverError, GpioBackendKind, GpioController, GpioProvider};
