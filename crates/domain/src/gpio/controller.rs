use async_trait::async_trait;

use super::error::DriverError;
use crate::conveyor::PinLevel;

/// Hardware context for one actuation.
///
/// Capability set the conveyor needs from the GPIO layer. A controller owns
/// the pins it has configured until `release_all` is called.
#[async_trait]
pub trait GpioController: Send {
    /// Claim the pin and configure it as a digital output driven low
    async fn configure_as_output(&mut self, pin: u8) -> Result<(), DriverError>;

    /// Drive a configured pin to the given level
    async fn set_level(&mut self, pin: u8, level: PinLevel) -> Result<(), DriverError>;

    /// Release every pin claimed through this controller
    async fn release_all(&mut self) -> Result<(), DriverError>;
}

/// Factory for per-actuation hardware contexts
pub trait GpioProvider: Send + Sync {
    /// Open a fresh hardware context. Pins are not claimed until configured.
    fn open(&self) -> Result<Box<dyn GpioController>, DriverError>;

    /// Backend identifier for logs and health output
    fn name(&self) -> &str;
}
