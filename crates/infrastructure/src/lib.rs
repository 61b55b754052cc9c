//! Infrastructure layer - Hardware backends and configuration

pub mod config;
pub mod gpio;

pub use config::ConveyorConfig;
pub use gpio::{GpioProviderFactory, MockGpioProvider, SimulatedGpioProvider, SysfsGpioProvider};
