mod backend_kind;
mod controller;
mod error;

pub use backend_kind::GpioBackendKind;
pub use controller::{GpioController, GpioProvider};
pub use error::DriverError;
