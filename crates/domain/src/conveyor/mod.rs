mod command;
mod line;
mod pin_map;

pub use command::Command;
pub use line::{ConveyorLine, PinLevel};
pub use pin_map::{DEFAULT_BACKWARD_PIN, DEFAULT_FORWARD_PIN, PinMap};

/// How long a line is held at the active level for one actuation
pub const DEFAULT_HOLD_MS: u64 = 2000;
