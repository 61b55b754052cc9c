use serde::{Deserialize, Serialize};

use super::line::ConveyorLine;
use crate::error::{DomainError, Result};

/// BCM 17, physical pin 11
pub const DEFAULT_FORWARD_PIN: u8 = 17;
/// BCM 27, physical pin 13
pub const DEFAULT_BACKWARD_PIN: u8 = 27;

/// Fixed 1:1 mapping from conveyor lines to hardware pin identifiers
///
/// Rules:
/// - The two lines must use different pins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinMap {
    forward: u8,
    backward: u8,
}

impl PinMap {
    pub fn new(forward: u8, backward: u8) -> Result<Self> {
        if forward == backward {
            return Err(DomainError::InvalidConfiguration(format!(
                "forward and backward lines cannot share pin {forward}"
            )));
        }
        Ok(Self { forward, backward })
    }

    pub fn pin(&self, line: ConveyorLine) -> u8 {
        match line {
            ConveyorLine::Forward => self.forward,
            ConveyorLine::Backward => self.backward,
        }
    }

    /// Both pins, forward first
    pub fn pins(&self) -> [u8; 2] {
        [self.forward, self.backward]
    }
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            forward: DEFAULT_FORWARD_PIN,
            backward: DEFAULT_BACKWARD_PIN,
        }
    }
}
