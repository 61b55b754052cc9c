use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::line::ConveyorLine;
use crate::error::DomainError;

/// Classification result that drives the conveyor.
///
/// Only the exact lowercase strings `"accepted"` and `"rejected"` are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Accepted,
    Rejected,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Line that moves the belt for this command
    pub fn line(&self) -> ConveyorLine {
        match self {
            Self::Accepted => ConveyorLine::Forward,
            Self::Rejected => ConveyorLine::Backward,
        }
    }
}

impl FromStr for Command {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(DomainError::InvalidCommand(format!(
                "'{other}' is not one of 'accepted' or 'rejected'"
            ))),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
