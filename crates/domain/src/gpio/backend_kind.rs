use serde::{Deserialize, Serialize};

/// GPIO backend used to reach the conveyor relays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpioBackendKind {
    /// Linux `/sys/class/gpio` interface
    Sysfs,
    /// Log-only backend for hosts without GPIO
    Simulated,
}

impl GpioBackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sysfs => "sysfs",
            Self::Simulated => "simulated",
        }
    }
}

impl std::str::FromStr for GpioBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sysfs" => Ok(Self::Sysfs),
            "simulated" => Ok(Self::Simulated),
            other => Err(format!("unknown GPIO backend '{other}'")),
        }
    }
}
