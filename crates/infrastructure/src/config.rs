use config::{Config, ConfigError, Environment, File};
use domain::conveyor::{DEFAULT_BACKWARD_PIN, DEFAULT_FORWARD_PIN};
use domain::{DEFAULT_HOLD_MS, DomainError, GpioBackendKind, PinMap};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::gpio::DEFAULT_SYSFS_ROOT;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GpioConfig {
    #[serde(default = "default_backend")]
    pub backend: GpioBackendKind,
    #[serde(default = "default_sysfs_root")]
    pub sysfs_root: String,
    #[serde(default = "default_forward_pin")]
    pub forward_pin: u8,
    #[serde(default = "default_backward_pin")]
    pub backward_pin: u8,
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            sysfs_root: default_sysfs_root(),
            forward_pin: default_forward_pin(),
            backward_pin: default_backward_pin(),
        }
    }
}

fn default_backend() -> GpioBackendKind {
    GpioBackendKind::Sysfs
}
fn default_sysfs_root() -> String {
    DEFAULT_SYSFS_ROOT.to_string()
}
fn default_forward_pin() -> u8 {
    DEFAULT_FORWARD_PIN
}
fn default_backward_pin() -> u8 {
    DEFAULT_BACKWARD_PIN
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ActuationConfig {
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,
    /// Serialize all actuations behind one process-wide lock
    #[serde(default)]
    pub serialize: bool,
}

impl Default for ActuationConfig {
    fn default() -> Self {
        Self {
            hold_ms: default_hold_ms(),
            serialize: false,
        }
    }
}

fn default_hold_ms() -> u64 {
    DEFAULT_HOLD_MS
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ConveyorConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub gpio: GpioConfig,
    #[serde(default)]
    pub actuation: ActuationConfig,
}

impl ConveyorConfig {
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            // Local config file - e.g. config/default.toml
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            // Run mode overrides - e.g. config/production.toml
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            // Environment variables (e.g. CONVEYOR__SERVER__PORT=5001)
            .add_source(Environment::with_prefix("CONVEYOR").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn pin_map(&self) -> Result<PinMap, DomainError> {
        PinMap::new(self.gpio.forward_pin, self.gpio.backward_pin)
    }

    pub fn hold(&self) -> Result<Duration, DomainError> {
        if self.actuation.hold_ms == 0 {
            return Err(DomainError::InvalidConfiguration(
                "actuation.hold_ms must be greater than zero".to_string(),
            ));
        }
        Ok(Duration::from_millis(self.actuation.hold_ms))
    }
}
