use async_trait::async_trait;
use domain::{DriverError, GpioController, GpioProvider, PinLevel};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/gpio";

/// Provider for the Linux sysfs GPIO interface
pub struct SysfsGpioProvider {
    root: PathBuf,
}

impl SysfsGpioProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl GpioProvider for SysfsGpioProvider {
    fn open(&self) -> Result<Box<dyn GpioController>, DriverError> {
        if !self.root.is_dir() {
            return Err(DriverError::Unavailable(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }
        Ok(Box::new(SysfsGpio::new(&self.root)))
    }

    fn name(&self) -> &str {
        "sysfs"
    }
}

/// One sysfs hardware context. Exported pins are tracked so they can be
/// unexported again on release.
pub struct SysfsGpio {
    root: PathBuf,
    claimed: Vec<u8>,
}

impl SysfsGpio {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            claimed: Vec::new(),
        }
    }

    fn pin_dir(&self, pin: u8) -> PathBuf {
        self.root.join(format!("gpio{}", pin))
    }

    async fn export(&self, pin: u8) -> Result<(), DriverError> {
        if let Err(e) = tokio::fs::write(self.root.join("export"), pin.to_string()).await {
            // EBUSY when the pin is already exported; the pin directory tells us.
            if tokio::fs::metadata(self.pin_dir(pin)).await.is_err() {
                return Err(DriverError::Configure {
                    pin,
                    reason: format!("export failed: {}", e),
                });
            }
            debug!(pin, "Pin already exported");
        }
        Ok(())
    }

    /// Return the pin to input and unexport it. Unexport is attempted even
    /// when the direction write fails.
    async fn unexport(&self, pin: u8) -> Result<(), DriverError> {
        let direction = tokio::fs::write(self.pin_dir(pin).join("direction"), "in").await;
        let unexport = tokio::fs::write(self.root.join("unexport"), pin.to_string()).await;

        direction
            .and(unexport)
            .map_err(|e| DriverError::Release(format!("pin {}: {}", pin, e)))
    }
}

#[async_trait]
impl GpioController for SysfsGpio {
    async fn configure_as_output(&mut self, pin: u8) -> Result<(), DriverError> {
        self.export(pin).await?;
        if !self.claimed.contains(&pin) {
            self.claimed.push(pin);
        }

        // "low" sets direction and initial value in one write
        tokio::fs::write(self.pin_dir(pin).join("direction"), "low")
            .await
            .map_err(|e| DriverError::Configure {
                pin,
                reason: e.to_string(),
            })?;

        debug!(pin, "Pin configured as output");
        Ok(())
    }

    async fn set_level(&mut self, pin: u8, level: PinLevel) -> Result<(), DriverError> {
        if !self.claimed.contains(&pin) {
            return Err(DriverError::Write {
                pin,
                level,
                reason: "pin not configured".to_string(),
            });
        }

        let value = if level.is_active() { "1" } else { "0" };
        tokio::fs::write(self.pin_dir(pin).join("value"), value)
            .await
            .map_err(|e| DriverError::Write {
                pin,
                level,
                reason: e.to_string(),
            })
    }

    async fn release_all(&mut self) -> Result<(), DriverError> {
        let mut first_error = None;

        for pin in std::mem::take(&mut self.claimed) {
            if let Err(e) = self.unexport(pin).await {
                warn!(pin, error = %e, "Failed to release pin");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
