use async_trait::async_trait;
use domain::{DriverError, GpioController, GpioProvider, PinLevel};
use std::collections::BTreeMap;

/// Log-only GPIO for development hosts
pub struct SimulatedGpioProvider;

impl GpioProvider for SimulatedGpioProvider {
    fn open(&self) -> Result<Box<dyn GpioController>, DriverError> {
        Ok(Box::new(SimulatedGpio::default()))
    }

    fn name(&self) -> &str {
        "simulated"
    }
}

#[derive(Default)]
struct SimulatedGpio {
    levels: BTreeMap<u8, PinLevel>,
}

#[async_trait]
impl GpioController for SimulatedGpio {
    async fn configure_as_output(&mut self, pin: u8) -> Result<(), DriverError> {
        tracing::info!(pin, "Simulator configured output");
        self.levels.insert(pin, PinLevel::Low);
        Ok(())
    }

    async fn set_level(&mut self, pin: u8, level: PinLevel) -> Result<(), DriverError> {
        match self.levels.get_mut(&pin) {
            Some(current) => {
                *current = level;
                tracing::info!(pin, level = %level, "Simulator set level");
                Ok(())
            }
            None => Err(DriverError::Write {
                pin,
                level,
                reason: "pin not configured".to_string(),
            }),
        }
    }

    async fn release_all(&mut self) -> Result<(), DriverError> {
        tracing::info!(pins = ?self.levels.keys().collect::<Vec<_>>(), "Simulator released pins");
        self.levels.clear();
        Ok(())
    }
}
