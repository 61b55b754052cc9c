use domain::{Command, DriverError, GpioController, GpioProvider, PinLevel, PinMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// Owns the two conveyor output lines for the duration of one actuation
pub struct ConveyorDriver {
    provider: Arc<dyn GpioProvider>,
    pins: PinMap,
    hold: Duration,
}

impl ConveyorDriver {
    pub fn new(provider: Arc<dyn GpioProvider>, pins: PinMap, hold: Duration) -> Self {
        Self {
            provider,
            pins,
            hold,
        }
    }

    pub fn pins(&self) -> PinMap {
        self.pins
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }

    pub fn backend(&self) -> &str {
        self.provider.name()
    }

    /// Pulse the line selected by `command` high for the hold duration.
    ///
    /// Fails without touching hardware when no context can be opened.
    /// Both pins are released on every exit path. If anything fails after the
    /// context is opened, the selected line is driven low again before release.
    pub async fn actuate(&self, command: Command) -> Result<(), DriverError> {
        let line = command.line();
        let pin = self.pins.pin(line);
        let mut gpio = self.provider.open()?;

        info!(command = %command, line = %line, pin, "Activating conveyor");

        let pulse = self.pulse(&mut *gpio, pin).await;
        if let Err(e) = &pulse {
            error!(command = %command, pin, error = %e, "Actuation failed");
            if let Err(e) = gpio.set_level(pin, PinLevel::Low).await {
                debug!(pin, error = %e, "Could not force line low after failure");
            }
        }

        let released = gpio.release_all().await;
        match &released {
            Ok(()) => debug!(backend = self.provider.name(), "GPIO released"),
            Err(e) => error!(error = %e, "GPIO release failed"),
        }

        pulse?;
        released?;
        info!(command = %command, line = %line, "Conveyor stopped");
        Ok(())
    }

    /// Permissive entry point for callers that skip validation.
    /// Unrecognized results are a no-op and hardware is not touched.
    pub async fn actuate_raw(&self, result: &str) -> Result<(), DriverError> {
        match result.parse::<Command>() {
            Ok(command) => self.actuate(command).await,
            Err(_) => {
                warn!(result = %result, "Unknown result. No action taken.");
                Ok(())
            }
        }
    }

    async fn pulse(&self, gpio: &mut dyn GpioController, pin: u8) -> Result<(), DriverError> {
        for p in self.pins.pins() {
            gpio.configure_as_output(p).await?;
        }

        gpio.set_level(pin, PinLevel::High).await?;
        sleep(self.hold).await;
        gpio.set_level(pin, PinLevel::Low).await
    }
}
