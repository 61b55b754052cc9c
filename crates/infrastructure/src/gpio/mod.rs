pub mod mock;
mod simulated;
mod sysfs;

pub use mock::{GpioCall, GpioFault, GpioOp, MockGpioProvider};
pub use simulated::SimulatedGpioProvider;
pub use sysfs::{DEFAULT_SYSFS_ROOT, SysfsGpio, SysfsGpioProvider};

use crate::config::GpioConfig;
use domain::{GpioBackendKind, GpioProvider};
use std::sync::Arc;

/// Factory for creating GPIO providers
pub struct GpioProviderFactory;

impl GpioProviderFactory {
    /// Create a provider for the configured backend
    pub fn create(kind: GpioBackendKind, config: &GpioConfig) -> Arc<dyn GpioProvider> {
        match kind {
            GpioBackendKind::Sysfs => Arc::new(SysfsGpioProvider::new(&config.sysfs_root)),
            GpioBackendKind::Simulated => Arc::new(SimulatedGpioProvider),
        }
    }
}
