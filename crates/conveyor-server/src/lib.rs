pub mod api;
pub mod state;

use application::{ActuationDispatcher, ActuationPolicy, ConveyorDriver};
use domain::GpioProvider;
use infrastructure::ConveyorConfig;
use state::AppState;
use std::sync::Arc;

pub fn setup_app_state(dispatcher: ActuationDispatcher) -> Arc<AppState> {
    Arc::new(AppState::new(dispatcher))
}

/// Wire driver and dispatcher from configuration
pub fn build_dispatcher(
    config: &ConveyorConfig,
    provider: Arc<dyn GpioProvider>,
) -> anyhow::Result<ActuationDispatcher> {
    let driver = ConveyorDriver::new(provider, config.pin_map()?, config.hold()?);
    let policy = if config.actuation.serialize {
        ActuationPolicy::Serialized
    } else {
        ActuationPolicy::Concurrent
    };
    Ok(ActuationDispatcher::new(Arc::new(driver), policy))
}

/// One in-process actuation for a raw classification result.
/// Unknown results log a warning and leave the hardware untouched.
pub async fn run_pulse(dispatcher: &ActuationDispatcher, result: &str) -> anyhow::Result<()> {
    dispatcher.driver().actuate_raw(result).await?;
    Ok(())
}
