use anyhow::Result;
use clap::{Parser, Subcommand};
use domain::GpioBackendKind;
use infrastructure::{ConveyorConfig, GpioProviderFactory};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use conveyor_server::{api, build_dispatcher, run_pulse, setup_app_state};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to config directory
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// Override listen host
    #[arg(long)]
    host: Option<String>,

    /// Override listen port
    #[arg(long)]
    port: Option<u16>,

    /// Override GPIO backend (sysfs | simulated)
    #[arg(long)]
    backend: Option<GpioBackendKind>,

    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Run the HTTP endpoint (default)
    Serve,
    /// Run a single actuation in-process and exit
    Pulse {
        /// Classification result; unknown values are a no-op
        result: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,conveyor_server=debug,application=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // 1. Load Configuration
    let mut config = ConveyorConfig::load(&args.config_dir)?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(backend) = args.backend {
        config.gpio.backend = backend;
    }

    // 2. Hardware + dispatcher
    let provider = GpioProviderFactory::create(config.gpio.backend, &config.gpio);
    info!(
        backend = %provider.name(),
        forward_pin = config.gpio.forward_pin,
        backward_pin = config.gpio.backward_pin,
        hold_ms = config.actuation.hold_ms,
        serialize = config.actuation.serialize,
        "⚙️ GPIO configured"
    );
    let dispatcher = build_dispatcher(&config, provider)?;

    match args.command.unwrap_or(Mode::Serve) {
        Mode::Pulse { result } => {
            info!(result = %result, "🧪 Single actuation requested");
            // Holding the signal handler keeps Ctrl-C from killing the process mid-pulse
            tokio::spawn(async {
                while tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Actuation in progress, finishing before exit");
                }
            });
            run_pulse(&dispatcher, &result).await?;
            info!("✅ Actuation complete");
            Ok(())
        }
        Mode::Serve => serve(config, dispatcher).await,
    }
}

async fn serve(config: ConveyorConfig, dispatcher: application::ActuationDispatcher) -> Result<()> {
    let state = setup_app_state(dispatcher.clone());
    let app = api::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Conveyor endpoint listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("🛑 Shutting down..."),
                Err(err) => {
                    warn!(error = %err, "Unable to listen for shutdown signal");
                    std::future::pending::<()>().await
                }
            }
        })
        .await?;

    dispatcher.shutdown().await;
    info!("👋 All actuations finished");
    Ok(())
}
