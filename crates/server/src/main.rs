use clap::Parser;
use conveyor_common::graceful_shutdown::shutdown_signal;
use conveyor_server::cli::ServerCommand;
use conveyor_server::lifecycle::{self, LifecycleConfig};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).try_init();

    let ServerCommand { port, queue_capacity, workers, grace_period_secs } = ServerCommand::parse();
    let config = LifecycleConfig {
        port,
        queue_capacity,
        workers,
        grace_period: Duration::from_secs(grace_period_secs),
    };

    lifecycle::run(config, shutdown_signal()).await?;
    Ok(())
}
