use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "conveyor-server")]
#[command(version, about, long_about = None)]
pub struct ServerCommand {
    /// TCP port the ingress listens on
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Maximum number of buffered jobs before enqueues are rejected
    #[arg(long, default_value_t = 10)]
    pub queue_capacity: usize,

    /// Number of concurrent workers draining the queue
    #[arg(long, default_value_t = 3)]
    pub workers: usize,

    /// Upper bound in seconds on the shutdown drain wait
    #[arg(long, default_value_t = 3)]
    pub grace_period_secs: u64,
}
