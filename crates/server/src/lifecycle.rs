use crate::api::{self, ServerState};
use crate::worker::WorkerPool;
use conveyor_common::queue::JobQueue;
use std::fmt::Display;
use std::future::Future;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::time::timeout;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

/*
    Lifecycle Controller
    Owns startup and shutdown of the whole processor:
    STARTING -> RUNNING -> SHUTTING_DOWN -> STOPPED.
    Shutdown is cooperative. Once the shutdown future resolves, the listener stops
    accepting connections, the queue is closed and the worker pool gets a bounded
    grace period to drain. Whatever is still queued when the grace period elapses
    is abandoned.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Starting,
    Running,
    ShuttingDown,
    Stopped,
}

impl Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleState::Starting => write!(f, "STARTING"),
            LifecycleState::Running => write!(f, "RUNNING"),
            LifecycleState::ShuttingDown => write!(f, "SHUTTING_DOWN"),
            LifecycleState::Stopped => write!(f, "STOPPED"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    pub port: u16,
    pub queue_capacity: usize,
    pub workers: usize,
    pub grace_period: Duration,
}

pub async fn run<S>(config: LifecycleConfig, shutdown: S) -> Result<(), LifecycleError>
where
    S: Future<Output = ()> + Send + 'static,
{
    info!("Lifecycle state: {}", LifecycleState::Starting);
    let queue = Arc::new(JobQueue::new(config.queue_capacity));
    let pool = WorkerPool::new(queue.clone(), config.workers);

    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, config.port)).await?;
    info!("Starting server on port {}", config.port);

    let router = api::router(ServerState { queue: queue.clone() }).layer((
        TraceLayer::new_for_http(),
        // Graceful shutdown waits for outstanding requests to complete. The timeout
        // keeps a stuck request from holding the listener open forever.
        TimeoutLayer::new(Duration::from_secs(10)),
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    ));

    info!("Lifecycle state: {}", LifecycleState::Running);
    axum::serve(listener, router).with_graceful_shutdown(shutdown).await?;

    info!("Lifecycle state: {}", LifecycleState::ShuttingDown);
    queue.close();
    info!("Draining {} queued job(s) across {} worker(s)", queue.len(), config.workers);
    match timeout(config.grace_period, pool.join()).await {
        Ok(()) => info!("All workers exited, queue fully drained"),
        Err(_) => warn!(
            "Grace period of {:?} elapsed, abandoning {} queued job(s)",
            config.grace_period,
            queue.len()
        ),
    }

    info!("Lifecycle state: {}", LifecycleState::Stopped);
    Ok(())
}

#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("io")]
    Io(#[from] std::io::Error),
}
