use crate::executor::execute;
use conveyor_common::queue::JobQueue;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/*
    Worker Pool
    Fixed set of consumers bound to the shared job queue for their lifetime.
    Each worker repeatedly dequeues, executes and logs the outcome; an executor
    failure is logged and the worker moves on to the next item. Workers exit when
    the queue reports end-of-stream, so the pool terminates only once the queue
    is both closed and fully drained.
*/

pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub fn new(queue: Arc<JobQueue>, workers: usize) -> Self {
        let handles = (1..=workers)
            .map(|id| {
                let queue = queue.clone();
                tokio::spawn(worker_loop(id, queue))
            })
            .collect();
        Self { handles }
    }

    pub fn workers(&self) -> usize {
        self.handles.len()
    }

    /// Resolves once every worker has observed end-of-stream and exited.
    pub async fn join(self) {
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Worker task ended abnormally: {}", e);
            }
        }
    }
}

async fn worker_loop(id: usize, queue: Arc<JobQueue>) {
    while let Some(job) = queue.dequeue().await {
        info!("Worker {} processing job {} with payload: {}", id, job, job.payload);
        match execute(&job).await {
            Ok(()) => info!("Worker {} completed job {}", id, job),
            Err(e) => error!("Worker {} failed to process job {}: {}", id, job, e),
        }
    }
    info!("Worker {} exiting: queue closed and drained", id);
}
