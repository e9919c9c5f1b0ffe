use conveyor_common::job::Job;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

/*
    Job Executor
    Pure mapping from a job to success or failure, simulating bounded processing latency.
    Deterministic: the "error" sentinel payload always fails, any other payload succeeds.
    Holds no state, so any number of workers may call it concurrently.
*/

pub const PROCESSING_DELAY: Duration = Duration::from_secs(2);
pub const ERROR_SENTINEL: &str = "error";

pub async fn execute(job: &Job) -> Result<(), ProcessingError> {
    sleep(PROCESSING_DELAY).await;

    if job.payload == ERROR_SENTINEL {
        return Err(ProcessingError::Simulated { job_id: job.id });
    }

    Ok(())
}

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("simulated error processing job {job_id}")]
    Simulated { job_id: u64 },
}
