use conveyor_common::{job::Job, queue::JobQueue};
use conveyor_server::lifecycle::{self, LifecycleConfig};
use conveyor_server::worker::WorkerPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

#[tokio::test(start_paused = true)]
async fn generous_grace_period_drains_every_queued_job() {
    let queue = Arc::new(JobQueue::new(10));
    for id in 1..=5 {
        assert!(queue.enqueue(Job::new(id, "payload")));
    }
    let pool = WorkerPool::new(queue.clone(), 3);

    queue.close();
    // 5 jobs at 2s each over 3 workers: two waves, well inside the deadline.
    let drained = timeout(Duration::from_secs(30), pool.join()).await;
    assert!(drained.is_ok());
    assert!(queue.is_empty());
}

#[tokio::test(start_paused = true)]
async fn short_grace_period_abandons_the_backlog() {
    let queue = Arc::new(JobQueue::new(10));
    for id in 1..=5 {
        assert!(queue.enqueue(Job::new(id, "payload")));
    }
    let pool = WorkerPool::new(queue.clone(), 1);

    queue.close();
    let drained = timeout(Duration::from_secs(3), pool.join()).await;
    assert!(drained.is_err());
    // Abandoned work stays queued; nothing panics, the process just exits.
    assert!(!queue.is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_job_does_not_stall_the_drain() {
    let queue = Arc::new(JobQueue::new(4));
    assert!(queue.enqueue(Job::new(1, "error")));
    assert!(queue.enqueue(Job::new(2, "fine")));
    assert!(queue.enqueue(Job::new(3, "also-fine")));
    let pool = WorkerPool::new(queue.clone(), 1);

    queue.close();
    let drained = timeout(Duration::from_secs(10), pool.join()).await;
    assert!(drained.is_ok());
    assert!(queue.is_empty());
}

#[tokio::test]
async fn lifecycle_stops_cleanly_on_explicit_stop() {
    let stop = CancellationToken::new();
    let config = LifecycleConfig {
        port: 0,
        queue_capacity: 4,
        workers: 2,
        grace_period: Duration::from_secs(1),
    };

    let controller = tokio::spawn(lifecycle::run(config, stop.clone().cancelled_owned()));
    // Give the listener a moment to bind before stopping.
    tokio::time::sleep(Duration::from_millis(50)).await;

    stop.cancel();
    controller.await.unwrap().unwrap();
}
