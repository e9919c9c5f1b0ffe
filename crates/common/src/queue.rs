use crate::job::Job;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::Notify;

/*
    Job Queue
    Bounded FIFO shared between the ingress (producer side) and the worker pool (consumer side).
    Enqueue never blocks: a full or closed queue rejects the job and the caller surfaces
    backpressure to whoever submitted it.
    Dequeue parks the calling worker until an item is available or the queue is closed and
    fully drained. The internal mutex arbitrates delivery, so no item ever reaches more
    than one consumer.
*/

#[derive(Debug)]
pub struct JobQueue {
    state: Mutex<QueueState>,
    available: Notify,
    capacity: usize,
}

#[derive(Debug)]
struct QueueState {
    items: VecDeque<Job>,
    closed: bool,
}

impl JobQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(QueueState {
                items: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            available: Notify::new(),
            capacity,
        }
    }

    /// Non-blocking push. Returns false when the queue is at capacity or already
    /// closed; the caller must treat false as backpressure, not retry internally.
    pub fn enqueue(&self, job: Job) -> bool {
        let mut state = self.state.lock().expect("job queue lock poisoned");
        if state.closed || state.items.len() >= self.capacity {
            return false;
        }
        state.items.push_back(job);
        drop(state);
        self.available.notify_one();
        true
    }

    /// Parks the calling task until an item is available or the queue is closed
    /// and drained. None is permanent end-of-stream.
    pub async fn dequeue(&self) -> Option<Job> {
        loop {
            let wakeup = self.available.notified();
            tokio::pin!(wakeup);
            // Register before the emptiness check so a notification sent between
            // the check and the await is not lost.
            wakeup.as_mut().enable();
            {
                let mut state = self.state.lock().expect("job queue lock poisoned");
                if let Some(job) = state.items.pop_front() {
                    // enable() may have consumed a permit meant for a parked
                    // consumer; hand the wakeup along while items remain.
                    if !state.items.is_empty() {
                        self.available.notify_one();
                    }
                    return Some(job);
                }
                if state.closed {
                    return None;
                }
            }
            wakeup.await;
        }
    }

    /// Idempotent. No enqueue is accepted afterwards; parked and future consumers
    /// observe end-of-stream once the remaining items are drained.
    pub fn close(&self) {
        let mut state = self.state.lock().expect("job queue lock poisoned");
        state.closed = true;
        drop(state);
        self.available.notify_waiters();
    }

    pub fn len(&self) -> usize {
        self.state.lock().expect("job queue lock poisoned").items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().expect("job queue lock poisoned").closed
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
