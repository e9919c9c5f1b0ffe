use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::{SystemTime, UNIX_EPOCH};

/*
    Job Object
    This object represents a single unit of background work accepted over the ingress.
    It carries a unique identifier and an opaque payload.
    A job is immutable once created, consumed exactly once by exactly one worker
    and discarded after processing. Nothing about it is persisted.
*/

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    pub payload: String,
}

impl Job {
    pub fn new(id: u64, payload: impl Into<String>) -> Self {
        Self { id, payload: payload.into() }
    }

    /// Fresh time-derived id, epoch nanoseconds.
    /// Monotonic enough within one process; collisions are negligible.
    pub fn time_derived_id() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock is set before the unix epoch")
            .as_nanos() as u64
    }
}

impl Display for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
