pub mod graceful_shutdown;
pub mod job;
pub mod queue;
