pub mod api;
pub mod cli;
pub mod executor;
pub mod lifecycle;
pub mod worker;
