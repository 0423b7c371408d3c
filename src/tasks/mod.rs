//! Background Tasks
//!
//! Work that runs beside a `CachingClient` for the life of the process.

mod cleanup;

pub use cleanup::spawn_cleanup_task;
