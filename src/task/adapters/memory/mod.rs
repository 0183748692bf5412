//! In-memory adapters for task ports.

mod activity;
mod task;

pub use activity::InMemoryActivityRepository;
pub use task::InMemoryTaskRepository;
