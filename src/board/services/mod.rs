//! Application services for board interaction.

mod config;
mod coordinator;

pub use config::CoordinatorConfig;
pub use coordinator::{BoardCoordinator, BoardResult};
