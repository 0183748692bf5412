//! Task management: the workflow state machine and task lifecycle.
//!
//! Tasks live inside a project and move between the `todo`, `in_progress`,
//! `review`, and `done` columns of a board. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
