//! Kanban board interaction: optimistic status changes with rollback.
//!
//! A card dragged to another column shows its new status immediately. The
//! change is then persisted; if persistence fails or times out, the card
//! returns to its original column and a notice is emitted. Module layout:
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
