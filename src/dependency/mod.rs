//! Task dependencies: the per-project graph store and its cycle guard.
//!
//! An edge "B depends on A" means A must be completed before B. The edge set
//! of a project is kept acyclic at all times. Module layout:
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
