//! Taskgraph: task dependencies and workflow consistency for project boards.
//!
//! This crate keeps a project's task dependency graph acyclic, lays it out
//! in ranks for drawing, and moves tasks between board columns with
//! optimistic updates that roll back when persistence fails.
//!
//! # Architecture
//!
//! Taskgraph follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory stores)
//!
//! # Modules
//!
//! - [`task`]: Task records, the workflow status machine, and lifecycle
//! - [`dependency`]: Dependency graph store, cycle guard, and editing service
//! - [`layout`]: Layered placement of the dependency graph
//! - [`board`]: Optimistic drag-and-drop status changes with rollback
//! - [`logging`]: Subscriber installation for embedding applications

pub mod board;
pub mod dependency;
pub mod layout;
pub mod logging;
pub mod task;
