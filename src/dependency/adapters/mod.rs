//! Adapter implementations for dependency ports.

pub mod memory;
