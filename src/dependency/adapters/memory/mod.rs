//! In-memory adapters for dependency ports.

mod edge;

pub use edge::InMemoryDependencyRepository;
