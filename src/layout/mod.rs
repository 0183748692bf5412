//! Layered drawing of the dependency graph.
//!
//! Ranks come from the longest path out of the sources, so every
//! prerequisite sits above (or left of) the tasks that depend on it. Within
//! a rank, a barycenter heuristic reduces edge crossings. The output is
//! independent of any rendering technology.

mod config;
mod engine;
mod error;
mod ordering;
mod rank;

pub use config::{LayoutConfig, LayoutDirection};
pub use engine::{GraphLayout, LayoutEngine, LayoutPosition};
pub use error::LayoutError;

#[cfg(test)]
mod tests;
