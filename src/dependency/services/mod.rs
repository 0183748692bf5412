//! Application services for dependency editing and graph views.

mod graph;

pub use graph::{
    AddDependencyRequest, DependencyService, DependencyServiceError, DependencyServiceResult,
    ProjectGraphView,
};
