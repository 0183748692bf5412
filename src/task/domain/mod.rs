//! Domain model for tasks and their workflow.
//!
//! Tasks belong to a project, move freely between the four board statuses,
//! and report every attribute change as a [`FieldChange`] so services can
//! keep an activity log. Infrastructure concerns stay outside this module.

mod activity;
mod error;
mod ids;
mod status;
mod task;

pub use activity::{ActivityAction, ActivityEntry, FieldChange, TaskField};
pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{ActivityId, ProjectId, TaskId, UserId};
pub use status::{TaskPriority, TaskStatus};
pub use task::{PersistedTaskData, Task, TaskTitle};
