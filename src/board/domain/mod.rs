//! Domain model for optimistic board transitions.

mod error;
mod notice;
mod transition;

pub use error::{BoardError, PersistenceFailure};
pub use notice::TransitionNotice;
pub use transition::{DropTarget, PendingTransition, TransitionOutcome, TransitionPhase};
