//! Port contracts for board collaborators.

pub mod notifier;

pub use notifier::TransitionNotifier;
