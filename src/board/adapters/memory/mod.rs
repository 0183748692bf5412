//! In-memory adapters for board ports.

mod notifier;

pub use notifier::InMemoryTransitionNotifier;
