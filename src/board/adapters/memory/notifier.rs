//! Notifier that keeps notices in memory.

use std::sync::{Arc, RwLock};

use crate::board::{domain::TransitionNotice, ports::TransitionNotifier};

/// Thread-safe notifier recording every notice it receives.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransitionNotifier {
    notices: Arc<RwLock<Vec<TransitionNotice>>>,
}

impl InMemoryTransitionNotifier {
    /// Creates an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the notices received so far, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<TransitionNotice> {
        match self.notices.read() {
            Ok(notices) => notices.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl TransitionNotifier for InMemoryTransitionNotifier {
    fn notify(&self, notice: &TransitionNotice) {
        match self.notices.write() {
            Ok(mut notices) => notices.push(notice.clone()),
            Err(poisoned) => poisoned.into_inner().push(notice.clone()),
        }
    }
}
