//! Notification port for rolled-back transitions.

use crate::board::domain::TransitionNotice;

/// Receives transient user-facing notices.
///
/// Called synchronously after the board state is updated; implementations
/// should hand the notice off rather than block.
pub trait TransitionNotifier: Send + Sync {
    /// Delivers a notice.
    fn notify(&self, notice: &TransitionNotice);
}
