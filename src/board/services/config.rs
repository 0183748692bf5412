//! Coordinator tuning knobs.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for [`BoardCoordinator`](super::BoardCoordinator).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use taskgraph::board::services::CoordinatorConfig;
///
/// let config = CoordinatorConfig::default();
/// assert_eq!(config.persistence_timeout, Duration::from_secs(10));
///
/// let eager = CoordinatorConfig::fail_fast();
/// assert!(eager.persistence_timeout < config.persistence_timeout);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Upper bound on a status write; exceeding it reverts the card.
    pub persistence_timeout: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            persistence_timeout: Duration::from_secs(10),
        }
    }
}

impl CoordinatorConfig {
    /// Creates a configuration that gives up on slow writes quickly.
    ///
    /// Useful when the backing store is local and stalls mean trouble.
    #[must_use]
    pub const fn fail_fast() -> Self {
        Self {
            persistence_timeout: Duration::from_secs(2),
        }
    }

    /// Replaces the persistence timeout.
    #[must_use]
    pub const fn with_persistence_timeout(mut self, timeout: Duration) -> Self {
        self.persistence_timeout = timeout;
        self
    }
}
