//! Layout tuning knobs.

use serde::{Deserialize, Serialize};

/// Axis along which ranks advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    /// Prerequisites at the top, dependents below.
    #[default]
    TopToBottom,
    /// Prerequisites on the left, dependents to the right.
    LeftToRight,
}

/// Configuration for [`LayoutEngine`](super::LayoutEngine).
///
/// # Examples
///
/// ```
/// use taskgraph::layout::LayoutConfig;
///
/// let config = LayoutConfig::default();
/// assert_eq!(config.node_spacing, 250);
///
/// let compact = LayoutConfig::compact();
/// assert!(compact.node_spacing < config.node_spacing);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance between consecutive ranks.
    pub rank_spacing: u32,
    /// Distance between neighbouring nodes within a rank.
    pub node_spacing: u32,
    /// Number of crossing-reduction sweeps, alternating down and up.
    pub ordering_passes: usize,
    /// Axis along which ranks advance.
    pub direction: LayoutDirection,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rank_spacing: 100,
            node_spacing: 250, // 200px card plus gutter
            ordering_passes: 4,
            direction: LayoutDirection::TopToBottom,
        }
    }
}

impl LayoutConfig {
    /// Creates a tighter configuration for small viewports.
    #[must_use]
    pub const fn compact() -> Self {
        Self {
            rank_spacing: 60,
            node_spacing: 180,
            ordering_passes: 2,
            direction: LayoutDirection::TopToBottom,
        }
    }

    /// Creates a roomier configuration with more crossing-reduction sweeps.
    #[must_use]
    pub const fn spacious() -> Self {
        Self {
            rank_spacing: 150,
            node_spacing: 320,
            ordering_passes: 8,
            direction: LayoutDirection::TopToBottom,
        }
    }
}
