//! Derived bottle status.

use serde::{Deserialize, Serialize};

/// Aggregate status of a bottle, derived from its steps and the current time.
///
/// Never stored; see [`crate::process::status`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BottleStatus {
    /// The next pending step is scheduled in the future
    InProgress,

    /// The next pending step is due or overdue
    ActionRequired,

    /// Every step is completed
    Completed,
}

impl BottleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BottleStatus::InProgress => "in_progress",
            BottleStatus::ActionRequired => "action_required",
            BottleStatus::Completed => "completed",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vintner_core::models::BottleStatus;
    ///
    /// assert_eq!(BottleStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(BottleStatus::ActionRequired.with_icon(), "! Action required");
    /// assert_eq!(BottleStatus::InProgress.with_icon(), "○ In progress");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            BottleStatus::Completed => "✓ Completed",
            BottleStatus::ActionRequired => "! Action required",
            BottleStatus::InProgress => "○ In progress",
        }
    }
}
