//! Step model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::RecordedDate;

/// One scheduled action within a bottle's recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Day label within the batch (1-based, unique per bottle)
    pub day: u32,

    /// Scheduled instant; `startDate + (day - 1)` days
    #[serde(default)]
    pub date: Option<RecordedDate>,

    /// Short title of the action
    #[serde(default)]
    pub title: String,

    /// What to add at this step
    #[serde(default)]
    pub ingredients: String,

    /// Completion flag; only ever moves from false to true
    #[serde(default)]
    pub is_completed: bool,
}

impl Step {
    /// The scheduled instant, when present and parseable.
    pub fn scheduled_at(&self) -> Option<Timestamp> {
        self.date.as_ref().and_then(RecordedDate::timestamp)
    }
}
