//! Step completion transitions and derived bottle status.

use jiff::Timestamp;

use crate::{
    error::{Result, TrackerError},
    models::{Bottle, BottleStatus},
};

/// Derive the aggregate status of `bottle` at `now`.
///
/// A pending step without a usable date is reported as
/// [`BottleStatus::InProgress`]; the dashboard files such bottles under its
/// error group instead.
pub fn status(bottle: &Bottle, now: Timestamp) -> BottleStatus {
    match bottle.earliest_pending() {
        None => BottleStatus::Completed,
        Some(step) => match step.scheduled_at() {
            Some(due) if due <= now => BottleStatus::ActionRequired,
            _ => BottleStatus::InProgress,
        },
    }
}

/// Mark the step with `day` completed.
///
/// Completing an already completed step returns an identical bottle. Only
/// the earliest pending step may be completed.
///
/// # Errors
///
/// * `TrackerError::StepNotFound` - no step carries that day label
/// * `TrackerError::OutOfOrderCompletion` - an earlier step is still pending
pub fn complete_step(bottle: &Bottle, day: u32) -> Result<Bottle> {
    let target = bottle
        .steps
        .iter()
        .position(|step| step.day == day)
        .ok_or_else(|| TrackerError::StepNotFound {
            bottle_id: bottle.id.to_string(),
            day,
        })?;

    if bottle.steps[target].is_completed {
        return Ok(bottle.clone());
    }

    if let Some(pending) = bottle.earliest_pending() {
        if pending.day != day {
            return Err(TrackerError::OutOfOrderCompletion {
                day,
                pending_day: pending.day,
            });
        }
    }

    let mut updated = bottle.clone();
    updated.steps[target].is_completed = true;
    Ok(updated)
}

/// Set or clear the archive flag.
pub fn set_archived(bottle: &Bottle, archived: bool) -> Bottle {
    let mut updated = bottle.clone();
    updated.is_archived = archived;
    updated
}
