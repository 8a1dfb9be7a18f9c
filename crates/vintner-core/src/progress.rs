//! Percentage-complete and milestone placement along a bottle's timeline.
//!
//! The timeline runs from the start date to the date of the last step. When
//! any step date is missing or unparseable, a synthetic timeline of
//! `max(day) × 24h` from the start is used instead.

use jiff::{SignedDuration, Timestamp};
use serde::Serialize;

use crate::{
    models::{Bottle, BottleStatus},
    process,
};

const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

/// A marker on the progress bar for one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Milestone {
    pub day: u32,
    /// Position along the bar, 0..=100
    pub position: f64,
    pub is_completed: bool,
    /// The earliest step, pinned to the start of the bar
    pub is_start: bool,
}

/// Progress of one bottle at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    /// Share of the timeline elapsed, 0..=100
    pub percent: f64,
    pub milestones: Vec<Milestone>,
}

enum Timeline {
    /// Every step carries a valid date
    Dated { start: Timestamp, total_minutes: f64 },
    /// Day labels only, anchored at the start when it is known
    Synthetic {
        start: Option<Timestamp>,
        total_minutes: f64,
    },
}

impl Timeline {
    fn for_bottle(bottle: &Bottle) -> Self {
        let start = bottle.start_date.timestamp();
        let last_dated = bottle
            .steps
            .iter()
            .map(|step| step.scheduled_at())
            .collect::<Option<Vec<_>>>()
            .and_then(|_| bottle.steps.iter().max_by_key(|step| step.day))
            .and_then(|step| step.scheduled_at());

        match (start, last_dated) {
            (Some(start), Some(end)) => Self::Dated {
                start,
                total_minutes: minutes(end.duration_since(start)).max(1.0),
            },
            _ => {
                let max_day = bottle.steps.iter().map(|step| step.day).max().unwrap_or(0);
                Self::Synthetic {
                    start,
                    total_minutes: (f64::from(max_day) * MINUTES_PER_DAY).max(1.0),
                }
            }
        }
    }

    fn start(&self) -> Option<Timestamp> {
        match self {
            Self::Dated { start, .. } => Some(*start),
            Self::Synthetic { start, .. } => *start,
        }
    }

    fn total_minutes(&self) -> f64 {
        match self {
            Self::Dated { total_minutes, .. } | Self::Synthetic { total_minutes, .. } => {
                *total_minutes
            }
        }
    }
}

fn minutes(duration: SignedDuration) -> f64 {
    duration.as_secs_f64() / 60.0
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Compute progress and milestones for `bottle` at `now`.
pub fn compute(bottle: &Bottle, now: Timestamp) -> Progress {
    let timeline = Timeline::for_bottle(bottle);
    let total = timeline.total_minutes();

    let percent = if process::status(bottle, now) == BottleStatus::Completed {
        100.0
    } else {
        timeline
            .start()
            .map(|start| clamp_percent(minutes(now.duration_since(start)) / total * 100.0))
            .unwrap_or(0.0)
    };

    Progress {
        percent,
        milestones: milestones(bottle, &timeline),
    }
}

fn milestones(bottle: &Bottle, timeline: &Timeline) -> Vec<Milestone> {
    let mut steps: Vec<_> = bottle.steps.iter().collect();
    steps.sort_by_key(|step| step.day);
    steps.dedup_by_key(|step| step.day);

    let total = timeline.total_minutes();
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let offset_minutes = match timeline {
                Timeline::Dated { start, .. } => step
                    .scheduled_at()
                    .map(|at| minutes(at.duration_since(*start)))
                    .unwrap_or(0.0),
                Timeline::Synthetic { .. } => {
                    f64::from(step.day.saturating_sub(1)) * MINUTES_PER_DAY
                }
            };
            let is_start = index == 0;
            Milestone {
                day: step.day,
                position: if is_start {
                    0.0
                } else {
                    clamp_percent(offset_minutes / total * 100.0)
                },
                is_completed: step.is_completed,
                is_start,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{BottleId, RecordedDate, Step},
        process::complete_step,
        recipe::{build_bottle, NewBottle, RecipeOptions},
    };

    fn start() -> Timestamp {
        "2024-05-01T12:00:00Z".parse().unwrap()
    }

    fn bottle() -> Bottle {
        build_bottle(
            NewBottle {
                id: BottleId::new("p"),
                name: None,
                mass: 6.0,
                description: None,
                start_date: start(),
            },
            &RecipeOptions::default(),
        )
        .unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_percent_halfway() {
        let now = start() + SignedDuration::from_hours(6 * 24);
        let progress = compute(&bottle(), now);
        assert!(close(progress.percent, 50.0));
    }

    #[test]
    fn test_percent_is_clamped() {
        let before = start() - SignedDuration::from_hours(48);
        assert_eq!(compute(&bottle(), before).percent, 0.0);

        let long_after = start() + SignedDuration::from_hours(100 * 24);
        assert_eq!(compute(&bottle(), long_after).percent, 100.0);
    }

    #[test]
    fn test_completed_forces_hundred() {
        let mut b = bottle();
        for day in [1, 10, 13] {
            b = complete_step(&b, day).unwrap();
        }
        assert_eq!(compute(&b, start()).percent, 100.0);
    }

    #[test]
    fn test_milestone_positions() {
        let progress = compute(&bottle(), start());
        let positions: Vec<(u32, f64)> = progress
            .milestones
            .iter()
            .map(|m| (m.day, m.position))
            .collect();
        assert_eq!(positions.len(), 3);
        assert_eq!(positions[0], (1, 0.0));
        assert!(close(positions[1].1, 75.0));
        assert!(close(positions[2].1, 100.0));
        assert!(progress.milestones[0].is_start);
    }

    #[test]
    fn test_synthetic_timeline_when_a_date_is_invalid() {
        let mut b = bottle();
        b.steps[1].date = Some(RecordedDate::Invalid("??".to_string()));
        let now = start() + SignedDuration::from_hours(13 * 12);
        let progress = compute(&b, now);

        assert!(close(progress.percent, 50.0));
        assert!(close(progress.milestones[1].position, 9.0 / 13.0 * 100.0));
        assert!(close(progress.milestones[2].position, 12.0 / 13.0 * 100.0));
    }

    #[test]
    fn test_start_marker_is_pinned_and_duplicates_collapse() {
        let mut b = bottle();
        b.steps[0].date = Some((start() + SignedDuration::from_hours(24)).into());
        b.steps.push(Step {
            day: 13,
            date: b.steps[2].date.clone(),
            title: "dup".to_string(),
            ingredients: String::new(),
            is_completed: false,
        });
        let progress = compute(&b, start());
        assert_eq!(progress.milestones.len(), 3);
        assert_eq!(progress.milestones[0].position, 0.0);
    }

    #[test]
    fn test_invalid_start_date() {
        let mut b = bottle();
        b.start_date = RecordedDate::Invalid("soon".to_string());
        let progress = compute(&b, start());
        assert_eq!(progress.percent, 0.0);
        assert_eq!(progress.milestones.len(), 3);
    }
}
