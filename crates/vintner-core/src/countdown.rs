//! Time-remaining labels.
//!
//! Stateless: callers re-run [`countdown`] on their own refresh interval
//! (see [`DEFAULT_REFRESH_INTERVAL`]) to keep labels current.

use std::time::Duration;

use jiff::Timestamp;
use serde::Serialize;

/// How often displays are expected to recompute countdowns.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

const SECS_PER_HOUR: u64 = 60 * 60;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Smallest unit shown in a label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Granularity {
    #[default]
    Hours,
    Minutes,
}

/// A human-readable distance to a target instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub label: String,
    pub is_overdue: bool,
}

/// Label the distance from `now` to `target` with hour granularity.
///
/// # Examples
///
/// ```rust
/// use jiff::{SignedDuration, Timestamp};
/// use vintner_core::countdown::countdown;
///
/// let now: Timestamp = "2024-05-01T12:00:00Z".parse()?;
/// let c = countdown(now + SignedDuration::from_hours(27), now);
/// assert_eq!(c.label, "in 1d 3h");
/// assert!(!c.is_overdue);
///
/// let c = countdown(now - SignedDuration::from_hours(5), now);
/// assert_eq!(c.label, "overdue by 5h");
/// assert!(c.is_overdue);
/// # Ok::<(), jiff::Error>(())
/// ```
pub fn countdown(target: Timestamp, now: Timestamp) -> Countdown {
    countdown_with(target, now, Granularity::Hours)
}

/// Label the distance from `now` to `target`.
///
/// A target at or before `now` is overdue. The days component is omitted
/// when zero; hours are always shown.
pub fn countdown_with(target: Timestamp, now: Timestamp, granularity: Granularity) -> Countdown {
    let is_overdue = target <= now;
    let remaining = target.duration_since(now).as_secs().unsigned_abs();

    let days = remaining / SECS_PER_DAY;
    let hours = (remaining % SECS_PER_DAY) / SECS_PER_HOUR;
    let minutes = (remaining % SECS_PER_HOUR) / 60;

    let mut parts = Vec::with_capacity(3);
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    parts.push(format!("{hours}h"));
    if granularity == Granularity::Minutes {
        parts.push(format!("{minutes}m"));
    }
    let span = parts.join(" ");

    Countdown {
        label: if is_overdue {
            format!("overdue by {span}")
        } else {
            format!("in {span}")
        },
        is_overdue,
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use super::*;

    fn now() -> Timestamp {
        "2024-05-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_future_label() {
        let c = countdown(now() + SignedDuration::from_hours(2 * 24 + 4), now());
        assert_eq!(c.label, "in 2d 4h");
        assert!(!c.is_overdue);
    }

    #[test]
    fn test_zero_days_omitted() {
        let c = countdown(now() + SignedDuration::from_mins(90), now());
        assert_eq!(c.label, "in 1h");
    }

    #[test]
    fn test_exactly_now_is_overdue() {
        let c = countdown(now(), now());
        assert_eq!(c.label, "overdue by 0h");
        assert!(c.is_overdue);
    }

    #[test]
    fn test_sub_second_future_is_not_overdue() {
        let c = countdown(now() + SignedDuration::from_millis(500), now());
        assert_eq!(c.label, "in 0h");
        assert!(!c.is_overdue);
    }

    #[test]
    fn test_overdue_days() {
        let c = countdown(now() - SignedDuration::from_hours(3 * 24 + 1), now());
        assert_eq!(c.label, "overdue by 3d 1h");
    }

    #[test]
    fn test_minutes_granularity() {
        let target = now() + SignedDuration::from_mins(24 * 60 + 125);
        let c = countdown_with(target, now(), Granularity::Minutes);
        assert_eq!(c.label, "in 1d 2h 5m");
    }
}
