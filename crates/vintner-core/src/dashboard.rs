//! Urgency buckets for the dashboard.
//!
//! Every non-archived bottle is classified by its earliest pending step:
//!
//! ```text
//! no pending step            -> Completed
//! pending date unusable      -> Error
//! pending date <= now        -> Today
//! otherwise                  -> InDays(max(1, floor((date - now) / 24h)))
//! ```
//!
//! Archived bottles always go to [`Bucket::Archived`]. Groups are emitted in
//! display order: `Today` (when non-empty), `InDays(1)` (always), remaining
//! `InDays` ascending, then `Completed`, `Error` and `Archived` (when
//! non-empty).

use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::Serialize;

use crate::{
    countdown::{countdown, Countdown},
    models::{Bottle, BottleStatus},
    process,
    progress::{self, Progress},
};

const SECS_PER_DAY: i64 = 24 * 60 * 60;

/// CLDR-style plural category used for the word "day".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralCategory {
    One,
    Few,
    Many,
}

/// Select the plural category for `n`.
///
/// # Examples
///
/// ```rust
/// use vintner_core::dashboard::{plural_category, PluralCategory};
///
/// assert_eq!(plural_category(1), PluralCategory::One);
/// assert_eq!(plural_category(2), PluralCategory::Few);
/// assert_eq!(plural_category(11), PluralCategory::Many);
/// assert_eq!(plural_category(21), PluralCategory::One);
/// ```
pub fn plural_category(n: u64) -> PluralCategory {
    let last_two = n % 100;
    let last = n % 10;
    if (11..=19).contains(&last_two) {
        PluralCategory::Many
    } else if last == 1 {
        PluralCategory::One
    } else if (2..=4).contains(&last) {
        PluralCategory::Few
    } else {
        PluralCategory::Many
    }
}

/// The word "day" agreed with `n`.
pub fn day_noun(n: u64) -> &'static str {
    match plural_category(n) {
        PluralCategory::One => "день",
        PluralCategory::Few => "дня",
        PluralCategory::Many => "дней",
    }
}

/// A display grouping of bottles by urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Today,
    InDays(u32),
    Completed,
    Error,
    Archived,
}

impl Bucket {
    /// The "tomorrow" bucket, rendered even when empty.
    pub const TOMORROW: Bucket = Bucket::InDays(1);

    pub fn title(&self) -> String {
        match self {
            Bucket::Today => "Сегодня".to_string(),
            Bucket::InDays(1) => "Завтра".to_string(),
            Bucket::InDays(n) => format!("Через {n} {}", day_noun(u64::from(*n))),
            Bucket::Completed => "Завершенные".to_string(),
            Bucket::Error => "Ошибка данных (нет даты у шага)".to_string(),
            Bucket::Archived => "Архив".to_string(),
        }
    }

    /// Stable machine-readable key, e.g. `today`, `3`, `archived`.
    pub fn key(&self) -> String {
        match self {
            Bucket::Today => "today".to_string(),
            Bucket::InDays(n) => n.to_string(),
            Bucket::Completed => "completed".to_string(),
            Bucket::Error => "error".to_string(),
            Bucket::Archived => "archived".to_string(),
        }
    }
}

/// Classify one bottle at `now`.
///
/// A bottle with an unusable mass or an unreadable start date lands in
/// [`Bucket::Error`] unless archived.
pub fn classify(bottle: &Bottle, now: Timestamp) -> Bucket {
    if bottle.is_archived {
        return Bucket::Archived;
    }
    if !bottle.has_usable_mass() || !bottle.start_date.is_valid() {
        return Bucket::Error;
    }
    let Some(pending) = bottle.earliest_pending() else {
        return Bucket::Completed;
    };
    let Some(due) = pending.scheduled_at() else {
        return Bucket::Error;
    };
    if due <= now {
        return Bucket::Today;
    }
    let days = due.duration_since(now).as_secs() / SECS_PER_DAY;
    Bucket::InDays(u32::try_from(days).unwrap_or(u32::MAX).max(1))
}

/// Everything a card needs, derived from (bottle, now).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BottleView {
    pub bottle: Bottle,
    pub status: BottleStatus,
    pub progress: Progress,
    /// Distance to the earliest pending step, when it has a date
    pub countdown: Option<Countdown>,
}

impl BottleView {
    pub fn new(bottle: &Bottle, now: Timestamp) -> Self {
        let countdown = bottle
            .earliest_pending()
            .and_then(|step| step.scheduled_at())
            .map(|due| countdown(due, now));
        Self {
            bottle: bottle.clone(),
            status: process::status(bottle, now),
            progress: progress::compute(bottle, now),
            countdown,
        }
    }

    fn pending_at(&self) -> Option<Timestamp> {
        self.bottle
            .earliest_pending()
            .and_then(|step| step.scheduled_at())
    }
}

/// One titled group of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketGroup {
    pub bucket: Bucket,
    pub title: String,
    pub bottles: Vec<BottleView>,
}

impl BucketGroup {
    fn new(bucket: Bucket, mut bottles: Vec<BottleView>) -> Self {
        bottles.sort_by(|a, b| {
            a.pending_at()
                .cmp(&b.pending_at())
                .then_with(|| a.bottle.name.cmp(&b.bottle.name))
                .then_with(|| a.bottle.id.cmp(&b.bottle.id))
        });
        Self {
            bucket,
            title: bucket.title(),
            bottles,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bottles.is_empty()
    }
}

/// The full grouped view at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub generated_at: Timestamp,
    pub groups: Vec<BucketGroup>,
}

impl Dashboard {
    /// Classify and sort `bottles` into display groups.
    pub fn build(bottles: &[Bottle], now: Timestamp) -> Self {
        let mut today = Vec::new();
        let mut upcoming: BTreeMap<u32, Vec<BottleView>> = BTreeMap::new();
        let mut completed = Vec::new();
        let mut error = Vec::new();
        let mut archived = Vec::new();

        for bottle in bottles {
            let view = BottleView::new(bottle, now);
            match classify(bottle, now) {
                Bucket::Today => today.push(view),
                Bucket::InDays(n) => upcoming.entry(n).or_default().push(view),
                Bucket::Completed => completed.push(view),
                Bucket::Error => error.push(view),
                Bucket::Archived => archived.push(view),
            }
        }

        let mut groups = Vec::new();
        if !today.is_empty() {
            groups.push(BucketGroup::new(Bucket::Today, today));
        }
        groups.push(BucketGroup::new(
            Bucket::TOMORROW,
            upcoming.remove(&1).unwrap_or_default(),
        ));
        for (days, views) in upcoming {
            groups.push(BucketGroup::new(Bucket::InDays(days), views));
        }
        for (bucket, views) in [
            (Bucket::Completed, completed),
            (Bucket::Error, error),
            (Bucket::Archived, archived),
        ] {
            if !views.is_empty() {
                groups.push(BucketGroup::new(bucket, views));
            }
        }

        Self {
            generated_at: now,
            groups,
        }
    }

    pub fn group(&self, bucket: Bucket) -> Option<&BucketGroup> {
        self.groups.iter().find(|group| group.bucket == bucket)
    }

    /// Number of bottles across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.bottles.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
