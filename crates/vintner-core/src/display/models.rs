//! Display implementations for domain models.
//!
//! - [`Bottle`] renders as a static card: metadata, notes and the step list
//! - [`BottleView`] renders the compact dashboard card with status,
//!   countdown and progress
//! - [`BottleReport`] combines both for the `show` output

use std::fmt;

use super::{datetime::LocalDate, progress::ProgressBar};
use crate::{
    dashboard::BottleView,
    models::{Bottle, BottleStatus, RecordedDate, Step},
};

impl fmt::Display for BottleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn write_date(f: &mut fmt::Formatter<'_>, date: &RecordedDate) -> fmt::Result {
    match date {
        RecordedDate::Valid(ts) => write!(f, "{}", LocalDate(ts)),
        RecordedDate::Invalid(raw) => write!(f, "{raw} (unreadable)"),
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = if self.is_completed { "✓" } else { "○" };
        writeln!(f, "### Day {}. {} ({icon})", self.day, self.title)?;
        writeln!(f)?;

        write!(f, "- Date: ")?;
        match &self.date {
            Some(date) => write_date(f, date)?,
            None => write!(f, "not scheduled")?,
        }
        writeln!(f)?;
        if !self.ingredients.is_empty() {
            writeln!(f, "- {}", self.ingredients)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Bottle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;

        write!(f, "- Started: ")?;
        write_date(f, &self.start_date)?;
        writeln!(f)?;
        writeln!(f, "- Mass: {} kg", self.mass)?;
        writeln!(f, "- Final volume: {:.2} l", self.final_volume)?;
        writeln!(f, "- Total sugar: {:.2} kg", self.total_sugar)?;
        writeln!(f, "- Total water: {:.2} l", self.total_water)?;
        if self.is_archived {
            writeln!(f, "- Archived")?;
        }

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if self.steps.is_empty() {
            writeln!(f, "\nNo steps recorded.")?;
        } else {
            writeln!(f, "\n## Steps")?;
            writeln!(f)?;
            for step in &self.steps {
                write!(f, "{step}")?;
            }
        }
        Ok(())
    }
}

impl BottleView {
    fn fmt_next(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.bottle.earliest_pending(), &self.countdown) {
            (None, _) => writeln!(f, "- Next: all steps completed"),
            (Some(step), Some(countdown)) => {
                writeln!(f, "- Next: day {}, {} ({})", step.day, step.title, countdown.label)
            }
            (Some(step), None) => writeln!(
                f,
                "- Next: day {}, {} (no usable date)",
                step.day, step.title
            ),
        }
    }
}

impl fmt::Display for BottleView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {} (ID: {}) {}",
            self.bottle.name,
            self.bottle.id,
            self.status.with_icon()
        )?;
        writeln!(f)?;
        self.fmt_next(f)?;
        writeln!(f, "- Progress: {}", ProgressBar::new(&self.progress))?;
        writeln!(
            f,
            "- {} kg, {:.2} l",
            self.bottle.mass, self.bottle.final_volume
        )?;
        writeln!(f)
    }
}

/// Full output for a single bottle: its card plus the derived state.
pub struct BottleReport<'a>(pub &'a BottleView);

impl fmt::Display for BottleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        write!(f, "{}", view.bottle)?;
        writeln!(f, "\n## Status")?;
        writeln!(f)?;
        writeln!(f, "- {}", view.status.with_icon())?;
        view.fmt_next(f)?;
        writeln!(f, "- Progress: {}", ProgressBar::new(&view.progress))
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::recipe::{build_bottle, NewBottle, RecipeOptions};

    fn bottle() -> Bottle {
        build_bottle(
            NewBottle {
                id: "42".into(),
                name: Some("Cherry".to_string()),
                mass: 6.0,
                description: Some("Dark and sweet".to_string()),
                start_date: "2024-05-01T12:00:00Z".parse().unwrap(),
            },
            &RecipeOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_bottle_card() {
        let out = bottle().to_string();
        assert!(out.starts_with("# Cherry (ID: 42)\n"));
        assert!(out.contains("- Mass: 6 kg"));
        assert!(out.contains("- Total sugar: 5.00 kg"));
        assert!(out.contains("Dark and sweet"));
        assert!(out.contains("### Day 1. Подготовка сусла (○)"));
        assert!(out.contains("- Сахар: 1.00 кг"));
    }

    #[test]
    fn test_unreadable_step_date() {
        let mut bottle = bottle();
        bottle.steps[1].date = Some(RecordedDate::Invalid("soon".to_string()));
        assert!(bottle.to_string().contains("- Date: soon (unreadable)"));
    }

    #[test]
    fn test_view_shows_countdown() {
        let now: Timestamp = "2024-04-30T09:00:00Z".parse().unwrap();
        let view = BottleView::new(&bottle(), now);
        let out = view.to_string();
        assert!(out.contains("○ In progress"));
        assert!(out.contains("- Next: day 1, Подготовка сусла (in 1d 3h)"));
        assert!(out.contains("- Progress: `"));
    }

    #[test]
    fn test_report_of_finished_bottle() {
        let mut bottle = bottle();
        for step in &mut bottle.steps {
            step.is_completed = true;
        }
        let now: Timestamp = "2024-06-01T00:00:00Z".parse().unwrap();
        let view = BottleView::new(&bottle, now);
        let out = BottleReport(&view).to_string();
        assert!(out.contains("## Status"));
        assert!(out.contains("- ✓ Completed"));
        assert!(out.contains("- Next: all steps completed"));
        assert!(out.contains("100%"));
    }
}
