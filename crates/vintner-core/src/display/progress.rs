//! Text progress bar.

use std::fmt;

use crate::progress::Progress;

const DEFAULT_WIDTH: usize = 24;
const FILLED: char = '█';
const EMPTY: char = '░';
const DONE_TICK: char = '●';
const PENDING_TICK: char = '○';

/// Renders a [`Progress`] as a fixed-width bar with one tick per milestone,
/// followed by the rounded percentage.
///
/// # Examples
///
/// ```rust
/// use vintner_core::{
///     display::ProgressBar,
///     progress::{Milestone, Progress},
/// };
///
/// let progress = Progress {
///     percent: 50.0,
///     milestones: vec![Milestone { day: 1, position: 0.0, is_completed: true, is_start: true }],
/// };
/// assert_eq!(
///     ProgressBar::new(&progress).with_width(10).to_string(),
///     "`●████░░░░░` 50%"
/// );
/// ```
pub struct ProgressBar<'a> {
    progress: &'a Progress,
    width: usize,
}

impl<'a> ProgressBar<'a> {
    pub fn new(progress: &'a Progress) -> Self {
        Self {
            progress,
            width: DEFAULT_WIDTH,
        }
    }

    /// Number of cells in the bar; at least 2.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(2);
        self
    }

    fn cell(&self, position: f64) -> usize {
        let last = (self.width - 1) as f64;
        ((position / 100.0 * last).round() as usize).min(self.width - 1)
    }
}

impl fmt::Display for ProgressBar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filled = ((self.progress.percent / 100.0 * self.width as f64).round() as usize)
            .min(self.width);
        let mut cells: Vec<char> = (0..self.width)
            .map(|i| if i < filled { FILLED } else { EMPTY })
            .collect();
        for milestone in &self.progress.milestones {
            cells[self.cell(milestone.position)] = if milestone.is_completed {
                DONE_TICK
            } else {
                PENDING_TICK
            };
        }
        let bar: String = cells.into_iter().collect();
        write!(f, "`{bar}` {:.0}%", self.progress.percent)
    }
}
