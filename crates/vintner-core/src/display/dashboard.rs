//! Dashboard output.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::dashboard::{Bucket, BucketGroup, Dashboard};

/// Shown under the tomorrow heading when nothing is due.
pub const EMPTY_TOMORROW: &str = "Нет задач на завтра.";

impl fmt::Display for BucketGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bottles.is_empty() {
            writeln!(f, "## {}", self.title)?;
            writeln!(f)?;
            if self.bucket == Bucket::TOMORROW {
                writeln!(f, "{EMPTY_TOMORROW}")?;
                writeln!(f)?;
            }
            return Ok(());
        }

        writeln!(f, "## {} ({})", self.title, self.bottles.len())?;
        writeln!(f)?;
        for view in &self.bottles {
            write!(f, "{view}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Bottles")?;
        writeln!(f)?;
        writeln!(f, "Updated {}", LocalDateTime(&self.generated_at))?;
        writeln!(f)?;
        for group in &self.groups {
            write!(f, "{group}")?;
        }
        Ok(())
    }
}
