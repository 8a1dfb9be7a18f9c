//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::Bottle;

/// The result of a create operation: a confirmation line and the new card.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Bottle> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created bottle with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// The result of an update, optionally listing the changes made.
///
/// # Examples
///
/// ```rust
/// use vintner_core::{
///     display::UpdateResult,
///     recipe::{build_bottle, NewBottle, RecipeOptions},
/// };
///
/// let bottle = build_bottle(
///     NewBottle {
///         id: "7".into(),
///         name: None,
///         mass: 3.0,
///         description: None,
///         start_date: "2024-05-01T12:00:00Z".parse()?,
///     },
///     &RecipeOptions::default(),
/// )?;
/// let result = UpdateResult::with_changes(bottle, vec!["Moved to archive".to_string()]);
/// let output = result.to_string();
/// assert!(output.contains("Updated bottle with ID: 7"));
/// assert!(output.contains("- Moved to archive"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<Bottle> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated bottle with ID: {}", self.resource.id)?;

        if self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "No changes.")?;
        } else {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// The result of a delete operation.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Bottle> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted bottle '{}' (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}
