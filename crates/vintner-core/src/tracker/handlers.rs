//! Tracker handlers that return formatted wrapper types.

use jiff::Timestamp;

use super::Tracker;
use crate::{
    dashboard::BottleView,
    display::{CreateResult, DeleteResult, LocalDate, UpdateResult},
    error::{Result, TrackerError},
    models::Bottle,
    params::{CompleteStep, CreateBottle, DeleteBottle, EditBottle, Id, SetArchived},
};

fn describe_changes(before: &Bottle, after: &Bottle) -> Vec<String> {
    let mut changes = Vec::new();
    if before.name != after.name {
        changes.push(format!("Renamed to '{}'", after.name));
    }
    if before.description != after.description {
        changes.push(match &after.description {
            Some(_) => "Updated description".to_string(),
            None => "Cleared description".to_string(),
        });
    }
    if before.mass != after.mass {
        changes.push(format!(
            "Mass {} kg -> {} kg (recipe regenerated)",
            before.mass, after.mass
        ));
    }
    if before.start_date != after.start_date {
        let start = match after.start_date.timestamp() {
            Some(ts) => LocalDate(&ts).to_string(),
            None => after.start_date.to_string(),
        };
        changes.push(format!("Start date set to {start}"));
    }
    changes
}

impl Tracker {
    /// Handle showing one bottle with its derived state at `now`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use vintner_core::{params::Id, TrackerBuilder};
    /// # async {
    /// let tracker = TrackerBuilder::new().build().await?;
    /// let view = tracker
    ///     .show(&Id { id: "1714564800000".to_string() }, jiff::Timestamp::now())
    ///     .await?;
    /// # Result::<(), vintner_core::TrackerError>::Ok(())
    /// # };
    /// ```
    pub async fn show(&self, params: &Id, now: Timestamp) -> Result<Option<BottleView>> {
        let bottle = self.get(params).await?;
        Ok(bottle.map(|bottle| BottleView::new(&bottle, now)))
    }

    /// Handle creating a new bottle.
    pub async fn create_result(&self, params: &CreateBottle) -> Result<CreateResult<Bottle>> {
        let bottle = self.create(params).await?;
        Ok(CreateResult::new(bottle))
    }

    /// Handle an edit, listing what changed.
    pub async fn edit_result(&self, params: &EditBottle) -> Result<UpdateResult<Bottle>> {
        let before = self
            .get(&Id {
                id: params.id.clone(),
            })
            .await?
            .ok_or_else(|| TrackerError::BottleNotFound {
                id: params.id.clone(),
            })?;
        let after = self.edit(params).await?;
        let changes = describe_changes(&before, &after);
        Ok(UpdateResult::with_changes(after, changes))
    }

    /// Handle completing a step.
    pub async fn complete_step_result(
        &self,
        params: &CompleteStep,
    ) -> Result<UpdateResult<Bottle>> {
        let bottle = self.complete_step(params).await?;
        let title = bottle
            .step(params.day)
            .map(|step| step.title.clone())
            .unwrap_or_default();
        Ok(UpdateResult::with_changes(
            bottle,
            vec![format!("Completed day {}: {title}", params.day)],
        ))
    }

    /// Handle archiving or restoring a bottle.
    pub async fn set_archived_result(&self, params: &SetArchived) -> Result<UpdateResult<Bottle>> {
        let bottle = self.set_archived(params).await?;
        let change = if params.archived {
            "Moved to archive"
        } else {
            "Restored from archive"
        };
        Ok(UpdateResult::with_changes(bottle, vec![change.to_string()]))
    }

    /// Handle deleting a bottle.
    pub async fn delete_result(&self, params: &DeleteBottle) -> Result<DeleteResult<Bottle>> {
        let bottle = self.delete(params).await?;
        Ok(DeleteResult::new(bottle))
    }
}
