//! Bottle operations for the Tracker.

use jiff::Timestamp;
use serde_json::Value;

use super::Tracker;
use crate::{
    dashboard::Dashboard,
    error::Result,
    models::{Bottle, BottleId},
    operations,
    params::{CompleteStep, CreateBottle, DeleteBottle, EditBottle, Id, SetArchived},
    store::BottleStore,
};

impl Tracker {
    /// Registers a new bottle created now.
    pub async fn create(&self, params: &CreateBottle) -> Result<Bottle> {
        let params = params.clone();
        let options = self.options;
        self.with_database(move |db| {
            operations::create_bottle(db, &params, &options, Timestamp::now())
        })
        .await
    }

    /// Retrieves a bottle by ID, or `None` when there is none.
    pub async fn get(&self, params: &Id) -> Result<Option<Bottle>> {
        let id = BottleId::from(params.id.as_str());
        self.with_database(move |db| db.get(&id)).await
    }

    /// Every stored bottle, ordered by ID.
    pub async fn list_all(&self) -> Result<Vec<Bottle>> {
        self.with_database(|db| db.list_all()).await
    }

    /// Edits name, description, mass or start date.
    pub async fn edit(&self, params: &EditBottle) -> Result<Bottle> {
        let params = params.clone();
        self.with_database(move |db| operations::edit_bottle(db, &params))
            .await
    }

    /// Marks the earliest pending step completed.
    pub async fn complete_step(&self, params: &CompleteStep) -> Result<Bottle> {
        let params = params.clone();
        self.with_database(move |db| operations::complete_step(db, &params))
            .await
    }

    /// Sets or clears the archive flag.
    pub async fn set_archived(&self, params: &SetArchived) -> Result<Bottle> {
        let params = params.clone();
        self.with_database(move |db| operations::set_archived(db, &params))
            .await
    }

    /// Permanently deletes a confirmed bottle.
    pub async fn delete(&self, params: &DeleteBottle) -> Result<Bottle> {
        let params = params.clone();
        self.with_database(move |db| operations::delete_bottle(db, &params))
            .await
    }

    /// Groups every bottle for display at `now`.
    pub async fn dashboard(&self, now: Timestamp) -> Result<Dashboard> {
        self.with_database(move |db| operations::dashboard(db, now))
            .await
    }

    /// Imports records exported by the first clients (a JSON array).
    pub async fn import_legacy(&self, records: Vec<Value>) -> Result<usize> {
        self.with_database(move |db| db.import_legacy(&records))
            .await
    }

    /// Every bottle in its canonical record form.
    pub async fn export(&self) -> Result<Vec<Bottle>> {
        self.list_all().await
    }
}
