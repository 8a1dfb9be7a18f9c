//! Persistence seam for bottles.
//!
//! The tracker only needs three operations from storage. Concurrent writers
//! of the same id are resolved last-write-wins; there is no version token.

use std::collections::BTreeMap;

use crate::{
    error::{Result, TrackerError},
    models::{Bottle, BottleId},
};

/// Key-value storage of bottles by id.
pub trait BottleStore {
    /// Every stored bottle.
    fn list_all(&self) -> Result<Vec<Bottle>>;

    /// Insert or replace the bottle with the same id.
    fn upsert(&mut self, bottle: &Bottle) -> Result<()>;

    /// Remove the bottle.
    ///
    /// # Errors
    ///
    /// `TrackerError::BottleNotFound` when no bottle has that id.
    fn delete(&mut self, id: &BottleId) -> Result<()>;

    /// A single bottle by id.
    fn get(&self, id: &BottleId) -> Result<Option<Bottle>> {
        Ok(self.list_all()?.into_iter().find(|bottle| &bottle.id == id))
    }
}

/// In-process store, ordered by id.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    bottles: BTreeMap<BottleId, Bottle>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BottleStore for MemoryStore {
    fn list_all(&self) -> Result<Vec<Bottle>> {
        Ok(self.bottles.values().cloned().collect())
    }

    fn upsert(&mut self, bottle: &Bottle) -> Result<()> {
        self.bottles.insert(bottle.id.clone(), bottle.clone());
        Ok(())
    }

    fn delete(&mut self, id: &BottleId) -> Result<()> {
        self.bottles
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| TrackerError::BottleNotFound { id: id.to_string() })
    }

    fn get(&self, id: &BottleId) -> Result<Option<Bottle>> {
        Ok(self.bottles.get(id).cloned())
    }
}
