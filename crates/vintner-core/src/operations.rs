//! Business operations shared by every interface.
//!
//! Each operation reads the current record from a [`BottleStore`], applies a
//! pure transition from [`recipe`](crate::recipe) or
//! [`process`](crate::process) and writes the whole record back. The async
//! [`Tracker`](crate::Tracker) runs these on a blocking thread against the
//! SQLite store; tests run them against [`MemoryStore`](crate::MemoryStore).

use jiff::Timestamp;
use log::{debug, info};

use crate::{
    dashboard::Dashboard,
    error::{Result, TrackerError},
    models::{Bottle, BottleId, DEFAULT_NAME},
    params::{parse_start_date, CompleteStep, CreateBottle, DeleteBottle, EditBottle, SetArchived},
    process,
    recipe::{self, NewBottle, RecipeOptions},
    store::BottleStore,
};

/// Pick an id for a bottle created at `now`.
///
/// Ids are the creation instant in epoch milliseconds, bumped by one until
/// no stored bottle uses it.
///
/// # Examples
///
/// ```rust
/// # use vintner_core::{operations::generate_id, MemoryStore};
/// let now: jiff::Timestamp = "2024-05-01T12:00:00Z".parse()?;
/// let id = generate_id(&MemoryStore::new(), now)?;
/// assert_eq!(id.as_str(), "1714564800000");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn generate_id<S: BottleStore + ?Sized>(store: &S, now: Timestamp) -> Result<BottleId> {
    let taken: Vec<BottleId> = store.list_all()?.into_iter().map(|b| b.id).collect();
    let mut millis = now.as_millisecond();
    loop {
        let candidate = BottleId::new(millis.to_string());
        if !taken.contains(&candidate) {
            return Ok(candidate);
        }
        millis += 1;
    }
}

/// Load a bottle or fail with `BottleNotFound`.
pub fn get_bottle<S: BottleStore + ?Sized>(store: &S, id: &BottleId) -> Result<Bottle> {
    store
        .get(id)?
        .ok_or_else(|| TrackerError::BottleNotFound { id: id.to_string() })
}

/// Register a new bottle with a freshly generated recipe.
///
/// # Errors
///
/// * `TrackerError::InvalidMass` - mass is not a positive number
/// * `TrackerError::InvalidInput` - start date cannot be parsed
pub fn create_bottle<S: BottleStore + ?Sized>(
    store: &mut S,
    params: &CreateBottle,
    options: &RecipeOptions,
    now: Timestamp,
) -> Result<Bottle> {
    let start_date = parse_start_date(params.start_date.as_deref())?;
    let input = NewBottle {
        id: generate_id(store, now)?,
        name: params.name.clone(),
        mass: params.mass,
        description: params.description.clone(),
        start_date,
    };
    let bottle = recipe::build_bottle(input, options)?;
    store.upsert(&bottle)?;
    info!(
        "Created bottle {} ({}, {} kg, {:.2} l)",
        bottle.id, bottle.name, bottle.mass, bottle.final_volume
    );
    Ok(bottle)
}

/// Apply an edit.
///
/// Changing the mass or the start date regenerates the steps and totals,
/// keeping completion of surviving day labels. Name and description edits
/// leave the schedule alone. An empty description clears it.
///
/// # Errors
///
/// * `TrackerError::BottleNotFound` - no bottle with that id
/// * `TrackerError::InvalidMass` - the new mass is not positive
/// * `TrackerError::InvalidDate` - regeneration needs the stored start date,
///   which is unreadable
pub fn edit_bottle<S: BottleStore + ?Sized>(store: &mut S, params: &EditBottle) -> Result<Bottle> {
    let current = get_bottle(store, &BottleId::from(params.id.as_str()))?;

    let new_start = params
        .start_date
        .as_deref()
        .map(|raw| parse_start_date(Some(raw)))
        .transpose()?;
    let mass_changed = params.mass.is_some_and(|mass| mass != current.mass);
    let start_changed = new_start.is_some_and(|start| current.start_date.timestamp() != Some(start));

    let mut updated = if mass_changed || start_changed {
        let mass = params.mass.unwrap_or(current.mass);
        let start = match new_start {
            Some(start) => start,
            None => current.start_date.require()?,
        };
        debug!("Regenerating recipe for bottle {}", current.id);
        recipe::regenerate(&current, mass, start)?
    } else {
        current.clone()
    };

    if let Some(name) = &params.name {
        let name = name.trim();
        updated.name = if name.is_empty() {
            DEFAULT_NAME.to_string()
        } else {
            name.to_string()
        };
    }
    if let Some(description) = &params.description {
        updated.description = Some(description.clone()).filter(|d| !d.trim().is_empty());
    }

    if updated != current {
        store.upsert(&updated)?;
        info!("Updated bottle {}", updated.id);
    }
    Ok(updated)
}

/// Complete one step. Completing an already completed step is a no-op that
/// writes nothing.
///
/// # Errors
///
/// * `TrackerError::BottleNotFound` - no bottle with that id
/// * `TrackerError::StepNotFound` - no step with that day
/// * `TrackerError::OutOfOrderCompletion` - an earlier step is pending
pub fn complete_step<S: BottleStore + ?Sized>(
    store: &mut S,
    params: &CompleteStep,
) -> Result<Bottle> {
    let current = get_bottle(store, &BottleId::from(params.id.as_str()))?;
    let updated = process::complete_step(&current, params.day)?;
    if updated != current {
        store.upsert(&updated)?;
        info!("Completed day {} of bottle {}", params.day, updated.id);
    }
    Ok(updated)
}

/// Set or clear the archive flag.
pub fn set_archived<S: BottleStore + ?Sized>(store: &mut S, params: &SetArchived) -> Result<Bottle> {
    let current = get_bottle(store, &BottleId::from(params.id.as_str()))?;
    let updated = process::set_archived(&current, params.archived);
    if updated != current {
        store.upsert(&updated)?;
        info!(
            "{} bottle {}",
            if params.archived { "Archived" } else { "Restored" },
            updated.id
        );
    }
    Ok(updated)
}

/// Permanently remove a bottle, returning what was removed.
///
/// # Errors
///
/// * `TrackerError::InvalidInput` - the deletion was not confirmed
/// * `TrackerError::BottleNotFound` - no bottle with that id
pub fn delete_bottle<S: BottleStore + ?Sized>(store: &mut S, params: &DeleteBottle) -> Result<Bottle> {
    if !params.confirmed {
        return Err(TrackerError::invalid_input("confirmed")
            .with_reason("deleting a bottle must be confirmed"));
    }
    let id = BottleId::from(params.id.as_str());
    let bottle = get_bottle(store, &id)?;
    store.delete(&id)?;
    info!("Deleted bottle {id}");
    Ok(bottle)
}

/// Group every stored bottle for display at `now`.
pub fn dashboard<S: BottleStore + ?Sized>(store: &S, now: Timestamp) -> Result<Dashboard> {
    let bottles = store.list_all()?;
    Ok(Dashboard::build(&bottles, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dashboard::Bucket, store::MemoryStore};

    fn now() -> Timestamp {
        "2024-05-01T12:00:00Z".parse().unwrap()
    }

    fn create(store: &mut MemoryStore, mass: f64) -> Bottle {
        let params = CreateBottle {
            name: Some("Cherry".to_string()),
            mass,
            description: None,
            start_date: Some("2024-05-01T12:00:00Z".to_string()),
        };
        create_bottle(store, &params, &RecipeOptions::default(), now()).unwrap()
    }

    #[test]
    fn test_ids_are_unique_at_the_same_instant() {
        let mut store = MemoryStore::new();
        let a = create(&mut store, 6.0);
        let b = create(&mut store, 6.0);
        assert_eq!(a.id.as_str(), "1714564800000");
        assert_eq!(b.id.as_str(), "1714564800001");
    }

    #[test]
    fn test_create_rejects_bad_mass_without_writing() {
        let mut store = MemoryStore::new();
        let params = CreateBottle {
            mass: 0.0,
            ..Default::default()
        };
        let result = create_bottle(&mut store, &params, &RecipeOptions::default(), now());
        assert!(matches!(result, Err(TrackerError::InvalidMass { .. })));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_edit_mass_regenerates_and_keeps_completion() {
        let mut store = MemoryStore::new();
        let bottle = create(&mut store, 6.0);
        complete_step(
            &mut store,
            &CompleteStep {
                id: bottle.id.to_string(),
                day: 1,
            },
        )
        .unwrap();

        let edited = edit_bottle(
            &mut store,
            &EditBottle {
                id: bottle.id.to_string(),
                mass: Some(12.0),
                ..Default::default()
            },
        )
        .unwrap();
        assert!((edited.final_volume - 50.0).abs() < 1e-9);
        assert!(edited.steps[0].is_completed);
        assert_eq!(get_bottle(&store, &bottle.id).unwrap(), edited);
    }

    #[test]
    fn test_edit_name_keeps_schedule() {
        let mut store = MemoryStore::new();
        let bottle = create(&mut store, 6.0);
        let edited = edit_bottle(
            &mut store,
            &EditBottle {
                id: bottle.id.to_string(),
                name: Some("  ".to_string()),
                description: Some("dark".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(edited.name, "unnamed");
        assert_eq!(edited.description.as_deref(), Some("dark"));
        assert_eq!(edited.steps, bottle.steps);
    }

    #[test]
    fn test_complete_out_of_order() {
        let mut store = MemoryStore::new();
        let bottle = create(&mut store, 6.0);
        let result = complete_step(
            &mut store,
            &CompleteStep {
                id: bottle.id.to_string(),
                day: 10,
            },
        );
        assert!(matches!(
            result,
            Err(TrackerError::OutOfOrderCompletion {
                day: 10,
                pending_day: 1
            })
        ));
    }

    #[test]
    fn test_unknown_bottle() {
        let mut store = MemoryStore::new();
        let result = set_archived(
            &mut store,
            &SetArchived {
                id: "nope".to_string(),
                archived: true,
            },
        );
        assert!(matches!(result, Err(TrackerError::BottleNotFound { .. })));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut store = MemoryStore::new();
        let bottle = create(&mut store, 6.0);
        let mut params = DeleteBottle {
            id: bottle.id.to_string(),
            confirmed: false,
        };
        assert!(matches!(
            delete_bottle(&mut store, &params),
            Err(TrackerError::InvalidInput { .. })
        ));
        assert_eq!(store.list_all().unwrap().len(), 1);

        params.confirmed = true;
        let deleted = delete_bottle(&mut store, &params).unwrap();
        assert_eq!(deleted.id, bottle.id);
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_archive_moves_bottle_on_dashboard() {
        let mut store = MemoryStore::new();
        let bottle = create(&mut store, 6.0);
        assert!(dashboard(&store, now()).unwrap().group(Bucket::Today).is_some());

        set_archived(
            &mut store,
            &SetArchived {
                id: bottle.id.to_string(),
                archived: true,
            },
        )
        .unwrap();
        let board = dashboard(&store, now()).unwrap();
        assert!(board.group(Bucket::Today).is_none());
        assert_eq!(board.group(Bucket::Archived).unwrap().bottles.len(), 1);
    }
}
