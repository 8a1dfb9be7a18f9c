//! Versioned upgrades of stored bottle records.
//!
//! Records are upgraded one version at a time on read, then decoded and
//! normalised. Version 0 is the shape written by the first clients:
//!
//! - free-form notes lived in `notes` rather than `description`
//! - ids could be integer millisecond timestamps
//! - `mass` could be the raw form string
//! - steps could carry `name` instead of `title`
//! - a `calculations` object of pre-formatted strings rode along

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::{
    error::{Result, TrackerError},
    models::Bottle,
    recipe,
};

/// Version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Bring `record` from `from` up to [`CURRENT_SCHEMA_VERSION`].
///
/// # Errors
///
/// `TrackerError::Configuration` when the record is newer than this build or
/// not a JSON object.
pub fn upgrade(mut record: Value, from: u32) -> Result<Value> {
    if from > CURRENT_SCHEMA_VERSION {
        return Err(TrackerError::Configuration {
            message: format!(
                "record schema version {from} is newer than supported version {CURRENT_SCHEMA_VERSION}"
            ),
        });
    }

    let object = record
        .as_object_mut()
        .ok_or_else(|| TrackerError::Configuration {
            message: "bottle record is not a JSON object".to_string(),
        })?;

    let mut version = from;
    while version < CURRENT_SCHEMA_VERSION {
        match version {
            0 => upgrade_v0(object),
            _ => {
                return Err(TrackerError::Configuration {
                    message: format!("no upgrade registered for schema version {version}"),
                })
            }
        }
        version += 1;
        debug!("Upgraded bottle record to schema version {version}");
    }
    Ok(record)
}

fn is_blank_or_missing(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .map_or(true, |s| s.trim().is_empty())
}

fn upgrade_v0(object: &mut Map<String, Value>) {
    if let Some(notes) = object.remove("notes") {
        let has_notes = notes.as_str().is_some_and(|s| !s.trim().is_empty());
        if has_notes && is_blank_or_missing(object.get("description")) {
            object.insert("description".to_string(), notes);
        }
    }

    if let Some(id) = object.get_mut("id") {
        if id.is_number() {
            *id = Value::String(id.to_string());
        }
    }

    if let Some(Value::String(raw)) = object.get("mass").cloned() {
        match raw.trim().parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
            Some(number) => {
                object.insert("mass".to_string(), Value::Number(number));
            }
            None => {
                warn!("Legacy mass '{raw}' is not a number; the bottle keeps no usable mass");
                object.remove("mass");
            }
        }
    }

    object.remove("calculations");

    if let Some(Value::Array(steps)) = object.get_mut("steps") {
        for step in steps.iter_mut().filter_map(Value::as_object_mut) {
            if let Some(name) = step.remove("name") {
                if is_blank_or_missing(step.get("title")) {
                    step.insert("title".to_string(), name);
                }
            }
        }
    }
}

/// Upgrade, decode and normalise one stored record.
///
/// Normalisation sorts steps by day, drops repeated day labels and
/// recomputes the totals from mass. A record without a usable mass keeps
/// its stored totals and is still returned.
pub fn decode(record: Value, version: u32) -> Result<Bottle> {
    let mut upgraded = upgrade(record, version)?;
    if let Some(object) = upgraded.as_object_mut() {
        if object.get("mass").is_some_and(|mass| !mass.is_number()) {
            object.remove("mass");
        }
    }
    let mut bottle: Bottle = serde_json::from_value(upgraded)?;

    bottle.steps.sort_by_key(|step| step.day);
    let before = bottle.steps.len();
    bottle.steps.dedup_by_key(|step| step.day);
    if bottle.steps.len() != before {
        warn!(
            "Bottle {} had {} repeated step day(s); kept the first of each",
            bottle.id,
            before - bottle.steps.len()
        );
    }

    if bottle.has_usable_mass() {
        recipe::refresh_totals(&mut bottle)?;
    } else {
        warn!(
            "Bottle {} has unusable mass {}; keeping stored totals",
            bottle.id, bottle.mass
        );
    }
    Ok(bottle)
}
