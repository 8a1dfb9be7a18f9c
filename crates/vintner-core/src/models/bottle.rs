//! Bottle model definition and related functionality.

use std::fmt;

use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize,
};

use super::{RecordedDate, Step};

/// Name given to bottles created without one.
pub const DEFAULT_NAME: &str = "unnamed";

/// Opaque bottle identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BottleId(String);

impl BottleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for BottleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BottleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BottleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

struct BottleIdVisitor;

impl Visitor<'_> for BottleIdVisitor {
    type Value = BottleId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer bottle id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(BottleId::new(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(BottleId::new(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(BottleId::new(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for BottleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BottleIdVisitor)
    }
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

/// Derived recipe totals. A pure function of mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub final_volume: f64,
    pub total_sugar: f64,
    pub total_water: f64,
}

/// One fermentation batch with its recipe steps.
///
/// Serializes to the canonical storage record:
/// `{ id, name, mass, description, startDate, isArchived, finalVolume,
/// totalSugar, totalWater, steps }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bottle {
    /// Unique identifier
    pub id: BottleId,

    /// Display name
    #[serde(default = "default_name")]
    pub name: String,

    /// Raw berry mass in kilograms
    #[serde(default)]
    pub mass: f64,

    /// Free-form operator notes
    #[serde(default)]
    pub description: Option<String>,

    /// Instant the batch was started
    #[serde(default = "RecordedDate::missing")]
    pub start_date: RecordedDate,

    /// Hidden from the date groups when set
    #[serde(default)]
    pub is_archived: bool,

    /// Final volume in litres
    #[serde(default)]
    pub final_volume: f64,

    /// Total sugar in kilograms
    #[serde(default)]
    pub total_sugar: f64,

    /// Total water in litres
    #[serde(default)]
    pub total_water: f64,

    /// Recipe steps ordered by day
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Bottle {
    /// The pending step with the lowest day label.
    pub fn earliest_pending(&self) -> Option<&Step> {
        self.steps
            .iter()
            .filter(|step| !step.is_completed)
            .min_by_key(|step| step.day)
    }

    /// Whether the mass can drive a recipe.
    pub fn has_usable_mass(&self) -> bool {
        self.mass.is_finite() && self.mass > 0.0
    }

    pub fn is_fully_completed(&self) -> bool {
        self.steps.iter().all(|step| step.is_completed)
    }

    pub fn totals(&self) -> Totals {
        Totals {
            final_volume: self.final_volume,
            total_sugar: self.total_sugar,
            total_water: self.total_water,
        }
    }

    pub(crate) fn set_totals(&mut self, totals: Totals) {
        self.final_volume = totals.final_volume;
        self.total_sugar = totals.total_sugar;
        self.total_water = totals.total_water;
    }

    pub fn step(&self, day: u32) -> Option<&Step> {
        self.steps.iter().find(|step| step.day == day)
    }
}
