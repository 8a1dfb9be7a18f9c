//! Parameter structures for tracker operations.
//!
//! These structures carry requests from the interface layers (the CLI today)
//! into the core without framework-specific derives. Interface wrappers add
//! their own parsing attributes and convert with `From`.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │   Operations    │
//! │  (clap derives) │───▶│ (minimal deps)  │───▶│ (BottleStore)   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use jiff::{civil::Date, tz::TimeZone, Timestamp, Zoned};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the bottle to operate on
    pub id: String,
}

/// Parameters for registering a new bottle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBottle {
    /// Display name; blank becomes "unnamed"
    pub name: Option<String>,
    /// Berry mass in kilograms (required, > 0)
    pub mass: f64,
    /// Optional notes
    pub description: Option<String>,
    /// `YYYY-MM-DD` (noon local time) or an RFC 3339 instant; defaults to
    /// today at noon
    pub start_date: Option<String>,
}

/// Parameters for editing an existing bottle. `None` leaves a field as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditBottle {
    pub id: String,
    pub name: Option<String>,
    /// A new mass regenerates the recipe
    pub mass: Option<f64>,
    pub description: Option<String>,
    /// A new start date reschedules every step
    pub start_date: Option<String>,
}

/// Parameters for completing one step of a bottle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompleteStep {
    pub id: String,
    /// Day label of the step (1, 10 or 13 for generated recipes)
    pub day: u32,
}

/// Parameters for toggling the archive flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetArchived {
    pub id: String,
    pub archived: bool,
}

/// Parameters for permanently deleting a bottle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteBottle {
    pub id: String,
    /// Must be true; guards against accidental deletion
    #[serde(default)]
    pub confirmed: bool,
}

/// Noon on `date` in the system time zone.
fn noon_on(date: Date, tz: TimeZone) -> Result<Timestamp> {
    date.at(12, 0, 0, 0)
        .to_zoned(tz)
        .map(|zoned| zoned.timestamp())
        .map_err(|e| TrackerError::invalid_input("startDate").with_reason(e.to_string()))
}

/// Today at 12:00 in the system time zone.
pub fn default_start_date() -> Result<Timestamp> {
    let now = Zoned::now();
    noon_on(now.date(), now.time_zone().clone())
}

/// Resolve a user-supplied start date.
///
/// # Errors
///
/// `TrackerError::InvalidInput` when the text is neither a date nor an
/// RFC 3339 instant.
///
/// # Examples
///
/// ```rust
/// use vintner_core::params::parse_start_date;
///
/// let ts = parse_start_date(Some("2024-05-01T09:30:00Z"))?;
/// assert_eq!(ts.to_string(), "2024-05-01T09:30:00Z");
/// assert!(parse_start_date(Some("next tuesday")).is_err());
/// # Ok::<(), vintner_core::TrackerError>(())
/// ```
pub fn parse_start_date(raw: Option<&str>) -> Result<Timestamp> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return default_start_date();
    };
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Ok(ts);
    }
    match raw.parse::<Date>() {
        Ok(date) => noon_on(date, TimeZone::system()),
        Err(_) => Err(TrackerError::invalid_input("startDate")
            .with_reason(format!("'{raw}' is not a date (expected YYYY-MM-DD)"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_date_is_noon_local() {
        let ts = parse_start_date(Some("2024-05-01")).unwrap();
        let local = ts.to_zoned(TimeZone::system());
        assert_eq!(local.hour(), 12);
        assert_eq!(local.date(), jiff::civil::date(2024, 5, 1));
    }

    #[test]
    fn test_default_is_today_noon() {
        let ts = parse_start_date(None).unwrap();
        let local = ts.to_zoned(TimeZone::system());
        assert_eq!(local.hour(), 12);
        assert_eq!(local.minute(), 0);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            parse_start_date(Some("tomorrow-ish")),
            Err(TrackerError::InvalidInput { .. })
        ));
    }
}
