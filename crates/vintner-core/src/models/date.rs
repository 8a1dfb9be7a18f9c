//! Stored instants that may fail to parse.

use std::fmt;

use jiff::{civil::Date, tz::TimeZone, Timestamp};
use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::error::{Result, TrackerError};

/// An instant as it was recorded in storage.
///
/// Records written by older clients carry dates in several shapes, and some
/// carry garbage. Unparseable text is preserved verbatim instead of failing
/// the whole record, so the bottle can still be shown (in the `error` group)
/// and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedDate {
    Valid(Timestamp),
    Invalid(String),
}

impl RecordedDate {
    /// Parse an RFC 3339 instant, or a bare `YYYY-MM-DD` date read as
    /// midnight UTC.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(ts) = trimmed.parse::<Timestamp>() {
            return Self::Valid(ts);
        }
        let midnight = trimmed
            .parse::<Date>()
            .ok()
            .and_then(|date| date.to_zoned(TimeZone::UTC).ok())
            .map(|zoned| zoned.timestamp());
        match midnight {
            Some(ts) => Self::Valid(ts),
            None => Self::Invalid(raw.to_string()),
        }
    }

    /// Epoch milliseconds, the legacy numeric form.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp::from_millisecond(millis)
            .map(Self::Valid)
            .unwrap_or_else(|_| Self::Invalid(millis.to_string()))
    }

    pub fn timestamp(&self) -> Option<Timestamp> {
        match self {
            Self::Valid(ts) => Some(*ts),
            Self::Invalid(_) => None,
        }
    }

    /// Strict accessor for callers that cannot continue without a date.
    pub fn require(&self) -> Result<Timestamp> {
        match self {
            Self::Valid(ts) => Ok(*ts),
            Self::Invalid(raw) => Err(TrackerError::InvalidDate { value: raw.clone() }),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Placeholder for a date that is null or absent in the record.
    pub fn missing() -> Self {
        Self::Invalid(String::new())
    }
}

impl From<Timestamp> for RecordedDate {
    fn from(ts: Timestamp) -> Self {
        Self::Valid(ts)
    }
}

impl fmt::Display for RecordedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(ts) => write!(f, "{ts}"),
            Self::Invalid(raw) => write!(f, "{raw}"),
        }
    }
}

impl Serialize for RecordedDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct RecordedDateVisitor;

impl Visitor<'_> for RecordedDateVisitor {
    type Value = RecordedDate;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a date string, epoch milliseconds or null")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(RecordedDate::missing())
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(RecordedDate::missing())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        Ok(RecordedDate::parse(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
        Ok(RecordedDate::from_millis(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
        match i64::try_from(v) {
            Ok(millis) => Ok(RecordedDate::from_millis(millis)),
            Err(_) => Ok(RecordedDate::Invalid(v.to_string())),
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
        if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
            Ok(RecordedDate::from_millis(v as i64))
        } else {
            Ok(RecordedDate::Invalid(v.to_string()))
        }
    }
}

impl<'de> Deserialize<'de> for RecordedDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(RecordedDateVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_with_millis() {
        let date = RecordedDate::parse("2024-05-01T12:00:00.000Z");
        assert_eq!(
            date.timestamp(),
            Some("2024-05-01T12:00:00Z".parse().unwrap())
        );
    }

    #[test]
    fn test_parse_bare_date_is_midnight_utc() {
        let date = RecordedDate::parse("2024-05-01");
        assert_eq!(
            date.timestamp(),
            Some("2024-05-01T00:00:00Z".parse().unwrap())
        );
    }

    #[test]
    fn test_garbage_is_kept_verbatim() {
        let date: RecordedDate = serde_json::from_str("\"someday\"").unwrap();
        assert_eq!(date, RecordedDate::Invalid("someday".to_string()));
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"someday\"");
        assert!(matches!(
            date.require(),
            Err(TrackerError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_null_is_missing() {
        let date: RecordedDate = serde_json::from_str("null").unwrap();
        assert_eq!(date, RecordedDate::missing());
        assert!(!date.is_valid());
    }

    #[test]
    fn test_epoch_millis() {
        let date: RecordedDate = serde_json::from_str("1714564800000").unwrap();
        assert_eq!(
            date.timestamp(),
            Some("2024-05-01T12:00:00Z".parse().unwrap())
        );
    }
}
