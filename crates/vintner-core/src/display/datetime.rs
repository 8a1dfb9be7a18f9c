//! DateTime display utilities.
//!
//! Wrappers that format timestamps in the system time zone.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// A timestamp shown as `YYYY-MM-DD HH:MM:SS TZ` in the system time zone.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// A timestamp shown as the calendar date `DD.MM.YYYY` in the system time
/// zone.
pub struct LocalDate<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0.to_zoned(TimeZone::system()).strftime("%d.%m.%Y")
        )
    }
}
