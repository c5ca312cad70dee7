//! Textual timestamp formats used by event resources and listings.
//!
//! | Name   | Example                          |
//! |--------|----------------------------------|
//! | long   | `September 02, 2019 12:04 AM`    |
//! | medium | `Sep 02 12:04 AM`                |
//! | short  | `September 02, 2019`             |
//!
//! Timestamps are naive local times; the resources carry no zone.

use chrono::{NaiveDate, NaiveDateTime};

/// Long form used in event resources.
pub const LONG_FORMAT: &str = "%B %d, %Y %-I:%M %p";

/// Parse pattern for [`LONG_FORMAT`]; accepts one- or two-digit hours.
const LONG_PARSE_FORMAT: &str = "%B %d, %Y %I:%M %p";

/// Month-day-time form used for listing rows.
pub const MEDIUM_FORMAT: &str = "%b %d %-I:%M %p";

/// Calendar-date form used for day headings.
pub const SHORT_FORMAT: &str = "%B %d, %Y";

#[must_use]
pub fn format_long(ts: NaiveDateTime) -> String {
    ts.format(LONG_FORMAT).to_string()
}

#[must_use]
pub fn format_medium(ts: NaiveDateTime) -> String {
    ts.format(MEDIUM_FORMAT).to_string()
}

#[must_use]
pub fn format_short(date: NaiveDate) -> String {
    date.format(SHORT_FORMAT).to_string()
}

/// Parse a long-form timestamp such as `September 02, 2019 12:04 AM`.
///
/// # Errors
///
/// Returns the chrono parse error when `raw` does not match the long form.
pub fn parse_long(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw.trim(), LONG_PARSE_FORMAT)
}

/// Serde adapter writing a `NaiveDateTime` in the long form.
pub mod long_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// # Errors
    ///
    /// Propagates the serializer's error.
    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_long(*ts))
    }

    /// # Errors
    ///
    /// Fails when the string is not a long-form timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_long(&raw).map_err(|e| {
            serde::de::Error::custom(format!("invalid timestamp '{raw}': {e}"))
        })
    }
}
