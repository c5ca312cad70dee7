use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::InvalidInterval;
use crate::format::{self, long_timestamp};

/// A titled time range `[start, end)`.
///
/// Equality, hashing and ordering are structural over `(title, start, end)`:
/// two separately built events with the same fields are the same key in any
/// conflict map. `start <= end` always holds; both [`Event::new`] and
/// deserialization reject inverted ranges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawEvent")]
pub struct Event {
    title: String,
    #[serde(serialize_with = "long_timestamp::serialize")]
    start: NaiveDateTime,
    #[serde(serialize_with = "long_timestamp::serialize")]
    end: NaiveDateTime,
}

impl Event {
    /// # Errors
    ///
    /// Returns [`InvalidInterval`] when `start` is after `end`.
    pub fn new(
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, InvalidInterval> {
        if start > end {
            return Err(InvalidInterval::new(&start, &end));
        }
        Ok(Self {
            title: title.into(),
            start,
            end,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Calendar day the event starts on.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Half-open overlap with another event.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} to {})",
            self.title,
            format::format_long(self.start),
            format::format_long(self.end)
        )
    }
}

/// Wire shape of an event before range validation.
#[derive(Deserialize)]
struct RawEvent {
    title: String,
    #[serde(with = "long_timestamp")]
    start: NaiveDateTime,
    #[serde(with = "long_timestamp")]
    end: NaiveDateTime,
}

impl TryFrom<RawEvent> for Event {
    type Error = InvalidInterval;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        Self::new(raw.title, raw.start, raw.end)
    }
}
