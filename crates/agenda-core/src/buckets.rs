//! Day-bucket index: events grouped by the calendar day they start on.
//!
//! Buckets are ordered by ascending date. Inside a bucket events keep the
//! order they were handed to [`DayBuckets::rebuild`]; nothing is re-sorted
//! here. Every accessor is bounds-checked and answers `None` (or zero) for
//! indices out of range.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::event::Event;

/// The events starting on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayBuckets {
    buckets: Vec<DayBucket>,
}

impl DayBuckets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from `events`, replacing any previous buckets.
    #[must_use]
    pub fn from_events(events: &[Event]) -> Self {
        let mut buckets = Self::new();
        buckets.rebuild(events);
        buckets
    }

    pub fn rebuild(&mut self, events: &[Event]) {
        let mut by_date: BTreeMap<NaiveDate, Vec<Event>> = BTreeMap::new();
        for event in events {
            by_date.entry(event.start_date()).or_default().push(event.clone());
        }
        self.buckets = by_date
            .into_iter()
            .map(|(date, events)| DayBucket { date, events })
            .collect();
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        self.buckets.get(index).map(|bucket| bucket.date)
    }

    /// Number of events in bucket `index`; 0 when out of range.
    pub fn event_count_at(&self, index: usize) -> usize {
        self.buckets.get(index).map_or(0, |bucket| bucket.events.len())
    }

    pub fn event_at(&self, index: usize, row: usize) -> Option<&Event> {
        self.buckets.get(index)?.events.get(row)
    }

    pub fn get(&self, index: usize) -> Option<&DayBucket> {
        self.buckets.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DayBucket> {
        self.buckets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 9, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    fn event(title: &str, day: u32, hour: u32) -> Event {
        Event::new(title, at(day, hour), at(day, hour + 1)).unwrap()
    }

    #[test]
    fn groups_by_start_day_ascending() {
        let events = vec![
            event("third", 5, 9),
            event("first", 2, 9),
            event("second", 2, 7),
        ];
        let buckets = DayBuckets::from_events(&events);
        assert_eq!(buckets.bucket_count(), 2);
        assert_eq!(buckets.date_at(0), NaiveDate::from_ymd_opt(2019, 9, 2));
        assert_eq!(buckets.date_at(1), NaiveDate::from_ymd_opt(2019, 9, 5));
        assert_eq!(buckets.event_count_at(0), 2);
        // input order within a day is preserved, not re-sorted
        assert_eq!(buckets.event_at(0, 0).map(Event::title), Some("first"));
        assert_eq!(buckets.event_at(0, 1).map(Event::title), Some("second"));
    }

    #[test]
    fn out_of_range_lookups_are_absent() {
        let buckets = DayBuckets::from_events(&[event("only", 2, 9)]);
        assert_eq!(buckets.date_at(1), None);
        assert_eq!(buckets.event_count_at(7), 0);
        assert!(buckets.event_at(0, 1).is_none());
        assert!(buckets.event_at(3, 0).is_none());
    }

    #[test]
    fn empty_input_yields_no_buckets() {
        let buckets = DayBuckets::from_events(&[]);
        assert!(buckets.is_empty());
        assert_eq!(buckets.event_count_at(0), 0);
    }

    #[test]
    fn multi_day_event_buckets_on_start_day() {
        let spanning = Event::new("overnight", at(2, 22), at(3, 6)).unwrap();
        let buckets = DayBuckets::from_events(&[spanning]);
        assert_eq!(buckets.bucket_count(), 1);
        assert_eq!(buckets.date_at(0), NaiveDate::from_ymd_opt(2019, 9, 2));
    }

    #[test]
    fn rebuild_is_idempotent() {
        let events = vec![event("a", 3, 1), event("b", 2, 1), event("c", 3, 0)];
        let mut buckets = DayBuckets::from_events(&events);
        let first = buckets.clone();
        buckets.rebuild(&events);
        assert_eq!(buckets, first);
    }
}
