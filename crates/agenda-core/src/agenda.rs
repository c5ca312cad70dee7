//! Presentation facade over a conflict resolver and the day-bucket index.
//!
//! [`Agenda`] is what a listing UI talks to: it answers how many day
//! sections there are, what each is labelled, which event sits at a row, and
//! whether that event conflicts with anything.

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::buckets::DayBuckets;
use crate::conflict::{ConflictResolver, Strategy, TreeResolver};
use crate::event::Event;
use crate::format;

#[derive(Debug, Default)]
pub struct Agenda<R = TreeResolver> {
    resolver: R,
    events: Vec<Event>,
    buckets: DayBuckets,
}

impl Agenda<Box<dyn ConflictResolver>> {
    /// Agenda backed by the resolver `strategy` builds.
    #[must_use]
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self::new(strategy.resolver())
    }
}

impl<R: ConflictResolver> Agenda<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            events: Vec::new(),
            buckets: DayBuckets::new(),
        }
    }

    /// Replace the loaded events.
    ///
    /// The resolver is rebuilt first; the buckets are then filled from the
    /// resolver's start-ordered listing.
    pub fn update(&mut self, events: Vec<Event>) {
        let processed = self.resolver.rebuild(&events);
        self.buckets.rebuild(&processed);
        self.events = events;
    }

    pub fn strategy(&self) -> Strategy {
        self.resolver.strategy()
    }

    /// Events in the order they were loaded.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub const fn buckets(&self) -> &DayBuckets {
        &self.buckets
    }

    pub fn number_of_day_buckets(&self) -> usize {
        self.buckets.bucket_count()
    }

    pub fn number_of_events(&self, bucket: usize) -> usize {
        self.buckets.event_count_at(bucket)
    }

    pub fn date_at(&self, bucket: usize) -> Option<NaiveDate> {
        self.buckets.date_at(bucket)
    }

    /// Day heading such as `September 02, 2019`.
    pub fn short_label(&self, bucket: usize) -> Option<String> {
        self.date_at(bucket).map(format::format_short)
    }

    pub fn event_at(&self, bucket: usize, row: usize) -> Option<&Event> {
        self.buckets.event_at(bucket, row)
    }

    pub fn has_conflict(&mut self, event: &Event) -> bool {
        self.resolver.has_conflict(event)
    }

    pub fn conflicts_for(&mut self, event: &Event) -> &HashSet<Event> {
        self.resolver.conflicts_for(event)
    }
}
