use chrono::NaiveDateTime;
use std::collections::{HashMap, HashSet};

use super::{ConflictResolver, Strategy};
use crate::event::Event;
use crate::interval::{IntervalItem, IntervalTree};

/// Interval-tree-backed resolver with a per-event memo.
///
/// [`rebuild`](ConflictResolver::rebuild) only builds the tree. A lookup
/// misses the cache the first time an event is asked about, queries the tree
/// with the event's own range, and stores the answer, so callers that inspect
/// a few events never pay for the rest. Events outside the loaded set get an
/// empty answer and are never cached.
#[derive(Debug, Default)]
pub struct TreeResolver {
    tree: IntervalTree<NaiveDateTime, Event>,
    loaded: HashSet<Event>,
    cache: HashMap<Event, HashSet<Event>>,
    none: HashSet<Event>,
}

impl TreeResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The index built by the last rebuild.
    pub const fn tree(&self) -> &IntervalTree<NaiveDateTime, Event> {
        &self.tree
    }

    /// Number of events whose conflicts have been computed.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

fn lookup(tree: &IntervalTree<NaiveDateTime, Event>, event: &Event) -> HashSet<Event> {
    tree.overlapping(&event.start(), &event.end())
        .into_iter()
        .filter_map(IntervalItem::value)
        .filter(|other| *other != event)
        .cloned()
        .collect()
}

impl ConflictResolver for TreeResolver {
    fn strategy(&self) -> Strategy {
        Strategy::Tree
    }

    fn rebuild(&mut self, events: &[Event]) -> Vec<Event> {
        self.tree.clear();
        self.cache.clear();
        self.loaded.clear();
        for event in events {
            self.tree
                .insert(IntervalItem::new(event.start(), event.end(), event.clone()));
            self.loaded.insert(event.clone());
        }
        self.tree
            .to_sorted_vec()
            .into_iter()
            .filter_map(IntervalItem::value)
            .cloned()
            .collect()
    }

    fn conflicts_for(&mut self, event: &Event) -> &HashSet<Event> {
        if !self.loaded.contains(event) {
            return &self.none;
        }
        let tree = &self.tree;
        self.cache
            .entry(event.clone())
            .or_insert_with(|| lookup(tree, event))
    }
}
