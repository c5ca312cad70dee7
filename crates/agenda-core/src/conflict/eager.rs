use std::collections::{HashMap, HashSet};

use super::{ConflictResolver, Strategy};
use crate::event::Event;

/// Pairwise conflict scan performed once per [`rebuild`](ConflictResolver::rebuild).
///
/// After a stable sort by start, every pair `i < j` is tested: Θ(n²)
/// comparisons, then O(1) lookups.
#[derive(Debug, Default)]
pub struct EagerResolver {
    conflicts: HashMap<Event, HashSet<Event>>,
    none: HashSet<Event>,
}

impl EagerResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn add_conflict(&mut self, a: &Event, b: &Event) {
        self.conflicts.entry(a.clone()).or_default().insert(b.clone());
        self.conflicts.entry(b.clone()).or_default().insert(a.clone());
    }
}

impl ConflictResolver for EagerResolver {
    fn strategy(&self) -> Strategy {
        Strategy::Eager
    }

    fn rebuild(&mut self, events: &[Event]) -> Vec<Event> {
        self.conflicts.clear();

        let mut sorted = events.to_vec();
        sorted.sort_by_key(Event::start);

        for (i, earlier) in sorted.iter().enumerate() {
            for later in &sorted[i + 1..] {
                // `earlier.start <= later.start`, so the end test decides
                // overlap except when `later` is empty at `earlier.start`.
                if earlier != later && earlier.end() > later.start() && earlier.start() < later.end() {
                    self.add_conflict(earlier, later);
                }
            }
        }
        sorted
    }

    fn conflicts_for(&mut self, event: &Event) -> &HashSet<Event> {
        self.conflicts.get(event).unwrap_or(&self.none)
    }
}
