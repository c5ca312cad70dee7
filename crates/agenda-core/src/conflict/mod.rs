//! Conflict resolution: which events overlap which.
//!
//! Two interchangeable strategies implement [`ConflictResolver`]:
//!
//! - [`EagerResolver`] tests every pair on [`rebuild`](ConflictResolver::rebuild).
//!   Θ(n²) up front, O(1) per lookup.
//! - [`TreeResolver`] indexes events in an
//!   [`IntervalTree`](crate::interval::IntervalTree) and answers each event on
//!   first lookup, memoising the result.
//!
//! Both produce the same symmetric relation: `a` conflicts with `b` iff the
//! two are distinct values and their half-open ranges overlap. Callers pick a
//! [`Strategy`] once, at construction.

mod eager;
mod tree;

pub use eager::EagerResolver;
pub use tree::TreeResolver;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::event::Event;

/// A conflict-finding strategy over one loaded event set.
pub trait ConflictResolver {
    /// Which strategy this is.
    fn strategy(&self) -> Strategy;

    /// Replace the event set and drop all cached results.
    ///
    /// Returns the events ordered by start; events with equal starts keep
    /// their input order.
    fn rebuild(&mut self, events: &[Event]) -> Vec<Event>;

    /// Every event conflicting with `event`. Empty, never absent, when there
    /// are none or when `event` is not part of the loaded set.
    fn conflicts_for(&mut self, event: &Event) -> &HashSet<Event>;

    fn has_conflict(&mut self, event: &Event) -> bool {
        !self.conflicts_for(event).is_empty()
    }
}

impl<R: ConflictResolver + ?Sized> ConflictResolver for Box<R> {
    fn strategy(&self) -> Strategy {
        (**self).strategy()
    }

    fn rebuild(&mut self, events: &[Event]) -> Vec<Event> {
        (**self).rebuild(events)
    }

    fn conflicts_for(&mut self, event: &Event) -> &HashSet<Event> {
        (**self).conflicts_for(event)
    }

    fn has_conflict(&mut self, event: &Event) -> bool {
        (**self).has_conflict(event)
    }
}

/// Which [`ConflictResolver`] to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Pairwise scan at load time.
    Eager,
    /// Interval tree with lazy, memoised lookups.
    #[default]
    Tree,
}

impl Strategy {
    pub const ALL: [Self; 2] = [Self::Eager, Self::Tree];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eager => "eager",
            Self::Tree => "tree",
        }
    }

    /// Build an empty resolver for this strategy.
    #[must_use]
    pub fn resolver(self) -> Box<dyn ConflictResolver> {
        match self {
            Self::Eager => Box::new(EagerResolver::new()),
            Self::Tree => Box::new(TreeResolver::new()),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown conflict strategy '{raw}': expected one of eager, tree")]
pub struct ParseStrategyError {
    pub raw: String,
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eager" | "nested" | "batch" => Ok(Self::Eager),
            "tree" | "lazy" => Ok(Self::Tree),
            _ => Err(ParseStrategyError { raw: s.to_string() }),
        }
    }
}

/// Every conflicting pair in `events`, each pair ordered `(lesser, greater)`.
///
/// Rebuilds `resolver` from `events` and queries every event, so the result
/// is independent of the strategy's caching behaviour.
pub fn conflict_pairs<R: ConflictResolver + ?Sized>(
    resolver: &mut R,
    events: &[Event],
) -> BTreeSet<(Event, Event)> {
    let processed = resolver.rebuild(events);
    let mut pairs = BTreeSet::new();
    for event in &processed {
        for other in resolver.conflicts_for(event) {
            let pair = if event <= other {
                (event.clone(), other.clone())
            } else {
                (other.clone(), event.clone())
            };
            pairs.insert(pair);
        }
    }
    pairs
}
