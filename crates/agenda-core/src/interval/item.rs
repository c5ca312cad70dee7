use std::fmt;

use crate::error::InvalidInterval;

/// A half-open range `[start, end)` with an attached value.
///
/// `max_end` is the subtree augmentation used by
/// [`IntervalTree`](super::IntervalTree). Outside a tree it equals `end`;
/// callers can read it but never set it.
///
/// Equality compares `(start, end)` only. Two items covering the same range
/// are equal even when their values differ.
#[derive(Debug, Clone)]
pub struct IntervalItem<T, V = ()> {
    pub(super) start: T,
    pub(super) end: T,
    pub(super) max_end: T,
    pub(super) value: Option<V>,
}

impl<T: Ord + Clone, V> IntervalItem<T, V> {
    /// Create an item carrying `value`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`. Use [`IntervalItem::try_new`] to check first.
    pub fn new(start: T, end: T, value: V) -> Self {
        assert!(start <= end, "interval start must not be after its end");
        Self::unchecked(start, end, Some(value))
    }

    /// Create an item carrying `value`, rejecting `start > end`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInterval`] when `start` is after `end`.
    pub fn try_new(start: T, end: T, value: V) -> Result<Self, InvalidInterval>
    where
        T: fmt::Debug,
    {
        if start > end {
            return Err(InvalidInterval::new(&start, &end));
        }
        Ok(Self::unchecked(start, end, Some(value)))
    }

    fn unchecked(start: T, end: T, value: Option<V>) -> Self {
        let max_end = end.clone();
        Self {
            start,
            end,
            max_end,
            value,
        }
    }

    pub const fn start(&self) -> &T {
        &self.start
    }

    pub const fn end(&self) -> &T {
        &self.end
    }

    /// Largest `end` in the subtree rooted at this item.
    pub const fn max_end(&self) -> &T {
        &self.max_end
    }

    /// The attached value; `None` for probes.
    pub const fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<V> {
        self.value
    }

    /// Half-open overlap: touching endpoints do not overlap.
    pub fn overlaps<W>(&self, other: &IntervalItem<T, W>) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Restore the augmentation to the item's own end.
    pub(super) fn reset_max_end(&mut self) {
        self.max_end = self.end.clone();
    }
}

impl<T: Ord + Clone> IntervalItem<T, ()> {
    /// Create a value-less item used only to query a tree.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn probe(start: T, end: T) -> Self {
        assert!(start <= end, "interval start must not be after its end");
        Self::unchecked(start, end, None)
    }

    /// Create a probe, rejecting `start > end`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInterval`] when `start` is after `end`.
    pub fn try_probe(start: T, end: T) -> Result<Self, InvalidInterval>
    where
        T: fmt::Debug,
    {
        if start > end {
            return Err(InvalidInterval::new(&start, &end));
        }
        Ok(Self::unchecked(start, end, None))
    }
}

impl<T: PartialEq, V> PartialEq for IntervalItem<T, V> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl<T: Eq, V> Eq for IntervalItem<T, V> {}

impl<T: fmt::Display, V> fmt::Display for IntervalItem<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}, max: {}", self.start, self.end, self.max_end)
    }
}
