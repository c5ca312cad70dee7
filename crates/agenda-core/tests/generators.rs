#![allow(dead_code)]

use agenda_core::{Event, IntervalItem};
use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

pub fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2019, 9, 2)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap()
}

/// Minute offset from [`base`]; keeps everything minute-aligned.
pub fn at(minute: i64) -> NaiveDateTime {
    base() + chrono::Duration::minutes(minute)
}

/// `(start, end)` pair with `start <= end`, zero-length included.
pub fn arb_range(limit: i64) -> impl Strategy<Value = (i64, i64)> + Clone {
    (0..limit, 0..limit / 4).prop_map(|(start, len)| (start, start + len))
}

pub fn arb_interval(limit: i64) -> impl Strategy<Value = IntervalItem<i64, usize>> + Clone {
    (arb_range(limit), any::<usize>()).prop_map(|((start, end), tag)| IntervalItem::new(start, end, tag))
}

pub fn arb_intervals(max: usize) -> impl Strategy<Value = Vec<IntervalItem<i64, usize>>> + Clone {
    prop::collection::vec(arb_interval(500), 0..max)
}

/// Events over roughly a week, titles drawn from a small pool so that
/// duplicate values show up.
pub fn arb_event() -> impl Strategy<Value = Event> + Clone {
    (
        prop_oneof![
            Just("Standup".to_string()),
            Just("Review".to_string()),
            Just("Lunch".to_string()),
            "[a-z]{1,8}",
        ],
        arb_range(7 * 24 * 60),
    )
        .prop_map(|(title, (start, end))| Event::new(title, at(start), at(end)).unwrap())
}

pub fn arb_events(max: usize) -> impl Strategy<Value = Vec<Event>> + Clone {
    prop::collection::vec(arb_event(), 0..max)
}
