//! Concrete scenarios over representative data.

use agenda_core::conflict::conflict_pairs;
use agenda_core::format::format_short;
use agenda_core::loader::{bundled_events, decode_event, encode_event};
use agenda_core::{
    Agenda, ConflictResolver, EagerResolver, Event, IntervalItem, IntervalTree, NodeShape,
    Strategy, TreeResolver,
};

#[path = "generators.rs"]
mod generators;
use generators::at;

const REFERENCE: [(i64, i64); 9] = [
    (5, 6),
    (1, 5),
    (2, 3),
    (15, 25),
    (11, 12),
    (8, 16),
    (14, 20),
    (18, 200),
    (2, 8),
];

fn reference_tree() -> IntervalTree<i64, ()> {
    REFERENCE
        .iter()
        .map(|&(start, end)| IntervalItem::new(start, end, ()))
        .collect()
}

#[test]
fn reference_tree_answers_window_queries() {
    let tree = reference_tree();

    let narrow = tree.overlaps(&IntervalItem::probe(8, 10));
    assert_eq!(narrow.len(), 1);
    assert_eq!((*narrow[0].start(), *narrow[0].end()), (8, 16));

    let wide = tree.overlaps(&IntervalItem::probe(1, 8));
    assert_eq!(wide.len(), 4);

    assert_eq!(tree.root_max_end(), Some(&200));
}

#[test]
fn identical_ranges_conflict_touching_ranges_do_not() {
    let a = Event::new("A", at(0), at(50)).unwrap();
    let b = Event::new("B", at(0), at(50)).unwrap();
    let c = Event::new("C", at(50), at(100)).unwrap();
    let events = vec![a.clone(), b.clone(), c.clone()];

    for strategy in Strategy::ALL {
        let mut resolver = strategy.resolver();
        resolver.rebuild(&events);
        assert!(resolver.conflicts_for(&a).contains(&b), "{strategy}");
        assert!(resolver.conflicts_for(&b).contains(&a), "{strategy}");
        assert!(!resolver.has_conflict(&c), "{strategy}");
    }
}

#[test]
fn single_event_text_round_trip() {
    let json = r#"{"title":"Test","start":"September 02, 2019 12:04 AM","end":"September 02, 2019 12:05 AM"}"#;
    let event = decode_event(json).unwrap();
    let again = decode_event(&encode_event(&event).unwrap()).unwrap();

    assert_eq!(again, event);
    assert_eq!(format_short(again.start_date()), "September 02, 2019");
}

#[test]
fn ascending_inserts_form_a_chain() {
    let n = 10_000;
    let tree: IntervalTree<i64, ()> = (0..n).map(|i| IntervalItem::new(i, i + 1, ())).collect();

    assert_eq!(tree.len(), usize::try_from(n).unwrap());
    assert_eq!(tree.height(), tree.len());
    assert_eq!(tree.root_max_end(), Some(&n));
    assert_eq!(tree.root_shape(), NodeShape::Internal);

    let hits = tree.overlapping(&(n - 1), &n);
    assert_eq!(hits.len(), 1);
    assert_eq!(tree.to_sorted_vec().len(), tree.len());
}

#[test]
fn empty_tree_and_empty_agenda() {
    let tree: IntervalTree<i64, ()> = IntervalTree::new();
    assert_eq!(tree.root_shape(), NodeShape::Empty);
    assert!(tree.overlapping(&0, &10).is_empty());
    assert_eq!(tree.height(), 0);

    let mut agenda = Agenda::with_strategy(Strategy::Eager);
    agenda.update(Vec::new());
    assert_eq!(agenda.number_of_day_buckets(), 0);
}

#[test]
fn bundled_sample_agrees_across_strategies() {
    let events = bundled_events().unwrap();
    let eager = conflict_pairs(&mut EagerResolver::new(), &events);
    let tree = conflict_pairs(&mut TreeResolver::new(), &events);
    assert_eq!(eager, tree);
    assert!(!eager.is_empty());

    let mut agenda = Agenda::new(TreeResolver::new());
    agenda.update(events.clone());
    let listed: usize = (0..agenda.number_of_day_buckets())
        .map(|i| agenda.number_of_events(i))
        .sum();
    assert_eq!(listed, events.len());
}
