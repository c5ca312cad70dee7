use agenda_core::conflict::conflict_pairs;
use agenda_core::loader::{decode_events, encode_events};
use agenda_core::{
    ConflictResolver, DayBuckets, EagerResolver, Event, IntervalItem, IntervalTree, TraverseOrder,
    TreeResolver,
};
use proptest::prelude::*;
use std::collections::HashSet;

#[path = "generators.rs"]
mod generators;
use generators::*;

fn brute_force<'a>(
    items: &'a [IntervalItem<i64, usize>],
    start: i64,
    end: i64,
) -> Vec<&'a IntervalItem<i64, usize>> {
    items
        .iter()
        .filter(|item| *item.start() < end && *item.end() > start)
        .collect()
}

fn key(item: &IntervalItem<i64, usize>) -> (i64, i64, usize) {
    (*item.start(), *item.end(), item.value().copied().unwrap_or_default())
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    #[test]
    fn tree_query_matches_linear_scan(items in arb_intervals(64), (start, end) in arb_range(500)) {
        let tree: IntervalTree<i64, usize> = items.iter().cloned().collect();
        let mut found: Vec<_> = tree.overlapping(&start, &end).into_iter().map(key).collect();
        let mut expected: Vec<_> = brute_force(&items, start, end).into_iter().map(key).collect();
        found.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn every_item_is_visited_once(items in arb_intervals(64)) {
        let tree: IntervalTree<i64, usize> = items.iter().cloned().collect();
        prop_assert_eq!(tree.len(), items.len());
        for order in [TraverseOrder::Preorder, TraverseOrder::Inorder, TraverseOrder::Postorder] {
            let mut visited = 0;
            tree.traverse(order, |_| visited += 1);
            prop_assert_eq!(visited, items.len());
        }
    }

    #[test]
    fn inorder_is_sorted_and_stable(items in arb_intervals(64)) {
        let tree: IntervalTree<i64, usize> = items.iter().cloned().collect();
        let sorted: Vec<_> = tree.to_sorted_vec().into_iter().map(key).collect();

        let mut expected: Vec<_> = items.iter().map(key).collect();
        expected.sort_by_key(|(start, _, _)| *start);
        prop_assert_eq!(sorted, expected);
    }

    #[test]
    fn max_end_covers_the_tree(items in arb_intervals(64)) {
        let tree: IntervalTree<i64, usize> = items.iter().cloned().collect();
        let ends: HashSet<i64> = items.iter().map(|item| *item.end()).collect();
        tree.traverse(TraverseOrder::Postorder, |item| {
            assert!(item.max_end() >= item.end());
            assert!(ends.contains(item.max_end()));
        });
        prop_assert_eq!(tree.root_max_end().copied(), items.iter().map(|item| *item.end()).max());
    }

    #[test]
    fn conflicts_are_symmetric(events in arb_events(40)) {
        let mut resolver = TreeResolver::new();
        resolver.rebuild(&events);
        for a in &events {
            let partners: Vec<Event> = resolver.conflicts_for(a).iter().cloned().collect();
            for b in &partners {
                prop_assert!(resolver.conflicts_for(b).contains(a));
            }
            prop_assert!(!partners.contains(a));
        }
    }

    #[test]
    fn tree_resolver_matches_eager_baseline(events in arb_events(40)) {
        let eager = conflict_pairs(&mut EagerResolver::new(), &events);
        let tree = conflict_pairs(&mut TreeResolver::new(), &events);
        prop_assert_eq!(eager, tree);
    }

    #[test]
    fn rebuild_keeps_every_event(events in arb_events(40)) {
        for mut resolver in [agenda_core::Strategy::Eager.resolver(), agenda_core::Strategy::Tree.resolver()] {
            let processed = resolver.rebuild(&events);
            prop_assert_eq!(processed.len(), events.len());
            prop_assert!(processed.windows(2).all(|w| w[0].start() <= w[1].start()));
        }
    }

    #[test]
    fn bucketing_is_idempotent(events in arb_events(40)) {
        let processed = TreeResolver::new().rebuild(&events);
        let first = DayBuckets::from_events(&processed);
        let second = DayBuckets::from_events(&processed);
        prop_assert_eq!(&first, &second);

        let total: usize = (0..first.bucket_count()).map(|i| first.event_count_at(i)).sum();
        prop_assert_eq!(total, events.len());
        let dates: Vec<_> = first.iter().map(|bucket| bucket.date).collect();
        prop_assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn loader_round_trip(events in arb_events(20)) {
        let encoded = encode_events(&events).unwrap();
        prop_assert_eq!(decode_events(&encoded).unwrap(), events);
    }
}
