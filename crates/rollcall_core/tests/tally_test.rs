use proptest::prelude::*;
use rollcall_core::{AggregateResult, CategorySets, UserId};
use std::collections::HashSet;

fn ids(raw: &[u64]) -> HashSet<UserId> {
    raw.iter().copied().map(UserId).collect()
}

#[test]
fn overlap_goes_to_highest_category() {
    let disjoint = CategorySets::new(ids(&[1, 2]), ids(&[2, 3]), ids(&[1, 3, 4])).classify();

    assert_eq!(disjoint.a(), &ids(&[1, 2]));
    assert_eq!(disjoint.b(), &ids(&[3]));
    assert_eq!(disjoint.c(), &ids(&[4]));
}

#[test]
fn empty_sets_aggregate_to_fixed_occupant() {
    let result = CategorySets::default().classify().aggregate();
    assert_eq!(result, AggregateResult::compute(0, 0, 0));
    assert_eq!(result.staff, 0);
    assert_eq!(result.guest, 0);
    assert_eq!(result.instance, 1);
}

#[test]
fn arithmetic_matches_headcount_rules() {
    let result = AggregateResult::compute(3, 2, 5);
    assert_eq!(result.staff, 10);
    assert_eq!(result.guest, 6);
    assert_eq!(result.instance, 17);
}

#[test]
fn same_user_in_every_category_counts_once() {
    let result = CategorySets::new(ids(&[9]), ids(&[9]), ids(&[9]))
        .classify()
        .aggregate();
    assert_eq!((result.count_a, result.count_b, result.count_c), (1, 0, 0));
    assert_eq!(result.instance, 4);
}

fn user_set() -> impl Strategy<Value = HashSet<UserId>> {
    prop::collection::hash_set(0u64..40, 0..25).prop_map(|raw| raw.into_iter().map(UserId).collect())
}

proptest! {
    #[test]
    fn classified_sets_are_disjoint(a in user_set(), b in user_set(), c in user_set()) {
        let disjoint = CategorySets::new(a, b, c).classify();
        prop_assert!(disjoint.a().is_disjoint(disjoint.b()));
        prop_assert!(disjoint.a().is_disjoint(disjoint.c()));
        prop_assert!(disjoint.b().is_disjoint(disjoint.c()));
    }

    #[test]
    fn classification_keeps_every_reactor(a in user_set(), b in user_set(), c in user_set()) {
        let union: HashSet<UserId> = a.iter().chain(&b).chain(&c).copied().collect();
        let disjoint = CategorySets::new(a.clone(), b.clone(), c).classify();

        prop_assert_eq!(disjoint.a(), &a);
        prop_assert!(disjoint.b().is_subset(&b));
        let classified: HashSet<UserId> = disjoint
            .a()
            .iter()
            .chain(disjoint.b())
            .chain(disjoint.c())
            .copied()
            .collect();
        prop_assert_eq!(classified, union);
    }

    #[test]
    fn totals_follow_counts(a in user_set(), b in user_set(), c in user_set()) {
        let result = CategorySets::new(a, b, c).classify().aggregate();
        prop_assert_eq!(result.staff, result.count_a + result.count_b + result.count_c);
        prop_assert_eq!(result.guest, result.count_a * 2);
        prop_assert_eq!(result.instance, result.staff + result.guest + 1);
    }
}
