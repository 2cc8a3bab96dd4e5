use crate::{int_set::IntSet, Memory, VectorMemory, SENTINEL};
use proptest::collection::btree_set as pset;
use proptest::collection::vec as pvec;
use proptest::prelude::*;
use std::collections::BTreeSet as StdBTreeSet;
use test_strategy::proptest;

#[derive(Debug, Clone)]
enum Operation {
    Insert(i32),
    Remove(i32),
    Contains(i32),
    MakeEmpty,
}

// A narrow value range makes duplicates and hits on removal likely.
fn value_strategy() -> impl Strategy<Value = i32> {
    -100..100i32
}

// Note that `Insert` has a higher weight than `Remove` so that, on average, sets
// are growing in size the more operations are executed.
fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        50 => value_strategy().prop_map(Operation::Insert),
        20 => value_strategy().prop_map(Operation::Remove),
        20 => value_strategy().prop_map(Operation::Contains),
        1 => Just(Operation::MakeEmpty),
    ]
}

fn arb_members() -> impl Strategy<Value = StdBTreeSet<i32>> {
    pset(value_strategy(), 0..40)
}

fn make_set(values: &StdBTreeSet<i32>) -> IntSet<VectorMemory> {
    let mut set = IntSet::new(VectorMemory::default());
    for v in values {
        set.insert(*v).unwrap();
    }
    set
}

/// Asserts that the live elements are strictly ascending and that every
/// unused slot holds the sentinel.
fn check_layout<M: Memory>(set: &IntSet<M>) -> Result<(), TestCaseError> {
    let values = set.to_vec();
    prop_assert!(values.windows(2).all(|w| w[0] < w[1]));
    prop_assert!(values.iter().all(|v| *v != SENTINEL));
    prop_assert!(set.len() <= set.capacity());
    prop_assert_eq!(set.iter().len(), set.len() as usize);

    let mut unused = vec![0; (set.capacity() - set.len()) as usize];
    set.memory.read(set.len(), &mut unused);
    prop_assert!(unused.iter().all(|v| *v == SENTINEL));
    Ok(())
}

// Runs a sequence of mutations and validates the set against a standard BTreeSet
// after every step.
#[proptest(cases = 32)]
fn comprehensive(#[strategy(pvec(operation_strategy(), 100..2_000))] ops: Vec<Operation>) {
    let mut set = IntSet::new(VectorMemory::default());
    let mut std_set = StdBTreeSet::new();

    for op in ops.into_iter() {
        match op {
            Operation::Insert(v) => {
                let capacity = set.capacity();
                let inserted = set.insert(v).unwrap();
                prop_assert_eq!(inserted, std_set.insert(v));
                if !inserted {
                    prop_assert_eq!(set.capacity(), capacity);
                }
            }
            Operation::Remove(v) => {
                let capacity = set.capacity();
                prop_assert_eq!(set.remove(v), std_set.remove(&v));
                prop_assert_eq!(set.capacity(), capacity);
            }
            Operation::Contains(v) => {
                prop_assert_eq!(set.contains(v), std_set.contains(&v));
            }
            Operation::MakeEmpty => {
                set.make_empty();
                std_set.clear();
                prop_assert_eq!(set.capacity(), 0);
            }
        }
        prop_assert_eq!(set.len(), std_set.len() as u64);
        check_layout(&set)?;
    }

    prop_assert_eq!(set.to_vec(), std_set.into_iter().collect::<Vec<_>>());
}

#[proptest]
fn insert_then_remove_restores_set(
    #[strategy(arb_members())] members: StdBTreeSet<i32>,
    #[strategy(value_strategy())] v: i32,
) {
    prop_assume!(!members.contains(&v));
    let original = make_set(&members);
    let mut set = make_set(&members);

    prop_assert_eq!(set.insert(v), Ok(true));
    prop_assert_eq!(set.insert(v), Ok(false));
    prop_assert!(set.remove(v));
    prop_assert_eq!(&set, &original);
    check_layout(&set)?;
}

#[proptest]
fn union_is_commutative(
    #[strategy(arb_members())] a: StdBTreeSet<i32>,
    #[strategy(arb_members())] b: StdBTreeSet<i32>,
) {
    let (set_a, set_b) = (make_set(&a), make_set(&b));

    let mut ab = IntSet::new(VectorMemory::default());
    let mut ba = IntSet::new(VectorMemory::default());
    ab.union_of(&set_a, &set_b).unwrap();
    ba.union_of(&set_b, &set_a).unwrap();

    prop_assert_eq!(&ab, &ba);
    prop_assert_eq!(ab.to_vec(), a.union(&b).copied().collect::<Vec<_>>());
    prop_assert_eq!(ab.capacity(), set_a.capacity() + set_b.capacity());
    check_layout(&ab)?;
}

#[proptest]
fn intersection_and_difference_partition(
    #[strategy(arb_members())] a: StdBTreeSet<i32>,
    #[strategy(arb_members())] b: StdBTreeSet<i32>,
) {
    let (set_a, set_b) = (make_set(&a), make_set(&b));

    let mut intersection = IntSet::new(VectorMemory::default());
    let mut difference = IntSet::new(VectorMemory::default());
    intersection.intersection_of(&set_a, &set_b).unwrap();
    difference.difference_of(&set_a, &set_b).unwrap();

    prop_assert_eq!(intersection.len() + difference.len(), set_a.len());
    for v in set_a.iter() {
        prop_assert!(intersection.contains(v) != difference.contains(v));
    }
    prop_assert!(intersection.is_disjoint(&difference));

    prop_assert_eq!(
        intersection.to_vec(),
        a.intersection(&b).copied().collect::<Vec<_>>()
    );
    prop_assert_eq!(
        difference.to_vec(),
        a.difference(&b).copied().collect::<Vec<_>>()
    );
    prop_assert_eq!(
        intersection.capacity(),
        set_a.capacity().max(set_b.capacity())
    );
    prop_assert_eq!(difference.capacity(), set_a.capacity());
    check_layout(&intersection)?;
    check_layout(&difference)?;
}

#[proptest]
fn subset_matches_std(
    #[strategy(arb_members())] a: StdBTreeSet<i32>,
    #[strategy(arb_members())] b: StdBTreeSet<i32>,
) {
    let (set_a, set_b) = (make_set(&a), make_set(&b));

    prop_assert!(set_a.is_subset_of(&set_a));
    prop_assert_eq!(set_a.is_subset_of(&set_b), a.is_subset(&b));
    prop_assert_eq!(set_a.is_superset_of(&set_b), a.is_superset(&b));
    prop_assert_eq!(set_a.is_disjoint(&set_b), a.is_disjoint(&b));
    if set_a.is_subset_of(&set_b) && set_b.is_subset_of(&set_a) {
        prop_assert!(set_a.equals(&set_b));
    }
}

#[proptest]
fn subsets_of_union(
    #[strategy(arb_members())] a: StdBTreeSet<i32>,
    #[strategy(arb_members())] b: StdBTreeSet<i32>,
) {
    let (set_a, set_b) = (make_set(&a), make_set(&b));
    let mut union = IntSet::new(VectorMemory::default());
    union.union_of(&set_a, &set_b).unwrap();

    prop_assert!(set_a.is_subset_of(&union));
    prop_assert!(set_b.is_subset_of(&union));
}

#[proptest]
fn copy_is_independent(
    #[strategy(arb_members())] members: StdBTreeSet<i32>,
    #[strategy(pvec(value_strategy(), 0..20))] edits: Vec<i32>,
) {
    let source = make_set(&members);
    let mut copy = IntSet::new(VectorMemory::default());
    copy.copy_from(&source).unwrap();

    prop_assert_eq!(copy.capacity(), source.capacity());
    prop_assert_eq!(&copy, &source);

    for v in edits {
        if !copy.remove(v) {
            copy.insert(v).unwrap();
        }
    }

    prop_assert_eq!(source.to_vec(), members.into_iter().collect::<Vec<_>>());
    check_layout(&copy)?;
}
