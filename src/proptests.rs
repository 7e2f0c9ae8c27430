use crate::{MatrixBst, Traversal};

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::relation::Relation;
use crate::slot::SlotId;

/// Check every structural invariant of the slot store and relation table.
fn validate_tree<T, C>(t: &MatrixBst<T, C>)
where
    C: Fn(&T, &T) -> Ordering,
{
    let capacity = t.capacity();
    let mut occupied = 0usize;

    for i in 0..capacity {
        let slot = SlotId::new(i);
        if !t.slots.is_occupied(slot) {
            assert!(
                t.relations.is_unlinked(slot),
                "empty slot {i} still has relations"
            );
            continue;
        }
        occupied += 1;

        let left = t.relations.left(slot);
        let right = t.relations.right(slot);
        if let (Some(l), Some(r)) = (left, right) {
            assert_ne!(l, r, "slot {i} has the same left and right child");
        }

        for (child, side) in [(left, Relation::Left), (right, Relation::Right)] {
            let Some(child) = child else { continue };
            assert!(
                t.slots.is_occupied(child),
                "slot {i} links to empty slot {}",
                child.index()
            );
            assert_eq!(t.relations.parent(child), Some(slot));
            assert_eq!(t.relations.relation(slot, child), side);

            let order = t.compare(t.slots.value(child), t.slots.value(slot));
            match side {
                Relation::Left => assert!(order.is_le(), "left child of slot {i} is greater"),
                Relation::Right => assert!(order.is_gt(), "right child of slot {i} is not greater"),
                Relation::None => unreachable!(),
            }
        }

        match t.relations.parent(slot) {
            None => assert_eq!(t.root, Some(slot), "slot {i} has no parent but is not root"),
            Some(parent) => {
                let tag = t.relations.relation(parent, slot);
                assert_ne!(tag, Relation::None, "parent of slot {i} does not tag it");
                // Exactly one row tags this slot.
                for j in 0..capacity {
                    let other = SlotId::new(j);
                    if other != parent && t.slots.is_occupied(other) {
                        assert_eq!(t.relations.relation(other, slot), Relation::None);
                    }
                }
            }
        }
    }

    assert_eq!(occupied, t.len(), "occupied slots must match MatrixBst::len");
    assert_eq!(t.root.is_none(), t.is_empty());
    if let Some(root) = t.root {
        assert_eq!(t.relations.parent(root), None, "root must not be a child");
    }

    // Everything occupied is reachable from the root, and inorder is sorted.
    let inorder: Vec<&T> = t.iter().collect();
    assert_eq!(inorder.len(), t.len(), "every element must be reachable");
    for pair in inorder.windows(2) {
        assert!(t.compare(pair[0], pair[1]).is_le(), "inorder must be non-decreasing");
    }
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 50)]
    Add(#[proptest(strategy = "0u8..64")] u8),
    #[proptest(weight = 30)]
    Remove(#[proptest(strategy = "0u8..64")] u8),
    #[proptest(weight = 18)]
    Get(#[proptest(strategy = "0u8..64")] u8),
    #[proptest(weight = 2)]
    Rebalance,
}

fn multiset_values(m: &BTreeMap<u8, usize>) -> Vec<u8> {
    m.iter()
        .flat_map(|(v, n)| std::iter::repeat(*v).take(*n))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_multiset(
        capacity in 0usize..48,
        ops in prop::collection::vec(any::<Op>(), 0..=400),
    ) {
        let mut t: MatrixBst<u8> = MatrixBst::with_capacity(capacity);
        let mut m: BTreeMap<u8, usize> = BTreeMap::new();
        let mut len = 0usize;

        for op in ops {
            match op {
                Op::Add(v) => {
                    let added = t.add(v);
                    prop_assert_eq!(added, len < capacity);
                    if added {
                        *m.entry(v).or_default() += 1;
                        len += 1;
                    }
                }
                Op::Remove(v) => {
                    let removed = t.take(&v);
                    prop_assert_eq!(removed, m.contains_key(&v).then_some(v));
                    if removed.is_some() {
                        let n = m.get_mut(&v).unwrap();
                        *n -= 1;
                        if *n == 0 {
                            m.remove(&v);
                        }
                        len -= 1;
                    }
                }
                Op::Get(v) => {
                    prop_assert_eq!(t.get(&v).copied(), m.contains_key(&v).then_some(v));
                    prop_assert_eq!(t.contains(&v), t.get(&v).is_some());
                }
                Op::Rebalance => {
                    t.rebalance();
                }
            }

            prop_assert_eq!(t.len(), len);
            prop_assert_eq!(t.is_full(), len == capacity);
        }

        validate_tree(&t);
        let expected = multiset_values(&m);
        let got: Vec<u8> = t.iter().copied().collect();
        prop_assert_eq!(&got, &expected);
        prop_assert_eq!(t.min(), expected.first());
        prop_assert_eq!(t.max(), expected.last());
    }

    #[test]
    fn prop_rebalance_distinct(values in prop::collection::btree_set(any::<i32>(), 0..200)) {
        let mut t: MatrixBst<i32> = MatrixBst::with_capacity(200);
        // Ascending insertion: the worst case for an unbalanced tree.
        for v in &values {
            prop_assert!(t.add(*v));
        }
        if values.len() >= 3 {
            prop_assert!(!t.is_balanced());
        }

        let before: Vec<i32> = t.snapshot(Traversal::Inorder).collect();
        t.rebalance();
        validate_tree(&t);

        let after: Vec<i32> = t.iter().copied().collect();
        prop_assert_eq!(before, after);
        prop_assert!(t.is_balanced());
        let n = values.len();
        prop_assert_eq!(t.height(), (usize::BITS - n.leading_zeros()) as usize);
    }

    #[test]
    fn prop_orders_agree_on_content(values in prop::collection::vec(0i16..100, 0..120)) {
        let mut t: MatrixBst<i16> = MatrixBst::with_capacity(120);
        for v in &values {
            t.add(*v);
        }
        let mut sorted = values.clone();
        sorted.sort();

        let inorder: Vec<i16> = t.traverse(Traversal::Inorder).copied().collect();
        prop_assert_eq!(&inorder, &sorted);

        for order in [Traversal::Preorder, Traversal::Postorder] {
            let mut seen: Vec<i16> = t.traverse(order).copied().collect();
            seen.sort();
            prop_assert_eq!(&seen, &sorted);
        }

        // Preorder starts and postorder ends at the root.
        if !values.is_empty() {
            prop_assert_eq!(t.traverse(Traversal::Preorder).next(), Some(&values[0]));
            prop_assert_eq!(t.traverse(Traversal::Postorder).last(), Some(&values[0]));
        }
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_add_order_small_set() {
    let values = [10, 20, 30, 40, 50, 60];

    for_each_permutation(&values, |perm| {
        let mut t: MatrixBst<i32> = MatrixBst::with_capacity(values.len());
        for v in perm {
            assert!(t.add(v));
        }
        assert!(t.is_full());
        validate_tree(&t);
        assert_eq!(t.iter().copied().collect::<Vec<_>>(), values.to_vec());
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    let values = [40, 20, 60, 10, 30, 50, 70];

    // Add in a fixed order, then remove in all permutations.
    let mut base: MatrixBst<i32> = MatrixBst::with_capacity(values.len());
    for v in values {
        assert!(base.add(v));
    }

    for_each_permutation(&values, |perm| {
        let mut t = base.clone();
        let mut remaining: Vec<i32> = values.to_vec();
        remaining.sort();

        for v in perm {
            assert!(t.remove(&v));
            remaining.retain(|r| *r != v);
            assert_eq!(t.len(), remaining.len());
            validate_tree(&t);
            assert_eq!(t.iter().copied().collect::<Vec<_>>(), remaining);
        }
        assert!(t.is_empty());
        assert!(t.root.is_none());
    });
}

#[test]
fn exhaustive_remove_with_duplicates() {
    let values = [2, 1, 2, 3, 2];

    for_each_permutation(&values, |perm| {
        let mut t: MatrixBst<i32> = MatrixBst::with_capacity(values.len());
        for v in perm.iter() {
            t.add(*v);
        }
        validate_tree(&t);
        for v in perm {
            assert!(t.remove(&v));
            validate_tree(&t);
        }
        assert!(t.is_empty());
    });
}
