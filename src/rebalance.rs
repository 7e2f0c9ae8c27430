//! Rebuilding a tree into minimum height.
//!
//! [`MatrixBst::add`] never restructures, so a tree filled in sorted order
//! degenerates into a chain. Rebalancing takes the elements out in sorted
//! order, empties the tree, and re-adds them median first so each subtree is
//! built from one half of the remaining range.

use std::cmp::Ordering;

use log::{debug, log_enabled, Level};

use crate::MatrixBst;

/// Rebuild `tree` so its height is `ceil(log2(len + 1))`.
///
/// The elements and their inorder sequence are unchanged. With duplicate
/// elements the result can still be taller, since ties always descend left.
pub fn rebalance<T, C>(tree: &mut MatrixBst<T, C>)
where
    C: Fn(&T, &T) -> Ordering,
{
    if log_enabled!(Level::Debug) {
        debug!(
            "rebalancing {} elements (height {})",
            tree.len(),
            tree.height()
        );
    }

    let mut sorted: Vec<Option<T>> = tree.drain_inorder().into_iter().map(Some).collect();
    add_median_first(tree, &mut sorted);

    if log_enabled!(Level::Debug) {
        debug!(
            "rebalanced {} elements: height {}, balanced {}",
            tree.len(),
            tree.height(),
            tree.is_balanced()
        );
    }
}

/// Add the lower median of `range`, then the medians of each half.
fn add_median_first<T, C>(tree: &mut MatrixBst<T, C>, range: &mut [Option<T>])
where
    C: Fn(&T, &T) -> Ordering,
{
    if range.is_empty() {
        return;
    }
    let mid = (range.len() - 1) / 2;
    let value = range[mid]
        .take()
        .expect("each sorted element is added exactly once");
    let added = tree.add(value);
    debug_assert!(added, "rebuild never exceeds the original element count");

    let (low, rest) = range.split_at_mut(mid);
    add_median_first(tree, low);
    add_median_first(tree, &mut rest[1..]);
}

impl<T, C> MatrixBst<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// See [`rebalance`].
    pub fn rebalance(&mut self) {
        rebalance(self);
    }
}
