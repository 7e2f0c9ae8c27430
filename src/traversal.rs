//! Preorder, inorder and postorder traversal.
//!
//! A traversal is materialized eagerly into a [`Snapshot`] when requested. The
//! snapshot is a plain forward cursor over that sequence; it never looks at the
//! tree again.

use std::iter::FusedIterator;

use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::slot::SlotId;
use crate::MatrixBst;

/// Inline stack depth before spilling to the heap.
type SlotStack = SmallVec<[SlotId; 32]>;

/// Visit order of a traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Traversal {
    /// Node, left subtree, right subtree.
    Preorder,
    /// Left subtree, node, right subtree: ascending comparator order.
    #[default]
    Inorder,
    /// Left subtree, right subtree, node.
    Postorder,
}

/// Forward-only cursor over a traversal captured at creation time.
#[derive(Clone, Debug)]
pub struct Snapshot<I> {
    items: std::vec::IntoIter<I>,
}

impl<I> Snapshot<I> {
    pub(crate) fn new(items: Vec<I>) -> Self {
        Self {
            items: items.into_iter(),
        }
    }

    /// Whether [`next`](Iterator::next) will yield another element.
    #[inline]
    pub fn has_next(&self) -> bool {
        !self.items.as_slice().is_empty()
    }

    /// Always fails with [`Error::UnsupportedRemove`]: a snapshot has no link
    /// back to the tree it was taken from.
    pub fn remove(&mut self) -> Result<()> {
        Err(Error::UnsupportedRemove)
    }
}

impl<I> Iterator for Snapshot<I> {
    type Item = I;

    #[inline]
    fn next(&mut self) -> Option<I> {
        self.items.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<I> ExactSizeIterator for Snapshot<I> {}

impl<I> FusedIterator for Snapshot<I> {}

impl<T, C> MatrixBst<T, C> {
    /// Occupied slots in `order`.
    pub(crate) fn slot_order(&self, order: Traversal) -> Vec<SlotId> {
        let mut out = Vec::with_capacity(self.count);
        let Some(root) = self.root else {
            return out;
        };
        let mut stack = SlotStack::new();

        match order {
            Traversal::Preorder => {
                stack.push(root);
                while let Some(slot) = stack.pop() {
                    out.push(slot);
                    stack.extend(self.relations.right(slot));
                    stack.extend(self.relations.left(slot));
                }
            }
            Traversal::Inorder => {
                let mut current = Some(root);
                loop {
                    while let Some(slot) = current {
                        stack.push(slot);
                        current = self.relations.left(slot);
                    }
                    let Some(slot) = stack.pop() else {
                        break;
                    };
                    out.push(slot);
                    current = self.relations.right(slot);
                }
            }
            Traversal::Postorder => {
                // Node-right-left preorder, reversed.
                stack.push(root);
                while let Some(slot) = stack.pop() {
                    out.push(slot);
                    stack.extend(self.relations.left(slot));
                    stack.extend(self.relations.right(slot));
                }
                out.reverse();
            }
        }

        debug_assert_eq!(out.len(), self.count);
        out
    }

    /// Borrowing snapshot of the elements in `order`.
    pub fn traverse(&self, order: Traversal) -> Snapshot<&T> {
        Snapshot::new(
            self.slot_order(order)
                .into_iter()
                .map(|slot| self.slots.value(slot))
                .collect(),
        )
    }

    /// Owned snapshot of the elements in `order`, independent of any later
    /// change to the tree.
    pub fn snapshot(&self, order: Traversal) -> Snapshot<T>
    where
        T: Clone,
    {
        Snapshot::new(
            self.slot_order(order)
                .into_iter()
                .map(|slot| self.slots.value(slot).clone())
                .collect(),
        )
    }

    /// Inorder snapshot: the elements in ascending comparator order.
    pub fn iter(&self) -> Snapshot<&T> {
        self.traverse(Traversal::Inorder)
    }

    /// Move every element out in ascending order, leaving the tree empty.
    pub(crate) fn drain_inorder(&mut self) -> Vec<T> {
        let order = self.slot_order(Traversal::Inorder);
        let values = order
            .into_iter()
            .map(|slot| self.slots.take(slot))
            .collect();
        self.relations.clear();
        self.root = None;
        self.count = 0;
        values
    }
}

impl<'a, T, C> IntoIterator for &'a MatrixBst<T, C> {
    type Item = &'a T;
    type IntoIter = Snapshot<&'a T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> IntoIterator for MatrixBst<T, C> {
    type Item = T;
    type IntoIter = Snapshot<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        Snapshot::new(self.drain_inorder())
    }
}
