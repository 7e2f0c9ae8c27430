use std::cmp::Ordering;
use std::fmt;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::relation::{Relation, RelationTable};
use crate::slot::{SlotId, SlotStore};
use crate::{Config, DEFAULT_CAPACITY, MAX_CAPACITY};

/// Comparator used by trees built from an [`Ord`] element type.
pub type NaturalOrder<T> = fn(&T, &T) -> Ordering;

// =============================================================================
// MatrixBst
// =============================================================================

/// A fixed-capacity binary search tree whose structure lives in a relation
/// table indexed by slot rather than in per-node pointers.
///
/// Elements equal under the comparator are kept as distinct nodes; a new
/// element that ties with a node is placed in that node's left subtree.
#[derive(Clone)]
pub struct MatrixBst<T, C = NaturalOrder<T>> {
    pub(crate) slots: SlotStore<T>,
    pub(crate) relations: RelationTable,
    pub(crate) root: Option<SlotId>,
    pub(crate) count: usize,
    comparator: C,
}

impl<T: Ord> MatrixBst<T> {
    /// Create an empty tree with [`DEFAULT_CAPACITY`] slots ordered by [`Ord`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty tree with `capacity` slots ordered by [`Ord`].
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`MAX_CAPACITY`].
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(Config { capacity })
    }

    /// Create an empty tree from `config`, ordered by [`Ord`].
    ///
    /// # Panics
    ///
    /// Panics if `config.capacity` exceeds [`MAX_CAPACITY`].
    pub fn with_config(config: Config) -> Self {
        Self::with_capacity_and_comparator(config.capacity, T::cmp)
    }
}

impl<T: Ord> Default for MatrixBst<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> MatrixBst<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Create an empty tree with [`DEFAULT_CAPACITY`] slots ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_capacity_and_comparator(DEFAULT_CAPACITY, comparator)
    }

    /// Create an empty tree with `capacity` slots ordered by `comparator`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`MAX_CAPACITY`].
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        assert!(
            capacity <= MAX_CAPACITY,
            "capacity {capacity} exceeds MAX_CAPACITY ({MAX_CAPACITY})"
        );
        Self {
            slots: SlotStore::new(capacity),
            relations: RelationTable::new(capacity),
            root: None,
            count: 0,
            comparator,
        }
    }

    #[inline]
    pub(crate) fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.comparator)(a, b)
    }

    /// Insert `value`, returning `false` without modifying the tree when it is full.
    pub fn add(&mut self, value: T) -> bool {
        self.try_add(value).is_ok()
    }

    /// Insert `value`.
    ///
    /// Descends from the root sending ties and smaller elements left, larger
    /// elements right, and hangs the value in a fresh slot under the first
    /// missing child.
    pub fn try_add(&mut self, value: T) -> Result<()> {
        if self.is_full() {
            trace!("add rejected: tree at capacity {}", self.capacity());
            return Err(Error::CapacityExceeded {
                capacity: self.capacity(),
            });
        }

        let Some(mut node) = self.root else {
            let slot = self.allocate_free_slot();
            self.slots.put(slot, value);
            self.root = Some(slot);
            self.count += 1;
            return Ok(());
        };

        loop {
            let side = if self.compare(&value, self.slots.value(node)).is_le() {
                Relation::Left
            } else {
                Relation::Right
            };

            match self.relations.child(node, side) {
                Some(next) => node = next,
                None => {
                    let slot = self.allocate_free_slot();
                    trace!(
                        "add: slot {} as {:?} child of slot {}",
                        slot.index(),
                        side,
                        node.index()
                    );
                    self.slots.put(slot, value);
                    self.relations.link(node, side, slot);
                    self.count += 1;
                    return Ok(());
                }
            }
        }
    }

    fn allocate_free_slot(&self) -> SlotId {
        self.slots
            .allocate_free_slot()
            .expect("a free slot must exist while the tree is not full")
    }

    /// The stored element comparing equal to `target`.
    pub fn get(&self, target: &T) -> Option<&T> {
        self.locate(target).map(|slot| self.slots.value(slot))
    }

    /// Mutable access to the stored element comparing equal to `target`.
    ///
    /// The element must keep comparing the same way against every other
    /// element; only data the comparator ignores may be changed.
    pub fn get_mut(&mut self, target: &T) -> Option<&mut T> {
        let slot = self.locate(target)?;
        Some(self.slots.value_mut(slot))
    }

    pub fn contains(&self, target: &T) -> bool {
        self.locate(target).is_some()
    }

    /// Remove one element comparing equal to `target`. Returns `false` if there
    /// is none.
    pub fn remove(&mut self, target: &T) -> bool {
        self.take(target).is_some()
    }

    /// Remove one element comparing equal to `target` and return it.
    pub fn take(&mut self, target: &T) -> Option<T> {
        let slot = self.locate(target)?;
        let value = self.remove_slot(slot);
        self.count -= 1;
        Some(value)
    }
}

impl<T, C> MatrixBst<T, C> {
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    /// Number of slots, fixed at construction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn config(&self) -> Config {
        Config {
            capacity: self.capacity(),
        }
    }

    /// Smallest element, or `None` when empty.
    pub fn min(&self) -> Option<&T> {
        let root = self.root?;
        Some(self.slots.value(self.leftmost(root)))
    }

    /// Largest element, or `None` when empty.
    pub fn max(&self) -> Option<&T> {
        let root = self.root?;
        Some(self.slots.value(self.rightmost(root)))
    }

    /// Free every slot and relation.
    pub fn clear(&mut self) {
        debug!("clearing tree of {} elements", self.count);
        self.slots.clear();
        self.relations.clear();
        self.root = None;
        self.count = 0;
    }

    /// Structurally remove the element held by `slot`, returning it.
    ///
    /// `slot` keeps its identity whenever another element takes its place, so
    /// the relation from its parent stays valid.
    fn remove_slot(&mut self, slot: SlotId) -> T {
        match (self.relations.left(slot), self.relations.right(slot)) {
            (None, None) => {
                trace!("remove: leaf slot {}", slot.index());
                if self.relations.parent(slot).is_none() {
                    debug_assert_eq!(self.root, Some(slot));
                    self.root = None;
                }
                self.relations.detach(slot);
                self.slots.take(slot)
            }
            (Some(child), None) | (None, Some(child)) => {
                trace!(
                    "remove: slot {} overwritten by its only child {}",
                    slot.index(),
                    child.index()
                );
                self.overwrite_slot(slot, child)
            }
            (Some(left), Some(_)) => {
                // The predecessor has no right child, so this recursion ends in
                // one of the arms above.
                let predecessor = self.rightmost(left);
                trace!(
                    "remove: slot {} replaced by predecessor slot {}",
                    slot.index(),
                    predecessor.index()
                );
                let replacement = self.remove_slot(predecessor);
                self.slots.replace(slot, replacement)
            }
        }
    }

    /// Move the element and outgoing relations of `from` (a child of `to`) onto
    /// `to`, then free `from`. Returns the element `to` held before.
    fn overwrite_slot(&mut self, to: SlotId, from: SlotId) -> T {
        let value = self.slots.take(from);
        self.relations.overwrite_row(to, from);
        self.slots.replace(to, value)
    }
}

// =============================================================================
// Rendering
// =============================================================================

impl<T: fmt::Display, C> MatrixBst<T, C> {
    /// Write the tree sideways to stdout, larger elements on top.
    pub fn print_tree(&self) {
        print!("{}", self.render_tree());
    }

    /// The text written by [`print_tree`](Self::print_tree).
    ///
    /// One line per node in descending order. The root is written bare; a node
    /// at depth `d` is prefixed by `d - 1` copies of `"|\t"` and then `"|-------"`.
    pub fn render_tree(&self) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        let mut stack: Vec<(SlotId, usize)> = Vec::new();
        let mut current = self.root.map(|root| (root, 0));

        loop {
            while let Some((slot, depth)) = current {
                stack.push((slot, depth));
                current = self.relations.right(slot).map(|r| (r, depth + 1));
            }
            let Some((slot, depth)) = stack.pop() else {
                break;
            };

            if depth > 0 {
                for _ in 0..depth - 1 {
                    out.push_str("|\t");
                }
                out.push_str("|-------");
            }
            let _ = writeln!(out, "{}", self.slots.value(slot));

            current = self.relations.left(slot).map(|l| (l, depth + 1));
        }
        out
    }
}

impl<T: fmt::Debug, C> fmt::Debug for MatrixBst<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
