//! Navigation over the relation table: child lookup, descent by comparison and
//! the extreme nodes of a subtree.

use std::cmp::Ordering;

use crate::relation::Relation;
use crate::slot::SlotId;
use crate::MatrixBst;

impl<T, C> MatrixBst<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Slot of the first node on the search path comparing equal to `target`.
    pub(crate) fn locate(&self, target: &T) -> Option<SlotId> {
        let mut node = self.root?;
        loop {
            let side = match self.compare(target, self.slots.value(node)) {
                Ordering::Less => Relation::Left,
                Ordering::Greater => Relation::Right,
                Ordering::Equal => return Some(node),
            };
            node = self.relations.child(node, side)?;
        }
    }
}

impl<T, C> MatrixBst<T, C> {
    /// Follow left links from `from` until there are none.
    pub(crate) fn leftmost(&self, from: SlotId) -> SlotId {
        self.extreme(from, Relation::Left)
    }

    /// Follow right links from `from` until there are none.
    pub(crate) fn rightmost(&self, from: SlotId) -> SlotId {
        self.extreme(from, Relation::Right)
    }

    #[inline]
    fn extreme(&self, from: SlotId, side: Relation) -> SlotId {
        let mut node = from;
        while let Some(next) = self.relations.child(node, side) {
            node = next;
        }
        node
    }
}
