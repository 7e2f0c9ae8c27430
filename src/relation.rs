//! Parent/child relation table over slot indices.
//!
//! Conceptually a `capacity x capacity` table where entry `(parent, child)` is
//! one of [`Relation::None`], [`Relation::Left`] or [`Relation::Right`]. Each row
//! holds at most one `Left` and one `Right`, and each column at most one non-`None`
//! entry, so the table is stored as one link record per slot:
//!
//! ```text
//! [left:4][right:4][parent:4]   (SlotId::NIL = no link)
//! ```
//!
//! Every mutation keeps the three fields mutually consistent, which makes the
//! records authoritative: a child's `parent` always names the row that tags it.

use crate::slot::SlotId;

/// Tag of a relation-table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Relation {
    None,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Links {
    left: SlotId,
    right: SlotId,
    parent: SlotId,
}

impl Links {
    const EMPTY: Links = Links {
        left: SlotId::NIL,
        right: SlotId::NIL,
        parent: SlotId::NIL,
    };
}

#[derive(Clone)]
pub(crate) struct RelationTable {
    links: Vec<Links>,
}

impl RelationTable {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            links: vec![Links::EMPTY; capacity],
        }
    }

    /// Entry `(parent, child)` of the table.
    #[cfg(test)]
    pub(crate) fn relation(&self, parent: SlotId, child: SlotId) -> Relation {
        let row = &self.links[parent.index()];
        if row.left == child {
            Relation::Left
        } else if row.right == child {
            Relation::Right
        } else {
            Relation::None
        }
    }

    #[inline]
    pub(crate) fn left(&self, slot: SlotId) -> Option<SlotId> {
        self.links[slot.index()].left.get()
    }

    #[inline]
    pub(crate) fn right(&self, slot: SlotId) -> Option<SlotId> {
        self.links[slot.index()].right.get()
    }

    #[inline]
    pub(crate) fn parent(&self, slot: SlotId) -> Option<SlotId> {
        self.links[slot.index()].parent.get()
    }

    #[inline]
    pub(crate) fn child(&self, slot: SlotId, side: Relation) -> Option<SlotId> {
        match side {
            Relation::Left => self.left(slot),
            Relation::Right => self.right(slot),
            Relation::None => None,
        }
    }

    /// Record `(parent, side, child)`. The `side` position of `parent` and the
    /// parent of `child` must both be unset.
    pub(crate) fn link(&mut self, parent: SlotId, side: Relation, child: SlotId) {
        debug_assert!(self.links[child.index()].parent.is_nil());
        let row = &mut self.links[parent.index()];
        match side {
            Relation::Left => {
                debug_assert!(row.left.is_nil());
                row.left = child;
            }
            Relation::Right => {
                debug_assert!(row.right.is_nil());
                row.right = child;
            }
            Relation::None => unreachable!("cannot link with Relation::None"),
        }
        self.links[child.index()].parent = parent;
    }

    /// Clear every relation with `slot` as either party.
    pub(crate) fn detach(&mut self, slot: SlotId) {
        let links = std::mem::replace(&mut self.links[slot.index()], Links::EMPTY);

        if let Some(parent) = links.parent.get() {
            let row = &mut self.links[parent.index()];
            if row.left == slot {
                row.left = SlotId::NIL;
            } else if row.right == slot {
                row.right = SlotId::NIL;
            }
        }
        for child in [links.left, links.right] {
            if let Some(child) = child.get() {
                self.links[child.index()].parent = SlotId::NIL;
            }
        }
    }

    /// Copy the outgoing row of `from` onto `to`, then clear every relation of
    /// `from`. `from` must be a child of `to`; `to` keeps its own parent.
    pub(crate) fn overwrite_row(&mut self, to: SlotId, from: SlotId) {
        debug_assert_eq!(self.links[from.index()].parent, to);
        let moved = std::mem::replace(&mut self.links[from.index()], Links::EMPTY);

        let row = &mut self.links[to.index()];
        row.left = moved.left;
        row.right = moved.right;

        for child in [moved.left, moved.right] {
            if let Some(child) = child.get() {
                self.links[child.index()].parent = to;
            }
        }
    }

    /// True when no relation touches `slot`.
    #[cfg(test)]
    pub(crate) fn is_unlinked(&self, slot: SlotId) -> bool {
        self.links[slot.index()] == Links::EMPTY
    }

    pub(crate) fn clear(&mut self) {
        self.links.fill(Links::EMPTY);
    }
}
