//! Height-balance check (AVL criterion) and tree height.

use crate::traversal::Traversal;
use crate::MatrixBst;

impl<T, C> MatrixBst<T, C> {
    /// True when, at every node, the heights of the two subtrees differ by at
    /// most one. An empty tree is balanced.
    pub fn is_balanced(&self) -> bool {
        self.subtree_height(true).is_some()
    }

    /// Number of nodes on the longest root-to-leaf path; 0 when empty.
    pub fn height(&self) -> usize {
        self.subtree_height(false)
            .expect("height without balance check always succeeds")
    }

    /// Height of the whole tree, computed bottom-up over a postorder walk.
    ///
    /// With `require_balance`, returns `None` as soon as a node's child heights
    /// differ by more than one.
    fn subtree_height(&self, require_balance: bool) -> Option<usize> {
        let Some(root) = self.root else {
            return Some(0);
        };

        // Indexed by slot; absent subtrees have height 0.
        let mut heights = vec![0usize; self.capacity()];
        for slot in self.slot_order(Traversal::Postorder) {
            let left = self.relations.left(slot).map_or(0, |l| heights[l.index()]);
            let right = self.relations.right(slot).map_or(0, |r| heights[r.index()]);
            if require_balance && left.abs_diff(right) > 1 {
                return None;
            }
            heights[slot.index()] = 1 + left.max(right);
        }
        Some(heights[root.index()])
    }
}
