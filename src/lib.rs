//! # matrix-bst
//!
//! A fixed-capacity binary search tree whose parent/child structure is kept in
//! a relation table indexed by storage slot instead of per-node pointers.
//!
//! Elements live in a fixed array of slots. For every pair of slots the
//! relation table answers whether the second is the left child, the right child
//! or unrelated to the first. Insertion claims the first free slot; removal
//! splices slots out of the table and frees them for reuse. Capacity is chosen
//! at construction and never grows: [`MatrixBst::add`] simply fails once every
//! slot is taken.
//!
//! The tree does not rebalance itself. [`rebalance`] rebuilds it into minimum
//! height on demand, and [`MatrixBst::is_balanced`] checks the AVL height
//! criterion.
//!
//! ## Example
//!
//! ```rust
//! use matrix_bst::{MatrixBst, Traversal};
//!
//! let mut tree: MatrixBst<u32> = MatrixBst::with_capacity(16);
//! for v in [1, 2, 3, 4, 5, 6, 7] {
//!     tree.add(v);
//! }
//! assert!(!tree.is_balanced());
//!
//! tree.rebalance();
//! assert!(tree.is_balanced());
//! assert_eq!(tree.min(), Some(&1));
//!
//! let preorder: Vec<u32> = tree.traverse(Traversal::Preorder).copied().collect();
//! assert_eq!(preorder, vec![4, 2, 1, 3, 6, 5, 7]);
//! ```

#![warn(clippy::all)]

mod balance;
pub mod error;
mod navigate;
mod rebalance;
mod relation;
mod slot;
mod traversal;
mod tree;

pub use error::{Error, Result};
pub use rebalance::rebalance;
pub use traversal::{Snapshot, Traversal};
pub use tree::{MatrixBst, NaturalOrder};

// =============================================================================
// Configuration
// =============================================================================

/// Number of slots used when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 3000;

/// Largest supported capacity. Slot indices are 32-bit with one value reserved.
pub const MAX_CAPACITY: usize = u32::MAX as usize;

/// Construction parameters for a [`MatrixBst`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of slots; the maximum element count for the tree's lifetime.
    pub capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}


#[cfg(test)]
mod proptests;
