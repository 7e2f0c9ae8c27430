//! Error types for matrix-bst.
//!
//! Most lookups report absence through `Option`/`bool`; only the failures that
//! callers may want to match on get a variant here.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by [`MatrixBst`](crate::MatrixBst) and its snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Every slot is occupied. The tree was not modified.
    #[error("tree is at capacity ({capacity} elements)")]
    CapacityExceeded { capacity: usize },

    /// Snapshots are detached from the tree, so removing through one has no
    /// meaning.
    #[error("remove is not supported on a traversal snapshot")]
    UnsupportedRemove,
}
