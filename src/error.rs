//! Errors reported by the trees.
//!
//! Ordinary outcomes (inserting a key that is already present, removing a key that
//! isn't) are not errors, and are reported through `bool` return values instead.
//! What remains is rejected caller input, and the invariant violations found by the
//! diagnostic checkers.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = TreeError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// An absent key was passed to one of the checked entry points.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A node's cached height doesn't match the heights of its children.
    #[error("cached height {cached} doesn't match the actual height {actual}")]
    HeightMismatch { cached: isize, actual: isize },

    /// An AVL node has a balance factor outside of `-1..=1`.
    #[error("node is out of balance: balance factor {balance}")]
    Unbalanced { balance: isize },

    #[error("the root of a red-black tree is red")]
    RedRoot,

    #[error("the sentinel of a red-black tree is red")]
    RedSentinel,

    /// A red node has a red child.
    #[error("a red node has a red child")]
    RedRedViolation,

    /// Two paths from the same node reach the sentinel through a different number of black nodes.
    #[error("black height mismatch: {left} on the left, {right} on the right")]
    BlackHeightMismatch { left: usize, right: usize },

    /// A node's parent link doesn't point back to the node that owns it.
    #[error("broken parent link")]
    BrokenParentLink,

    /// The keys are not in strictly ascending in-order.
    #[error("keys are not in strictly ascending order")]
    OrderViolation,

    /// The stored element count doesn't match the number of reachable nodes.
    #[error("tree claims {expected} elements, but {found} were found")]
    SizeMismatch { expected: usize, found: usize },
}
