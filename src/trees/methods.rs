//! Generic methods for walkers of binary search trees.
//!
//! These work with any [`SomeWalker`], so that balanced walkers that need to do
//! bookkeeping while moving (for example, the AVL walker rebuilding heights on
//! the way up) can use them.

use super::*;
use std::cmp::Ordering;

const EMPTY_POSITION_ERROR: &str = "a filled position can't fail to go down";

/// Searches for `key` in the current subtree, by the usual binary search tree descent.
/// If found, the walker stays at the node holding the key, and `true` is returned.
/// Otherwise, the walker ends at the empty position where the key would be inserted,
/// and `false` is returned.
pub fn search_subtree<K: Ord, W: SomeWalker<K>>(walker: &mut W, key: &K) -> bool {
    loop {
        let ordering = match walker.key() {
            None => return false,
            Some(current) => key.cmp(current),
        };
        match ordering {
            Ordering::Less => walker.go_left().expect(EMPTY_POSITION_ERROR),
            Ordering::Greater => walker.go_right().expect(EMPTY_POSITION_ERROR),
            Ordering::Equal => return true,
        }
    }
}

/// Goes to the leftmost node of the current subtree.
/// If the current position is empty, returns an error and stays in place.
pub fn go_to_first<K, W: SomeWalker<K>>(walker: &mut W) -> Result<(), ()> {
    if walker.is_empty() {
        return Err(());
    }
    while walker.go_left().is_ok() {}
    // now at the empty position left of the first node
    walker.go_up().map(|_| ())
}
