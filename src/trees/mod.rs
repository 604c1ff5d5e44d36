//! This module contains the balanced search trees, the unbalanced [`basic_tree`]
//! that the AVL tree is built on, and the traits they share.

pub mod avl;
pub mod basic_tree;
pub mod methods;
pub mod red_black;

pub use avl::AVLTree;
pub use red_black::RedBlackTree;

use crate::error::{Result, TreeError};

/// Which son of a node.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Returns the opposite side.
    pub fn flip(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// The order in which a traversal lists the keys of a tree.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum Traversal {
    InOrder,
    PreOrder,
    PostOrder,
    LevelOrder,
}

/// The interface shared by the balanced search trees.
///
/// Keys are unique: inserting a key that is already present does nothing.
/// The traversals are computed eagerly, and calling them again on an unchanged
/// tree yields the same sequence.
pub trait SearchTree<K: Ord>: Default {
    /// Inserts the key if it isn't present yet.
    /// Returns `true` if the key was inserted, `false` if it was already present.
    fn insert(&mut self, key: K) -> bool;

    /// Removes the key if it is present.
    /// Returns `true` if a key was removed.
    fn remove(&mut self, key: &K) -> bool;

    fn contains(&self, key: &K) -> bool;

    /// The number of keys in the tree.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of edges on the longest path from the root to a leaf.
    /// A single node has height `0`, and the empty tree has height `-1`.
    fn height(&self) -> isize;

    fn in_order(&self) -> Vec<&K>;
    fn pre_order(&self) -> Vec<&K>;
    fn post_order(&self) -> Vec<&K>;
    fn level_order(&self) -> Vec<&K>;

    fn traverse(&self, order: Traversal) -> Vec<&K> {
        match order {
            Traversal::InOrder => self.in_order(),
            Traversal::PreOrder => self.pre_order(),
            Traversal::PostOrder => self.post_order(),
            Traversal::LevelOrder => self.level_order(),
        }
    }

    /// Checks all of the tree's structural invariants, and reports the first
    /// violation found.
    fn check_invariants(&self) -> Result<()>;

    /// Asserts that the tree's invariants hold.
    /// Otherwise, panics.
    fn assert_correctness(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("tree invariant violated: {}", err);
        }
    }

    /// Same as [`SearchTree::insert`], for callers whose key may be missing.
    fn try_insert(&mut self, key: Option<K>) -> Result<bool> {
        let key = key.ok_or(TreeError::InvalidArgument("cannot insert an absent key"))?;
        Ok(self.insert(key))
    }

    /// Same as [`SearchTree::remove`], for callers whose key may be missing.
    fn try_remove(&mut self, key: Option<&K>) -> Result<bool> {
        let key = key.ok_or(TreeError::InvalidArgument("cannot remove an absent key"))?;
        Ok(self.remove(key))
    }

    /// Same as [`SearchTree::contains`], for callers whose key may be missing.
    fn try_contains(&self, key: Option<&K>) -> Result<bool> {
        let key = key.ok_or(TreeError::InvalidArgument("cannot look up an absent key"))?;
        Ok(self.contains(key))
    }
}

/// A walker is a cursor into a tree, that can move down to the sons of the
/// current position and back up.
/// It can also be at an empty position, i.e., the son of a node that has no son on that side.
pub trait SomeWalker<K> {
    /// Goes to the left son.
    /// Fails if the current position is empty.
    fn go_left(&mut self) -> std::result::Result<(), ()>;

    /// Goes to the right son.
    /// Fails if the current position is empty.
    fn go_right(&mut self) -> std::result::Result<(), ()>;

    /// Goes up to the parent, and returns which son we came from.
    /// Fails if at the root.
    fn go_up(&mut self) -> std::result::Result<Side, ()>;

    /// How many steps down from the root the current position is.
    fn depth(&self) -> usize;

    /// The key at the current position, or [`None`] if the position is empty.
    fn key(&self) -> Option<&K>;

    fn is_empty(&self) -> bool {
        self.key().is_none()
    }

    fn go_to_root(&mut self) {
        while self.go_up().is_ok() {}
    }
}
