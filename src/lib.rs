//! Self-balancing binary search trees over ordered keys.
//!
//! Two trees are provided, with the same interface ([`SearchTree`]) and different
//! balancing disciplines:
//! * [`avl::AVLTree`], balanced by keeping track of subtree heights.
//! * [`red_black::RedBlackTree`], balanced by coloring its nodes red and black.
//!
//!```
//! use sapling::{SearchTree, avl::AVLTree, red_black::RedBlackTree};
//!
//! let mut avl: AVLTree<i32> = (1..=7).collect();
//! let mut rb: RedBlackTree<i32> = (1..=7).collect();
//! assert!(avl.remove(&4));
//! assert!(rb.remove(&4));
//! assert_eq!(avl.in_order(), rb.in_order());
//! avl.assert_correctness();
//! rb.assert_correctness();
//!```

pub mod error;
pub mod trees;

pub use error::{Result, TreeError};
pub use trees::*;
