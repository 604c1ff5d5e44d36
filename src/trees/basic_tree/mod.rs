//! The basic tree module
//! This module implements basic unbalanced trees, which the balanced
//! trees are built on by wrapping around them.
//!
//! Every node carries an extra field of type `A`, for algorithm-specific
//! bookkeeping (the AVL tree keeps the subtree height there).

// these should not be public as they are merely separate files
// for some of the functions of this module
mod iterative_deallocator;
mod walker;

pub mod iterators;

pub use iterative_deallocator::*;
pub use walker::*;

use std::collections::VecDeque;

/// A basic tree. might be empty.
#[derive(Clone, Debug)]
pub enum BasicTree<K, A = ()> {
    Empty,
    Root(Box<BasicNode<K, A>>),
}
use BasicTree::*;

/// A basic node. can be viewed as a non-empty basic tree: it always has at least one key.
#[derive(Clone, Debug)]
pub struct BasicNode<K, A = ()> {
    key: K,
    pub(crate) alg_data: A,
    pub left: BasicTree<K, A>,
    pub right: BasicTree<K, A>,
}

impl<K, A> BasicNode<K, A> {
    /// Creates a node with a single key, and the algorithm specific data.
    pub fn new_alg(key: K, alg_data: A) -> BasicNode<K, A> {
        BasicNode {
            key,
            alg_data,
            left: Empty,
            right: Empty,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn into_key(self) -> K {
        self.key
    }

    /// Returns the algorithm-specific data
    pub fn alg_data(&self) -> &A {
        &self.alg_data
    }
}

impl<K, A> Default for BasicTree<K, A> {
    fn default() -> Self {
        Empty
    }
}

impl<K, A> BasicTree<K, A> {
    pub fn new() -> Self {
        Empty
    }

    pub fn from_node(node: BasicNode<K, A>) -> Self {
        Root(Box::new(node))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Empty)
    }

    pub fn node(&self) -> Option<&BasicNode<K, A>> {
        match self {
            Empty => None,
            Root(node) => Some(&**node),
        }
    }

    pub fn node_mut(&mut self) -> Option<&mut BasicNode<K, A>> {
        match self {
            Empty => None,
            Root(node) => Some(&mut **node),
        }
    }

    pub fn into_node_boxed(self) -> Option<Box<BasicNode<K, A>>> {
        match self {
            Empty => None,
            Root(node) => Some(node),
        }
    }

    /// The key at the root, if any.
    pub fn key(&self) -> Option<&K> {
        Some(self.node()?.key())
    }

    /// Returns the smallest key in the tree.
    pub fn first(&self) -> Option<&K> {
        let mut node = self.node()?;
        while let Root(left) = &node.left {
            node = &**left;
        }
        Some(&node.key)
    }

    /// Returns the largest key in the tree.
    pub fn last(&self) -> Option<&K> {
        let mut node = self.node()?;
        while let Root(right) = &node.right {
            node = &**right;
        }
        Some(&node.key)
    }

    /// Computes the height of the tree by walking all of it.
    /// `-1` for the empty tree.
    pub fn computed_height(&self) -> isize {
        let mut height = -1;
        let mut queue: VecDeque<(&BasicNode<K, A>, isize)> = VecDeque::new();
        if let Some(node) = self.node() {
            queue.push_back((node, 0));
        }
        while let Some((node, depth)) = queue.pop_front() {
            height = std::cmp::max(height, depth);
            for son in [&node.left, &node.right].iter() {
                if let Some(son) = son.node() {
                    queue.push_back((son, depth + 1));
                }
            }
        }
        height
    }

    /// Runs a local check on every node of the tree, and returns the first failure.
    /// The nodes are visited in pre-order.
    pub fn check_with<F, E>(&self, mut func: F) -> std::result::Result<(), E>
    where
        F: FnMut(&BasicNode<K, A>) -> std::result::Result<(), E>,
    {
        let mut stack: Vec<&BasicNode<K, A>> = self.node().into_iter().collect();
        while let Some(node) = stack.pop() {
            func(node)?;
            stack.extend(node.right.node());
            stack.extend(node.left.node());
        }
        Ok(())
    }

    /// Counts the nodes by walking the whole tree.
    pub fn count_nodes(&self) -> usize {
        self.iter().count()
    }

    /// Lazily iterates over the keys in ascending order.
    pub fn iter(&self) -> iterators::Iter<'_, K, A> {
        iterators::Iter::new(self)
    }

    pub fn in_order(&self) -> Vec<&K> {
        self.iter().collect()
    }

    pub fn pre_order(&self) -> Vec<&K> {
        let mut res = vec![];
        let mut stack: Vec<&BasicNode<K, A>> = self.node().into_iter().collect();
        while let Some(node) = stack.pop() {
            res.push(&node.key);
            // the right son is pushed first, so that the left son is popped first
            stack.extend(node.right.node());
            stack.extend(node.left.node());
        }
        res
    }

    pub fn post_order(&self) -> Vec<&K> {
        // a reversed pre-order that visits right sons first is exactly the post-order
        let mut res = vec![];
        let mut stack: Vec<&BasicNode<K, A>> = self.node().into_iter().collect();
        while let Some(node) = stack.pop() {
            res.push(&node.key);
            stack.extend(node.left.node());
            stack.extend(node.right.node());
        }
        res.reverse();
        res
    }

    pub fn level_order(&self) -> Vec<&K> {
        let mut res = vec![];
        let mut queue: VecDeque<&BasicNode<K, A>> = self.node().into_iter().collect();
        while let Some(node) = queue.pop_front() {
            res.push(&node.key);
            queue.extend(node.left.node());
            queue.extend(node.right.node());
        }
        res
    }
}

impl<K: Ord, A> BasicTree<K, A> {
    /// Searches for the node holding `key`, without modifying anything.
    pub fn find(&self, key: &K) -> Option<&BasicNode<K, A>> {
        let mut tree = self;
        while let Root(node) = tree {
            match key.cmp(&node.key) {
                std::cmp::Ordering::Less => tree = &node.left,
                std::cmp::Ordering::Greater => tree = &node.right,
                std::cmp::Ordering::Equal => return Some(&**node),
            }
        }
        None
    }

    /// Checks that the keys are strictly ascending in-order.
    pub fn is_strictly_ascending(&self) -> bool {
        let mut iter = self.iter();
        let mut prev = match iter.next() {
            None => return true,
            Some(key) => key,
        };
        for key in iter {
            if prev >= key {
                return false;
            }
            prev = key;
        }
        true
    }
}

impl<K: std::fmt::Debug, A> BasicTree<K, A> {
    #[cfg(debug_assertions)]
    /// Used for debugging. Prints a representation of the tree, like so:
    /// `<<* 1 *> 2 *>`
    /// Each pair of triangle brackets is a node, and `*` denotes empty trees.
    /// You can provide a custom printer for the alg_data field.
    pub fn representation<F>(&self, alg_print: &F) -> String
    where
        F: Fn(&BasicNode<K, A>) -> String,
    {
        match self.node() {
            None => String::from("*"),
            Some(node) => format!(
                "<{} {:?}{} {}>",
                node.left.representation(alg_print),
                node.key,
                alg_print(node),
                node.right.representation(alg_print)
            ),
        }
    }
}

impl<K, A> IntoIterator for BasicTree<K, A> {
    type Item = K;
    type IntoIter = iterators::IntoIter<K, A>;

    fn into_iter(self) -> Self::IntoIter {
        iterators::IntoIter::new(self)
    }
}

impl<'a, K, A> IntoIterator for &'a BasicTree<K, A> {
    type Item = &'a K;
    type IntoIter = iterators::Iter<'a, K, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(key: i32) -> BasicTree<i32> {
        BasicTree::from_node(BasicNode::new_alg(key, ()))
    }

    // 4
    // ├── 2
    // │   ├── 1
    // │   └── 3
    // └── 6
    //     └── 7
    fn sample() -> BasicTree<i32> {
        let mut two = BasicNode::new_alg(2, ());
        two.left = leaf(1);
        two.right = leaf(3);
        let mut six = BasicNode::new_alg(6, ());
        six.right = leaf(7);
        let mut four = BasicNode::new_alg(4, ());
        four.left = BasicTree::from_node(two);
        four.right = BasicTree::from_node(six);
        BasicTree::from_node(four)
    }

    #[test]
    fn traversals() {
        let tree = sample();
        assert_eq!(tree.in_order(), vec![&1, &2, &3, &4, &6, &7]);
        assert_eq!(tree.pre_order(), vec![&4, &2, &1, &3, &6, &7]);
        assert_eq!(tree.post_order(), vec![&1, &3, &2, &7, &6, &4]);
        assert_eq!(tree.level_order(), vec![&4, &2, &6, &1, &3, &7]);
        assert_eq!(tree.into_iter().collect::<Vec<_>>(), vec![1, 2, 3, 4, 6, 7]);
    }

    #[test]
    fn structure() {
        let tree = sample();
        assert_eq!(tree.computed_height(), 2);
        assert_eq!(tree.count_nodes(), 6);
        assert_eq!(tree.first(), Some(&1));
        assert_eq!(tree.last(), Some(&7));
        assert_eq!(tree.find(&6).map(|node| *node.key()), Some(6));
        assert!(tree.find(&5).is_none());
        assert!(tree.is_strictly_ascending());

        let empty: BasicTree<i32> = BasicTree::new();
        assert_eq!(empty.computed_height(), -1);
        assert_eq!(empty.first(), None);
        assert!(empty.in_order().is_empty());
    }

    #[cfg(debug_assertions)]
    #[test]
    fn representation() {
        let tree = sample();
        assert_eq!(
            tree.representation(&|_: &BasicNode<i32>| String::new()),
            "<<<* 1 *> 2 <* 3 *>> 4 <* 6 <* 7 *>>>"
        );
    }
}
