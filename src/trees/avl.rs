//! Implementation of AVL trees.
//! Balanced by keeping track of subtree heights, this is a worst-case balancing
//! algorithm that has a small memory overhead per node.
//!
//! The tree is a [`BasicTree`] whose nodes store their subtree height.
//! Insertions and deletions go through a walker, which rebalances
//! every ancestor of the modified position on its way back up to the root.

use super::basic_tree::*;
use super::methods;
use super::*;
use crate::error::{Result, TreeError};
use log::{debug, trace};

/// The type that is used for height bookkeeping.
/// `i8` is definitely enough, since the height of the tree is logarithmic in the tree size.
type H = i8;

/// The height of the empty tree. A single node has height `0`.
const EMPTY_HEIGHT: H = -1;

const NO_NODE_ERROR: &str = "invariant violated: expected a node at the walker's position";

/// An AVL tree. Balanced by keeping track of subtree heights, so that
/// the heights of the two sons of any node differ by at most one.
///
///```
/// use sapling::avl::AVLTree;
///
/// let mut tree = AVLTree::new();
/// for key in [30, 20, 10].iter() {
///     tree.insert(*key);
/// }
/// assert_eq!(tree.level_order(), vec![&20, &10, &30]);
/// assert_eq!(tree.height(), 1);
/// # tree.assert_correctness();
///```
#[derive(Clone)]
pub struct AVLTree<K> {
    tree: BasicTree<K, H>,
    len: usize,
}

/// For implementing `height`, `balance_factor` and `rebuild_height` for
/// trees and nodes alike.
trait Heighted {
    fn height(&self) -> H;

    /// Returns `true` if the height of the current node had to be updated,
    /// `false` if it was correct.
    fn rebuild_height(&mut self) -> bool;

    /// Returns `left.height() - right.height()`
    fn balance_factor(&self) -> H;
}

impl<K> Heighted for BasicTree<K, H> {
    fn height(&self) -> H {
        match self.node() {
            None => EMPTY_HEIGHT,
            Some(node) => node.height(),
        }
    }

    fn rebuild_height(&mut self) -> bool {
        match self.node_mut() {
            None => false,
            Some(node) => node.rebuild_height(),
        }
    }

    fn balance_factor(&self) -> H {
        match self.node() {
            None => 0,
            Some(node) => node.balance_factor(),
        }
    }
}

impl<K> Heighted for BasicNode<K, H> {
    fn height(&self) -> H {
        *self.alg_data()
    }

    fn rebuild_height(&mut self) -> bool {
        let new_height = std::cmp::max(self.left.height(), self.right.height()) + 1;
        let changed = self.height() != new_height;
        self.alg_data = new_height;
        changed
    }

    fn balance_factor(&self) -> H {
        self.left.height() - self.right.height()
    }
}

/// Used as the custom rebuilder for rotations.
fn rebuild_height<K>(node: &mut BasicNode<K, H>) {
    node.rebuild_height();
}

impl<K> AVLTree<K> {
    /// Creates an empty [`AVLTree`].
    pub fn new() -> Self {
        AVLTree {
            tree: BasicTree::Empty,
            len: 0,
        }
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The height of the tree: `-1` if empty, `0` for a single node.
    /// Takes `O(1)` time, since heights are cached.
    pub fn height(&self) -> isize {
        self.tree.height() as isize
    }

    /// The key at the root, if any.
    pub fn root_key(&self) -> Option<&K> {
        self.tree.key()
    }

    /// The balance factor of the root: the height of its left subtree minus the
    /// height of its right subtree. `0` if the tree is empty.
    pub fn balance_factor(&self) -> isize {
        self.tree.balance_factor() as isize
    }

    /// Returns the smallest key.
    pub fn first(&self) -> Option<&K> {
        self.tree.first()
    }

    /// Returns the largest key.
    pub fn last(&self) -> Option<&K> {
        self.tree.last()
    }

    /// Removes all the keys.
    pub fn clear(&mut self) {
        let freed = deallocate_iteratively(&mut self.tree);
        debug!("cleared an AVL tree, freeing {} nodes", freed);
        self.len = 0;
    }

    /// Lazily iterates over the keys in ascending order.
    pub fn iter(&self) -> iterators::Iter<'_, K, H> {
        self.tree.iter()
    }

    /// The keys in ascending order.
    pub fn in_order(&self) -> Vec<&K> {
        self.tree.in_order()
    }

    /// The keys with every node before its subtrees, left subtree first.
    pub fn pre_order(&self) -> Vec<&K> {
        self.tree.pre_order()
    }

    /// The keys with every node after its subtrees, left subtree first.
    pub fn post_order(&self) -> Vec<&K> {
        self.tree.post_order()
    }

    /// The keys level by level, from the root down, each level from left to right.
    pub fn level_order(&self) -> Vec<&K> {
        self.tree.level_order()
    }

    fn check_node_locally(node: &BasicNode<K, H>) -> Result<()> {
        let actual = std::cmp::max(node.left.height(), node.right.height()) + 1;
        if node.height() != actual {
            return Err(TreeError::HeightMismatch {
                cached: node.height() as isize,
                actual: actual as isize,
            });
        }
        let balance = node.balance_factor();
        if !(-1..=1).contains(&balance) {
            return Err(TreeError::Unbalanced {
                balance: balance as isize,
            });
        }
        Ok(())
    }
}

impl<K: Ord> AVLTree<K> {
    /// Inserts the key if it isn't present yet, and rebalances.
    /// Returns `true` if the key was inserted, `false` if an equal key was
    /// already present, in which case the tree is left untouched.
    pub fn insert(&mut self, key: K) -> bool {
        let mut walker = AVLWalker::new(&mut self.tree);
        if methods::search_subtree(&mut walker, &key) {
            return false;
        }
        walker
            .insert(key)
            .expect("the search ends at an empty position");
        drop(walker);
        self.len += 1;
        self.paranoid_check();
        true
    }

    /// Removes the key if it is present, and rebalances.
    /// Returns `true` if a key was removed.
    pub fn remove(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }

    /// Removes the key if it is present, and returns the stored key.
    pub fn take(&mut self, key: &K) -> Option<K> {
        let mut walker = AVLWalker::new(&mut self.tree);
        if !methods::search_subtree(&mut walker, key) {
            return None;
        }
        let res = walker.delete();
        drop(walker);
        if res.is_some() {
            self.len -= 1;
        }
        self.paranoid_check();
        res
    }

    pub fn contains(&self, key: &K) -> bool {
        self.tree.find(key).is_some()
    }

    /// Returns the stored key equal to `key`.
    pub fn get(&self, key: &K) -> Option<&K> {
        Some(self.tree.find(key)?.key())
    }

    /// Checks that every node's cached height is correct and that every node is balanced,
    /// that the root's height matches a full walk of the tree, that the keys are in order,
    /// and that the element count is right.
    pub fn check_invariants(&self) -> Result<()> {
        self.tree.check_with(Self::check_node_locally)?;
        // the local checks only compare each node with its sons
        let actual = self.tree.computed_height();
        if self.height() != actual {
            return Err(TreeError::HeightMismatch {
                cached: self.height(),
                actual,
            });
        }
        if !self.tree.is_strictly_ascending() {
            return Err(TreeError::OrderViolation);
        }
        let found = self.tree.count_nodes();
        if found != self.len {
            return Err(TreeError::SizeMismatch {
                expected: self.len,
                found,
            });
        }
        Ok(())
    }

    /// Asserts that the tree's invariants hold.
    /// Otherwise, panics.
    pub fn assert_correctness(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("AVL tree invariant violated: {}", err);
        }
    }

    fn paranoid_check(&self) {
        #[cfg(all(debug_assertions, feature = "paranoid"))]
        self.assert_correctness();
    }
}

impl<K: std::fmt::Debug> AVLTree<K> {
    #[cfg(debug_assertions)]
    /// Used for debugging. Prints the tree with the height of every node, like so:
    /// `<<* 10:0 *> 20:1 <* 30:0 *>>`
    pub fn representation(&self) -> String {
        self.tree
            .representation(&|node: &BasicNode<K, H>| format!(":{}", node.height()))
    }
}

impl<K> Default for AVLTree<K> {
    fn default() -> Self {
        AVLTree::new()
    }
}

impl<K> Drop for AVLTree<K> {
    fn drop(&mut self) {
        deallocate_iteratively(&mut self.tree);
    }
}

impl<K: std::fmt::Debug> std::fmt::Debug for AVLTree<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: PartialEq> PartialEq for AVLTree<K> {
    /// Trees are equal if they hold the same keys, regardless of their shape.
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq> Eq for AVLTree<K> {}

impl<K: Ord> SearchTree<K> for AVLTree<K> {
    fn insert(&mut self, key: K) -> bool {
        AVLTree::insert(self, key)
    }

    fn remove(&mut self, key: &K) -> bool {
        AVLTree::remove(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        AVLTree::contains(self, key)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn height(&self) -> isize {
        AVLTree::height(self)
    }

    fn in_order(&self) -> Vec<&K> {
        self.tree.in_order()
    }

    fn pre_order(&self) -> Vec<&K> {
        self.tree.pre_order()
    }

    fn post_order(&self) -> Vec<&K> {
        self.tree.post_order()
    }

    fn level_order(&self) -> Vec<&K> {
        self.tree.level_order()
    }

    fn check_invariants(&self) -> Result<()> {
        AVLTree::check_invariants(self)
    }
}

impl<K: Ord> Extend<K> for AVLTree<K> {
    /// Inserts every key. Keys that are already present are ignored.
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> std::iter::FromIterator<K> for AVLTree<K> {
    /// This takes `O(n log n)` worst-case time. Duplicate keys are ignored.
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = AVLTree::new();
        tree.extend(iter);
        debug!("built an AVL tree of {} keys", tree.len);
        tree
    }
}

impl<K> IntoIterator for AVLTree<K> {
    type Item = K;
    type IntoIter = iterators::IntoIter<K, H>;

    fn into_iter(mut self) -> Self::IntoIter {
        iterators::IntoIter::new(std::mem::take(&mut self.tree))
    }
}

impl<'a, K> IntoIterator for &'a AVLTree<K> {
    type Item = &'a K;
    type IntoIter = iterators::Iter<'a, K, H>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A walker struct for [`AVLTree`].
///
/// Going up with this walker rebuilds the heights of the nodes it passes.
/// When dropped, it goes back up to the root.
pub(crate) struct AVLWalker<'a, K> {
    walker: BasicWalker<'a, K, H>,
}

impl<'a, K> std::ops::Drop for AVLWalker<'a, K> {
    fn drop(&mut self) {
        self.go_to_root()
    }
}

impl<'a, K> SomeWalker<K> for AVLWalker<'a, K> {
    fn go_left(&mut self) -> std::result::Result<(), ()> {
        self.walker.go_left()
    }

    fn go_right(&mut self) -> std::result::Result<(), ()> {
        self.walker.go_right()
    }

    fn go_up(&mut self) -> std::result::Result<Side, ()> {
        let res = self.walker.go_up()?;
        let changed = self.walker.inner_mut().rebuild_height();
        // it shouldn't have changed without being rebalanced already
        debug_assert!(!changed);
        Ok(res)
    }

    fn depth(&self) -> usize {
        self.walker.depth()
    }

    fn key(&self) -> Option<&K> {
        self.walker.key()
    }
}

impl<'a, K> AVLWalker<'a, K> {
    fn new(tree: &'a mut BasicTree<K, H>) -> Self {
        AVLWalker {
            walker: BasicWalker::new(tree),
        }
    }

    fn rot_left(&mut self) -> Option<()> {
        trace!("avl: rotating left at depth {}", self.walker.depth());
        self.walker.rot_left_with_custom_rebuilder(rebuild_height)
    }

    fn rot_right(&mut self) -> Option<()> {
        trace!("avl: rotating right at depth {}", self.walker.depth());
        self.walker.rot_right_with_custom_rebuilder(rebuild_height)
    }

    fn rot_up(&mut self) -> std::result::Result<Side, ()> {
        trace!("avl: rotating up from depth {}", self.walker.depth());
        self.walker.rot_up_with_custom_rebuilder(rebuild_height)
    }

    /// Restores the balance of the current node, assuming both of its subtrees are
    /// balanced and have correct heights, and that their heights differ by at most two.
    /// The walker stays at the same position, which then holds the new subtree root.
    fn balance_current(&mut self) {
        let (balance, left_balance, right_balance) = match self.walker.node() {
            None => return,
            Some(node) => (
                node.balance_factor(),
                node.left.balance_factor(),
                node.right.balance_factor(),
            ),
        };

        match balance {
            2 => {
                // the left son is deeper
                if left_balance < 0 {
                    trace!("avl: left right case");
                    self.walker.go_left().expect(NO_NODE_ERROR);
                    self.rot_left().expect(NO_NODE_ERROR);
                    let res = self.rot_up();
                    debug_assert_eq!(res, Ok(Side::Left));
                } else {
                    trace!("avl: left left case");
                    self.rot_right().expect(NO_NODE_ERROR);
                }
            }

            -1..=1 => {} // do nothing, the current node is balanced.

            -2 => {
                // the right son is deeper
                if right_balance > 0 {
                    trace!("avl: right left case");
                    self.walker.go_right().expect(NO_NODE_ERROR);
                    self.rot_right().expect(NO_NODE_ERROR);
                    let res = self.rot_up();
                    debug_assert_eq!(res, Ok(Side::Right));
                } else {
                    trace!("avl: right right case");
                    self.rot_left().expect(NO_NODE_ERROR);
                }
            }

            balance => panic!("illegal balance factor: {}", balance),
        }
    }

    /// This function gets called when a node is deleted or inserted,
    /// at the current position.
    /// Rebuilds heights and rebalances on the way up, and stops once an ancestor's
    /// height didn't change and it is still balanced.
    fn rebalance(&mut self) {
        if self.walker.inner().is_empty() {
            // heights may be incorrect, so go up with the inner walker
            if self.walker.go_up().is_err() {
                return;
            }
        }

        self.walker.inner_mut().rebuild_height();
        loop {
            self.balance_current();

            // current node has been balanced. now go up a node,
            // and check if we need to continue rebalancing.
            if self.walker.go_up().is_err() {
                // reached root
                break;
            }
            let changed = self.walker.inner_mut().rebuild_height();
            let balance = self.walker.inner().balance_factor();
            if !changed && (-1..=1).contains(&balance) {
                // tree is now balanced correctly
                break;
            }
        }
    }

    /// Inserts the key into the tree at the current empty position.
    /// If the current position is not empty, return [`None`].
    /// When the function returns, the walker will be at a position which is an ancestor of the
    /// newly inserted node.
    pub(crate) fn insert(&mut self, key: K) -> Option<()> {
        self.walker.insert_with_alg_data(key, 0 /* height of a node with no sons */)?;
        self.rebalance();
        Some(())
    }

    /// Deletes the node at the current position, and returns its key.
    /// If the node has two sons, its in-order successor is moved into its place.
    /// Returns [`None`] if at an empty position.
    pub(crate) fn delete(&mut self) -> Option<K> {
        let node = self.delete_boxed()?;
        Some((*node).into_key())
    }

    /// Deletes a node and returns it with the box.
    fn delete_boxed(&mut self) -> Option<Box<BasicNode<K, H>>> {
        let mut node = self.walker.take_subtree().into_node_boxed()?;
        if node.right.is_empty() {
            self.walker
                .put_subtree(std::mem::take(&mut node.left))
                .expect(NO_NODE_ERROR);
            self.rebalance();
        } else {
            // find the next node and move it to the current position
            let mut replacement = {
                let mut walker = AVLWalker::new(&mut node.right);
                methods::go_to_first(&mut walker).expect(NO_NODE_ERROR);
                let mut replacement = walker
                    .walker
                    .take_subtree()
                    .into_node_boxed()
                    .expect(NO_NODE_ERROR);
                debug_assert!(replacement.left.is_empty());
                walker
                    .walker
                    .put_subtree(std::mem::take(&mut replacement.right))
                    .expect(NO_NODE_ERROR);
                walker.rebalance(); // rebalance the right subtree
                replacement
            };

            replacement.left = std::mem::take(&mut node.left);
            replacement.right = std::mem::take(&mut node.right);
            replacement.rebuild_height();
            self.walker
                .put_subtree(BasicTree::Root(replacement))
                .expect(NO_NODE_ERROR);
            self.rebalance(); // rebalance here
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn avl(keys: &[i32]) -> AVLTree<i32> {
        let mut tree = AVLTree::new();
        for &key in keys {
            assert!(tree.insert(key));
            tree.assert_correctness();
        }
        tree
    }

    #[test]
    fn left_left_rotation() {
        let tree = avl(&[30, 20, 10]);
        assert_eq!(tree.root_key(), Some(&20));
        assert_eq!(tree.level_order(), vec![&20, &10, &30]);
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn right_right_rotation() {
        let tree = avl(&[10, 20, 30]);
        assert_eq!(tree.root_key(), Some(&20));
        assert_eq!(tree.level_order(), vec![&20, &10, &30]);
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn left_right_rotation() {
        let tree = avl(&[30, 10, 20]);
        assert_eq!(tree.level_order(), vec![&20, &10, &30]);
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn right_left_rotation() {
        let tree = avl(&[10, 30, 20]);
        assert_eq!(tree.level_order(), vec![&20, &10, &30]);
        assert_eq!(tree.balance_factor(), 0);
    }

    #[test]
    fn duplicate_insert_is_ignored() {
        let mut tree = avl(&[5, 3, 8]);
        let before: Vec<i32> = tree.iter().cloned().collect();
        assert!(!tree.insert(3));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.iter().cloned().collect::<Vec<_>>(), before);
        tree.assert_correctness();
    }

    #[test]
    fn remove_leaf_single_son_and_two_sons() {
        //       20
        //    10     30
        //   5     25  40
        //               50
        let mut tree = avl(&[20, 10, 30, 5, 25, 40, 50]);
        assert_eq!(tree.pre_order(), vec![&20, &10, &5, &30, &25, &40, &50]);

        // leaf
        assert!(tree.remove(&25));
        tree.assert_correctness();
        // single son
        assert!(tree.remove(&10));
        tree.assert_correctness();
        // two sons: the successor of 20 takes its place
        assert!(tree.remove(&20));
        tree.assert_correctness();

        assert_eq!(tree.in_order(), vec![&5, &30, &40, &50]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn remove_rebalances() {
        let mut tree = avl(&[20, 10, 30, 40]);
        // removing 10 makes the root right heavy by 2
        assert_eq!(tree.take(&10), Some(10));
        tree.assert_correctness();
        assert_eq!(tree.level_order(), vec![&30, &20, &40]);
    }

    #[test]
    fn remove_missing_key() {
        let mut tree = avl(&[2, 1, 3]);
        assert!(!tree.remove(&7));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.in_order(), vec![&1, &2, &3]);

        let mut empty: AVLTree<i32> = AVLTree::new();
        assert!(!empty.remove(&7));
        assert_eq!(empty.height(), -1);
    }

    #[test]
    fn sequential_inserts_stay_logarithmic() {
        let mut tree = AVLTree::new();
        for key in 0..1000 {
            tree.insert(key);
        }
        tree.assert_correctness();
        // an AVL tree with n nodes has height below 1.45 log2(n + 2)
        assert!(tree.height() <= 14);
        for key in (0..1000).step_by(2) {
            assert!(tree.remove(&key));
        }
        tree.assert_correctness();
        assert_eq!(tree.len(), 500);
        assert_eq!(tree.first(), Some(&1));
        assert_eq!(tree.last(), Some(&999));
    }

    #[test]
    fn traversals_of_a_small_tree() {
        let tree = avl(&[4, 2, 6, 1, 3, 5, 7]);
        assert_eq!(tree.in_order(), vec![&1, &2, &3, &4, &5, &6, &7]);
        assert_eq!(tree.pre_order(), vec![&4, &2, &1, &3, &6, &5, &7]);
        assert_eq!(tree.post_order(), vec![&1, &3, &2, &5, &7, &6, &4]);
        assert_eq!(tree.level_order(), vec![&4, &2, &6, &1, &3, &5, &7]);
        assert_eq!(tree.traverse(Traversal::PostOrder), tree.post_order());
    }

    #[test]
    fn clear_and_reuse() {
        let mut tree: AVLTree<i32> = (0..100).collect();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
        assert_eq!(tree.root_key(), None);
        tree.insert(1);
        assert_eq!(tree.len(), 1);
        tree.assert_correctness();
    }

    #[test]
    fn collect_and_consume() {
        let tree: AVLTree<i32> = vec![5, 1, 4, 1, 3].into_iter().collect();
        assert_eq!(tree.len(), 4);
        assert_eq!(format!("{:?}", tree), "{1, 3, 4, 5}");
        assert_eq!(tree.get(&4), Some(&4));
        assert_eq!(tree.clone(), tree);
        assert_eq!(tree.into_iter().collect::<Vec<_>>(), vec![1, 3, 4, 5]);
    }

    #[test]
    fn checked_entry_points() {
        let mut tree: AVLTree<i32> = AVLTree::new();
        assert_eq!(
            tree.try_insert(None),
            Err(TreeError::InvalidArgument("cannot insert an absent key"))
        );
        assert_eq!(tree.try_insert(Some(3)), Ok(true));
        assert_eq!(tree.try_insert(Some(3)), Ok(false));
        assert_eq!(tree.try_contains(Some(&3)), Ok(true));
        assert!(tree.try_remove(None).is_err());
        assert_eq!(tree.try_remove(Some(&3)), Ok(true));
        assert!(tree.is_empty());
    }

    #[test]
    fn detects_stale_heights() {
        let mut tree = avl(&[2, 1, 3]);
        assert_eq!(tree.tree.computed_height(), 1);
        tree.tree.node_mut().unwrap().alg_data = 5;
        assert_eq!(
            tree.check_invariants(),
            Err(TreeError::HeightMismatch {
                cached: 5,
                actual: 1
            })
        );
        tree.tree.node_mut().unwrap().alg_data = 1;
        tree.assert_correctness();

        tree.len += 1;
        assert_eq!(
            tree.check_invariants(),
            Err(TreeError::SizeMismatch {
                expected: 4,
                found: 3
            })
        );
        tree.len -= 1;
    }

    #[test]
    fn walker_moves_and_stays_balanced() {
        let mut tree = avl(&[2, 1, 3]);
        let mut walker = AVLWalker::new(&mut tree.tree);
        walker.go_right().unwrap();
        walker.go_right().unwrap();
        assert!(walker.is_empty());
        walker.insert(4).unwrap();
        walker.go_to_root();
        assert_eq!(walker.delete(), Some(2));
        drop(walker);
        assert_eq!(tree.in_order(), vec![&1, &3, &4]);
    }

    #[cfg(debug_assertions)]
    #[test]
    fn representation() {
        let tree = avl(&[10, 20, 30]);
        assert_eq!(tree.representation(), "<<* 10:0 *> 20:1 <* 30:0 *>>");
    }
}
