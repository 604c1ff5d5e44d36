//! Implementation of red-black trees.
//!
//! Every node is colored red or black, so that no red node has a red son, and every
//! path from a node down to a missing son passes through the same number of black nodes.
//! This keeps the height below `2 log2(n + 1)`.
//!
//! The nodes live in an arena, and refer to each other by index, including a link to
//! their parent. Index `0` is reserved for the sentinel: a single black node that stands
//! in for every missing son, and for the parent of the root. Slots of removed nodes are
//! recycled by later insertions.

mod fixup;
pub mod iterators;

use super::*;
use crate::error::{Result, TreeError};
use log::debug;
use std::cmp::Ordering;
use std::collections::VecDeque;

type NodeIndex = usize;

/// The index of the sentinel.
const NIL: NodeIndex = 0;

const KEY_ERROR: &str = "invariant violated: a live node must hold a key";

#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum Color {
    Red,
    Black,
}

#[derive(Clone, Debug)]
struct RBNode<K> {
    /// `None` only for the sentinel and for vacant slots.
    key: Option<K>,
    color: Color,
    parent: NodeIndex,
    left: NodeIndex,
    right: NodeIndex,
}

impl<K> RBNode<K> {
    /// A black node without a key or links. This is what the sentinel looks like,
    /// and what vacant slots look like.
    fn vacant() -> Self {
        RBNode {
            key: None,
            color: Color::Black,
            parent: NIL,
            left: NIL,
            right: NIL,
        }
    }
}

/// A red-black tree.
///
///```
/// use sapling::red_black::RedBlackTree;
///
/// let mut tree: RedBlackTree<i32> = vec![41, 38, 31, 12, 19, 8, 25].into_iter().collect();
/// assert_eq!(tree.in_order(), vec![&8, &12, &19, &25, &31, &38, &41]);
/// assert!(tree.remove(&38));
/// assert!(!tree.remove(&38));
/// # tree.assert_correctness();
///```
#[derive(Clone)]
pub struct RedBlackTree<K> {
    /// The arena. `nodes[NIL]` is the sentinel.
    nodes: Vec<RBNode<K>>,
    /// Vacant slots, to be reused before the arena grows.
    free: Vec<NodeIndex>,
    root: NodeIndex,
    len: usize,
}

// arena accessors
impl<K> RedBlackTree<K> {
    fn left(&self, node: NodeIndex) -> NodeIndex {
        self.nodes[node].left
    }

    fn right(&self, node: NodeIndex) -> NodeIndex {
        self.nodes[node].right
    }

    fn parent(&self, node: NodeIndex) -> NodeIndex {
        self.nodes[node].parent
    }

    fn son(&self, node: NodeIndex, side: Side) -> NodeIndex {
        match side {
            Side::Left => self.left(node),
            Side::Right => self.right(node),
        }
    }

    fn set_son(&mut self, node: NodeIndex, side: Side, son: NodeIndex) {
        match side {
            Side::Left => self.nodes[node].left = son,
            Side::Right => self.nodes[node].right = son,
        }
    }

    fn color(&self, node: NodeIndex) -> Color {
        self.nodes[node].color
    }

    fn set_color(&mut self, node: NodeIndex, color: Color) {
        self.nodes[node].color = color;
    }

    fn key(&self, node: NodeIndex) -> &K {
        self.nodes[node].key.as_ref().expect(KEY_ERROR)
    }

    /// Puts a new red node in a vacant slot, or at the end of the arena.
    fn allocate(&mut self, key: K, parent: NodeIndex) -> NodeIndex {
        let node = RBNode {
            key: Some(key),
            color: Color::Red,
            parent,
            left: NIL,
            right: NIL,
        };
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = node;
                index
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Vacates the slot, and returns the key it held.
    fn release(&mut self, node: NodeIndex) -> K {
        let vacant = std::mem::replace(&mut self.nodes[node], RBNode::vacant());
        self.free.push(node);
        vacant.key.expect(KEY_ERROR)
    }

    /// Makes `new` take the place of `old` as a son of `parent`.
    /// If `parent` is the sentinel, `new` becomes the root.
    /// Doesn't update `new`'s parent link.
    fn replace_child(&mut self, parent: NodeIndex, old: NodeIndex, new: NodeIndex) {
        if parent == NIL {
            self.root = new;
        } else if self.left(parent) == old {
            self.nodes[parent].left = new;
        } else {
            self.nodes[parent].right = new;
        }
    }

    /// The node with the smallest key in the subtree of `node`.
    fn minimum(&self, mut node: NodeIndex) -> NodeIndex {
        while self.left(node) != NIL {
            node = self.left(node);
        }
        node
    }

    /// The node with the largest key in the subtree of `node`.
    fn maximum(&self, mut node: NodeIndex) -> NodeIndex {
        while self.right(node) != NIL {
            node = self.right(node);
        }
        node
    }

    /// The sentinel's parent link may be set temporarily during deletion.
    fn reset_sentinel(&mut self) {
        self.nodes[NIL] = RBNode::vacant();
    }
}

impl<K> RedBlackTree<K> {
    /// Creates an empty [`RedBlackTree`].
    pub fn new() -> Self {
        RedBlackTree {
            nodes: vec![RBNode::vacant()],
            free: vec![],
            root: NIL,
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

    /// The number of edges on the longest path from the root down to a node.
    /// `-1` if empty, `0` for a single node. Takes `O(n)` time.
    pub fn height(&self) -> isize {
        let mut height = -1;
        let mut queue: VecDeque<(NodeIndex, isize)> = VecDeque::new();
        if self.root != NIL {
            queue.push_back((self.root, 0));
        }
        while let Some((node, depth)) = queue.pop_front() {
            height = std::cmp::max(height, depth);
            for &son in [self.left(node), self.right(node)].iter() {
                if son != NIL {
                    queue.push_back((son, depth + 1));
                }
            }
        }
        height
    }

    /// The number of black nodes on any path from the root down to the sentinel,
    /// counting the sentinel but not the root. `0` if empty.
    pub fn black_height(&self) -> usize {
        let mut res = 0;
        let mut node = self.root;
        while node != NIL {
            node = self.left(node);
            if self.color(node) == Color::Black {
                res += 1;
            }
        }
        res
    }

    /// The key at the root, if any.
    pub fn root_key(&self) -> Option<&K> {
        self.nodes[self.root].key.as_ref()
    }

    /// Returns the smallest key.
    pub fn first(&self) -> Option<&K> {
        self.nodes[self.minimum(self.root)].key.as_ref()
    }

    /// Returns the largest key.
    pub fn last(&self) -> Option<&K> {
        self.nodes[self.maximum(self.root)].key.as_ref()
    }

    /// Removes all the keys.
    pub fn clear(&mut self) {
        debug!("clearing a red-black tree of {} keys", self.len);
        self.nodes.truncate(1);
        self.reset_sentinel();
        self.free.clear();
        self.root = NIL;
        self.len = 0;
    }

    /// Lazily iterates over the keys in ascending order.
    pub fn iter(&self) -> iterators::Iter<'_, K> {
        iterators::Iter::new(self)
    }

    /// The keys in ascending order.
    pub fn in_order(&self) -> Vec<&K> {
        self.iter().collect()
    }

    /// The keys with every node before its subtrees, left subtree first.
    pub fn pre_order(&self) -> Vec<&K> {
        let mut res = vec![];
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if node == NIL {
                continue;
            }
            res.push(self.key(node));
            stack.push(self.right(node));
            stack.push(self.left(node));
        }
        res
    }

    /// The keys with every node after its subtrees, left subtree first.
    pub fn post_order(&self) -> Vec<&K> {
        let mut res = vec![];
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if node == NIL {
                continue;
            }
            res.push(self.key(node));
            stack.push(self.left(node));
            stack.push(self.right(node));
        }
        res.reverse();
        res
    }

    /// The keys level by level, from the root down, each level from left to right.
    pub fn level_order(&self) -> Vec<&K> {
        let mut res = vec![];
        let mut queue = VecDeque::new();
        queue.push_back(self.root);
        while let Some(node) = queue.pop_front() {
            if node == NIL {
                continue;
            }
            res.push(self.key(node));
            queue.push_back(self.left(node));
            queue.push_back(self.right(node));
        }
        res
    }

    /// Checks the subtree of `node`, and returns its black height and its node count.
    fn check_subtree(&self, node: NodeIndex) -> Result<(usize, usize)> {
        if node == NIL {
            return Ok((0, 0));
        }
        let mut black_heights = [0; 2];
        let mut count = 1;
        for (i, &son) in [self.left(node), self.right(node)].iter().enumerate() {
            if son != NIL && self.parent(son) != node {
                return Err(TreeError::BrokenParentLink);
            }
            if self.color(node) == Color::Red && self.color(son) == Color::Red {
                return Err(TreeError::RedRedViolation);
            }
            let (black_height, son_count) = self.check_subtree(son)?;
            black_heights[i] = black_height + (self.color(son) == Color::Black) as usize;
            count += son_count;
        }
        if black_heights[0] != black_heights[1] {
            return Err(TreeError::BlackHeightMismatch {
                left: black_heights[0],
                right: black_heights[1],
            });
        }
        Ok((black_heights[0], count))
    }
}

impl<K: Ord> RedBlackTree<K> {
    /// The index of the node holding `key`, or `NIL`.
    fn lookup(&self, key: &K) -> NodeIndex {
        let mut node = self.root;
        while node != NIL {
            match key.cmp(self.key(node)) {
                Ordering::Less => node = self.left(node),
                Ordering::Greater => node = self.right(node),
                Ordering::Equal => return node,
            }
        }
        NIL
    }

    /// Inserts the key if it isn't present yet, and rebalances.
    /// Returns `true` if the key was inserted, `false` if an equal key was
    /// already present, in which case the tree is left untouched.
    pub fn insert(&mut self, key: K) -> bool {
        let mut parent = NIL;
        let mut side = Side::Left;
        let mut node = self.root;
        while node != NIL {
            parent = node;
            side = match key.cmp(self.key(node)) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return false,
            };
            node = self.son(node, side);
        }

        let node = self.allocate(key, parent);
        if parent == NIL {
            self.root = node;
        } else {
            self.set_son(parent, side, node);
        }
        self.insert_fixup(node);
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
        let node = self.lookup(key);
        if node == NIL {
            return None;
        }
        let res = self.delete_node(node);
        self.len -= 1;
        self.paranoid_check();
        Some(res)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.lookup(key) != NIL
    }

    /// Returns the stored key equal to `key`.
    pub fn get(&self, key: &K) -> Option<&K> {
        self.nodes[self.lookup(key)].key.as_ref()
    }

    /// The color of the node holding `key`.
    pub fn color_of(&self, key: &K) -> Option<Color> {
        match self.lookup(key) {
            NIL => None,
            node => Some(self.color(node)),
        }
    }

    /// Checks that the root and the sentinel are black, that no red node has a red son,
    /// that black heights agree everywhere, that parent links are consistent, that the
    /// keys are in order, and that the element count is right.
    pub fn check_invariants(&self) -> Result<()> {
        if self.color(NIL) != Color::Black {
            return Err(TreeError::RedSentinel);
        }
        if self.root != NIL {
            if self.color(self.root) == Color::Red {
                return Err(TreeError::RedRoot);
            }
            if self.parent(self.root) != NIL {
                return Err(TreeError::BrokenParentLink);
            }
        }
        let (_, found) = self.check_subtree(self.root)?;

        let mut iter = self.iter();
        if let Some(mut prev) = iter.next() {
            for key in iter {
                if prev >= key {
                    return Err(TreeError::OrderViolation);
                }
                prev = key;
            }
        }

        if found != self.len {
            return Err(TreeError::SizeMismatch {
                expected: self.len,
                found,
            });
        }
        let occupied = self.nodes.len() - 1 - self.free.len();
        if occupied != self.len {
            return Err(TreeError::SizeMismatch {
                expected: self.len,
                found: occupied,
            });
        }
        Ok(())
    }

    /// Asserts that the tree's invariants hold.
    /// Otherwise, panics.
    pub fn assert_correctness(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("red-black tree invariant violated: {}", err);
        }
    }

    fn paranoid_check(&self) {
        #[cfg(all(debug_assertions, feature = "paranoid"))]
        self.assert_correctness();
    }
}

impl<K: std::fmt::Debug> RedBlackTree<K> {
    #[cfg(debug_assertions)]
    /// Used for debugging. Prints the tree with the color of every node, like so:
    /// `<<* 10:R *> 20:B <* 30:R *>>`
    /// Each pair of triangle brackets is a node, and `*` denotes the sentinel.
    pub fn representation(&self) -> String {
        self.representation_of(self.root)
    }

    #[cfg(debug_assertions)]
    fn representation_of(&self, node: NodeIndex) -> String {
        if node == NIL {
            return String::from("*");
        }
        let color = match self.color(node) {
            Color::Red => "R",
            Color::Black => "B",
        };
        format!(
            "<{} {:?}:{} {}>",
            self.representation_of(self.left(node)),
            self.key(node),
            color,
            self.representation_of(self.right(node))
        )
    }
}

impl<K> Default for RedBlackTree<K> {
    fn default() -> Self {
        RedBlackTree::new()
    }
}

impl<K: std::fmt::Debug> std::fmt::Debug for RedBlackTree<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: PartialEq> PartialEq for RedBlackTree<K> {
    /// Trees are equal if they hold the same keys, regardless of their shape.
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq> Eq for RedBlackTree<K> {}

impl<K: Ord> SearchTree<K> for RedBlackTree<K> {
    fn insert(&mut self, key: K) -> bool {
        RedBlackTree::insert(self, key)
    }

    fn remove(&mut self, key: &K) -> bool {
        RedBlackTree::remove(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        RedBlackTree::contains(self, key)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn height(&self) -> isize {
        RedBlackTree::height(self)
    }

    fn in_order(&self) -> Vec<&K> {
        RedBlackTree::in_order(self)
    }

    fn pre_order(&self) -> Vec<&K> {
        RedBlackTree::pre_order(self)
    }

    fn post_order(&self) -> Vec<&K> {
        RedBlackTree::post_order(self)
    }

    fn level_order(&self) -> Vec<&K> {
        RedBlackTree::level_order(self)
    }

    fn check_invariants(&self) -> Result<()> {
        RedBlackTree::check_invariants(self)
    }
}

impl<K: Ord> Extend<K> for RedBlackTree<K> {
    /// Inserts every key. Keys that are already present are ignored.
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> std::iter::FromIterator<K> for RedBlackTree<K> {
    /// This takes `O(n log n)` worst-case time. Duplicate keys are ignored.
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = RedBlackTree::new();
        tree.extend(iter);
        debug!("built a red-black tree of {} keys", tree.len);
        tree
    }
}

impl<K> IntoIterator for RedBlackTree<K> {
    type Item = K;
    type IntoIter = iterators::IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        iterators::IntoIter::new(self)
    }
}

impl<'a, K> IntoIterator for &'a RedBlackTree<K> {
    type Item = &'a K;
    type IntoIter = iterators::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
