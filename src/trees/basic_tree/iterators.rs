//! Iterators over the keys of a [`BasicTree`], in ascending order.

use super::*;

/// Borrowing in-order iterator.
/// The stack holds the nodes whose key is yet to be yielded, and whose left subtree
/// has already been pushed.
pub struct Iter<'a, K, A = ()> {
    stack: Vec<&'a BasicNode<K, A>>,
}

impl<'a, K, A> Iter<'a, K, A> {
    pub fn new(tree: &'a BasicTree<K, A>) -> Self {
        let mut res = Iter { stack: vec![] };
        res.push_left_spine(tree);
        res
    }

    fn push_left_spine(&mut self, mut tree: &'a BasicTree<K, A>) {
        while let BasicTree::Root(node) = tree {
            self.stack.push(&**node);
            tree = &node.left;
        }
    }
}

impl<'a, K, A> Iterator for Iter<'a, K, A> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(&node.right);
        Some(&node.key)
    }
}

/// Owning in-order iterator. Takes the tree apart node by node.
pub struct IntoIter<K, A = ()> {
    stack: Vec<Box<BasicNode<K, A>>>,
}

impl<K, A> IntoIter<K, A> {
    pub fn new(tree: BasicTree<K, A>) -> Self {
        let mut res = IntoIter { stack: vec![] };
        res.push_left_spine(tree);
        res
    }

    fn push_left_spine(&mut self, mut tree: BasicTree<K, A>) {
        while let Some(mut node) = tree.into_node_boxed() {
            tree = std::mem::take(&mut node.left);
            self.stack.push(node);
        }
    }
}

impl<K, A> Iterator for IntoIter<K, A> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let BasicNode { key, right, .. } = *node;
        self.push_left_spine(right);
        Some(key)
    }
}

impl<K, A> Drop for IntoIter<K, A> {
    fn drop(&mut self) {
        for mut node in self.stack.drain(..) {
            deallocate_iteratively(&mut node.right);
        }
    }
}
