//! Iterators over [`RedBlackTree`]s, in ascending key order.

use super::*;

/// A borrowing in-order iterator.
pub struct Iter<'a, K> {
    tree: &'a RedBlackTree<K>,
    /// The nodes whose key hasn't been yielded yet, but whose left subtree was.
    stack: Vec<NodeIndex>,
}

impl<'a, K> Iter<'a, K> {
    pub(super) fn new(tree: &'a RedBlackTree<K>) -> Self {
        let mut res = Iter { tree, stack: vec![] };
        res.push_left_spine(tree.root);
        res
    }

    fn push_left_spine(&mut self, mut node: NodeIndex) {
        while node != NIL {
            self.stack.push(node);
            node = self.tree.left(node);
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let node = self.stack.pop()?;
        let tree = self.tree;
        self.push_left_spine(tree.right(node));
        Some(tree.key(node))
    }
}

/// An owning in-order iterator.
pub struct IntoIter<K> {
    tree: RedBlackTree<K>,
    stack: Vec<NodeIndex>,
}

impl<K> IntoIter<K> {
    pub(super) fn new(tree: RedBlackTree<K>) -> Self {
        let root = tree.root;
        let mut res = IntoIter { tree, stack: vec![] };
        res.push_left_spine(root);
        res
    }

    fn push_left_spine(&mut self, mut node: NodeIndex) {
        while node != NIL {
            self.stack.push(node);
            node = self.tree.left(node);
        }
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        let node = self.stack.pop()?;
        let right = self.tree.right(node);
        self.push_left_spine(right);
        self.tree.nodes[node].key.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.tree.len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_in_order() {
        let tree: RedBlackTree<i32> = vec![5, 3, 8, 1, 4, 9, 7].into_iter().collect();
        assert_eq!(
            tree.iter().cloned().collect::<Vec<_>>(),
            vec![1, 3, 4, 5, 7, 8, 9]
        );
        assert_eq!((&tree).into_iter().count(), 7);
        assert_eq!(tree.into_iter().collect::<Vec<_>>(), vec![1, 3, 4, 5, 7, 8, 9]);
    }

    #[test]
    fn partially_consumed() {
        let tree: RedBlackTree<String> = vec!["b", "a", "c"]
            .into_iter()
            .map(String::from)
            .collect();
        let mut iter = tree.into_iter();
        assert_eq!(iter.next().as_deref(), Some("a"));
        drop(iter);
    }
}
