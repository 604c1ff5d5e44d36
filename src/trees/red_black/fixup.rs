// Rotations, and the recoloring passes that restore the red-black
// invariants after an insertion or a deletion.

use super::*;
use log::trace;

impl<K> RedBlackTree<K> {
    /// Performs a left rotation around `x`: its right son takes its place, and `x` becomes
    /// that son's left son. `x` must have a right son.
    pub(super) fn rotate_left(&mut self, x: NodeIndex) {
        let y = self.right(x);
        debug_assert_ne!(y, NIL, "left rotation without a right son");

        let inner = self.left(y);
        self.nodes[x].right = inner;
        if inner != NIL {
            self.nodes[inner].parent = x;
        }
        let parent = self.parent(x);
        self.nodes[y].parent = parent;
        self.replace_child(parent, x, y);
        self.nodes[y].left = x;
        self.nodes[x].parent = y;
    }

    /// Performs a right rotation around `x`: its left son takes its place, and `x` becomes
    /// that son's right son. `x` must have a left son.
    pub(super) fn rotate_right(&mut self, x: NodeIndex) {
        let y = self.left(x);
        debug_assert_ne!(y, NIL, "right rotation without a left son");

        let inner = self.right(y);
        self.nodes[x].left = inner;
        if inner != NIL {
            self.nodes[inner].parent = x;
        }
        let parent = self.parent(x);
        self.nodes[y].parent = parent;
        self.replace_child(parent, x, y);
        self.nodes[y].right = x;
        self.nodes[x].parent = y;
    }

    /// Performs rotate_left if `side` is [`Side::Left`],
    /// rotate_right otherwise. Either way, `x` goes down to the `side`.
    fn rotate_side(&mut self, x: NodeIndex, side: Side) {
        match side {
            Side::Left => self.rotate_left(x),
            Side::Right => self.rotate_right(x),
        }
    }

    /// Which son of its parent `node` is. `node` may be the sentinel,
    /// as long as its parent link was set, and it has a real sibling.
    fn side_of(&self, node: NodeIndex) -> Side {
        if self.left(self.parent(node)) == node {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Restores the invariants after `node` was inserted as a red leaf.
    /// Only a red-red violation between `node` and its parent may exist.
    pub(super) fn insert_fixup(&mut self, mut node: NodeIndex) {
        while self.color(self.parent(node)) == Color::Red {
            // a red parent isn't the root, so the grandparent is a real node
            let parent = self.parent(node);
            let grandparent = self.parent(parent);
            let side = self.side_of(parent);
            let uncle = self.son(grandparent, side.flip());

            if self.color(uncle) == Color::Red {
                trace!("red-black insert: red uncle, recoloring");
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
            } else {
                if self.son(parent, side.flip()) == node {
                    trace!("red-black insert: black uncle, inner grandson");
                    node = parent;
                    self.rotate_side(node, side);
                }
                trace!("red-black insert: black uncle, outer grandson");
                let parent = self.parent(node);
                let grandparent = self.parent(parent);
                self.set_color(parent, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate_side(grandparent, side.flip());
            }
        }
        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Removes `node` from the tree and returns its key. The sentinel is left clean.
    ///
    /// If `node` has two sons, its successor's key moves into it, and the successor's
    /// slot is spliced out instead.
    pub(super) fn delete_node(&mut self, node: NodeIndex) -> K {
        let mut spliced = node;
        if self.left(node) != NIL && self.right(node) != NIL {
            spliced = self.minimum(self.right(node));
            let successor_key = self.nodes[spliced].key.take();
            let removed_key = std::mem::replace(&mut self.nodes[node].key, successor_key);
            self.nodes[spliced].key = removed_key;
        }

        // `spliced` has at most one son
        let replacement = if self.left(spliced) != NIL {
            self.left(spliced)
        } else {
            self.right(spliced)
        };
        let parent = self.parent(spliced);
        // set even if `replacement` is the sentinel, so that the fixup can go up from it
        self.nodes[replacement].parent = parent;
        self.replace_child(parent, spliced, replacement);

        if self.color(spliced) == Color::Black {
            self.delete_fixup(replacement);
        }
        self.reset_sentinel();
        self.release(spliced)
    }

    /// Restores the invariants after a black node was spliced out, and `x` took its place.
    /// `x` carries an extra black, which is pushed up until it can be absorbed.
    fn delete_fixup(&mut self, mut x: NodeIndex) {
        while x != self.root && self.color(x) == Color::Black {
            let parent = self.parent(x);
            let side = self.side_of(x);
            let far = side.flip();
            // `x`'s black height is one short, so its sibling is a real node
            let mut sibling = self.son(parent, far);

            if self.color(sibling) == Color::Red {
                trace!("red-black delete: red sibling");
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate_side(parent, side);
                sibling = self.son(parent, far);
            }

            if self.color(self.left(sibling)) == Color::Black
                && self.color(self.right(sibling)) == Color::Black
            {
                trace!("red-black delete: black sibling with black sons");
                self.set_color(sibling, Color::Red);
                x = parent;
            } else {
                if self.color(self.son(sibling, far)) == Color::Black {
                    trace!("red-black delete: black sibling with a red inner son");
                    let near_son = self.son(sibling, side);
                    self.set_color(near_son, Color::Black);
                    self.set_color(sibling, Color::Red);
                    self.rotate_side(sibling, far);
                    sibling = self.son(parent, far);
                }
                trace!("red-black delete: black sibling with a red outer son");
                let parent_color = self.color(parent);
                self.set_color(sibling, parent_color);
                self.set_color(parent, Color::Black);
                let far_son = self.son(sibling, far);
                self.set_color(far_son, Color::Black);
                self.rotate_side(parent, side);
                x = self.root;
            }
        }
        self.set_color(x, Color::Black);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotations_keep_links() {
        let mut tree: RedBlackTree<i32> = vec![2, 1, 3].into_iter().collect();
        let root = tree.root;
        tree.rotate_left(root);
        assert_eq!(tree.pre_order(), vec![&3, &2, &1]);
        assert_eq!(tree.parent(tree.root), NIL);
        assert_eq!(tree.parent(root), tree.root);

        let root = tree.root;
        tree.rotate_right(root);
        assert_eq!(tree.pre_order(), vec![&2, &1, &3]);
        assert_eq!(tree.level_order(), vec![&2, &1, &3]);
        // the colors are untouched, so the tree is valid again
        tree.assert_correctness();
    }

    #[test]
    fn delete_leaves_the_sentinel_clean() {
        let mut tree: RedBlackTree<i32> = (0..20).collect();
        for key in (0..20).step_by(3) {
            assert!(tree.remove(&key));
            assert_eq!(tree.nodes[NIL].parent, NIL);
            assert_eq!(tree.nodes[NIL].color, Color::Black);
            tree.assert_correctness();
        }
    }
}
