// This is a private module, so no documentation for it directly.
// instead look for documentation of the `BasicWalker` struct.

use super::*;
use crate::trees::{Side, SomeWalker};
use recursive_reference::*;

const NO_VALUE_ERROR: &str = "invariant violated: RecRef can't be empty";

/// This struct implements a walker for the [`BasicTree`] type.
/// It is struct that has a mutable reference of the tree, and allows you to walk up and down on it.
/// The walker may also be in a position which is the son of a node, but doesn't contain
/// a node by itself, and then it is said to be in an empty position.
///
/// Walkers for other kinds of trees may be built by wrapping around the [`BasicWalker`] type,
/// as tree types can be built by wrapping around the [`BasicTree`] type.
///
/// Internally, [`recursive_reference::RecRef`] is used, in order to be able to dynamically
/// go up and down the tree without upsetting the borrow checker.
pub struct BasicWalker<'a, K, A = ()> {
    /// Holds references to all the subtrees from the root to the current position.
    rec_ref: RecRef<'a, BasicTree<K, A>>,

    /// This array holds for every node, whether the next subtree in the walker
    /// is its left son or the right son.
    /// This array is always one shorter than [`BasicWalker::rec_ref`],
    /// because the last node has no son in the walker.
    is_left: Vec<Side>,
}

impl<'a, K, A> BasicWalker<'a, K, A> {
    pub fn new(tree: &'a mut BasicTree<K, A>) -> BasicWalker<'a, K, A> {
        BasicWalker {
            rec_ref: RecRef::new(tree),
            is_left: vec![],
        }
    }

    pub fn inner(&self) -> &BasicTree<K, A> {
        &*self.rec_ref
    }

    pub(crate) fn inner_mut(&mut self) -> &mut BasicTree<K, A> {
        &mut *self.rec_ref
    }

    pub fn node(&self) -> Option<&BasicNode<K, A>> {
        self.inner().node()
    }

    /// Performs a left rotation.
    /// Returns [`None`] if this is an empty tree or if it has no right son,
    /// in which case nothing changes.
    /// The rebuilder gets called on the node that went down, and then on the node that went up.
    pub fn rot_left_with_custom_rebuilder<F: FnMut(&mut BasicNode<K, A>)>(
        &mut self,
        mut rebuilder: F,
    ) -> Option<()> {
        if self.node()?.right.is_empty() {
            return None;
        }
        let mut bn1: Box<BasicNode<K, A>> = self.take_subtree().into_node_boxed()?;
        let mut bn2: Box<BasicNode<K, A>> = std::mem::take(&mut bn1.right).into_node_boxed()?;

        bn1.right = std::mem::take(&mut bn2.left);
        rebuilder(&mut *bn1);
        bn2.left = BasicTree::Root(bn1);
        rebuilder(&mut *bn2);

        *self.rec_ref = BasicTree::Root(bn2); // restore the node back
        Some(())
    }

    /// Performs a right rotation.
    /// Returns [`None`] if this is an empty tree or if it has no left son,
    /// in which case nothing changes.
    /// The rebuilder gets called on the node that went down, and then on the node that went up.
    pub fn rot_right_with_custom_rebuilder<F: FnMut(&mut BasicNode<K, A>)>(
        &mut self,
        mut rebuilder: F,
    ) -> Option<()> {
        if self.node()?.left.is_empty() {
            return None;
        }
        let mut bn1: Box<BasicNode<K, A>> = self.take_subtree().into_node_boxed()?;
        let mut bn2: Box<BasicNode<K, A>> = std::mem::take(&mut bn1.left).into_node_boxed()?;

        bn1.left = std::mem::take(&mut bn2.right);
        rebuilder(&mut *bn1);
        bn2.right = BasicTree::Root(bn1);
        rebuilder(&mut *bn2);

        *self.rec_ref = BasicTree::Root(bn2); // restore the node back
        Some(())
    }

    /// Performs rot_left if `side` is [`Side::Left`]
    /// rot_right otherwise
    pub fn rot_side_with_custom_rebuilder<F: FnMut(&mut BasicNode<K, A>)>(
        &mut self,
        side: Side,
        rebuilder: F,
    ) -> Option<()> {
        match side {
            Side::Left => self.rot_left_with_custom_rebuilder(rebuilder),
            Side::Right => self.rot_right_with_custom_rebuilder(rebuilder),
        }
    }

    /// Rotates so that the current node moves up.
    /// Basically moves up and then calls rot_side.
    /// Fails if the current node is the root.
    pub fn rot_up_with_custom_rebuilder<F: FnMut(&mut BasicNode<K, A>)>(
        &mut self,
        rebuilder: F,
    ) -> Result<Side, ()> {
        let b = self.go_up()?;
        self.rot_side_with_custom_rebuilder(b.flip(), rebuilder)
            .expect("original node went missing?");
        Ok(b)
    }

    /// Inserts a new node at the current position, if it is empty.
    /// Otherwise returns [`None`].
    pub fn insert_with_alg_data(&mut self, key: K, alg_data: A) -> Option<()> {
        self.put_subtree(BasicTree::from_node(BasicNode::new_alg(key, alg_data)))
    }

    /// Takes the current subtree out of the tree, and writes `Empty` instead.
    /// Intended to help writing tree algorithms.
    pub(crate) fn take_subtree(&mut self) -> BasicTree<K, A> {
        std::mem::take(&mut *self.rec_ref)
    }

    /// If the current position is empty, puts the given value there instead.
    /// Intended to help writing tree algorithms.
    pub(crate) fn put_subtree(&mut self, new: BasicTree<K, A>) -> Option<()> {
        if self.inner().is_empty() {
            *self.rec_ref = new;
            Some(())
        } else {
            None
        }
    }

}

impl<'a, K, A> SomeWalker<K> for BasicWalker<'a, K, A> {
    fn go_left(&mut self) -> Result<(), ()> {
        let res = RecRef::extend_result(&mut self.rec_ref, |tree| match tree.node_mut() {
            Some(node) => Ok(&mut node.left),
            None => Err(()),
        });
        if res.is_ok() {
            self.is_left.push(Side::Left); // went left
        }
        res
    }

    fn go_right(&mut self) -> Result<(), ()> {
        let res = RecRef::extend_result(&mut self.rec_ref, |tree| match tree.node_mut() {
            Some(node) => Ok(&mut node.right),
            None => Err(()),
        });
        if res.is_ok() {
            self.is_left.push(Side::Right); // went right
        }
        res
    }

    fn go_up(&mut self) -> Result<Side, ()> {
        match self.is_left.pop() {
            None => Err(()),
            Some(b) => {
                RecRef::pop(&mut self.rec_ref).expect(NO_VALUE_ERROR);
                Ok(b)
            }
        }
    }

    fn depth(&self) -> usize {
        self.is_left.len()
    }

    fn key(&self) -> Option<&K> {
        self.inner().key()
    }
}
