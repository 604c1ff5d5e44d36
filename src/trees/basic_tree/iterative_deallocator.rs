use super::*;

/// Empties the tree, freeing its nodes one at a time, and returns how many were freed.
///
/// The drop glue of [`BasicTree`] recurses into both sons, so dropping a deep tree
/// directly could overflow the stack. Here the sons are detached onto an explicit
/// stack before each node is dropped, so no node is ever dropped with sons attached.
/// Takes a reference, so that it can be called from `Drop` implementations.
pub fn deallocate_iteratively<K, A>(tree: &mut BasicTree<K, A>) -> usize {
    let mut freed = 0;
    let mut pending: Vec<Box<BasicNode<K, A>>> =
        std::mem::take(tree).into_node_boxed().into_iter().collect();
    while let Some(mut node) = pending.pop() {
        pending.extend(std::mem::take(&mut node.left).into_node_boxed());
        pending.extend(std::mem::take(&mut node.right).into_node_boxed());
        freed += 1;
    }
    freed
}
