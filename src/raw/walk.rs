//! Read-only queries shared by the unbalanced and the red-black tree.

use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Side, TreeNode};
use crate::TreeError;

/// Outcome of an in-order neighbour lookup.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Neighbor {
    Found(Handle),
    /// The queried key is not in the tree.
    Missing,
    /// The queried key is the first (or last) key, so it has no neighbour on that side.
    Edge,
}

impl Neighbor {
    /// Converts the lookup into a query result, reporting `edge` when there is no neighbour.
    pub(crate) fn into_result(self, edge: TreeError) -> crate::Result<Handle> {
        match self {
            Neighbor::Found(handle) => Ok(handle),
            Neighbor::Missing => Err(TreeError::KeyNotFound),
            Neighbor::Edge => Err(edge),
        }
    }
}

/// Object-safe view of a node arena, used by the traversal iterators so one set of iterator types
/// serves both tree layouts.
pub(crate) trait Topology<K, V> {
    fn entry(&self, handle: Handle) -> (&K, &V);
    fn child(&self, handle: Handle, side: Side) -> Option<Handle>;
}

impl<N: TreeNode> Topology<N::Key, N::Value> for Arena<N> {
    #[inline]
    fn entry(&self, handle: Handle) -> (&N::Key, &N::Value) {
        let node = self.get(handle);
        (node.key(), node.value())
    }

    #[inline]
    fn child(&self, handle: Handle, side: Side) -> Option<Handle> {
        self.get(handle).child(side)
    }
}

/// Descends from `root` comparing against `key` at each node.
pub(crate) fn search<N, Q>(nodes: &Arena<N>, root: Option<Handle>, key: &Q) -> Option<Handle>
where
    N: TreeNode,
    N::Key: Borrow<Q>,
    Q: ?Sized + Ord,
{
    let mut current = root;
    while let Some(handle) = current {
        let node = nodes.get(handle);
        current = match key.cmp(node.key().borrow()) {
            Ordering::Less => node.left(),
            Ordering::Greater => node.right(),
            Ordering::Equal => return Some(handle),
        };
    }
    None
}

/// Follows `side` links from `from` as far as they go: the minimum for `Left`, the maximum for
/// `Right`.
pub(crate) fn extreme<N: TreeNode>(nodes: &Arena<N>, mut from: Handle, side: Side) -> Handle {
    while let Some(next) = nodes.get(from).child(side) {
        from = next;
    }
    from
}

/// Finds the in-order neighbour of `key`: the successor for `Side::Right`, the predecessor for
/// `Side::Left`.
///
/// While descending we remember the last node at which we branched away from `side`; that node
/// is the answer unless the target itself has a subtree on `side`, in which case the answer is
/// the nearest key inside that subtree.
pub(crate) fn neighbor<N, Q>(nodes: &Arena<N>, root: Option<Handle>, key: &Q, side: Side) -> Neighbor
where
    N: TreeNode,
    N::Key: Borrow<Q>,
    Q: ?Sized + Ord,
{
    let mut candidate = None;
    let mut current = root;

    while let Some(handle) = current {
        let node = nodes.get(handle);
        let branch = match key.cmp(node.key().borrow()) {
            Ordering::Less => Side::Left,
            Ordering::Greater => Side::Right,
            Ordering::Equal => {
                return match node.child(side) {
                    Some(subtree) => Neighbor::Found(extreme(nodes, subtree, side.opposite())),
                    None => candidate.map_or(Neighbor::Edge, Neighbor::Found),
                };
            }
        };
        if branch != side {
            candidate = Some(handle);
        }
        current = node.child(branch);
    }

    Neighbor::Missing
}

/// Height in edges, computed level by level so a degenerate chain cannot exhaust the stack.
/// `None` for an empty tree.
pub(crate) fn height<N: TreeNode>(nodes: &Arena<N>, root: Option<Handle>) -> Option<usize> {
    let mut frontier: Vec<Handle> = Vec::from([root?]);
    let mut next: Vec<Handle> = Vec::new();
    let mut height = 0;

    loop {
        for handle in frontier.drain(..) {
            let node = nodes.get(handle);
            next.extend(node.left());
            next.extend(node.right());
        }
        if next.is_empty() {
            return Some(height);
        }
        height += 1;
        core::mem::swap(&mut frontier, &mut next);
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::raw::node::BstNode;

    // Builds   4
    //         / \
    //        2   6
    //       / \
    //      1   3
    fn sample() -> (Arena<BstNode<i32, ()>>, Handle) {
        let mut nodes = Arena::new();
        let one = nodes.alloc(BstNode::new(1, ()));
        let three = nodes.alloc(BstNode::new(3, ()));
        let six = nodes.alloc(BstNode::new(6, ()));
        let mut two = BstNode::new(2, ());
        two.set_child(Side::Left, Some(one));
        two.set_child(Side::Right, Some(three));
        let two = nodes.alloc(two);
        let mut four = BstNode::new(4, ());
        four.set_child(Side::Left, Some(two));
        four.set_child(Side::Right, Some(six));
        let four = nodes.alloc(four);
        (nodes, four)
    }

    fn key_of(nodes: &Arena<BstNode<i32, ()>>, found: Neighbor) -> Option<i32> {
        match found {
            Neighbor::Found(handle) => Some(*nodes.get(handle).key()),
            Neighbor::Missing | Neighbor::Edge => None,
        }
    }

    #[test]
    fn search_and_extremes() {
        let (nodes, root) = sample();
        assert!(search(&nodes, Some(root), &3).is_some());
        assert!(search(&nodes, Some(root), &5).is_none());
        assert!(search::<_, i32>(&nodes, None, &3).is_none());
        assert_eq!(*nodes.get(extreme(&nodes, root, Side::Left)).key(), 1);
        assert_eq!(*nodes.get(extreme(&nodes, root, Side::Right)).key(), 6);
    }

    #[test]
    fn neighbours_cross_subtrees() {
        let (nodes, root) = sample();
        // Successor found through an ancestor.
        assert_eq!(key_of(&nodes, neighbor(&nodes, Some(root), &3, Side::Right)), Some(4));
        // Successor found inside the right subtree.
        assert_eq!(key_of(&nodes, neighbor(&nodes, Some(root), &2, Side::Right)), Some(3));
        assert_eq!(key_of(&nodes, neighbor(&nodes, Some(root), &4, Side::Left)), Some(3));
        assert_eq!(key_of(&nodes, neighbor(&nodes, Some(root), &6, Side::Left)), Some(4));
    }

    #[test]
    fn neighbours_at_the_edges() {
        let (nodes, root) = sample();
        assert_eq!(neighbor(&nodes, Some(root), &6, Side::Right), Neighbor::Edge);
        assert_eq!(neighbor(&nodes, Some(root), &1, Side::Left), Neighbor::Edge);
        assert_eq!(neighbor(&nodes, Some(root), &5, Side::Right), Neighbor::Missing);
    }

    #[test]
    fn neighbour_results_map_to_errors() {
        let handle = Handle::from_index(0);
        assert_eq!(Neighbor::Found(handle).into_result(TreeError::NoSuccessor), Ok(handle));
        assert_eq!(Neighbor::Missing.into_result(TreeError::NoSuccessor), Err(TreeError::KeyNotFound));
        assert_eq!(Neighbor::Edge.into_result(TreeError::NoPredecessor), Err(TreeError::NoPredecessor));
    }

    #[test]
    fn height_counts_edges() {
        let (nodes, root) = sample();
        assert_eq!(height(&nodes, Some(root)), Some(2));
        assert_eq!(height(&nodes, Some(extreme(&nodes, root, Side::Right))), Some(0));
        assert_eq!(height::<BstNode<i32, ()>>(&nodes, None), None);
    }
}
