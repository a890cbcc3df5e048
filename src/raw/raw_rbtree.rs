use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, RbNode, Side, TreeNode};
use super::walk::{self, Neighbor};

/// The red-black tree backing `BalancedOrderedMap`.
///
/// Absent children are `None` and count as black; there is no shared sentinel node. Between
/// public operations the tree satisfies:
///
/// 1. the root is black,
/// 2. a red node has no red child,
/// 3. every path from a node down to an absent child crosses the same number of black nodes.
#[derive(Clone)]
pub(crate) struct RawRbTree<K, V> {
    /// Arena storing every node reachable from `root`.
    nodes: Arena<RbNode<K, V>>,
    root: Option<Handle>,
    /// Number of key-value pairs in the tree.
    len: usize,
}

impl<K, V> RawRbTree<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) const fn nodes(&self) -> &Arena<RbNode<K, V>> {
        &self.nodes
    }

    pub(crate) fn clear(&mut self) {
        log::debug!("clearing red-black tree of {} entries", self.len);
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    pub(crate) fn first_key_value(&self) -> Option<(&K, &V)> {
        let handle = walk::extreme(&self.nodes, self.root?, Side::Left);
        let node = self.nodes.get(handle);
        Some((node.key(), node.value()))
    }

    pub(crate) fn last_key_value(&self) -> Option<(&K, &V)> {
        let handle = walk::extreme(&self.nodes, self.root?, Side::Right);
        let node = self.nodes.get(handle);
        Some((node.key(), node.value()))
    }

    pub(crate) fn height(&self) -> Option<usize> {
        walk::height(&self.nodes, self.root)
    }

    pub(crate) fn key(&self, handle: Handle) -> &K {
        self.nodes.get(handle).key()
    }

    /// Black nodes on the path from the root down its left spine. Any other path would give the
    /// same count in a valid tree.
    pub(crate) fn black_height(&self) -> usize {
        let mut count = 0;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if node.color() == Color::Black {
                count += 1;
            }
            current = node.left();
        }
        count
    }

    /// Returns `(red, black)` node counts.
    pub(crate) fn color_counts(&self) -> (usize, usize) {
        let mut red = 0;
        let mut stack: Vec<Handle> = Vec::new();
        stack.extend(self.root);
        while let Some(handle) = stack.pop() {
            let node = self.nodes.get(handle);
            if node.color() == Color::Red {
                red += 1;
            }
            stack.extend(node.left());
            stack.extend(node.right());
        }
        (red, self.len - red)
    }

    #[inline]
    fn parent(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).parent()
    }

    /// Absent children are black.
    #[inline]
    fn is_red(&self, link: Option<Handle>) -> bool {
        link.is_some_and(|handle| self.nodes.get(handle).color() == Color::Red)
    }

    #[inline]
    fn paint(&mut self, handle: Handle, color: Color) {
        self.nodes.get_mut(handle).set_color(color);
    }

    /// Makes `new` take `old`'s place under `parent`, or at the root when `parent` is `None`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.nodes.get(parent).side_of(Some(old));
                self.nodes.get_mut(parent).set_child(side, new);
            }
        }
    }

    /// Rotates the subtree rooted at `pivot` in `direction`.
    ///
    /// A left rotation lifts `pivot`'s right child into its place and hangs `pivot` off that
    /// child's left; a right rotation is the mirror image. In-order key sequence is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `pivot` has no child on the side opposite to `direction`.
    pub(crate) fn rotate(&mut self, pivot: Handle, direction: Side) {
        let rising_side = direction.opposite();
        let rising = self
            .nodes
            .get(pivot)
            .child(rising_side)
            .expect("`RawRbTree::rotate()` - `pivot` has no child to rotate up!");
        log::trace!("rotate {direction:?} at {pivot:?}, lifting {rising:?}");

        let inner = self.nodes.get(rising).child(direction);
        self.nodes.get_mut(pivot).set_child(rising_side, inner);
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).set_parent(Some(pivot));
        }

        let parent = self.parent(pivot);
        self.replace_child(parent, pivot, Some(rising));
        self.nodes.get_mut(rising).set_parent(parent);

        self.nodes.get_mut(rising).set_child(direction, Some(pivot));
        self.nodes.get_mut(pivot).set_parent(Some(rising));
    }

    /// Restores "no red node has a red child" after `node` was attached red.
    fn insert_fixup(&mut self, mut node: Handle) {
        while let Some(mut parent) = self.parent(node).filter(|&parent| self.is_red(Some(parent))) {
            let grandparent = self
                .parent(parent)
                .expect("`RawRbTree::insert_fixup()` - a red node cannot be the root!");
            let side = self.nodes.get(grandparent).side_of(Some(parent));
            let uncle = self.nodes.get(grandparent).child(side.opposite());

            if let Some(uncle) = uncle.filter(|&uncle| self.is_red(Some(uncle))) {
                log::trace!("insert fixup at {node:?}: red uncle, recoloring");
                self.paint(parent, Color::Black);
                self.paint(uncle, Color::Black);
                self.paint(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            if self.nodes.get(parent).side_of(Some(node)) != side {
                log::trace!("insert fixup at {node:?}: triangle, straightening");
                self.rotate(parent, side);
                node = parent;
                parent = self
                    .parent(node)
                    .expect("`RawRbTree::insert_fixup()` - rotated node lost its parent!");
            }

            log::trace!("insert fixup at {node:?}: line, rotating grandparent");
            self.paint(parent, Color::Black);
            self.paint(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
        }

        if let Some(root) = self.root {
            self.paint(root, Color::Black);
        }
    }

    /// Unlinks `node`, which must have at most one child, and rebalances if it was black.
    fn splice(&mut self, node: Handle) {
        let spliced = self.nodes.get(node);
        debug_assert!(
            spliced.left().is_none() || spliced.right().is_none(),
            "`RawRbTree::splice()` - `node` has two children!"
        );
        let child = spliced.left().or(spliced.right());
        let parent = spliced.parent();
        let color = spliced.color();

        if let Some(child) = child {
            self.nodes.get_mut(child).set_parent(parent);
        }
        self.replace_child(parent, node, child);
        log::trace!("spliced {color:?} {node:?}, {child:?} takes its place");

        if color == Color::Black {
            self.delete_fixup(child, parent);
        }
    }

    /// Repairs the missing black on every path through `link`, the replacement for a spliced-out
    /// black node. `parent` is tracked separately because `link` may be absent.
    fn delete_fixup(&mut self, mut link: Option<Handle>, mut parent: Option<Handle>) {
        while link != self.root && !self.is_red(link) {
            let above = parent.expect("`RawRbTree::delete_fixup()` - non-root link has no parent!");
            let side = self.nodes.get(above).side_of(link);
            let far = side.opposite();
            let mut sibling = self.sibling(above, far);

            if self.is_red(Some(sibling)) {
                log::trace!("delete fixup under {above:?}: red sibling, rotating toward {side:?}");
                self.paint(sibling, Color::Black);
                self.paint(above, Color::Red);
                self.rotate(above, side);
                sibling = self.sibling(above, far);
            }

            let near_nephew = self.nodes.get(sibling).child(side);
            let far_nephew = self.nodes.get(sibling).child(far);

            if !self.is_red(near_nephew) && !self.is_red(far_nephew) {
                log::trace!("delete fixup under {above:?}: black nephews, moving up");
                self.paint(sibling, Color::Red);
                link = Some(above);
                parent = self.parent(above);
                continue;
            }

            if !self.is_red(far_nephew) {
                log::trace!("delete fixup under {above:?}: red near nephew, rotating sibling");
                let near_nephew =
                    near_nephew.expect("`RawRbTree::delete_fixup()` - red near nephew must exist!");
                self.paint(near_nephew, Color::Black);
                self.paint(sibling, Color::Red);
                self.rotate(sibling, far);
                sibling = self.sibling(above, far);
            }

            log::trace!("delete fixup under {above:?}: red far nephew, rotating parent");
            let above_color = self.nodes.get(above).color();
            self.paint(sibling, above_color);
            self.paint(above, Color::Black);
            if let Some(far_nephew) = self.nodes.get(sibling).child(far) {
                self.paint(far_nephew, Color::Black);
            }
            self.rotate(above, side);
            link = self.root;
            break;
        }

        if let Some(link) = link {
            self.paint(link, Color::Black);
        }
    }

    fn sibling(&self, parent: Handle, side: Side) -> Handle {
        self.nodes
            .get(parent)
            .child(side)
            .expect("`RawRbTree::delete_fixup()` - a doubly-black link always has a sibling!")
    }
}

impl<K: Ord, V> RawRbTree<K, V> {
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        walk::search(&self.nodes, self.root, key)
    }

    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let node = self.nodes.get(self.search(key)?);
        Some((node.key(), node.value()))
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        Some(self.nodes.get_mut(handle).value_mut())
    }

    pub(crate) fn neighbor<Q>(&self, key: &Q, side: Side) -> Neighbor
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        walk::neighbor(&self.nodes, self.root, key, side)
    }

    /// Inserts `key`, replacing and returning the old value if the key was already present.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut parent = None;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let side = match key.cmp(node.key()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    return Some(core::mem::replace(self.nodes.get_mut(handle).value_mut(), value));
                }
            };
            parent = Some((handle, side));
            current = node.child(side);
        }

        let node = self.nodes.alloc(RbNode::new_red(key, value, parent.map(|(parent, _)| parent)));
        match parent {
            None => self.root = Some(node),
            Some((parent, side)) => self.nodes.get_mut(parent).set_child(side, Some(node)),
        }
        self.len += 1;
        self.insert_fixup(node);
        None
    }

    /// Removes `key` and returns its entry.
    ///
    /// When the node has two children its in-order successor is spliced out instead and the
    /// successor's entry is moved into the node's slot. Handles are therefore not stable across
    /// removals; callers re-resolve by key.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let target = self.search(key)?;
        let node = self.nodes.get(target);

        let entry = if let (Some(_), Some(right)) = (node.left(), node.right()) {
            let successor = walk::extreme(&self.nodes, right, Side::Left);
            self.splice(successor);
            let (key, value) = self.nodes.take(successor).into_entry();
            self.nodes.get_mut(target).replace_entry(key, value)
        } else {
            self.splice(target);
            self.nodes.take(target).into_entry()
        };

        self.len -= 1;
        Some(entry)
    }

    /// Checks every red-black property plus search order, parent links and the cached length.
    pub(crate) fn verify(&self) -> bool {
        let Some(root) = self.root else {
            return self.len == 0;
        };
        if self.nodes.get(root).color() != Color::Black || self.parent(root).is_some() {
            return false;
        }

        let mut count = 0;
        self.verify_subtree(Some(root), None, None, None, &mut count).is_some()
            && count == self.len
            && self.nodes.len() == self.len
    }

    /// Returns the subtree's black-height counting the absent children, or `None` on a violation.
    /// Recursion depth is bounded by the height of the tree being verified.
    fn verify_subtree(
        &self,
        link: Option<Handle>,
        parent: Option<Handle>,
        low: Option<&K>,
        high: Option<&K>,
        count: &mut usize,
    ) -> Option<usize> {
        let Some(handle) = link else {
            return Some(1);
        };
        let node = self.nodes.get(handle);
        let key = node.key();

        let linked = node.parent() == parent;
        let ordered = low.is_none_or(|low| low < key) && high.is_none_or(|high| key < high);
        let red_red = node.color() == Color::Red && (self.is_red(node.left()) || self.is_red(node.right()));
        if !linked || !ordered || red_red {
            return None;
        }
        *count += 1;

        let left = self.verify_subtree(node.left(), Some(handle), low, Some(key), count)?;
        let right = self.verify_subtree(node.right(), Some(handle), Some(key), high, count)?;
        (left == right).then_some(left + usize::from(node.color() == Color::Black))
    }
}
