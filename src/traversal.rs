//! Lazy traversal iterators shared by [`OrderedMap`](crate::OrderedMap) and
//! [`BalancedOrderedMap`](crate::BalancedOrderedMap).
//!
//! Every traversal keeps an explicit work list instead of recursing, so a degenerate unbalanced
//! tree cannot overflow the call stack. Iterators are cheap to clone; cloning one mid-way gives an
//! independent cursor at the same position, and asking the map again restarts from the top.

use alloc::collections::VecDeque;
use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::raw::{Handle, Side, Topology};

/// Work-list capacity kept inline. A red-black tree with 2^16 entries is at most 32 levels deep.
type Stack = SmallVec<[Handle; 32]>;

/// An iterator over the entries of a map in ascending key order.
///
/// This `struct` is created by the `inorder` and `iter` methods on the maps.
///
/// # Examples
///
/// ```
/// use rbtree_map::BalancedOrderedMap;
///
/// let map = BalancedOrderedMap::from([(2, "b"), (1, "a"), (3, "c")]);
/// let keys: Vec<_> = map.inorder().map(|(key, _)| *key).collect();
/// assert_eq!(keys, [1, 2, 3]);
/// ```
pub struct Inorder<'a, K: 'a, V: 'a> {
    tree: &'a dyn Topology<K, V>,
    stack: Stack,
    remaining: usize,
}

/// An iterator over the entries of a map in pre-order: each node before its left and then its
/// right subtree.
pub struct Preorder<'a, K: 'a, V: 'a> {
    tree: &'a dyn Topology<K, V>,
    stack: Stack,
    remaining: usize,
}

/// An iterator over the entries of a map in post-order: both subtrees before their node.
pub struct Postorder<'a, K: 'a, V: 'a> {
    tree: &'a dyn Topology<K, V>,
    // `true` once the node's children have been queued.
    stack: SmallVec<[(Handle, bool); 32]>,
    remaining: usize,
}

/// An iterator over the entries of a map breadth-first, level by level from the root, left to
/// right within a level.
pub struct LevelOrder<'a, K: 'a, V: 'a> {
    tree: &'a dyn Topology<K, V>,
    queue: VecDeque<Handle>,
    remaining: usize,
}

/// An iterator over the keys of a map, in ascending order.
pub struct Keys<'a, K: 'a, V: 'a> {
    inner: Inorder<'a, K, V>,
}

/// An iterator over the values of a map, in ascending key order.
pub struct Values<'a, K: 'a, V: 'a> {
    inner: Inorder<'a, K, V>,
}

impl<'a, K, V> Inorder<'a, K, V> {
    pub(crate) fn new(tree: &'a dyn Topology<K, V>, root: Option<Handle>, len: usize) -> Self {
        let mut iter = Self {
            tree,
            stack: Stack::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Option<Handle>) {
        while let Some(handle) = link {
            self.stack.push(handle);
            link = self.tree.child(handle, Side::Left);
        }
    }
}

impl<'a, K, V> Preorder<'a, K, V> {
    pub(crate) fn new(tree: &'a dyn Topology<K, V>, root: Option<Handle>, len: usize) -> Self {
        Self {
            tree,
            stack: root.into_iter().collect(),
            remaining: len,
        }
    }
}

impl<'a, K, V> Postorder<'a, K, V> {
    pub(crate) fn new(tree: &'a dyn Topology<K, V>, root: Option<Handle>, len: usize) -> Self {
        Self {
            tree,
            stack: root.map(|root| (root, false)).into_iter().collect(),
            remaining: len,
        }
    }
}

impl<'a, K, V> LevelOrder<'a, K, V> {
    pub(crate) fn new(tree: &'a dyn Topology<K, V>, root: Option<Handle>, len: usize) -> Self {
        let mut queue = VecDeque::with_capacity(len.min(64));
        queue.extend(root);
        Self {
            tree,
            queue,
            remaining: len,
        }
    }
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(inner: Inorder<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(inner: Inorder<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Inorder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.stack.pop()?;
        self.push_left_spine(self.tree.child(handle, Side::Right));
        self.remaining -= 1;
        Some(self.tree.entry(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Preorder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.stack.pop()?;
        // Right first so the left subtree is popped next.
        self.stack.extend(self.tree.child(handle, Side::Right));
        self.stack.extend(self.tree.child(handle, Side::Left));
        self.remaining -= 1;
        Some(self.tree.entry(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Postorder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (handle, expanded) = self.stack.pop()?;
            if expanded {
                self.remaining -= 1;
                return Some(self.tree.entry(handle));
            }
            self.stack.push((handle, true));
            self.stack.extend(self.tree.child(handle, Side::Right).map(|right| (right, false)));
            self.stack.extend(self.tree.child(handle, Side::Left).map(|left| (left, false)));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: 'a, V: 'a> Iterator for LevelOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.queue.pop_front()?;
        self.queue.extend(self.tree.child(handle, Side::Left));
        self.queue.extend(self.tree.child(handle, Side::Right));
        self.remaining -= 1;
        Some(self.tree.entry(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> Clone for Inorder<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, V> Clone for Preorder<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, V> Clone for Postorder<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, V> Clone for LevelOrder<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            queue: self.queue.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> ExactSizeIterator for Inorder<'_, K, V> {}
impl<K, V> ExactSizeIterator for Preorder<'_, K, V> {}
impl<K, V> ExactSizeIterator for Postorder<'_, K, V> {}
impl<K, V> ExactSizeIterator for LevelOrder<'_, K, V> {}
impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Inorder<'_, K, V> {}
impl<K, V> FusedIterator for Preorder<'_, K, V> {}
impl<K, V> FusedIterator for Postorder<'_, K, V> {}
impl<K, V> FusedIterator for LevelOrder<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Inorder<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Preorder<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Postorder<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for LevelOrder<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
