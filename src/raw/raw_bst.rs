use core::borrow::Borrow;
use core::cmp::Ordering;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{BstNode, Side, TreeNode};
use super::walk::{self, Neighbor};

/// The unbalanced binary search tree backing `OrderedMap`.
#[derive(Clone)]
pub(crate) struct RawBst<K, V> {
    /// Arena storing every node reachable from `root`.
    nodes: Arena<BstNode<K, V>>,
    root: Option<Handle>,
    /// Number of key-value pairs in the tree.
    len: usize,
}

impl<K, V> RawBst<K, V> {
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

    pub(crate) const fn nodes(&self) -> &Arena<BstNode<K, V>> {
        &self.nodes
    }

    pub(crate) fn clear(&mut self) {
        log::debug!("clearing search tree of {} entries", self.len);
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

    /// Points the root (`parent == None`) or the given child slot of `parent` at `new`.
    fn relink(&mut self, parent: Option<(Handle, Side)>, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some((parent, side)) => self.nodes.get_mut(parent).set_child(side, new),
        }
    }
}

impl<K: Ord, V> RawBst<K, V> {
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

        let leaf = self.nodes.alloc(BstNode::new(key, value));
        self.relink(parent, Some(leaf));
        self.len += 1;
        None
    }

    /// Removes `key` and returns its entry.
    ///
    /// A node with two children keeps its slot: the in-order successor is spliced out of the
    /// right subtree and its entry moved into the node, so any handle to the successor's slot
    /// is invalidated.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut parent = None;
        let mut current = self.root;
        let target = loop {
            let handle = current?;
            let node = self.nodes.get(handle);
            let side = match key.cmp(node.key().borrow()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => break handle,
            };
            parent = Some((handle, side));
            current = node.child(side);
        };

        let node = self.nodes.get(target);
        let entry = match (node.left(), node.right()) {
            // Leaf or single child: splice the (possibly absent) child into our place.
            (None, child) | (child, None) => {
                self.relink(parent, child);
                self.nodes.take(target).into_entry()
            }
            (Some(_), Some(right)) => {
                let mut successor_parent = (target, Side::Right);
                let mut successor = right;
                while let Some(left) = self.nodes.get(successor).left() {
                    successor_parent = (successor, Side::Left);
                    successor = left;
                }
                // The successor has no left child, so this is always the leaf or one-child case.
                let orphan = self.nodes.get(successor).right();
                self.relink(Some(successor_parent), orphan);
                let (key, value) = self.nodes.take(successor).into_entry();
                self.nodes.get_mut(target).replace_entry(key, value)
            }
        };

        self.len -= 1;
        Some(entry)
    }
}
