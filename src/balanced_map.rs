use core::borrow::Borrow;
use core::fmt;
use core::ops::Index;

use crate::raw::{RawRbTree, Side};
use crate::traversal::{Inorder, Keys, LevelOrder, Postorder, Preorder, Values};
use crate::{Result, TreeError};

/// An ordered map based on a [red-black tree].
///
/// `BalancedOrderedMap` offers the same contract as [`OrderedMap`](crate::OrderedMap) but colors
/// every node red or black and repairs the coloring after each insertion and removal with at
/// most a handful of rotations. The coloring rules (a black root, no red node with a red child,
/// and the same number of black nodes on every path from a node down to its missing children)
/// keep the height at most `2 * log2(len + 1)`, so lookups, insertions and removals are
/// O(log n) in the worst case.
///
/// Nodes live in a single arena owned by the map; links between them are indices rather than
/// pointers, and no reference into the map survives a mutation.
///
/// # Examples
///
/// ```
/// use rbtree_map::BalancedOrderedMap;
///
/// let mut map = BalancedOrderedMap::new();
/// for key in 1..=1000 {
///     map.insert(key, key * key);
/// }
///
/// // Sorted input no longer produces a chain.
/// assert!(map.height().unwrap() <= 2 * 10);
/// assert!(map.verify_properties());
///
/// assert_eq!(map.get(&12), Some(&144));
/// assert_eq!(map.predecessor(&500), Ok(&499));
///
/// assert!(map.remove(&500));
/// assert_eq!(map.successor(&499), Ok(&501));
/// assert!(map.verify_properties());
/// ```
///
/// [red-black tree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
pub struct BalancedOrderedMap<K, V> {
    raw: RawRbTree<K, V>,
}

/// A snapshot of a [`BalancedOrderedMap`]'s shape.
///
/// Returned by [`BalancedOrderedMap::stats`]; formatting is left to the caller.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TreeStats {
    /// Number of entries.
    pub len: usize,
    /// Height in edges, `None` when empty.
    pub height: Option<usize>,
    /// Black-height of the root.
    pub black_height: usize,
    pub red_nodes: usize,
    pub black_nodes: usize,
    /// Whether every red-black property holds.
    pub valid: bool,
}

impl<K, V> BalancedOrderedMap<K, V> {
    /// Makes a new, empty `BalancedOrderedMap`. Does not allocate anything on its own.
    #[must_use]
    pub const fn new() -> Self {
        Self { raw: RawRbTree::new() }
    }

    /// Makes a new, empty `BalancedOrderedMap` with room for at least `capacity` entries before
    /// the node arena reallocates.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw: RawRbTree::with_capacity(capacity),
        }
    }

    /// Returns the number of entries the map can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the map, removing all entries. O(n).
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the height of the tree in edges: `Some(0)` for a single entry, `None` for an
    /// empty map. Never exceeds `2 * log2(len + 1)`.
    #[must_use]
    pub fn height(&self) -> Option<usize> {
        self.raw.height()
    }

    /// Returns the black-height of the root: the number of black nodes on any path from the
    /// root down to a missing child, counting the missing child but not the root.
    ///
    /// The root is always black, so this equals the number of black nodes on such a path
    /// including the root. `0` for an empty map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::BalancedOrderedMap;
    ///
    /// let mut map = BalancedOrderedMap::new();
    /// assert_eq!(map.black_height(), 0);
    /// map.insert("only", ());
    /// assert_eq!(map.black_height(), 1);
    /// ```
    #[must_use]
    pub fn black_height(&self) -> usize {
        self.raw.black_height()
    }

    /// Returns the entry with the smallest key, or `None` if the map is empty.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first_key_value()
    }

    /// Returns the entry with the largest key, or `None` if the map is empty.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last_key_value()
    }

    /// Returns the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EmptyTree`] if the map is empty.
    pub fn min_key(&self) -> Result<&K> {
        self.first_key_value().map(|(key, _)| key).ok_or(TreeError::EmptyTree)
    }

    /// Returns the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EmptyTree`] if the map is empty.
    pub fn max_key(&self) -> Result<&K> {
        self.last_key_value().map(|(key, _)| key).ok_or(TreeError::EmptyTree)
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    pub fn iter(&self) -> Inorder<'_, K, V> {
        self.inorder()
    }

    /// Gets an iterator over the entries in in-order (ascending key) sequence.
    pub fn inorder(&self) -> Inorder<'_, K, V> {
        Inorder::new(self.raw.nodes(), self.raw.root(), self.raw.len())
    }

    /// Gets an iterator over the entries in pre-order: each node before its subtrees.
    pub fn preorder(&self) -> Preorder<'_, K, V> {
        Preorder::new(self.raw.nodes(), self.raw.root(), self.raw.len())
    }

    /// Gets an iterator over the entries in post-order: both subtrees before their node.
    pub fn postorder(&self) -> Postorder<'_, K, V> {
        Postorder::new(self.raw.nodes(), self.raw.root(), self.raw.len())
    }

    /// Gets an iterator over the entries breadth-first, one level at a time.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::BalancedOrderedMap;
    ///
    /// let map = BalancedOrderedMap::from([(1, ()), (2, ()), (3, ())]);
    /// // The third ascending insert rotates 2 up to the root.
    /// let keys: Vec<_> = map.level_order().map(|(key, _)| *key).collect();
    /// assert_eq!(keys, [2, 1, 3]);
    /// ```
    pub fn level_order(&self) -> LevelOrder<'_, K, V> {
        LevelOrder::new(self.raw.nodes(), self.raw.root(), self.raw.len())
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.inorder())
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.inorder())
    }
}

impl<K: Ord, V> BalancedOrderedMap<K, V> {
    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned; the new entry is attached
    /// as a red leaf and the coloring repaired on the way back up. If the key was present, its
    /// value is replaced in place and the old value returned, without any restructuring.
    ///
    /// # Complexity
    ///
    /// O(log n), with at most two rotations.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).is_some()
    }

    /// Returns a reference to the value corresponding to the key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Removes a key from the map, returning `true` if it was present.
    ///
    /// # Complexity
    ///
    /// O(log n), with at most three rotations.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key).is_some()
    }

    /// Removes a key from the map, returning the stored key and value if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::BalancedOrderedMap;
    ///
    /// let mut map = BalancedOrderedMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove_entry(&1), None);
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key)
    }

    /// Returns the smallest key greater than `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::KeyNotFound`] if `key` is not in the map and
    /// [`TreeError::NoSuccessor`] if it is the largest key.
    pub fn successor<Q>(&self, key: &Q) -> Result<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.neighbor(key, Side::Right).into_result(TreeError::NoSuccessor)?;
        Ok(self.raw.key(handle))
    }

    /// Returns the largest key smaller than `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::KeyNotFound`] if `key` is not in the map and
    /// [`TreeError::NoPredecessor`] if it is the smallest key.
    pub fn predecessor<Q>(&self, key: &Q) -> Result<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.neighbor(key, Side::Left).into_result(TreeError::NoPredecessor)?;
        Ok(self.raw.key(handle))
    }

    /// Walks the whole tree and checks that the root is black, no red node has a red child,
    /// every path to a missing child carries the same number of black nodes, keys are in search
    /// order and every parent link is consistent.
    ///
    /// Every public operation leaves these properties intact, so this only returns `false` if
    /// the map has been corrupted by a key whose ordering changed while stored. O(n).
    #[must_use]
    pub fn verify_properties(&self) -> bool {
        self.raw.verify()
    }

    /// Collects size, height and coloring figures in one O(n) pass.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::BalancedOrderedMap;
    ///
    /// let map: BalancedOrderedMap<_, _> = (0..3).map(|key| (key, ())).collect();
    /// let stats = map.stats();
    /// assert_eq!((stats.len, stats.height), (3, Some(1)));
    /// assert_eq!((stats.red_nodes, stats.black_nodes), (2, 1));
    /// assert!(stats.valid);
    /// ```
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let (red_nodes, black_nodes) = self.raw.color_counts();
        TreeStats {
            len: self.len(),
            height: self.height(),
            black_height: self.black_height(),
            red_nodes,
            black_nodes,
            valid: self.verify_properties(),
        }
    }
}

/// Structural deep copy: the clone owns its own nodes.
impl<K: Clone, V: Clone> Clone for BalancedOrderedMap<K, V> {
    fn clone(&self) -> Self {
        Self { raw: self.raw.clone() }
    }
}

impl<K, V> Default for BalancedOrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BalancedOrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for BalancedOrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for BalancedOrderedMap<K, V> {}

impl<K: Ord, V> FromIterator<(K, V)> for BalancedOrderedMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for BalancedOrderedMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for BalancedOrderedMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a, K, V> IntoIterator for &'a BalancedOrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Inorder<'a, K, V>;

    fn into_iter(self) -> Inorder<'a, K, V> {
        self.iter()
    }
}

impl<K, Q, V> Index<&Q> for BalancedOrderedMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `BalancedOrderedMap`.
    #[inline]
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn stats_of_empty_map() {
        let map: BalancedOrderedMap<u8, ()> = BalancedOrderedMap::default();
        assert_eq!(
            map.stats(),
            TreeStats {
                len: 0,
                height: None,
                black_height: 0,
                red_nodes: 0,
                black_nodes: 0,
                valid: true,
            }
        );
    }

    #[test]
    fn clone_is_deep() {
        let original = BalancedOrderedMap::from([(1, 10), (2, 20), (3, 30)]);
        let mut copy = original.clone();
        *copy.get_mut(&2).unwrap() = 99;
        copy.remove(&1);

        assert_eq!(original.get(&2), Some(&20));
        assert!(original.contains_key(&1));
        assert_eq!(copy.keys().copied().collect::<Vec<_>>(), [2, 3]);
        assert!(copy.verify_properties() && original.verify_properties());
    }

    #[test]
    fn index_reads_values() {
        let map = BalancedOrderedMap::from([("a", 1), ("b", 2)]);
        assert_eq!(map["b"], 2);
    }
}
