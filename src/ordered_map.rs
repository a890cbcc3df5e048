use core::borrow::Borrow;
use core::fmt;
use core::ops::Index;

use crate::raw::{RawBst, Side};
use crate::traversal::{Inorder, Keys, LevelOrder, Postorder, Preorder, Values};
use crate::{Result, TreeError};

/// An ordered map based on an unbalanced [binary search tree].
///
/// Given a key type with a [total order], the map stores one value per key and keeps keys in
/// order: for every node, the keys in its left subtree are smaller and the keys in its right
/// subtree larger. No rebalancing is ever performed, so operations take time proportional to
/// the height of the tree, which degrades to `len - 1` when keys arrive in sorted order. Use
/// [`BalancedOrderedMap`](crate::BalancedOrderedMap) for a logarithmic bound.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative
/// to any other key, as determined by the [`Ord`] trait, changes while it is in the map. The
/// behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `OrderedMap` that observed it and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use rbtree_map::OrderedMap;
///
/// let mut grades = OrderedMap::new();
/// grades.insert(50, "C");
/// grades.insert(30, "E");
/// grades.insert(70, "B");
///
/// assert!(grades.contains_key(&30));
/// assert_eq!(grades.get(&70), Some(&"B"));
/// assert_eq!(grades.successor(&50), Ok(&70));
///
/// // Re-inserting a key replaces its value in place.
/// assert_eq!(grades.insert(30, "D"), Some("E"));
/// assert_eq!(grades.len(), 3);
///
/// assert!(grades.remove(&50));
/// assert!(!grades.remove(&50));
///
/// let keys: Vec<_> = grades.keys().copied().collect();
/// assert_eq!(keys, [30, 70]);
/// ```
///
/// [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
/// [total order]: https://en.wikipedia.org/wiki/Total_order
pub struct OrderedMap<K, V> {
    raw: RawBst<K, V>,
}

impl<K, V> OrderedMap<K, V> {
    /// Makes a new, empty `OrderedMap`. Does not allocate anything on its own.
    #[must_use]
    pub const fn new() -> Self {
        Self { raw: RawBst::new() }
    }

    /// Makes a new, empty `OrderedMap` with room for at least `capacity` entries before the node
    /// arena reallocates.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw: RawBst::with_capacity(capacity),
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
    /// empty map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.height(), None);
    ///
    /// for key in 1..=5 {
    ///     map.insert(key, ());
    /// }
    /// // Sorted input degenerates into a chain.
    /// assert_eq!(map.height(), Some(4));
    /// ```
    #[must_use]
    pub fn height(&self) -> Option<usize> {
        self.raw.height()
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
    ///
    /// Pre-order reflects insertion structure, so inserting the same keys into a fresh map in
    /// this order rebuilds an identical tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::OrderedMap;
    ///
    /// let map = OrderedMap::from([(2, 'b'), (1, 'a'), (3, 'c')]);
    /// let keys: Vec<_> = map.preorder().map(|(key, _)| *key).collect();
    /// assert_eq!(keys, [2, 1, 3]);
    /// ```
    pub fn preorder(&self) -> Preorder<'_, K, V> {
        Preorder::new(self.raw.nodes(), self.raw.root(), self.raw.len())
    }

    /// Gets an iterator over the entries in post-order: both subtrees before their node.
    pub fn postorder(&self) -> Postorder<'_, K, V> {
        Postorder::new(self.raw.nodes(), self.raw.root(), self.raw.len())
    }

    /// Gets an iterator over the entries breadth-first, one level at a time.
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

impl<K: Ord, V> OrderedMap<K, V> {
    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned and the map grows by one.
    /// If the key was present, its value is replaced in place and the old value returned; the
    /// key itself and the tree shape are left untouched.
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
    /// A node with two children is not unlinked itself: its in-order successor is moved into
    /// its place and the successor's node is removed instead. Entries never change keys, but
    /// references obtained before the call do not survive it.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key).is_some()
    }

    /// Removes a key from the map, returning the stored key and value if it was present.
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
}

/// Structural deep copy: the clone owns its own nodes.
impl<K: Clone, V: Clone> Clone for OrderedMap<K, V> {
    fn clone(&self) -> Self {
        Self { raw: self.raw.clone() }
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Maps are equal when they hold the same entries, regardless of tree shape.
impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V> {
    /// Inserts the pairs in array order, so the first pair becomes the root.
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Inorder<'a, K, V>;

    fn into_iter(self) -> Inorder<'a, K, V> {
        self.iter()
    }
}

impl<K, Q, V> Index<&Q> for OrderedMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `OrderedMap`.
    #[inline]
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}
