//! Errors reported by the order queries of both maps.

/// Reasons an order query on a map can fail.
///
/// Lookups that merely miss (`contains_key`, `get`, `remove`) report absence through `bool` or
/// `Option` instead; only queries that promise a key return this error.
///
/// # Examples
///
/// ```
/// use rbtree_map::{OrderedMap, TreeError};
///
/// let mut map = OrderedMap::new();
/// assert_eq!(map.min_key(), Err(TreeError::EmptyTree));
///
/// map.insert(1, "one");
/// assert_eq!(map.successor(&1), Err(TreeError::NoSuccessor));
/// assert_eq!(map.successor(&2), Err(TreeError::KeyNotFound));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum TreeError {
    /// A minimum or maximum was requested from an empty map.
    #[error("the tree is empty")]
    EmptyTree,
    /// The queried key is the largest key, so it has no successor.
    #[error("the key is the maximum and has no successor")]
    NoSuccessor,
    /// The queried key is the smallest key, so it has no predecessor.
    #[error("the key is the minimum and has no predecessor")]
    NoPredecessor,
    /// The queried key is not present in the map.
    #[error("the key is not present in the tree")]
    KeyNotFound,
}

/// Result alias for the fallible queries of this crate.
pub type Result<T> = core::result::Result<T, TreeError>;
