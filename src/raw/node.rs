use super::handle::Handle;

/// Which child slot of a node a link occupies.
///
/// Every red-black case analysis comes in a left-handed and a right-handed version; the fixups
/// are written once in terms of a `Side` and its [`opposite`](Side::opposite).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left = 0,
    Right = 1,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Read access shared by both node layouts, so searches and traversals are written once.
pub(crate) trait TreeNode {
    type Key;
    type Value;

    fn key(&self) -> &Self::Key;
    fn value(&self) -> &Self::Value;
    fn value_mut(&mut self) -> &mut Self::Value;
    fn child(&self, side: Side) -> Option<Handle>;

    #[inline]
    fn left(&self) -> Option<Handle> {
        self.child(Side::Left)
    }

    #[inline]
    fn right(&self) -> Option<Handle> {
        self.child(Side::Right)
    }

    /// Returns the slot `child` occupies. Only meaningful when `child` is one of our children.
    #[inline]
    fn side_of(&self, child: Option<Handle>) -> Side {
        if self.left() == child { Side::Left } else { Side::Right }
    }
}

// Unbalanced search tree node: a key, its value and two owned child links.
#[derive(Clone)]
pub(crate) struct BstNode<K, V> {
    key: K,
    value: V,
    children: [Option<Handle>; 2],
}

impl<K, V> BstNode<K, V> {
    pub(crate) const fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            children: [None, None],
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        self.children[side as usize] = child;
    }

    /// Swaps this node's entry for `(key, value)`, returning the previous entry.
    pub(crate) fn replace_entry(&mut self, key: K, value: V) -> (K, V) {
        (core::mem::replace(&mut self.key, key), core::mem::replace(&mut self.value, value))
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> TreeNode for BstNode<K, V> {
    type Key = K;
    type Value = V;

    #[inline]
    fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    #[inline]
    fn child(&self, side: Side) -> Option<Handle> {
        self.children[side as usize]
    }
}

// Red-black node: adds a color and a non-owning parent link used by rotations and fixups.
#[derive(Clone)]
pub(crate) struct RbNode<K, V> {
    key: K,
    value: V,
    children: [Option<Handle>; 2],
    parent: Option<Handle>,
    color: Color,
}

impl<K, V> RbNode<K, V> {
    /// New nodes enter the tree red with no children.
    pub(crate) const fn new_red(key: K, value: V, parent: Option<Handle>) -> Self {
        Self {
            key,
            value,
            children: [None, None],
            parent,
            color: Color::Red,
        }
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        self.children[side as usize] = child;
    }

    /// Swaps this node's entry for `(key, value)`, returning the previous entry.
    pub(crate) fn replace_entry(&mut self, key: K, value: V) -> (K, V) {
        (core::mem::replace(&mut self.key, key), core::mem::replace(&mut self.value, value))
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> TreeNode for RbNode<K, V> {
    type Key = K;
    type Value = V;

    #[inline]
    fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    #[inline]
    fn child(&self, side: Side) -> Option<Handle> {
        self.children[side as usize]
    }
}
