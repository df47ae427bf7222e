use std::fmt;

/// Stable handle of a node inside the tree's arena.
///
/// Handles stay valid until the tree is cleared; nodes are never removed
/// individually.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which child slot of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left = 0,
    Right = 1,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Balance change a node sees when the subtree on this side grows by one.
    pub(crate) fn weight(self) -> i8 {
        match self {
            Side::Left => -1,
            Side::Right => 1,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

pub(crate) type Link = Option<NodeId>;

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) children: [Link; 2],
    pub(crate) parent: Link,
    /// Height of the right subtree minus height of the left subtree.
    pub(crate) balance: i8,
}

impl<K, V> Node<K, V> {
    pub(crate) fn create(parent: Link, key: K, value: V) -> Self {
        Node {
            key,
            value,
            children: [None, None],
            parent,
            balance: 0,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Link {
        self.children[side.index()]
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Link {
        &mut self.children[side.index()]
    }

    pub(crate) fn left(&self) -> Link {
        self.child(Side::Left)
    }

    pub(crate) fn right(&self) -> Link {
        self.child(Side::Right)
    }
}

/// Read-only view of a node, for printers and verifiers.
pub struct NodeRef<'a, K, V> {
    nodes: &'a [Node<K, V>],
    id: NodeId,
}

impl<'a, K, V> NodeRef<'a, K, V> {
    pub(crate) fn new(nodes: &'a [Node<K, V>], id: NodeId) -> Self {
        Self { nodes, id }
    }

    fn node(&self) -> &'a Node<K, V> {
        &self.nodes[self.id.index()]
    }

    fn link(&self, link: Link) -> Option<NodeRef<'a, K, V>> {
        link.map(|id| NodeRef::new(self.nodes, id))
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn key(&self) -> &'a K {
        &self.node().key
    }

    pub fn value(&self) -> &'a V {
        &self.node().value
    }

    pub fn left(&self) -> Option<NodeRef<'a, K, V>> {
        self.link(self.node().left())
    }

    pub fn right(&self) -> Option<NodeRef<'a, K, V>> {
        self.link(self.node().right())
    }

    pub fn child(&self, side: Side) -> Option<NodeRef<'a, K, V>> {
        self.link(self.node().child(side))
    }

    pub fn parent(&self) -> Option<NodeRef<'a, K, V>> {
        self.link(self.node().parent)
    }

    /// Stored balance factor: height(right) - height(left).
    pub fn balance(&self) -> i8 {
        self.node().balance
    }

    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }
}

impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<'_, K, V> {}

impl<K, V> PartialEq for NodeRef<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.nodes, other.nodes) && self.id == other.id
    }
}

impl<K, V> Eq for NodeRef<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for NodeRef<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("key", self.key())
            .field("value", self.value())
            .field("balance", &self.balance())
            .finish()
    }
}
