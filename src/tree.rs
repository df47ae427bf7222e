use std::cmp;
use std::collections::VecDeque;
use std::fmt;
use std::iter::FromIterator;

use crate::compare::{Comparator, NaturalOrder};
use crate::error::Inconsistency;
use crate::iter::{Iter, Keys, Values};
use crate::node::{Link, Node, NodeId, NodeRef, Side};

/// An ordered map implemented with an AVL tree.
///
/// Nodes are kept in an arena and linked by [`NodeId`] handles, each node
/// carrying its balance factor. Insertion is `O(log n)`; keys equal to a
/// stored key are rejected.
///
/// ```
/// use avltree::AvlTree;
/// let mut tree = AvlTree::new();
/// tree.insert(1, "one");
/// tree.insert(2, "two");
/// tree.insert(3, "three");
/// assert_eq!(tree.find(&2), Some(&"two"));
/// assert_eq!(tree.root().map(|node| *node.key()), Some(2));
/// assert_eq!(tree.height(), 2);
/// ```
#[derive(Clone)]
pub struct AvlTree<K, V, C = NaturalOrder> {
    pub(crate) nodes: Vec<Node<K, V>>,
    pub(crate) root: Link,
    pub(crate) num_nodes: usize,
    pub(crate) compare: C,
    pub(crate) poisoned: bool,
}

impl<K: Ord, V> AvlTree<K, V> {
    /// Creates an empty tree ordered by `K`'s `Ord` implementation.
    /// No memory is allocated until the first entry is inserted.
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V, C> AvlTree<K, V, C>
where
    C: Comparator<K>,
{
    /// Creates an empty tree ordered by the given comparator.
    pub fn with_comparator(compare: C) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            num_nodes: 0,
            compare,
            poisoned: false,
        }
    }

    pub fn comparator(&self) -> &C {
        &self.compare
    }

    /// Returns true if the tree contains no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of entries in the tree.
    pub fn size(&self) -> usize {
        self.num_nodes
    }

    /// Alias of [`size`](Self::size).
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Number of nodes on the longest root-to-leaf path; 0 for an empty tree.
    /// Recomputed on every call.
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    /// Returns true if an engine defect was detected during an insertion.
    /// A poisoned tree rejects further insertions.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Removes all entries, deallocating the arena.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.num_nodes = 0;
        self.poisoned = false;
    }

    /// Returns a reference to the value stored under `key`.
    pub fn find(&self, key: &K) -> Option<&V> {
        self.find_node(key).map(|id| &self.node_at(id).value)
    }

    /// Returns references to the stored key and value equal to `key`.
    pub fn find_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.find_node(key).map(|id| {
            let node = self.node_at(id);
            (&node.key, &node.value)
        })
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find_node(key).is_some()
    }

    /// Read-only view of the root node.
    pub fn root(&self) -> Option<NodeRef<'_, K, V>> {
        self.root.map(|id| NodeRef::new(&self.nodes, id))
    }

    /// Read-only view of the node with the given handle.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, K, V>> {
        if id.index() < self.nodes.len() {
            Some(NodeRef::new(&self.nodes, id))
        } else {
            None
        }
    }

    /// Iterates over the entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.nodes, self.root, self.num_nodes)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Visits every node breadth first, left to right within a level.
    pub fn traverse_level_order<F>(&self, mut f: F)
    where
        F: FnMut(NodeRef<'_, K, V>),
    {
        let mut queue: VecDeque<NodeId> = self.root.into_iter().collect();
        while let Some(id) = queue.pop_front() {
            let node = self.node_at(id);
            queue.extend(node.left());
            queue.extend(node.right());
            f(NodeRef::new(&self.nodes, id));
        }
    }

    pub(crate) fn find_node(&self, key: &K) -> Link {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node_at(id);
            current = if self.compare.less_than(key, &node.key) {
                node.left()
            } else if self.compare.less_than(&node.key, key) {
                node.right()
            } else {
                break;
            };
        }
        current
    }

    fn subtree_height(&self, link: Link) -> usize {
        match link {
            None => 0,
            Some(id) => {
                let node = self.node_at(id);
                1 + cmp::max(
                    self.subtree_height(node.left()),
                    self.subtree_height(node.right()),
                )
            }
        }
    }

    pub(crate) fn node_at(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_at_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id.index()]
    }

    /// Stores `child` in the given slot of `parent` and points the child's
    /// parent link back at `parent`.
    pub(crate) fn set_child(&mut self, parent: NodeId, side: Side, child: Link) {
        *self.node_at_mut(parent).child_mut(side) = child;
        if let Some(child) = child {
            self.node_at_mut(child).parent = Some(parent);
        }
    }

    /// Returns the slot of `parent` that holds `child`.
    pub(crate) fn child_side(&self, parent: NodeId, child: NodeId) -> Result<Side, Inconsistency> {
        let node = self.node_at(parent);
        if node.left() == Some(child) {
            Ok(Side::Left)
        } else if node.right() == Some(child) {
            Ok(Side::Right)
        } else {
            Err(Inconsistency::OrphanChild { parent, child })
        }
    }

    pub(crate) fn child_of(&self, node: NodeId, side: Side) -> Result<NodeId, Inconsistency> {
        self.node_at(node)
            .child(side)
            .ok_or(Inconsistency::MissingChild { node, side })
    }
}

impl<K: Ord, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C: Comparator<K>> fmt::Debug for AvlTree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, C: Comparator<K>> IntoIterator for &'a AvlTree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for AvlTree<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
