use log::{debug, error, trace};

use crate::compare::Comparator;
use crate::error::Inconsistency;
use crate::node::{Node, NodeId, Side};
use crate::tree::AvlTree;

/// Where a new key goes.
#[derive(Clone, Copy)]
enum InsertPos {
    /// The tree is empty.
    Root,
    /// The given child slot of the node is empty.
    Child(NodeId, Side),
    /// A node with an equal key exists.
    Occupied(NodeId),
}

impl<K, V, C> AvlTree<K, V, C>
where
    C: Comparator<K>,
{
    /// Inserts a key-value pair.
    ///
    /// Returns `false`, leaving the tree untouched, if a key comparing equal
    /// to `key` is already stored.
    ///
    /// # Panics
    ///
    /// Panics if the tree is poisoned, or if rebalancing detects a
    /// structural inconsistency (which poisons the tree).
    pub fn insert(&mut self, key: K, value: V) -> bool {
        assert!(!self.poisoned, "insert into a poisoned AVL tree");
        match self.insert_entry(key, value) {
            Ok(inserted) => inserted,
            Err(err) => {
                self.poisoned = true;
                error!("AVL tree poisoned: {err}");
                panic!("AVL tree inconsistency: {err}");
            }
        }
    }

    fn insert_entry(&mut self, key: K, value: V) -> Result<bool, Inconsistency> {
        let pos = self.find_insert_pos(&key);
        let parent = match pos {
            InsertPos::Occupied(id) => {
                debug!("key already stored at node {id}, insertion rejected");
                return Ok(false);
            }
            InsertPos::Root => None,
            InsertPos::Child(parent, _) => Some(parent),
        };

        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::create(parent, key, value));
        self.num_nodes += 1;

        match pos {
            InsertPos::Child(parent, side) => {
                trace!("attached node {id} as {side} child of {parent}");
                self.set_child(parent, side, Some(id));
            }
            _ => {
                trace!("node {id} becomes the root");
                self.root = Some(id);
                return Ok(true);
            }
        }

        if let Some(pivot) = self.retrace(id)? {
            self.rebalance(pivot)?;
        }
        Ok(true)
    }

    fn find_insert_pos(&self, key: &K) -> InsertPos {
        let mut current = match self.root {
            None => return InsertPos::Root,
            Some(root) => root,
        };
        loop {
            let node = self.node_at(current);
            let side = if self.compare.less_than(key, &node.key) {
                Side::Left
            } else if self.compare.less_than(&node.key, key) {
                Side::Right
            } else {
                return InsertPos::Occupied(current);
            };
            match node.child(side) {
                None => return InsertPos::Child(current, side),
                Some(child) => current = child,
            }
        }
    }

    /// Walks up from a freshly attached leaf, adjusting balance factors.
    ///
    /// Stops at the first ancestor whose balance becomes 0 (its height is
    /// unchanged) or ±2 (returned for rebalancing), or past the root.
    fn retrace(&mut self, leaf: NodeId) -> Result<Option<NodeId>, Inconsistency> {
        let mut child = leaf;
        while let Some(ancestor) = self.node_at(child).parent {
            let side = self.child_side(ancestor, child)?;
            let node = self.node_at_mut(ancestor);
            node.balance += side.weight();
            match node.balance {
                0 => return Ok(None),
                -1 | 1 => child = ancestor,
                -2 | 2 => {
                    debug!("node {ancestor} out of balance ({})", node.balance);
                    return Ok(Some(ancestor));
                }
                balance => {
                    return Err(Inconsistency::BalanceOutOfRange {
                        node: ancestor,
                        balance,
                    })
                }
            }
        }
        Ok(None)
    }
}
