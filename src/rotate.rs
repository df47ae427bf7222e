use log::{debug, trace};

use crate::compare::Comparator;
use crate::error::Inconsistency;
use crate::node::{Link, NodeId, Side};
use crate::tree::AvlTree;

impl<K, V, C> AvlTree<K, V, C>
where
    C: Comparator<K>,
{
    /// Restores the AVL condition at a node whose balance factor is ±2.
    ///
    /// A single rotation is used when the heavy child leans the same way as
    /// the node, a double rotation when it leans the other way. Either way
    /// the subtree regains the height it had before the insertion.
    pub(crate) fn rebalance(&mut self, node: NodeId) -> Result<(), Inconsistency> {
        let side = match self.node_at(node).balance {
            -2 => Side::Left,
            2 => Side::Right,
            balance => return Err(Inconsistency::BalanceOutOfRange { node, balance }),
        };

        let heavy = self.child_of(node, side)?;
        let lean = self.node_at(heavy).balance;
        if lean == side.weight() {
            debug!("single rotation at {node}, promoting {side} child {heavy}");
            self.rotate_single(node, side)
        } else if lean == side.opposite().weight() {
            debug!("double rotation at {node} through {side} child {heavy}");
            self.rotate_double(node, side)
        } else {
            Err(Inconsistency::PivotBalance {
                node: heavy,
                balance: lean,
            })
        }
    }

    /// Promotes the `side` child `q` of `p` into `p`'s position.
    fn rotate_single(&mut self, p: NodeId, side: Side) -> Result<(), Inconsistency> {
        let opposite = side.opposite();
        let q = self.child_of(p, side)?;
        let parent = self.node_at(p).parent;

        let inner = self.node_at(q).child(opposite);
        self.set_child(p, side, inner);
        self.replace_subtree(parent, p, q)?;
        self.set_child(q, opposite, Some(p));

        self.node_at_mut(p).balance = 0;
        self.node_at_mut(q).balance = 0;
        trace!("rotated {q} above {p}");
        Ok(())
    }

    /// Promotes the grandchild `r`, the `opposite` child of `p`'s `side`
    /// child `q`, into `p`'s position with `q` and `p` as its children.
    fn rotate_double(&mut self, p: NodeId, side: Side) -> Result<(), Inconsistency> {
        let opposite = side.opposite();
        let q = self.child_of(p, side)?;
        let r = self.child_of(q, opposite)?;
        let parent = self.node_at(p).parent;

        // Balances of r's new left and right children.
        let (left_balance, right_balance) = match self.node_at(r).balance {
            0 => (0, 0),
            -1 => (0, 1),
            1 => (-1, 0),
            balance => return Err(Inconsistency::BalanceOutOfRange { node: r, balance }),
        };

        self.replace_subtree(parent, p, r)?;
        let r_inner = self.node_at(r).child(opposite);
        let r_outer = self.node_at(r).child(side);
        self.set_child(p, side, r_inner);
        self.set_child(q, opposite, r_outer);
        self.set_child(r, side, Some(q));
        self.set_child(r, opposite, Some(p));

        let (left, right) = match side {
            Side::Left => (q, p),
            Side::Right => (p, q),
        };
        self.node_at_mut(left).balance = left_balance;
        self.node_at_mut(right).balance = right_balance;
        self.node_at_mut(r).balance = 0;
        trace!("rotated {r} above {left} and {right}");
        Ok(())
    }

    /// Puts `new` where `old` hangs below `parent`, or makes it the root.
    fn replace_subtree(
        &mut self,
        parent: Link,
        old: NodeId,
        new: NodeId,
    ) -> Result<(), Inconsistency> {
        match parent {
            None => {
                self.root = Some(new);
                self.node_at_mut(new).parent = None;
            }
            Some(parent) => {
                let side = self.child_side(parent, old)?;
                self.set_child(parent, side, Some(new));
            }
        }
        Ok(())
    }
}
