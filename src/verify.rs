//! Independent structural checker.
//!
//! Re-derives heights, balance factors, key ordering and parent links from
//! the raw shape of a tree, using only its read-only node views. A tree that
//! passes [`verify()`] is a valid AVL tree.

use std::cmp;
use std::fmt::Debug;

use crate::compare::Comparator;
use crate::error::Violation;
use crate::node::{NodeRef, Side};
use crate::tree::AvlTree;

/// Checks every AVL invariant of `tree`, returning the first one found broken.
pub fn verify<K, V, C>(tree: &AvlTree<K, V, C>) -> Result<(), Violation>
where
    K: Debug,
    C: Comparator<K>,
{
    let mut checker = Checker {
        compare: tree.comparator(),
        size: tree.size(),
        counted: 0,
    };
    let mut computed = 0;
    if let Some(root) = tree.root() {
        if root.parent().is_some() {
            return Err(Violation::RootHasParent {
                key: format!("{:?}", root.key()),
            });
        }
        computed = checker.check(root, None, None)?;
    }

    if checker.counted != checker.size {
        return Err(checker.size_mismatch());
    }
    check_height(tree.height(), computed)
}

fn check_height(height: usize, computed: usize) -> Result<(), Violation> {
    if height != computed {
        return Err(Violation::HeightMismatch { height, computed });
    }
    Ok(())
}

struct Checker<'c, C> {
    compare: &'c C,
    size: usize,
    counted: usize,
}

impl<C> Checker<'_, C> {
    fn size_mismatch(&self) -> Violation {
        Violation::SizeMismatch {
            size: self.size,
            counted: self.counted,
        }
    }

    /// Checks the subtree at `node`, whose keys must lie strictly between
    /// `min` and `max`. Returns the subtree height.
    fn check<K, V>(
        &mut self,
        node: NodeRef<'_, K, V>,
        min: Option<&K>,
        max: Option<&K>,
    ) -> Result<usize, Violation>
    where
        K: Debug,
        C: Comparator<K>,
    {
        self.counted += 1;
        if self.counted > self.size {
            // More nodes than the tree knows about, possibly a cycle.
            return Err(self.size_mismatch());
        }

        let key = node.key();
        let below_min = min.map_or(false, |min| !self.compare.greater_than(key, min));
        let above_max = max.map_or(false, |max| !self.compare.less_than(key, max));
        if below_min || above_max {
            return Err(Violation::OutOfBounds {
                key: format!("{key:?}"),
            });
        }

        if let Some(left) = node.left() {
            if !self.compare.less_than(left.key(), key) {
                return Err(Violation::LeftNotLess {
                    key: format!("{key:?}"),
                    child: format!("{:?}", left.key()),
                });
            }
        }
        if let Some(right) = node.right() {
            if !self.compare.greater_than(right.key(), key) {
                return Err(Violation::RightNotGreater {
                    key: format!("{key:?}"),
                    child: format!("{:?}", right.key()),
                });
            }
        }

        for side in [Side::Left, Side::Right] {
            if let Some(child) = node.child(side) {
                if child.parent() != Some(node) {
                    return Err(Violation::ParentMismatch {
                        key: format!("{key:?}"),
                        side,
                    });
                }
            }
        }

        let balance = node.balance();
        if !(-1..=1).contains(&balance) {
            return Err(Violation::Unbalanced {
                key: format!("{key:?}"),
                balance,
            });
        }

        let left_height = match node.left() {
            None => 0,
            Some(left) => self.check(left, min, Some(key))?,
        };
        let right_height = match node.right() {
            None => 0,
            Some(right) => self.check(right, Some(key), max)?,
        };

        let actual = right_height as i64 - left_height as i64;
        if actual != i64::from(balance) {
            return Err(Violation::BalanceMismatch {
                key: format!("{key:?}"),
                stored: balance,
                actual,
            });
        }

        Ok(1 + cmp::max(left_height, right_height))
    }
}

#[cfg(any(test, feature = "consistency_check"))]
impl<K, V, C> AvlTree<K, V, C>
where
    K: Debug,
    C: Comparator<K>,
{
    /// Runs [`verify()`] and panics with the violation if the tree is invalid.
    pub fn check_consistency(&self) {
        if let Err(violation) = verify(self) {
            panic!("AVL tree consistency check failed: {violation}");
        }
    }
}
