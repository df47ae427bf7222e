use thiserror::Error;

use crate::node::{NodeId, Side};

/// A structural defect detected by the insertion or rotation engine.
///
/// These are never expected on a tree that has only been mutated through
/// its public operations. A tree that reported one is poisoned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Inconsistency {
    #[error("balance factor {balance} out of range at node {node}")]
    BalanceOutOfRange { node: NodeId, balance: i8 },
    #[error("pivot node {node} has balance factor {balance}, expected -1 or +1")]
    PivotBalance { node: NodeId, balance: i8 },
    #[error("node {node} has no {side} child to rotate through")]
    MissingChild { node: NodeId, side: Side },
    #[error("node {child} is not a child of its parent {parent}")]
    OrphanChild { parent: NodeId, child: NodeId },
}

/// An invariant the verifier found broken, with the key where it failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Violation {
    #[error("root {key} has a parent link")]
    RootHasParent { key: String },
    #[error("key {key} lies outside the bounds of its subtree")]
    OutOfBounds { key: String },
    #[error("left child {child} of {key} is not smaller")]
    LeftNotLess { key: String, child: String },
    #[error("right child {child} of {key} is not greater")]
    RightNotGreater { key: String, child: String },
    #[error("{side} child of {key} does not point back to it")]
    ParentMismatch { key: String, side: Side },
    #[error("node {key} is unbalanced with balance factor {balance}")]
    Unbalanced { key: String, balance: i8 },
    #[error("node {key} stores balance {stored}, actual balance is {actual}")]
    BalanceMismatch { key: String, stored: i8, actual: i64 },
    #[error("tree reports {size} nodes, {counted} are reachable")]
    SizeMismatch { size: usize, counted: usize },
    #[error("tree reports height {height}, computed height is {computed}")]
    HeightMismatch { height: usize, computed: usize },
}
