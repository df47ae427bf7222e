//! An ordered map backed by an AVL tree.
//!
//! Nodes live in an arena owned by the tree and are linked through
//! [`NodeId`] handles, with a parent link and a balance factor on every node.
//! Insertion retraces balance factors upward in a single pass and restores
//! the height-balance condition with at most one single or double rotation.
//!
//! [`verify()`] re-derives every structural invariant from the raw shape of a
//! tree and is the reference for what a valid tree looks like.

mod compare;
mod error;
mod insert;
mod iter;
mod node;
mod rotate;
mod tree;
pub mod verify;

pub use compare::{Comparator, NaturalOrder};
pub use error::{Inconsistency, Violation};
pub use iter::{Iter, Keys, Values};
pub use node::{NodeId, NodeRef, Side};
pub use tree::AvlTree;
pub use verify::verify;

#[cfg(test)]
mod tests;
