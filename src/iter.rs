use std::iter::FusedIterator;

use crate::node::{Link, Node};

#[allow(clippy::enum_variant_names)]
#[derive(Clone, Copy)]
enum Direction {
    FromParent,
    FromLeft,
    FromRight,
}

/// An in-order iterator over the entries of a tree.
///
/// Walks the tree through child and parent links without an auxiliary stack.
pub struct Iter<'a, K, V> {
    nodes: &'a [Node<K, V>],
    current: Link,
    dir: Direction,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(nodes: &'a [Node<K, V>], root: Link, len: usize) -> Self {
        Self {
            nodes,
            current: root,
            dir: Direction::FromParent,
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        while let Some(id) = self.current {
            let node = &nodes[id.index()];
            match self.dir {
                Direction::FromParent => {
                    if let Some(left) = node.left() {
                        self.current = Some(left);
                    } else {
                        self.dir = Direction::FromLeft;
                    }
                }
                Direction::FromLeft => {
                    if let Some(right) = node.right() {
                        self.current = Some(right);
                        self.dir = Direction::FromParent;
                    } else {
                        self.dir = Direction::FromRight;
                    }
                    self.remaining -= 1;
                    return Some((&node.key, &node.value));
                }
                Direction::FromRight => {
                    if let Some(parent) = node.parent {
                        if Some(id) == nodes[parent.index()].left() {
                            self.dir = Direction::FromLeft;
                        } else {
                            self.dir = Direction::FromRight;
                        }
                    }
                    self.current = node.parent;
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

/// An in-order iterator over the keys of a tree.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// An in-order iterator over the values of a tree.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
