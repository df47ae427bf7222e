use std::cmp::Ordering;

/// A strict weak ordering over keys.
///
/// Only `less_than` is required; equality and "greater than" are derived
/// from it. The tree relies on the ordering being consistent for every key
/// it ever stores.
pub trait Comparator<K: ?Sized> {
    fn less_than(&self, a: &K, b: &K) -> bool;

    fn equal(&self, a: &K, b: &K) -> bool {
        !self.less_than(a, b) && !self.less_than(b, a)
    }

    fn greater_than(&self, a: &K, b: &K) -> bool {
        !self.equal(a, b) && !self.less_than(a, b)
    }

    fn compare(&self, a: &K, b: &K) -> Ordering {
        if self.less_than(a, b) {
            Ordering::Less
        } else if self.less_than(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// Orders keys by their `Ord` implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    fn less_than(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    fn less_than(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}
