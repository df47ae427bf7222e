use std::collections::BTreeMap;

use proptest::prelude::*;

use super::{verify, AvlTree, NodeRef};

const N: i32 = 1_000;
const RANDOM_N: usize = 10_000;

fn keys_of<K: Copy, V, C: super::Comparator<K>>(tree: &AvlTree<K, V, C>) -> Vec<K> {
    tree.keys().copied().collect()
}

/// Upper bound on the height of an AVL tree with `n` nodes.
fn avl_height_bound(n: usize) -> f64 {
    1.4405 * ((n + 2) as f64).log2() - 0.3277
}

fn assert_node(node: NodeRef<'_, i32, i32>, key: i32, balance: i8) {
    assert_eq!(*node.key(), key);
    assert_eq!(node.balance(), balance);
}

#[test]
fn test_new() {
    let tree_i32 = AvlTree::<i32, ()>::new();
    assert!(tree_i32.is_empty());
    assert_eq!(tree_i32.size(), 0);
    assert_eq!(tree_i32.height(), 0);
    assert!(tree_i32.root().is_none());
    assert!(tree_i32.find(&42).is_none());
    tree_i32.check_consistency();

    let tree_string = AvlTree::<String, String>::new();
    assert!(tree_string.is_empty());
    tree_string.check_consistency();
}

#[test]
fn test_small_shapes() {
    let mut tree = AvlTree::new();
    tree.insert(1, 10);
    tree.check_consistency();
    assert_eq!(tree.height(), 1);
    assert_node(tree.root().unwrap(), 1, 0);

    tree.insert(2, 20);
    tree.check_consistency();
    assert_eq!(tree.height(), 2);
    let root = tree.root().unwrap();
    assert_node(root, 1, 1);
    assert!(root.left().is_none());
    let right = root.right().unwrap();
    assert_node(right, 2, 0);
    assert_eq!(right.parent(), Some(root));
    assert_eq!(*right.value(), 20);
}

#[test]
fn test_rebalance() {
    {
        // 1 ->    2
        //  \     / \
        //   2   1   3
        //    \
        //     3
        let mut tree = AvlTree::new();
        for key in [1, 2, 3] {
            tree.insert(key, key);
            tree.check_consistency();
        }
        let root = tree.root().unwrap();
        assert_node(root, 2, 0);
        assert!(root.is_root());
        assert_node(root.left().unwrap(), 1, 0);
        assert_node(root.right().unwrap(), 3, 0);
        assert_eq!(tree.height(), 2);
    }
    {
        //     3 ->   2
        //    /      / \
        //   2      1   3
        //  /
        // 1
        let mut tree = AvlTree::new();
        for key in [3, 2, 1] {
            tree.insert(key, key);
            tree.check_consistency();
        }
        let root = tree.root().unwrap();
        assert_node(root, 2, 0);
        assert_node(root.left().unwrap(), 1, 0);
        assert_node(root.right().unwrap(), 3, 0);
        assert_eq!(tree.height(), 2);
    }
    {
        //   3  ->   2
        //  /       / \
        // 1       1   3
        //  \
        //   2
        let mut tree = AvlTree::new();
        for key in [3, 1, 2] {
            tree.insert(key, key);
            tree.check_consistency();
        }
        let root = tree.root().unwrap();
        assert_node(root, 2, 0);
        assert_node(root.left().unwrap(), 1, 0);
        assert_node(root.right().unwrap(), 3, 0);
        assert_eq!(root.left().unwrap().parent(), Some(root));
        assert_eq!(root.right().unwrap().parent(), Some(root));
        assert_eq!(tree.height(), 2);
    }
    {
        // 1   ->  2
        //  \     / \
        //   3   1   3
        //  /
        // 2
        let mut tree = AvlTree::new();
        for key in [1, 3, 2] {
            tree.insert(key, key);
            tree.check_consistency();
        }
        let root = tree.root().unwrap();
        assert_node(root, 2, 0);
        assert_node(root.left().unwrap(), 1, 0);
        assert_node(root.right().unwrap(), 3, 0);
        assert_eq!(tree.height(), 2);
    }
    {
        //   1     ->   1
        //  / \        / \
        // 0   2      0   3
        //      \        / \
        //       3      2   4
        //        \
        //         4
        let mut tree = AvlTree::new();
        for key in [1, 0, 2, 3, 4] {
            tree.insert(key, key);
            tree.check_consistency();
        }
        assert_eq!(tree.height(), 3);
        assert_node(tree.root().unwrap(), 1, 1);
    }
}

#[test]
fn test_every_permutation_of_four() {
    fn permutations(keys: &mut Vec<i32>, k: usize, out: &mut Vec<Vec<i32>>) {
        if k == keys.len() {
            out.push(keys.clone());
            return;
        }
        for i in k..keys.len() {
            keys.swap(k, i);
            permutations(keys, k + 1, out);
            keys.swap(k, i);
        }
    }

    let mut all = Vec::new();
    permutations(&mut vec![0, 1, 2, 3], 0, &mut all);
    assert_eq!(all.len(), 24);
    for keys in all {
        let mut tree = AvlTree::new();
        for &key in &keys {
            assert!(tree.insert(key, ()));
            tree.check_consistency();
        }
        assert_eq!(tree.height(), 3);
        assert_eq!(keys_of(&tree), vec![0, 1, 2, 3]);
    }
}

#[test]
fn test_insert_rejects_duplicates() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();
    values.sort();
    values.dedup();

    let mut tree = AvlTree::new();
    for value in &values {
        assert!(tree.insert(*value, *value));
        tree.check_consistency();
    }
    assert_eq!(tree.size(), values.len());

    for value in &values {
        assert!(!tree.insert(*value, value.wrapping_add(1)));
    }
    assert_eq!(tree.size(), values.len());
    tree.check_consistency();

    // The first inserted value is kept.
    for value in &values {
        assert_eq!(tree.find(value), Some(value));
    }
}

#[test]
fn test_insert_sorted_range() {
    let mut tree = AvlTree::new();
    for value in 0..N {
        assert!(tree.insert(value, value));
        tree.check_consistency();
    }
    assert_eq!(tree.size(), N as usize);
    assert!((tree.height() as f64) < avl_height_bound(N as usize));
    assert!(tree.find(&-42).is_none());

    let mut tree = AvlTree::new();
    for value in (0..N).rev() {
        assert!(tree.insert(value, value));
    }
    tree.check_consistency();
    assert!((tree.height() as f64) < avl_height_bound(N as usize));
}

#[test]
fn test_insert_shuffled_range() {
    use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

    let mut values: Vec<i32> = (0..N).collect();
    let mut rng = StdRng::seed_from_u64(0);
    values.shuffle(&mut rng);

    let mut tree = AvlTree::new();
    for value in &values {
        assert!(tree.insert(*value, "foo"));
        tree.check_consistency();
    }
    assert_eq!(tree.size(), values.len());

    for value in &values {
        assert!(!tree.insert(*value, "bar"));
    }
    assert_eq!(tree.size(), values.len());
    assert_eq!(tree.find(&0), Some(&"foo"));
    assert!(tree.find(&-42).is_none());
}

#[test]
fn test_random_inserts_checked() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut tree = AvlTree::new();
    let mut collisions = 0;
    while tree.size() < RANDOM_N {
        let key: i64 = rng.gen();
        if tree.find(&key).is_some() {
            collisions += 1;
            continue;
        }
        let size = tree.size();
        assert!(tree.insert(key, key));
        assert_eq!(tree.size(), size + 1);
        assert_eq!(verify(&tree), Ok(()));
    }
    assert_eq!(tree.size(), RANDOM_N);
    assert!(collisions < RANDOM_N);
    assert!((tree.height() as f64) < avl_height_bound(RANDOM_N));
}

#[test]
fn test_find() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();

    let mut tree = AvlTree::new();
    assert!(tree.find(&42).is_none());
    for value in &values {
        tree.insert(*value, value.wrapping_add(1));
    }

    for value in &values {
        assert_eq!(tree.find(value), Some(&value.wrapping_add(1)));
        assert_eq!(
            tree.find_key_value(value),
            Some((value, &value.wrapping_add(1)))
        );
        assert!(tree.contains_key(value));
    }
}

#[test]
fn test_clear() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();
    values.sort();
    values.dedup();

    let mut tree = AvlTree::new();
    for value in &values {
        tree.insert(*value, String::from("foo"));
    }
    assert!(!tree.is_empty());
    assert_eq!(tree.len(), values.len());

    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.height(), 0);
    tree.check_consistency();

    for value in &values {
        assert!(tree.insert(*value, String::from("bar")));
    }
    assert_eq!(tree.len(), values.len());
    tree.check_consistency();
}

#[test]
fn test_iter() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();

    let mut tree = AvlTree::new();
    for value in &values {
        tree.insert(*value, value.wrapping_add(42));
    }

    values.sort();
    values.dedup();

    let mut tree_iter = tree.iter();
    assert_eq!(tree_iter.len(), values.len());
    for value in &values {
        let (&key, &mapped) = tree_iter.next().unwrap();
        assert_eq!(key, *value);
        assert_eq!(mapped, value.wrapping_add(42));
    }
    assert!(tree_iter.next().is_none());
    assert!(tree_iter.next().is_none());

    let mut value_iter = values.iter();
    for (&key, _) in &tree {
        assert_eq!(Some(&key), value_iter.next());
    }
    assert!(value_iter.next().is_none());

    let keys = keys_of(&tree);
    assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
    let mapped: Vec<i32> = tree.values().copied().collect();
    assert_eq!(mapped.len(), keys.len());
}

#[test]
fn test_custom_comparator() {
    let mut tree = AvlTree::with_comparator(|a: &i32, b: &i32| a > b);
    for value in 0..100 {
        assert!(tree.insert(value, ()));
        tree.check_consistency();
    }
    assert!(!tree.insert(50, ()));
    assert!(tree.contains_key(&50));
    assert!(!tree.contains_key(&100));

    let keys = keys_of(&tree);
    let expected: Vec<i32> = (0..100).rev().collect();
    assert_eq!(keys, expected);
}

#[test]
fn test_comparator_equivalence() {
    // Keys equal under the comparator are duplicates even if they differ.
    let by_lowercase = |a: &String, b: &String| a.to_lowercase() < b.to_lowercase();
    let mut tree = AvlTree::with_comparator(by_lowercase);
    assert!(tree.insert("Apple".to_string(), 1));
    assert!(tree.insert("banana".to_string(), 2));
    assert!(!tree.insert("APPLE".to_string(), 3));
    assert_eq!(tree.find(&"apple".to_string()), Some(&1));
    assert_eq!(tree.size(), 2);
    tree.check_consistency();
}

#[test]
fn test_traverse_level_order() {
    let tree: AvlTree<i32, i32> = (1..=7).map(|key| (key, key * 10)).collect();
    let mut levels = Vec::new();
    tree.traverse_level_order(|node| levels.push(*node.key()));
    assert_eq!(levels, vec![4, 2, 6, 1, 3, 5, 7]);

    let mut ids = Vec::new();
    tree.traverse_level_order(|node| ids.push(node.id()));
    for id in ids {
        let node = tree.node(id).unwrap();
        assert_eq!(*node.value(), *node.key() * 10);
    }
}

#[test]
fn test_extend_and_debug() {
    let mut tree = AvlTree::new();
    tree.extend([(2, "b"), (1, "a"), (3, "c"), (1, "z")]);
    assert_eq!(tree.size(), 3);
    assert_eq!(format!("{tree:?}"), r#"{1: "a", 2: "b", 3: "c"}"#);

    let copy = tree.clone();
    tree.insert(4, "d");
    assert_eq!(copy.size(), 3);
    copy.check_consistency();
    tree.check_consistency();
}

#[test]
fn test_poisoned_after_inconsistency() {
    use std::panic::{self, AssertUnwindSafe};

    let mut tree = AvlTree::new();
    for key in [2, 1, 3] {
        tree.insert(key, ());
    }
    // Make node 3 claim a right-leaning subtree it does not have.
    let three = tree.find_node(&3).unwrap();
    tree.node_at_mut(three).balance = 1;

    let result = panic::catch_unwind(AssertUnwindSafe(|| tree.insert(4, ())));
    assert!(result.is_err());
    assert!(tree.is_poisoned());

    // Lookups still work for inspection, insertions do not.
    assert!(tree.contains_key(&2));
    let result = panic::catch_unwind(AssertUnwindSafe(|| tree.insert(5, ())));
    assert!(result.is_err());

    tree.clear();
    assert!(!tree.is_poisoned());
    assert!(tree.insert(5, ()));
}

#[test]
#[ignore]
fn test_insert_large() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut tree = AvlTree::new();
    for value in (0..10_000_000).map(|_| rng.gen::<i32>()) {
        tree.insert(value, ());
    }
    tree.check_consistency();
}

proptest! {
    #[test]
    fn prop_matches_btree_model(keys in prop::collection::vec(0u16..512, 0..300)) {
        let mut tree = AvlTree::new();
        let mut model = BTreeMap::new();
        for (i, key) in keys.into_iter().enumerate() {
            let fresh = !model.contains_key(&key);
            if fresh {
                model.insert(key, i);
            }
            prop_assert_eq!(tree.insert(key, i), fresh);
            prop_assert_eq!(verify(&tree), Ok(()));
        }

        prop_assert_eq!(tree.size(), model.len());
        let entries: Vec<(u16, usize)> = tree.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<(u16, usize)> = model.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(entries, expected);
        prop_assert!((tree.height() as f64) < avl_height_bound(tree.size()));
        for (key, value) in &model {
            prop_assert_eq!(tree.find(key), Some(value));
        }
    }
}
