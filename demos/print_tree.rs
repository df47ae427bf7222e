use std::env;

use avltree::{AvlTree, NodeRef};

fn print_subtree(node: NodeRef<'_, i32, i32>, prefix: &str, is_last: bool) {
    let branch = if node.is_root() {
        ""
    } else if is_last {
        "└── "
    } else {
        "├── "
    };
    println!("{prefix}{branch}{} (b: {})", node.key(), node.balance());

    let child_prefix = if node.is_root() {
        String::new()
    } else if is_last {
        format!("{prefix}    ")
    } else {
        format!("{prefix}│   ")
    };
    let children: Vec<_> = [node.right(), node.left()].into_iter().flatten().collect();
    for (i, child) in children.iter().enumerate() {
        print_subtree(*child, &child_prefix, i + 1 == children.len());
    }
}

fn main() {
    let keys: Vec<i32> = env::args().skip(1).filter_map(|arg| arg.parse().ok()).collect();
    let keys = if keys.is_empty() { (1..=10).collect() } else { keys };

    let mut tree = AvlTree::new();
    for key in keys {
        if !tree.insert(key, key) {
            println!("{key} already inserted in tree.");
        }
    }

    println!("size: {}, height: {}", tree.size(), tree.height());
    if let Some(root) = tree.root() {
        print_subtree(root, "", true);
    }

    println!("Level-order traversal:");
    tree.traverse_level_order(|node| {
        print!("{} ", node.key());
    });
    println!();
}
