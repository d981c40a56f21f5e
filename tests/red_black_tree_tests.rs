//! Scenario tests for RedBlackTree.

use rbarena::comparator::{self, ReverseOrder};
use rbarena::prelude::*;
use rstest::{fixture, rstest};

// =============================================================================
// Fixtures
// =============================================================================

#[fixture]
fn seven() -> RedBlackTree<i32, String> {
    [20, 10, 30, 5, 15, 25, 35]
        .into_iter()
        .map(|key| (key, format!("v{key}")))
        .collect()
}

fn assert_valid<K: std::fmt::Debug, V, C: Comparator<K>>(tree: &RedBlackTree<K, V, C>) {
    if let Err(violation) = tree.check_invariants() {
        panic!("invariant violated: {violation}");
    }
}

// =============================================================================
// Basic Balance
// =============================================================================

#[rstest]
fn test_ascending_insert_stays_balanced() {
    let mut tree = RedBlackTree::new();
    for key in 1..=8 {
        tree.insert(key, key);
        assert_valid(&tree);
    }

    let report = tree.check_invariants().unwrap();
    assert_eq!(report.len, 8);
    // ceil(log2(9)) * 2
    assert!(tree.height() <= 8, "height {} too large", tree.height());
    assert_eq!(report.height, tree.height());
}

#[rstest]
#[case::ascending((0..500).collect())]
#[case::descending((0..500).rev().collect())]
#[case::zigzag((0..250).flat_map(|key| [key, 499 - key]).collect())]
fn test_height_bound_holds(#[case] keys: Vec<i32>) {
    let tree: RedBlackTree<i32, ()> = keys.into_iter().map(|key| (key, ())).collect();
    assert_valid(&tree);
    // 2 * log2(501) < 18
    assert!(tree.height() <= 17);
}

// =============================================================================
// Search
// =============================================================================

#[rstest]
fn test_search_on_empty_tree_is_absent() {
    let tree: RedBlackTree<i32, i32> = RedBlackTree::new();
    assert!(tree.search(&42).is_none());
}

#[rstest]
fn test_insert_then_search_round_trip(mut seven: RedBlackTree<i32, String>) {
    seven.insert(17, "seventeen".to_string());
    let node = seven.search(&17).unwrap();
    assert_eq!(node.value(), "seventeen");
    assert_eq!(node.key(), &17);

    assert_eq!(seven.delete(&17), Some((17, "seventeen".to_string())));
    assert!(seven.search(&17).is_none());
    assert_valid(&seven);
}

// =============================================================================
// Delete
// =============================================================================

#[rstest]
fn test_delete_leaf_scenario() {
    let mut tree: RedBlackTree<i32, i32> = [10, 5, 15].into_iter().map(|key| (key, key)).collect();
    assert_eq!(tree.delete(&5), Some((5, 5)));

    let root = tree.root().unwrap();
    assert_eq!(root.key(), &10);
    assert!(root.left().is_none());
    assert_eq!(root.right().unwrap().key(), &15);
    assert_valid(&tree);
}

#[rstest]
fn test_delete_with_two_children_scenario(mut seven: RedBlackTree<i32, String>) {
    assert_eq!(seven.delete(&20), Some((20, "v20".to_string())));

    let root = seven.root().unwrap();
    assert_eq!(root.key(), &25);
    assert_eq!(root.value(), "v25");
    assert_eq!(seven.len(), 6);
    assert_valid(&seven);
}

#[rstest]
fn test_delete_on_empty_tree_is_absent() {
    let mut tree: RedBlackTree<i32, i32> = RedBlackTree::new();
    assert_eq!(tree.delete(&42), None);
    assert!(tree.is_empty());
    assert_valid(&tree);
}

#[rstest]
fn test_delete_everything_in_insertion_order(seven: RedBlackTree<i32, String>) {
    let mut tree = seven;
    for key in [20, 10, 30, 5, 15, 25, 35] {
        assert!(tree.delete(&key).is_some());
        assert_valid(&tree);
    }
    assert!(tree.is_empty());
    assert!(tree.root().is_none());
}

#[rstest]
fn test_interleaved_operations_keep_invariants() {
    let mut tree = RedBlackTree::new();
    for round in 0..20 {
        for key in 0..50 {
            tree.insert((key * 37 + round) % 101, round);
        }
        for key in (0..101).step_by(3) {
            tree.delete(&((key + round) % 101));
        }
        assert_valid(&tree);
    }
}

// =============================================================================
// Size Conservation
// =============================================================================

#[rstest]
fn test_size_conservation() {
    let mut tree = RedBlackTree::new();
    for key in 0..100 {
        tree.insert(key, key);
    }
    assert_eq!(tree.len(), 100);
    for key in (0..100).step_by(4) {
        tree.delete(&key);
    }
    assert_eq!(tree.len(), 75);
    assert_eq!(tree.iter().count(), 75);
}

#[rstest]
fn test_duplicate_insert_does_not_grow(mut seven: RedBlackTree<i32, String>) {
    let previous = seven.insert(10, "ten".to_string());
    assert_eq!(previous, Some("v10".to_string()));
    assert_eq!(seven.len(), 7);
    assert_eq!(seven.get(&10), Some(&"ten".to_string()));
    assert_valid(&seven);
}

// =============================================================================
// Comparators
// =============================================================================

#[rstest]
fn test_reverse_order_traverses_descending() {
    let mut tree = RedBlackTree::with_comparator(ReverseOrder);
    for key in [3, 1, 4, 1, 5, 9, 2, 6] {
        tree.insert(key, ());
    }
    assert_valid(&tree);
    assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![9, 6, 5, 4, 3, 2, 1]);
}

#[rstest]
fn test_closure_comparator_merges_equal_keys() {
    let mut tree = RedBlackTree::with_comparator(comparator::by(|left: &String, right: &String| {
        left.to_lowercase().cmp(&right.to_lowercase())
    }));
    tree.insert("Apple".to_string(), 1);
    tree.insert("banana".to_string(), 2);
    assert_eq!(tree.insert("APPLE".to_string(), 3), Some(1));

    assert_eq!(tree.len(), 2);
    // The first spelling of the key is kept.
    assert_eq!(tree.min(), Some((&"Apple".to_string(), &3)));
    assert_valid(&tree);
}

// =============================================================================
// Traversal and Printing
// =============================================================================

#[rstest]
#[case(TraversalOrder::PreOrder, vec![20, 10, 5, 15, 30, 25, 35])]
#[case(TraversalOrder::InOrder, vec![5, 10, 15, 20, 25, 30, 35])]
#[case(TraversalOrder::PostOrder, vec![5, 15, 10, 25, 35, 30, 20])]
fn test_traversal_orders(
    seven: RedBlackTree<i32, String>,
    #[case] order: TraversalOrder,
    #[case] expected: Vec<i32>,
) {
    let keys: Vec<i32> = seven.traverse(order).map(|(key, _)| *key).collect();
    assert_eq!(keys, expected);
}

#[rstest]
fn test_traversal_is_restartable(seven: RedBlackTree<i32, String>) {
    let first: Vec<&i32> = seven.keys().collect();
    let second: Vec<&i32> = seven.keys().collect();
    assert_eq!(first, second);
}

#[rstest]
fn test_printer_renders_scenario_tree(seven: RedBlackTree<i32, String>) {
    let rendered = TreePrinter::new().render(&seven);
    let expected = "v20\n\
                    ├──v10\n\
                    │  ├──v5\n\
                    │  └──v15\n\
                    └──v30\n   \
                    ├──v25\n   \
                    └──v35";
    assert_eq!(rendered, expected);
}

#[rstest]
fn test_printer_details(seven: RedBlackTree<i32, String>) {
    let printer = TreePrinter::new();
    assert_eq!(printer.details(seven.root().unwrap()), "(10 20:v20 30)");
    assert_eq!(printer.details(seven.search(&5).unwrap()), "<· 5:v5 ·>");
}

// =============================================================================
// Logging
// =============================================================================

#[rstest]
fn test_operations_run_under_a_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("rbarena=trace"))
        .with_test_writer()
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut tree = RedBlackTree::new();
        for key in 0..32 {
            tree.insert(key, key);
        }
        for key in (0..32).step_by(2) {
            tree.delete(&key);
        }
        tree.clear();
        assert!(tree.is_empty());
    });
}
