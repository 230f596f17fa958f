use std::collections::BTreeSet;

use avl_ostree::{AvlTree, Handle};
use proptest::prelude::*;

/// The number of keys to insert in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Generates keys in a range that ensures duplicates.
fn key_strategy() -> impl Strategy<Value = i64> {
    -4_000i64..4_000i64
}

/// Recomputes every node's height and size and checks ordering, balance and
/// parent links through the public API. Returns `(height, size)`.
fn check_subtree(tree: &AvlTree, node: Option<Handle>, lower: Option<i64>, upper: Option<i64>) -> (usize, usize) {
    let Some(node) = node else {
        return (0, 0);
    };
    let key = tree.key(node);
    assert!(lower.is_none_or(|lower| lower < key), "{key} is not above {lower:?}");
    assert!(upper.is_none_or(|upper| key < upper), "{key} is not below {upper:?}");

    for child in [tree.left(node), tree.right(node)].into_iter().flatten() {
        assert_eq!(tree.parent(child), Some(node), "parent link of {}", tree.key(child));
    }

    let (lh, ls) = check_subtree(tree, tree.left(node), lower, Some(key));
    let (rh, rs) = check_subtree(tree, tree.right(node), Some(key), upper);

    assert!(lh.abs_diff(rh) <= 1, "node {key} is unbalanced: {lh} vs {rh}");
    assert_eq!(tree.height(Some(node)), 1 + lh.max(rh), "height of {key}");
    assert_eq!(tree.size(Some(node)), 1 + ls + rs, "size of {key}");
    assert!((-1..=1).contains(&tree.balance(Some(node))));

    (1 + lh.max(rh), 1 + ls + rs)
}

fn check_tree(tree: &AvlTree) {
    if let Some(root) = tree.root() {
        assert_eq!(tree.parent(root), None, "root has a parent");
    }
    let (_, size) = check_subtree(tree, tree.root(), None, None);
    assert_eq!(size, tree.len());
}

// ─── Insertion ───────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays random insertions on both AvlTree and BTreeSet and checks the
    /// structure after every step.
    #[test]
    fn inserts_match_btreeset(keys in proptest::collection::vec(key_strategy(), 0..TEST_SIZE / 4)) {
        let mut tree = AvlTree::new();
        let mut model = BTreeSet::new();

        for &key in &keys {
            let root = tree.insert(key);
            model.insert(key);

            prop_assert_eq!(tree.root(), Some(root));
            prop_assert_eq!(tree.len(), model.len());
            prop_assert!(tree.contains(key));
            check_tree(&tree);
        }

        prop_assert_eq!(tree.iter().collect::<Vec<_>>(), model.iter().copied().collect::<Vec<_>>());
        prop_assert_eq!(tree.first(), model.first().copied());
        prop_assert_eq!(tree.last(), model.last().copied());
    }

    /// A second pass over the same keys changes nothing.
    #[test]
    fn reinserting_is_a_no_op(keys in proptest::collection::vec(key_strategy(), 1..TEST_SIZE)) {
        let mut tree: AvlTree = keys.iter().copied().collect();
        let snapshot = tree.clone();
        let printed = tree.to_string();

        tree.extend(&keys);

        prop_assert_eq!(&tree, &snapshot);
        prop_assert_eq!(tree.to_string(), printed);
        prop_assert_eq!(tree.size(tree.root()), snapshot.len());
    }

    /// `find` agrees with membership in the model.
    #[test]
    fn find_matches_btreeset(keys in proptest::collection::vec(key_strategy(), 0..TEST_SIZE), probes in proptest::collection::vec(key_strategy(), 100)) {
        let tree: AvlTree = keys.iter().copied().collect();
        let model: BTreeSet<i64> = keys.iter().copied().collect();

        for probe in probes {
            let found = tree.find(probe);
            prop_assert_eq!(found.is_some(), model.contains(&probe), "find({})", probe);
            if let Some(node) = found {
                prop_assert_eq!(tree.key(node), probe);
            }
        }
    }
}

// ─── Order statistics ────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn select_matches_sorted_keys(keys in proptest::collection::vec(key_strategy(), 1..TEST_SIZE)) {
        let tree: AvlTree = keys.iter().copied().collect();
        let sorted: Vec<i64> = keys.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();

        for (index, &key) in sorted.iter().enumerate() {
            let node = tree.select(tree.root(), index + 1);
            prop_assert_eq!(node.map(|node| tree.key(node)), Some(key), "select({})", index + 1);
            prop_assert_eq!(tree.get_by_rank(index + 1), Some(key));
        }

        prop_assert!(tree.select(tree.root(), 0).is_none());
        prop_assert!(tree.select(tree.root(), tree.len() + 1).is_none());
        prop_assert!(tree.get_by_rank(usize::MAX).is_none());
    }

    #[test]
    fn rank_counts_smaller_keys(keys in proptest::collection::vec(key_strategy(), 1..TEST_SIZE)) {
        let tree: AvlTree = keys.iter().copied().collect();
        let model: BTreeSet<i64> = keys.iter().copied().collect();

        for &key in &model {
            let expected = 1 + model.range(..key).count();
            prop_assert_eq!(tree.rank_of(key), Some(expected), "rank_of({})", key);
        }
        prop_assert_eq!(tree.rank_of(4_000), None);
    }

    #[test]
    fn rank_inverts_select(keys in proptest::collection::vec(any::<i64>(), 1..TEST_SIZE)) {
        let tree: AvlTree = keys.iter().copied().collect();

        for i in 1..=tree.size(tree.root()) {
            let node = tree.select(tree.root(), i).expect("in-range select");
            prop_assert_eq!(tree.rank(node), i);
        }
    }

    /// Handles kept from earlier inserts still rank correctly after later rotations.
    #[test]
    fn early_handles_rank_after_growth(keys in proptest::collection::vec(key_strategy(), 1..TEST_SIZE)) {
        let mut tree = AvlTree::new();
        let mut handles = Vec::new();
        for &key in &keys {
            tree.insert(key);
            handles.push((key, tree.find(key).expect("just inserted")));
        }

        let model: BTreeSet<i64> = keys.iter().copied().collect();
        for (key, node) in handles {
            prop_assert_eq!(tree.key(node), key);
            prop_assert_eq!(tree.rank(node), 1 + model.range(..key).count());
        }
    }

    #[test]
    fn handles_iterate_in_rank_order(keys in proptest::collection::vec(key_strategy(), 0..TEST_SIZE)) {
        let tree: AvlTree = keys.iter().copied().collect();
        let handles = tree.handles();
        prop_assert_eq!(handles.len(), tree.len());

        for (index, node) in handles.enumerate() {
            prop_assert_eq!(tree.rank(node), index + 1);
        }
    }
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test_log::test]
fn seven_key_scenario() {
    let mut tree = AvlTree::with_root(20);
    for key in [10, 30, 5, 15, 25, 35] {
        tree.insert(key);
    }
    check_tree(&tree);

    assert!(tree.iter().eq([5, 10, 15, 20, 25, 30, 35]));
    assert_eq!(tree.select(tree.root(), 1).map(|n| tree.key(n)), Some(5));
    assert_eq!(tree.select(tree.root(), 7).map(|n| tree.key(n)), Some(35));
    assert_eq!(tree.rank(tree.find(20).unwrap()), 4);
}

#[test_log::test]
fn ascending_chain_is_rotated() {
    let mut tree = AvlTree::new();
    for key in [10, 20, 30, 40, 50] {
        tree.insert(key);
        check_tree(&tree);
    }

    let root = tree.root().unwrap();
    assert_ne!(tree.key(root), 10);
    assert_eq!(tree.height(Some(root)), 3);
}

#[test_log::test]
fn mixed_inserts_stay_balanced() {
    let mut tree = AvlTree::with_root(10);
    for key in [20, 30, 40, 50, 25] {
        tree.insert(key);
    }
    check_tree(&tree);

    // 30 ends up on top after the right-left case triggered by 25.
    assert_eq!(tree.key(tree.root().unwrap()), 30);
    assert!(tree.iter().eq([10, 20, 25, 30, 40, 50]));
}

#[test]
fn threaded_root_convention() {
    let mut tree = AvlTree::new();
    let mut root = None;
    let mut roots = Vec::new();

    for key in (1..=1_000).rev() {
        root = Some(tree.insert_at(root, key));
        roots.push(root);
    }

    check_tree(&tree);
    assert_eq!(root, tree.root());
    assert_eq!(tree.size(root), 1_000);
    // Earlier roots are still nodes of the tree, just not the root anymore.
    for node in roots.into_iter().flatten() {
        assert!(tree.rank(node) >= 1);
    }
}

#[test]
#[should_panic(expected = "is not the root of this tree")]
fn threading_a_stale_root_panics() {
    let mut tree = AvlTree::new();
    let stale = tree.insert(1);
    tree.insert(2);
    tree.insert(3);
    tree.insert_at(Some(stale), 4);
}

#[test]
#[should_panic(expected = "is invalid!")]
fn foreign_handle_panics() {
    let big = AvlTree::from([1, 2, 3, 4, 5]);
    let small = AvlTree::from([1]);
    let foreign = big.find(5).unwrap();
    let _ = small.rank(foreign);
}

#[test]
fn clone_is_an_independent_snapshot() {
    let mut tree = AvlTree::from([1, 2, 3]);
    let node = tree.find(2).unwrap();
    let snapshot = tree.clone();

    tree.extend([4, 5, 6, 7]);

    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.key(node), 2);
    assert_eq!(snapshot.rank(node), 2);
    assert_eq!(tree.rank(node), 2);
    assert_ne!(tree, snapshot);
}

#[test]
fn empty_tree() {
    let tree = AvlTree::default();

    assert!(tree.is_empty());
    assert_eq!(tree.root(), None);
    assert_eq!(tree.height(None), 0);
    assert_eq!(tree.size(None), 0);
    assert_eq!(tree.balance(None), 0);
    assert_eq!(tree.select(None, 1), None);
    assert_eq!(tree.first(), None);
    assert_eq!(tree.last(), None);
    assert_eq!(tree.iter().next(), None);
    assert_eq!(tree.to_string(), "");
    assert_eq!(format!("{tree:?}"), "{}");
}

#[test]
fn clear_then_reuse() {
    let mut tree = AvlTree::with_capacity(8);
    tree.extend([3, 1, 2]);
    tree.clear();

    assert!(tree.is_empty());
    assert_eq!(tree.root(), None);

    tree.insert(9);
    check_tree(&tree);
    assert_eq!(tree.get_by_rank(1), Some(9));
}

#[test]
fn extreme_keys() {
    let tree = AvlTree::from([i64::MAX, i64::MIN, 0, -1, 1]);
    check_tree(&tree);
    assert_eq!(tree.first(), Some(i64::MIN));
    assert_eq!(tree.last(), Some(i64::MAX));
    assert_eq!(tree.rank_of(0), Some(3));
}

#[test]
fn debug_lists_keys_in_order() {
    let tree = AvlTree::from([2, 3, 1]);
    assert_eq!(format!("{tree:?}"), "{1, 2, 3}");
    assert_eq!(format!("{:?}", tree.iter()), "[1, 2, 3]");
}
