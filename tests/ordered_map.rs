use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rbtree_map::{OrderedMap, TreeError};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

fn key_strategy() -> impl Strategy<Value = i32> {
    // Narrower than TEST_SIZE so inserts collide and removes hit.
    -500i32..500i32
}

fn keys_of<'a, K: Copy + 'a, V: 'a>(entries: impl Iterator<Item = (&'a K, &'a V)>) -> Vec<K> {
    entries.map(|(key, _)| *key).collect()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i32, i64),
    Remove(i32),
    Get(i32),
    ContainsKey(i32),
    Successor(i32),
    Predecessor(i32),
    Min,
    Max,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), any::<i64>()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
        1 => key_strategy().prop_map(MapOp::Successor),
        1 => key_strategy().prop_map(MapOp::Predecessor),
        1 => Just(MapOp::Min),
        1 => Just(MapOp::Max),
    ]
}

fn expected_successor(model: &BTreeMap<i32, i64>, key: i32) -> Result<&i32, TreeError> {
    if !model.contains_key(&key) {
        return Err(TreeError::KeyNotFound);
    }
    model.range(key + 1..).next().map(|(k, _)| k).ok_or(TreeError::NoSuccessor)
}

fn expected_predecessor(model: &BTreeMap<i32, i64>, key: i32) -> Result<&i32, TreeError> {
    if !model.contains_key(&key) {
        return Err(TreeError::KeyNotFound);
    }
    model.range(..key).next_back().map(|(k, _)| k).ok_or(TreeError::NoPredecessor)
}

// ─── Model-based operations ──────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Replays a random operation sequence on both maps and compares every result.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut map: OrderedMap<i32, i64> = OrderedMap::new();
        let mut model: BTreeMap<i32, i64> = BTreeMap::new();

        for op in &ops {
            match *op {
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(map.insert(k, v), model.insert(k, v), "insert({}, {})", k, v);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(map.remove(&k), model.remove(&k).is_some(), "remove({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(map.get(&k), model.get(&k), "get({})", k);
                }
                MapOp::ContainsKey(k) => {
                    prop_assert_eq!(map.contains_key(&k), model.contains_key(&k), "contains_key({})", k);
                }
                MapOp::Successor(k) => {
                    prop_assert_eq!(map.successor(&k), expected_successor(&model, k), "successor({})", k);
                }
                MapOp::Predecessor(k) => {
                    prop_assert_eq!(map.predecessor(&k), expected_predecessor(&model, k), "predecessor({})", k);
                }
                MapOp::Min => {
                    prop_assert_eq!(map.min_key(), model.keys().next().ok_or(TreeError::EmptyTree));
                }
                MapOp::Max => {
                    prop_assert_eq!(map.max_key(), model.keys().next_back().ok_or(TreeError::EmptyTree));
                }
            }
            prop_assert_eq!(map.len(), model.len(), "len mismatch after {:?}", op);
        }

        prop_assert!(map.iter().eq(model.iter()));
    }

    /// Every traversal visits each entry exactly once.
    #[test]
    fn traversals_visit_every_entry(keys in proptest::collection::vec(key_strategy(), 0..300)) {
        let map: OrderedMap<i32, ()> = keys.iter().map(|&key| (key, ())).collect();
        let mut expected: Vec<i32> = keys.clone();
        expected.sort_unstable();
        expected.dedup();

        let inorder = keys_of(map.inorder());
        prop_assert_eq!(&inorder, &expected);
        prop_assert!(inorder.windows(2).all(|pair| pair[0] < pair[1]));

        for mut visited in [keys_of(map.preorder()), keys_of(map.postorder()), keys_of(map.level_order())] {
            prop_assert_eq!(visited.len(), map.len());
            visited.sort_unstable();
            prop_assert_eq!(&visited, &expected);
        }
    }

    /// Inserting a fresh key and removing it again leaves the same entries behind.
    #[test]
    fn insert_then_remove_round_trips(
        keys in proptest::collection::vec(key_strategy(), 0..200),
        probe in 1_000i32..2_000i32,
    ) {
        let mut map: OrderedMap<i32, i32> = keys.iter().map(|&key| (key, key)).collect();
        let before = map.clone();

        map.insert(probe, probe);
        prop_assert!(map.remove(&probe));
        prop_assert_eq!(&map, &before);
    }

    /// Re-inserting the pre-order sequence into a fresh map rebuilds the same shape.
    #[test]
    fn preorder_rebuilds_the_tree(keys in proptest::collection::vec(key_strategy(), 0..200)) {
        let map: OrderedMap<i32, ()> = keys.iter().map(|&key| (key, ())).collect();
        let rebuilt: OrderedMap<i32, ()> = map.preorder().map(|(&key, &())| (key, ())).collect();

        prop_assert_eq!(keys_of(rebuilt.preorder()), keys_of(map.preorder()));
        prop_assert_eq!(rebuilt.height(), map.height());
    }
}

// ─── Concrete scenarios ──────────────────────────────────────────────────────

fn scenario_map() -> OrderedMap<i32, &'static str> {
    OrderedMap::from([
        (50, "fifty"),
        (30, "thirty"),
        (70, "seventy"),
        (20, "twenty"),
        (40, "forty"),
        (60, "sixty"),
        (80, "eighty"),
    ])
}

#[test]
fn balanced_insert_order_sorts_keys() {
    let map = scenario_map();
    assert_eq!(keys_of(map.inorder()), [20, 30, 40, 50, 60, 70, 80]);
    assert_eq!(keys_of(map.preorder()), [50, 30, 20, 40, 70, 60, 80]);
    assert_eq!(keys_of(map.postorder()), [20, 40, 30, 60, 80, 70, 50]);
    assert_eq!(keys_of(map.level_order()), [50, 30, 70, 20, 40, 60, 80]);
    assert_eq!(map.len(), 7);
    assert_eq!(map.height(), Some(2));
}

#[test]
fn removing_root_with_two_children() {
    let mut map = scenario_map();
    assert!(map.remove(&50));
    assert!(!map.contains_key(&50));
    assert_eq!(map.len(), 6);
    assert_eq!(keys_of(map.inorder()), [20, 30, 40, 60, 70, 80]);
    // The successor took the root's place.
    assert_eq!(map.level_order().next(), Some((&60, &"sixty")));
}

#[test]
fn removing_leaf_and_single_child_nodes() {
    let mut map = scenario_map();
    assert_eq!(map.remove_entry(&20), Some((20, "twenty")));
    // 30 now has only its right child.
    assert_eq!(map.remove_entry(&30), Some((30, "thirty")));
    assert_eq!(keys_of(map.level_order()), [50, 40, 70, 60, 80]);
    assert!(!map.remove(&30));
    assert_eq!(map.len(), 5);
}

#[test]
fn ascending_inserts_degenerate_into_a_chain() {
    let mut map = OrderedMap::new();
    for key in 1..=5 {
        map.insert(key, ());
    }
    assert_eq!(map.height(), Some(4));
    assert_eq!(keys_of(map.preorder()), [1, 2, 3, 4, 5]);
}

#[test]
fn deep_chain_does_not_overflow() {
    let mut map = OrderedMap::with_capacity(10_000);
    for key in 0..10_000u32 {
        map.insert(key, ());
    }
    assert_eq!(map.height(), Some(9_999));
    assert_eq!(map.postorder().count(), 10_000);
    assert_eq!(map.level_order().last(), Some((&9_999, &())));
    let copy = map.clone();
    assert_eq!(copy.max_key(), Ok(&9_999));
    drop(copy);
    map.clear();
    assert!(map.is_empty());
}

#[test]
fn empty_map_queries() {
    let map: OrderedMap<i32, i32> = OrderedMap::new();
    assert_eq!(map.min_key(), Err(TreeError::EmptyTree));
    assert_eq!(map.max_key(), Err(TreeError::EmptyTree));
    assert!(!map.contains_key(&42));
    assert_eq!(map.inorder().next(), None);
    assert_eq!(map.height(), None);
    assert_eq!(map.successor(&42), Err(TreeError::KeyNotFound));
}

#[test]
fn successor_and_predecessor_queries() {
    let map: OrderedMap<i32, ()> = [20, 30, 40, 50, 60, 70, 80].into_iter().map(|key| (key, ())).collect();
    assert_eq!(map.successor(&50), Ok(&60));
    assert_eq!(map.predecessor(&50), Ok(&40));
    assert_eq!(map.successor(&80), Err(TreeError::NoSuccessor));
    assert_eq!(map.predecessor(&20), Err(TreeError::NoPredecessor));
    assert_eq!(map.successor(&55), Err(TreeError::KeyNotFound));
}

#[test]
fn reinsert_replaces_value_in_place() {
    let mut map = scenario_map();
    let shape = keys_of(map.level_order());
    assert_eq!(map.insert(40, "FORTY"), Some("forty"));
    assert_eq!(map.len(), 7);
    assert!(map.contains_key(&40));
    assert_eq!(map[&40], "FORTY");
    assert_eq!(keys_of(map.level_order()), shape);
}

#[test]
fn removing_absent_key_changes_nothing() {
    let mut map = scenario_map();
    let before = map.clone();
    assert!(!map.remove(&55));
    assert_eq!(map, before);
    assert_eq!(keys_of(map.preorder()), keys_of(before.preorder()));
}

#[test]
fn borrowed_key_lookups() {
    let mut map = OrderedMap::new();
    map.insert(String::from("pear"), 3);
    map.insert(String::from("apple"), 5);
    assert_eq!(map.get("apple"), Some(&5));
    *map.get_mut("pear").unwrap() += 1;
    assert_eq!(map.get_key_value("pear"), Some((&String::from("pear"), &4)));
    assert_eq!(map.min_key().map(String::as_str), Ok("apple"));
    assert!(map.remove("apple"));
}

#[test]
fn traversals_restart_and_clone() {
    let map = scenario_map();
    let mut iter = map.inorder();
    assert_eq!(iter.len(), 7);
    iter.next();
    let fork = iter.clone();
    assert_eq!(iter.len(), 6);
    assert_eq!(keys_of(fork), [30, 40, 50, 60, 70, 80]);
    assert_eq!(keys_of(iter), [30, 40, 50, 60, 70, 80]);
    assert_eq!(keys_of(map.inorder()).len(), 7);
    assert_eq!(map.values().next(), Some(&"twenty"));
    assert_eq!(format!("{:?}", map.keys()), "[20, 30, 40, 50, 60, 70, 80]");
}
