use pretty_assertions::assert_eq;

use osrb_tree::{Error, OSRBTreeMap, TraversalOrder};

/// Keys `A`..`K` (no `J`) with values counting down from 10, inserted in key order.
fn letters() -> OSRBTreeMap<&'static str, i32> {
    let _ = simplelog::TestLogger::init(simplelog::LevelFilter::Trace, simplelog::Config::default());

    let keys = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "K"];
    let mut map = OSRBTreeMap::new();
    for (key, value) in keys.into_iter().zip((1..=10).rev()) {
        assert_eq!(map.insert(key, value), None);
    }
    map.assert_invariants();
    map
}

#[test]
fn rank_select_and_inorder() {
    let map = letters();

    assert_eq!(map.len(), 10);
    assert_eq!(map.rank("C"), 3);
    assert_eq!(map.select(3), Ok(&"C"));
    assert_eq!(map.get("C"), Some(&8));
    assert_eq!(map.display_keys(TraversalOrder::Inorder).to_string(), "A B C D E F G H I K");
}

#[test]
fn tree_shape_after_inserts() {
    let map = letters();

    assert_eq!(map.display_keys(TraversalOrder::Preorder).to_string(), "D B A C F E H G I K");
    assert_eq!(map.display_keys(TraversalOrder::Postorder).to_string(), "A C B E G K I H F D");
    assert_eq!(map.display_smallest(3).to_string(), "A B C");
}

#[test]
fn remove_two_child_root() {
    let mut map = letters();

    assert_eq!(map.remove("D"), Some(7));
    map.assert_invariants();

    assert_eq!(map.len(), 9);
    assert_eq!(map.display_keys(TraversalOrder::Inorder).to_string(), "A B C E F G H I K");
    assert_eq!(map.display_keys(TraversalOrder::Preorder).to_string(), "F C B A E H G I K");
    assert_eq!(map.rank("G"), 6);
    assert_eq!(map.rank("D"), 0);
    assert_eq!(map.select(4), Ok(&"E"));
}

#[test]
fn remove_absent_key_leaves_tree_unchanged() {
    let mut map = letters();
    let before = map.clone();

    assert_eq!(map.remove("J"), None);
    assert_eq!(map, before);
    assert_eq!(
        map.display_keys(TraversalOrder::Preorder).to_string(),
        before.display_keys(TraversalOrder::Preorder).to_string()
    );
}

#[test]
fn neighbours_in_letters_tree() {
    let map = letters();

    assert_eq!(map.successor("C"), Some(&"D"));
    assert_eq!(map.predecessor("C"), Some(&"B"));
    assert_eq!(map.successor("I"), Some(&"K"));
    assert_eq!(map.successor("K"), None);
    assert_eq!(map.predecessor("A"), None);
    assert_eq!(map.successor("J"), None);
}

#[test]
fn deep_copy_survives_emptying_the_copy() {
    let original = letters();
    let mut copy = original.clone();

    let keys: Vec<&str> = copy.keys().copied().collect();
    for key in keys {
        assert!(copy.remove(key).is_some());
        copy.assert_invariants();
    }

    assert!(copy.is_empty());
    assert_eq!(original.len(), 10);
    assert_eq!(original.display_keys(TraversalOrder::Inorder).to_string(), "A B C D E F G H I K");
    assert_eq!(original.display_keys(TraversalOrder::Preorder).to_string(), "D B A C F E H G I K");
}

#[test]
fn clone_from_replaces_contents() {
    let source = letters();
    let mut target = OSRBTreeMap::from([("Z", 0)]);

    target.clone_from(&source);
    assert_eq!(target, source);
    assert_eq!(target.get("Z"), None);
}

#[test]
fn duplicate_insert_overwrites_without_restructuring() {
    let mut map = letters();
    let shape = map.display_keys(TraversalOrder::Preorder).to_string();

    assert_eq!(map.insert("E", 60), Some(6));
    assert_eq!(map.try_insert("E", 600), Err(Error::DuplicateKey));

    assert_eq!(map.get("E"), Some(&60));
    assert_eq!(map.len(), 10);
    assert_eq!(map.rank("E"), 5);
    assert_eq!(map.display_keys(TraversalOrder::Preorder).to_string(), shape);
}

#[test]
fn select_out_of_range_is_reported() {
    let map = letters();

    assert_eq!(map.select(0), Err(Error::RankOutOfRange { rank: 0, len: 10 }));
    assert_eq!(map.select(11), Err(Error::RankOutOfRange { rank: 11, len: 10 }));
    assert_eq!(
        map.select(11).unwrap_err().to_string(),
        "rank 11 is out of range for a map of 10 entries (expected 1..=10)"
    );
}

#[test]
fn ascending_integers_shape() {
    let mut map: OSRBTreeMap<u32, u32> = (1..=10).map(|k| (k, k * 10)).collect();
    let preorder = |m: &OSRBTreeMap<u32, u32>| m.preorder().map(|(k, _)| *k).collect::<Vec<_>>();

    assert_eq!(preorder(&map), vec![4, 2, 1, 3, 6, 5, 8, 7, 9, 10]);
    assert_eq!(map.remove(&4), Some(40));
    assert_eq!(preorder(&map), vec![6, 3, 2, 1, 5, 8, 7, 9, 10]);
    assert_eq!(map.remove(&8), Some(80));
    assert_eq!(preorder(&map), vec![6, 3, 2, 1, 5, 9, 7, 10]);
    map.assert_invariants();
}

#[test]
fn empty_map_behaviour() {
    let mut map: OSRBTreeMap<i32, i32> = OSRBTreeMap::default();

    assert_eq!(map.get(&1), None);
    assert_eq!(map.rank(&1), 0);
    assert_eq!(map.remove(&1), None);
    assert_eq!(map.first_key_value(), None);
    assert_eq!(map.pop_last(), None);
    assert_eq!(map.display_keys(TraversalOrder::Inorder).to_string(), "");
    map.assert_invariants();
}
