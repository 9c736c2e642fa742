use super::AvlTree;

const N: i32 = 1_000;
const LARGE_N: i32 = 1_000_000;

fn keys<K: Clone + Ord>(tree: &AvlTree<K>) -> Vec<K> {
    tree.iter().cloned().collect()
}

#[test]
fn test_new() {
    let tree_i32 = AvlTree::<i32>::new();
    assert!(tree_i32.is_empty());
    assert_eq!(tree_i32.height(), 0);
    assert!(tree_i32.iter().next().is_none());
    tree_i32.check_consistency();

    let tree_string = AvlTree::<String>::default();
    assert!(tree_string.is_empty());
    tree_string.check_consistency();
}

#[test]
fn test_single_key() {
    let mut tree = AvlTree::new();
    assert!(tree.insert("Park".to_owned()));
    assert_eq!(tree.height(), 1);
    assert_eq!(tree.len(), 1);
    assert!(tree.contains("Park"));
    assert!(!tree.contains("park"));
    assert_eq!(tree.get("Park").map(String::as_str), Some("Park"));
    tree.check_consistency();
}

#[test]
fn test_rebalance() {
    {
        // Right rotation
        //     3 ->   2
        //    /      / \
        //   2      1   3
        //  /
        // 1
        let tree: AvlTree<i32> = [3, 2, 1].into_iter().collect();
        tree.check_consistency();
        assert_eq!(tree.height(), 2);
        assert_eq!(keys(&tree), [1, 2, 3]);
    }
    {
        //     3   ->     3
        //    / \        / \
        //   2   4      2   4
        //  /          /
        // 1          1
        let tree: AvlTree<i32> = [3, 2, 4, 1].into_iter().collect();
        tree.check_consistency();
        assert_eq!(tree.height(), 3);
    }
    {
        // Left-right rotation
        //   3  ->   2
        //  /       / \
        // 1       1   3
        //  \
        //   2
        let tree: AvlTree<i32> = [3, 1, 2].into_iter().collect();
        tree.check_consistency();
        assert_eq!(tree.height(), 2);
    }
    {
        // Left rotation
        // 1 ->    2
        //  \     / \
        //   2   1   3
        //    \
        //     3
        let tree: AvlTree<i32> = [1, 2, 3].into_iter().collect();
        tree.check_consistency();
        assert_eq!(tree.height(), 2);
    }
    {
        // Right-left rotation
        // 1   ->  2
        //  \     / \
        //   3   1   3
        //  /
        // 2
        let tree: AvlTree<i32> = [1, 3, 2].into_iter().collect();
        tree.check_consistency();
        assert_eq!(tree.height(), 2);
    }
    {
        // Rotation below the root
        //     4         4
        //    / \       / \
        //   2   5 ->  2   6
        //  / \   \   / \ / \
        // 1   3   6 1  3 5  7
        //          \
        //           7
        let tree: AvlTree<i32> = [4, 2, 5, 1, 3, 6, 7].into_iter().collect();
        tree.check_consistency();
        assert_eq!(tree.height(), 3);
        assert_eq!(keys(&tree), [1, 2, 3, 4, 5, 6, 7]);
    }
}

#[test]
fn test_location_names() {
    let mut tree = AvlTree::new();
    for name in ["Mall", "Airport", "Park", "School"] {
        assert!(tree.insert(name.to_owned()));
        tree.check_consistency();
    }
    assert_eq!(keys(&tree), ["Airport", "Mall", "Park", "School"]);

    // Exact matches only: prefixes and case variants are distinct keys.
    assert!(!tree.insert("Mall".to_owned()));
    assert!(tree.insert("Mal".to_owned()));
    assert!(tree.insert("mall".to_owned()));
    assert_eq!(
        keys(&tree),
        ["Airport", "Mal", "Mall", "Park", "School", "mall"]
    );
    tree.check_consistency();
}

#[test]
fn test_insert() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();
    values.sort();
    values.dedup();

    let mut tree = AvlTree::new();
    for value in &values {
        assert!(tree.insert(*value));
        tree.check_consistency();
    }
    assert!(tree.len() == values.len());

    for value in &values {
        assert!(!tree.insert(*value));
    }
    assert!(tree.len() == values.len());
    tree.check_consistency();
}

#[test]
fn test_insert_sorted_range() {
    let mut tree = AvlTree::new();
    for value in 0..N {
        assert!(tree.insert(value));
        tree.check_consistency();
    }
    assert!(tree.len() == N as usize);
    // 1.44 * log2(n) bounds the height of an AVL tree
    assert!(tree.height() <= 15);
    assert!(tree.get(&-42).is_none());
}

#[test]
fn test_insert_shuffled_range() {
    use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

    let mut values: Vec<i32> = (0..N).collect();
    let mut rng = StdRng::seed_from_u64(0);
    values.shuffle(&mut rng);

    let mut tree = AvlTree::new();
    for value in &values {
        assert!(tree.insert(*value));
        tree.check_consistency();
    }
    assert!(tree.len() == values.len());

    for value in &values {
        assert!(!tree.insert(*value));
    }
    assert!(tree.len() == values.len());
}

#[test]
fn test_random_strings() {
    use rand::{distributions::Alphanumeric, rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut tree = AvlTree::new();
    let mut values = Vec::new();
    for _ in 0..N {
        let len = rng.gen_range(1..4);
        let value: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect();
        tree.insert(value.clone());
        values.push(value);
    }
    tree.check_consistency();

    values.sort();
    values.dedup();
    assert_eq!(keys(&tree), values);
}

#[test]
fn test_get() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();

    let mut tree = AvlTree::new();
    assert!(tree.get(&42).is_none());
    for value in &values {
        tree.insert(*value);
    }

    for value in &values {
        assert_eq!(tree.get(value), Some(value));
        assert!(tree.contains(value));
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
        tree.insert(*value);
    }
    assert!(!tree.is_empty());
    assert!(tree.len() == values.len());

    tree.clear();
    assert!(tree.is_empty());
    assert!(tree.len() == 0);
    assert_eq!(tree.height(), 0);

    for value in &values {
        assert!(tree.insert(*value));
    }
    assert!(tree.len() == values.len());
    tree.check_consistency();
}

#[test]
fn test_iter() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();

    let tree: AvlTree<i32> = values.iter().copied().collect();

    values.sort();
    values.dedup();

    let mut tree_iter = tree.iter();
    assert_eq!(tree_iter.len(), values.len());
    for value in &values {
        assert_eq!(tree_iter.next(), Some(value));
    }
    assert!(tree_iter.next().is_none());
    assert!(tree_iter.next().is_none());

    // Restartable
    let mut value_iter = values.iter();
    for key in &tree {
        assert_eq!(Some(key), value_iter.next());
    }
    assert!(value_iter.next().is_none());

    let iter = tree.iter();
    let cloned = iter.clone();
    assert!(iter.eq(cloned));
}

#[test]
fn test_debug() {
    let tree: AvlTree<&str> = ["b", "c", "a"].into_iter().collect();
    assert_eq!(format!("{tree:?}"), r#"{"a", "b", "c"}"#);
}

#[test]
fn test_drop_owned_keys() {
    use std::rc::Rc;

    let key = Rc::new(7);
    {
        let mut tree = AvlTree::new();
        for _ in 0..3 {
            tree.insert(Rc::clone(&key));
        }
        assert_eq!(tree.len(), 1);
        assert_eq!(Rc::strong_count(&key), 2);
    }
    assert_eq!(Rc::strong_count(&key), 1);
}

#[test]
#[ignore]
fn test_insert_large() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);

    let mut tree = AvlTree::new();
    for value in (0..LARGE_N).map(|_| rng.gen_range(0..LARGE_N)) {
        tree.insert(value);
    }
    tree.check_consistency();
}
